//! Extension-based file filtering.

use std::path::Path;

use thiserror::Error;

/// Extensions scanned when the caller does not supply a set.
pub const DEFAULT_EXTENSIONS: &[&str] = &[".tex", ".md", ".py"];

/// Errors from parsing a user-supplied extension list.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("extension list is empty")]
    EmptyList,

    #[error("invalid extension: {0}")]
    InvalidExtension(String),
}

/// A normalized set of file extensions.
///
/// Extensions are stored lowercased with a leading dot; inputs may omit the
/// dot and use any case. Matching against paths is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionSet {
    exts: Vec<String>,
}

impl ExtensionSet {
    /// Build a set from raw extension strings, normalizing each entry.
    /// Empty entries are dropped; duplicates collapse.
    pub fn new<I, S>(exts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for ext in exts {
            let ext = ext.as_ref().trim();
            if ext.is_empty() {
                continue;
            }
            let ext = normalize(ext);
            if !normalized.contains(&ext) {
                normalized.push(ext);
            }
        }
        Self { exts: normalized }
    }

    /// Parse a comma-separated extension list (the CLI format).
    ///
    /// Each entry must have at least one character after the dot, drawn from
    /// alphanumerics, `_`, and `-`.
    pub fn parse(list: &str) -> Result<Self, FilterError> {
        let set = Self::new(list.split(','));
        if set.is_empty() {
            return Err(FilterError::EmptyList);
        }
        for ext in &set.exts {
            let body = &ext[1..];
            if body.is_empty()
                || !body.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            {
                return Err(FilterError::InvalidExtension(ext.clone()));
            }
        }
        Ok(set)
    }

    /// Whether `path` has an extension in this set (case-insensitive).
    pub fn matches(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        self.exts.iter().any(|e| e[1..].eq_ignore_ascii_case(ext))
    }

    /// Normalized extensions, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.exts.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.exts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exts.is_empty()
    }
}

impl Default for ExtensionSet {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSIONS.iter().copied())
    }
}

fn normalize(ext: &str) -> String {
    let lower = ext.to_lowercase();
    if lower.starts_with('.') {
        lower
    } else {
        format!(".{lower}")
    }
}
