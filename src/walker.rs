//! Directory traversal for source discovery.
//!
//! Uses the `ignore` crate's walker with its standard filters disabled:
//! discovery must cover every regular file reachable under the root, hidden
//! files included, unless the caller opts out. Traversal order is not
//! guaranteed and callers must not depend on it.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use thiserror::Error;

use crate::filter::ExtensionSet;

/// Errors that can occur during directory walking.
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("source not found: {path}")]
    NotFound { path: PathBuf },

    #[error("not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("symlink loop detected: {path}")]
    SymlinkLoop { path: PathBuf },
}

impl WalkError {
    /// Path the error refers to.
    pub fn path(&self) -> &Path {
        match self {
            WalkError::NotFound { path }
            | WalkError::NotADirectory { path }
            | WalkError::PermissionDenied { path }
            | WalkError::Io { path, .. }
            | WalkError::SymlinkLoop { path } => path,
        }
    }
}

/// Options for directory walking.
#[derive(Debug, Clone, Default)]
pub struct WalkOptions {
    /// Maximum depth to recurse (None = unlimited).
    pub max_depth: Option<usize>,
    /// Follow symbolic links.
    pub follow_symlinks: bool,
    /// Skip hidden files and directories.
    pub skip_hidden: bool,
}

impl WalkOptions {
    /// Set maximum depth.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }
}

/// Entry from a directory walk.
#[derive(Debug, Clone)]
pub struct WalkEntry {
    /// Path to the entry.
    pub path: PathBuf,
    /// Whether this is a regular file (as opposed to a directory).
    pub is_file: bool,
}

/// Walk a directory tree with default options, yielding entries.
pub fn walk(root: &Path) -> impl Iterator<Item = Result<WalkEntry, WalkError>> {
    walk_with_options(root, &WalkOptions::default())
}

/// Walk a directory tree with custom options.
pub fn walk_with_options(
    root: &Path,
    options: &WalkOptions,
) -> impl Iterator<Item = Result<WalkEntry, WalkError>> {
    let root = root.to_path_buf();

    if !root.exists() {
        return either::Either::Left(std::iter::once(Err(WalkError::NotFound { path: root })));
    }

    let mut builder = WalkBuilder::new(&root);

    // Disable gitignore/hidden filtering: discovery is the complete file set.
    builder
        .standard_filters(false)
        .hidden(options.skip_hidden)
        .follow_links(options.follow_symlinks)
        .max_depth(options.max_depth);

    let walker = builder.build();

    either::Either::Right(walker.filter_map(|result| match result {
        Ok(entry) => {
            let is_file = entry.file_type().is_some_and(|ft| ft.is_file());
            Some(Ok(WalkEntry {
                path: entry.path().to_path_buf(),
                is_file,
            }))
        }
        Err(e) => Some(Err(convert_error(e)?)),
    }))
}

/// Map `ignore` errors onto [`WalkError`], dropping non-IO noise.
fn convert_error(error: ignore::Error) -> Option<WalkError> {
    match error {
        ignore::Error::WithPath { path, err } => match *err {
            ignore::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::PermissionDenied => {
                Some(WalkError::PermissionDenied { path })
            }
            ignore::Error::Io(io_err) => Some(WalkError::Io {
                path,
                source: io_err,
            }),
            _ => None,
        },
        ignore::Error::Loop { child, .. } => Some(WalkError::SymlinkLoop { path: child }),
        ignore::Error::Io(io_err) => {
            let path = PathBuf::from("<walk error>");
            if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                Some(WalkError::PermissionDenied { path })
            } else {
                Some(WalkError::Io {
                    path,
                    source: io_err,
                })
            }
        }
        _ => None,
    }
}

/// Outcome of file discovery under a source root.
#[derive(Debug)]
pub struct Discovered {
    /// Regular files whose extension matched.
    pub files: Vec<PathBuf>,
    /// Non-fatal traversal errors (permission-denied subtrees, loops).
    pub errors: Vec<WalkError>,
}

/// Discover every regular file under `root` whose extension is in `extensions`.
///
/// A missing root or a root that is not a directory is fatal; errors inside
/// the tree are collected and returned alongside the file list.
pub fn discover_files(
    root: &Path,
    extensions: &ExtensionSet,
    options: &WalkOptions,
) -> Result<Discovered, WalkError> {
    let metadata = std::fs::metadata(root).map_err(|_| WalkError::NotFound {
        path: root.to_path_buf(),
    })?;
    if !metadata.is_dir() {
        return Err(WalkError::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    let mut errors = Vec::new();

    for entry in walk_with_options(root, options) {
        match entry {
            Ok(e) if e.is_file && extensions.matches(&e.path) => files.push(e.path),
            Ok(_) => {}
            Err(e) => errors.push(e),
        }
    }

    Ok(Discovered { files, errors })
}

/// Simple Either type to avoid adding an itertools dependency.
mod either {
    pub enum Either<L, R> {
        Left(L),
        Right(R),
    }

    impl<L, R, T> Iterator for Either<L, R>
    where
        L: Iterator<Item = T>,
        R: Iterator<Item = T>,
    {
        type Item = T;

        fn next(&mut self) -> Option<Self::Item> {
            match self {
                Either::Left(l) => l.next(),
                Either::Right(r) => r.next(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_dir() -> TempDir {
        let dir = TempDir::new().unwrap();

        fs::create_dir_all(dir.path().join("chapters")).unwrap();
        fs::write(dir.path().join("chapters/intro.tex"), "intro").unwrap();
        fs::write(dir.path().join("notes.md"), "notes").unwrap();
        fs::write(dir.path().join("data.csv"), "1,2,3").unwrap();

        dir
    }

    #[test]
    fn test_walk_basic() {
        let dir = create_test_dir();

        let entries: Vec<_> = walk(dir.path()).filter_map(|r| r.ok()).collect();
        let paths: Vec<_> = entries.iter().map(|e| e.path.clone()).collect();

        assert!(paths.iter().any(|p| p.ends_with("intro.tex")));
        assert!(paths.iter().any(|p| p.ends_with("notes.md")));
        assert!(paths.iter().any(|p| p.ends_with("data.csv")));
    }

    #[test]
    fn test_walk_nonexistent() {
        let result: Vec<_> = walk(Path::new("/nonexistent/path")).collect();
        assert_eq!(result.len(), 1);
        assert!(matches!(result[0], Err(WalkError::NotFound { .. })));
    }

    #[test]
    fn test_walk_includes_hidden_by_default() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("visible.tex"), "a").unwrap();
        fs::write(dir.path().join(".hidden.tex"), "b").unwrap();

        let entries: Vec<_> = walk(dir.path()).filter_map(|r| r.ok()).collect();
        let paths: Vec<_> = entries.iter().map(|e| &e.path).collect();
        assert!(paths.iter().any(|p| p.ends_with(".hidden.tex")));

        let options = WalkOptions {
            skip_hidden: true,
            ..Default::default()
        };
        let entries: Vec<_> = walk_with_options(dir.path(), &options)
            .filter_map(|r| r.ok())
            .collect();
        let paths: Vec<_> = entries.iter().map(|e| &e.path).collect();
        assert!(!paths.iter().any(|p| p.ends_with(".hidden.tex")));
        assert!(paths.iter().any(|p| p.ends_with("visible.tex")));
    }

    #[test]
    fn test_walk_ignores_gitignore() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        fs::write(dir.path().join(".gitignore"), "*.tex").unwrap();
        fs::write(dir.path().join("kept.tex"), "kept").unwrap();

        let entries: Vec<_> = walk(dir.path()).filter_map(|r| r.ok()).collect();
        let paths: Vec<_> = entries.iter().map(|e| &e.path).collect();
        assert!(paths.iter().any(|p| p.ends_with("kept.tex")));
    }

    #[test]
    fn test_walk_max_depth() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("a/b/c")).unwrap();
        fs::write(dir.path().join("a/b/c/deep.tex"), "").unwrap();
        fs::write(dir.path().join("a/shallow.tex"), "").unwrap();

        let options = WalkOptions::default().max_depth(2);
        let entries: Vec<_> = walk_with_options(dir.path(), &options)
            .filter_map(|r| r.ok())
            .collect();

        let paths: Vec<_> = entries.iter().map(|e| &e.path).collect();
        assert!(paths.iter().any(|p| p.ends_with("shallow.tex")));
        assert!(!paths.iter().any(|p| p.ends_with("deep.tex")));
    }

    #[test]
    fn test_discover_files_filters_by_extension() {
        let dir = create_test_dir();
        let exts = ExtensionSet::new([".tex", ".md"]);

        let discovered = discover_files(dir.path(), &exts, &WalkOptions::default()).unwrap();

        assert_eq!(discovered.files.len(), 2);
        assert!(discovered.errors.is_empty());
        assert!(discovered
            .files
            .iter()
            .all(|p| p.ends_with("intro.tex") || p.ends_with("notes.md")));
    }

    #[test]
    fn test_discover_files_missing_root() {
        let exts = ExtensionSet::default();
        let result = discover_files(Path::new("/nonexistent/path"), &exts, &WalkOptions::default());
        assert!(matches!(result, Err(WalkError::NotFound { .. })));
    }

    #[test]
    fn test_discover_files_root_is_a_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("single.tex");
        fs::write(&file, "x").unwrap();

        let exts = ExtensionSet::default();
        let result = discover_files(&file, &exts, &WalkOptions::default());
        assert!(matches!(result, Err(WalkError::NotADirectory { .. })));
    }
}
