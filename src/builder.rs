//! Fluent pipeline API.
//!
//! [`Tikzex`] owns the fully-resolved configuration for one extraction run
//! (source root, output root, extension set, context-file path, dry-run
//! flag) and drives discovery, scanning, writing, and context assembly.

use std::fs;
use std::path::{Path, PathBuf};

use crate::context::write_context;
use crate::errors::TikzexError;
use crate::filter::ExtensionSet;
use crate::scan::extract_blocks;
use crate::tokens::count_tokens;
use crate::walker::{discover_files, WalkError, WalkOptions};
use crate::writer::{BlockWriter, ExtractionRecord};

/// Default output directory for block files.
pub const DEFAULT_OUTPUT_DIR: &str = "tikz";

/// Default path for the aggregate context file.
pub const DEFAULT_CONTEXT_FILE: &str = "tikz_context.txt";

/// Builder for one extraction run.
///
/// # Examples
///
/// ```no_run
/// use tikzex::builder::Tikzex;
///
/// let result = Tikzex::new("./thesis")
///     .output_dir("./tikz")
///     .context_file("./tikz_context.txt")
///     .run()
///     .unwrap();
///
/// println!("extracted {} blocks", result.total_blocks());
/// ```
pub struct Tikzex {
    src: PathBuf,
    out_dir: PathBuf,
    context_file: PathBuf,
    extensions: ExtensionSet,
    dry_run: bool,
    walk_options: WalkOptions,
}

impl Tikzex {
    /// Create a builder for the given source root with default settings.
    pub fn new(src: impl Into<PathBuf>) -> Self {
        Self {
            src: src.into(),
            out_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            context_file: PathBuf::from(DEFAULT_CONTEXT_FILE),
            extensions: ExtensionSet::default(),
            dry_run: false,
            walk_options: WalkOptions::default(),
        }
    }

    /// Set the output directory for block files.
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.out_dir = dir.into();
        self
    }

    /// Set the path of the aggregate context file.
    pub fn context_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.context_file = path.into();
        self
    }

    /// Set the extensions to scan.
    pub fn extensions(mut self, extensions: ExtensionSet) -> Self {
        self.extensions = extensions;
        self
    }

    /// Preview the run without touching the filesystem.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Skip hidden files and directories during discovery.
    pub fn skip_hidden(mut self, skip: bool) -> Self {
        self.walk_options.skip_hidden = skip;
        self
    }

    /// Follow symbolic links during discovery.
    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.walk_options.follow_symlinks = follow;
        self
    }

    /// Set maximum directory depth for discovery.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.walk_options.max_depth = Some(depth);
        self
    }

    /// Run the pipeline: discover, scan, write, aggregate.
    ///
    /// Per-file read and write failures are recorded as skips and never
    /// abort the run; the only fatal conditions are a missing source root
    /// and a context file that cannot be written at the end. A write
    /// failure abandons that file's remaining blocks and moves on to the
    /// next file, keeping records for blocks already written.
    pub fn run(self) -> Result<TikzexResult, TikzexError> {
        let discovered = match discover_files(&self.src, &self.extensions, &self.walk_options) {
            Ok(d) => d,
            Err(WalkError::NotFound { path }) => return Err(TikzexError::SourceNotFound(path)),
            Err(WalkError::NotADirectory { path }) => {
                return Err(TikzexError::SourceNotADirectory(path))
            }
            Err(e) => return Err(e.into()),
        };

        let mut skipped: Vec<SkippedFile> = discovered
            .errors
            .into_iter()
            .map(|e| SkippedFile {
                path: e.path().to_path_buf(),
                reason: e.to_string(),
            })
            .collect();

        let files_discovered = discovered.files.len();
        let mut writer = BlockWriter::new(&self.out_dir, self.dry_run);
        let mut records: Vec<ExtractionRecord> = Vec::new();

        for path in discovered.files {
            let text = match fs::read_to_string(&path) {
                Ok(text) => text,
                Err(e) => {
                    skipped.push(SkippedFile {
                        path,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            let blocks = extract_blocks(&text);
            if blocks.is_empty() {
                continue;
            }

            for block in blocks {
                match writer.write_block(block, &path) {
                    Ok(record) => records.push(record),
                    Err(e) => {
                        // Abandon this file's remaining blocks, keep going.
                        skipped.push(SkippedFile {
                            path: path.clone(),
                            reason: e.to_string(),
                        });
                        break;
                    }
                }
            }
        }

        let context_path = if !records.is_empty() && !self.dry_run {
            write_context(&records, &self.context_file)?;
            Some(self.context_file)
        } else {
            None
        };

        Ok(TikzexResult {
            records,
            files_discovered,
            skipped,
            context_path,
        })
    }
}

/// A file that contributed nothing because of an error.
#[derive(Debug, Clone)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of one extraction run.
#[derive(Debug)]
pub struct TikzexResult {
    /// Records for every block written (or accounted for in dry-run mode),
    /// in ascending index order.
    pub records: Vec<ExtractionRecord>,
    /// Number of candidate files discovered.
    pub files_discovered: usize,
    /// Files skipped due to read, decode, or write errors.
    pub skipped: Vec<SkippedFile>,
    /// Where the context file was written, if it was.
    pub context_path: Option<PathBuf>,
}

impl TikzexResult {
    /// Total number of blocks extracted.
    pub fn total_blocks(&self) -> usize {
        self.records.len()
    }

    /// Whether the run found nothing.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Source files that contributed blocks, in first-appearance order.
    pub fn source_files(&self) -> Vec<&Path> {
        let mut sources: Vec<&Path> = Vec::new();
        for record in &self.records {
            let path = record.source_path.as_path();
            if !sources.contains(&path) {
                sources.push(path);
            }
        }
        sources
    }

    /// Records extracted from one source file.
    pub fn records_for<'a>(
        &'a self,
        source: &'a Path,
    ) -> impl Iterator<Item = &'a ExtractionRecord> + 'a {
        self.records.iter().filter(move |r| r.source_path == source)
    }

    /// Approximate token footprint of the extracted content.
    pub fn total_tokens(&self) -> usize {
        self.records.iter().map(|r| count_tokens(&r.content)).sum()
    }
}
