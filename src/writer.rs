//! Block persistence and run-global numbering.
//!
//! A [`BlockWriter`] is created once per pipeline run and owns the write
//! counter as explicit per-run state, so separate runs can never interfere
//! with one another. Filenames follow the fixed pattern `tikz_{N}.tex`,
//! where `N` is the 1-based position in the run-wide write sequence.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

/// Errors that can occur while persisting blocks.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {path}: {source}")]
    WriteBlock {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Metadata for one written block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionRecord {
    /// Path of the file the block was extracted from, as supplied by the caller.
    pub source_path: PathBuf,
    /// Path of the written block file.
    pub output_path: PathBuf,
    /// 1-based position in the run-wide write sequence.
    pub index: usize,
    /// The exact extracted span, delimiters included.
    pub content: String,
}

/// Writes extracted blocks to the output root and produces their records.
///
/// In dry-run mode no filesystem side effects occur, but counter values are
/// still consumed and the records a real run would produce are returned, so
/// reporting and context assembly reflect the real outcome.
#[derive(Debug)]
pub struct BlockWriter {
    out_dir: PathBuf,
    dry_run: bool,
    next_index: usize,
}

impl BlockWriter {
    /// Create a writer targeting `out_dir`. The counter starts at 1.
    pub fn new(out_dir: impl Into<PathBuf>, dry_run: bool) -> Self {
        Self {
            out_dir: out_dir.into(),
            dry_run,
            next_index: 1,
        }
    }

    /// Number of blocks written (or, in dry-run mode, accounted for) so far.
    pub fn blocks_written(&self) -> usize {
        self.next_index - 1
    }

    /// Persist one block and return its record.
    ///
    /// Creates the output root recursively if absent (idempotent) and writes
    /// the block's exact content as UTF-8, overwriting any same-named file.
    /// The counter only advances on success, so indices of produced records
    /// stay contiguous even after a failed write.
    pub fn write_block(
        &mut self,
        block: &str,
        source: &Path,
    ) -> Result<ExtractionRecord, WriteError> {
        let index = self.next_index;
        let output_path = self.out_dir.join(format!("tikz_{index}.tex"));

        if !self.dry_run {
            fs::create_dir_all(&self.out_dir).map_err(|source| WriteError::CreateDir {
                path: self.out_dir.clone(),
                source,
            })?;
            fs::write(&output_path, block).map_err(|source| WriteError::WriteBlock {
                path: output_path.clone(),
                source,
            })?;
        }

        self.next_index += 1;
        Ok(ExtractionRecord {
            source_path: source.to_path_buf(),
            output_path,
            index,
            content: block.to_string(),
        })
    }

    /// Persist an ordered sequence of blocks from one source file.
    ///
    /// Stops at the first failed write; records for blocks written before
    /// the failure are lost to the caller, so callers that want partial
    /// results should drive [`write_block`](Self::write_block) directly.
    pub fn write_blocks(
        &mut self,
        blocks: &[&str],
        source: &Path,
    ) -> Result<Vec<ExtractionRecord>, WriteError> {
        let mut records = Vec::with_capacity(blocks.len());
        for block in blocks {
            records.push(self.write_block(block, source)?);
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const BLOCK_A: &str = "\\begin{tikzpicture}\\draw (0,0) -- (1,1);\\end{tikzpicture}";
    const BLOCK_B: &str = "\\begin{tikzpicture}[scale=2]\\draw (0,0) circle (1);\\end{tikzpicture}";

    #[test]
    fn test_write_block_names_and_content() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("tikz");
        let mut writer = BlockWriter::new(&out, false);

        let record = writer.write_block(BLOCK_A, Path::new("src/a.tex")).unwrap();

        assert_eq!(record.index, 1);
        assert_eq!(record.source_path, Path::new("src/a.tex"));
        assert_eq!(record.output_path, out.join("tikz_1.tex"));
        assert_eq!(fs::read_to_string(&record.output_path).unwrap(), BLOCK_A);
    }

    #[test]
    fn test_counter_spans_source_files() {
        let dir = TempDir::new().unwrap();
        let mut writer = BlockWriter::new(dir.path().join("out"), false);

        let first = writer
            .write_blocks(&[BLOCK_A, BLOCK_B], Path::new("a.tex"))
            .unwrap();
        let second = writer.write_blocks(&[BLOCK_A], Path::new("b.md")).unwrap();

        let indices: Vec<_> = first.iter().chain(&second).map(|r| r.index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
        assert_eq!(writer.blocks_written(), 3);
        assert!(second[0].output_path.ends_with("tikz_3.tex"));
    }

    #[test]
    fn test_output_dir_created_recursively() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("deeply/nested/out");
        let mut writer = BlockWriter::new(&out, false);

        writer.write_block(BLOCK_A, Path::new("a.tex")).unwrap();

        assert!(out.join("tikz_1.tex").is_file());
    }

    #[test]
    fn test_dry_run_consumes_counter_without_writing() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("tikz");
        let mut writer = BlockWriter::new(&out, true);

        let records = writer
            .write_blocks(&[BLOCK_A, BLOCK_B], Path::new("a.tex"))
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].index, 2);
        assert_eq!(records[1].output_path, out.join("tikz_2.tex"));
        assert!(!out.exists());
    }

    #[test]
    fn test_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().to_path_buf();
        fs::write(out.join("tikz_1.tex"), "stale").unwrap();

        let mut writer = BlockWriter::new(&out, false);
        writer.write_block(BLOCK_A, Path::new("a.tex")).unwrap();

        assert_eq!(fs::read_to_string(out.join("tikz_1.tex")).unwrap(), BLOCK_A);
    }
}
