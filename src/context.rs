//! Aggregate context assembly.
//!
//! Concatenates every extraction record into one text file with provenance
//! headers, in ascending index order, for downstream LLM consumption.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::writer::ExtractionRecord;

/// Errors that can occur while writing the context file.
#[derive(Debug, Error)]
pub enum ContextError {
    #[error("failed to write context file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Render the aggregate context for `records`.
///
/// Each record contributes a block of the shape:
///
/// ```text
/// ### Source: {source_path}
/// ### Snippet: {output_path}
/// {content}
///
/// ---
///
/// ```
pub fn render_context(records: &[ExtractionRecord]) -> String {
    let mut out = String::with_capacity(records.iter().map(|r| r.content.len() + 96).sum());

    for record in records {
        out.push_str(&format!("### Source: {}\n", record.source_path.display()));
        out.push_str(&format!("### Snippet: {}\n", record.output_path.display()));
        out.push_str(&record.content);
        out.push_str("\n\n---\n\n");
    }

    out
}

/// Write the aggregate context to `path`, overwriting it wholesale.
///
/// With an empty record list nothing is written and the file is left
/// untouched; the orchestrator reports that no blocks were found.
pub fn write_context(records: &[ExtractionRecord], path: &Path) -> Result<(), ContextError> {
    if records.is_empty() {
        return Ok(());
    }
    fs::write(path, render_context(records)).map_err(|source| ContextError::Write {
        path: path.to_path_buf(),
        source,
    })
}
