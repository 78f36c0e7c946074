//! Error types for tikzex.

use std::path::PathBuf;

use crate::context::ContextError;
use crate::filter::FilterError;
use crate::walker::WalkError;
use crate::writer::WriteError;

/// Top-level error type for tikzex operations.
#[derive(Debug, thiserror::Error)]
pub enum TikzexError {
    #[error("source not found: {0}")]
    SourceNotFound(PathBuf),

    #[error("source is not a directory: {0}")]
    SourceNotADirectory(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("walk error: {0}")]
    Walk(#[from] WalkError),

    #[error("filter error: {0}")]
    Filter(#[from] FilterError),

    #[error("write error: {0}")]
    Write(#[from] WriteError),

    #[error("context error: {0}")]
    Context(#[from] ContextError),
}

/// Map an error to its exit code.
pub fn exit_code(error: &TikzexError) -> i32 {
    match error {
        TikzexError::SourceNotFound(_) => 3,
        TikzexError::SourceNotADirectory(_) => 3,
        TikzexError::Io(_) => 1,
        TikzexError::Walk(_) => 2,
        TikzexError::Filter(_) => 4,
        TikzexError::Write(_) => 1,
        TikzexError::Context(_) => 1,
    }
}
