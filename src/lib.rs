//! Tikzex - extract TikZ picture environments into LLM-ready context.
//!
//! Tikzex walks a directory tree, pulls every complete
//! `\begin{tikzpicture}` .. `\end{tikzpicture}` span out of files with
//! matching extensions, writes each block to its own `.tex` file, and
//! assembles one aggregate context file with provenance headers suitable
//! for feeding to language models.
//!
//! # Quick Start
//!
//! ```no_run
//! use tikzex::builder::Tikzex;
//! use tikzex::filter::ExtensionSet;
//!
//! let result = Tikzex::new("./thesis")
//!     .output_dir("./tikz")
//!     .context_file("./tikz_context.txt")
//!     .extensions(ExtensionSet::new([".tex", ".md"]))
//!     .run()
//!     .unwrap();
//!
//! println!(
//!     "extracted {} blocks from {} files",
//!     result.total_blocks(),
//!     result.source_files().len()
//! );
//! ```
//!
//! # Modules
//!
//! - [`scan`] - TikZ block scanning
//! - [`filter`] - Extension-based file filtering
//! - [`walker`] - Directory traversal for source discovery
//! - [`sanitize`] - Path sanitization for flat artifact names
//! - [`writer`] - Block persistence and run-global numbering
//! - [`context`] - Aggregate context assembly
//! - [`tokens`] - Token counting for the aggregate context
//! - [`builder`] - Fluent pipeline API

pub mod builder;
pub mod context;
pub mod errors;
pub mod filter;
pub mod sanitize;
pub mod scan;
pub mod tokens;
pub mod walker;
pub mod writer;

// Re-export key types at crate root for convenience
pub use builder::{SkippedFile, Tikzex, TikzexResult, DEFAULT_CONTEXT_FILE, DEFAULT_OUTPUT_DIR};
pub use context::{render_context, write_context, ContextError};
pub use errors::TikzexError;
pub use filter::{ExtensionSet, FilterError, DEFAULT_EXTENSIONS};
pub use sanitize::sanitize_path;
pub use scan::{extract_blocks, BLOCK_CLOSE, BLOCK_OPEN};
pub use tokens::{count_tokens, count_tokens_with_encoding, Encoding};
pub use walker::{discover_files, walk, walk_with_options, WalkEntry, WalkError, WalkOptions};
pub use writer::{BlockWriter, ExtractionRecord, WriteError};
