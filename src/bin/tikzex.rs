//! Tikzex CLI - extract TikZ picture environments into LLM-ready context.

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use serde::Serialize;
use tikzex::builder::Tikzex;
use tikzex::errors::{exit_code, TikzexError};
use tikzex::filter::ExtensionSet;
use tikzex::walker::{discover_files, WalkError, WalkOptions};
use tikzex::writer::ExtractionRecord;

#[derive(Parser)]
#[command(name = "tikzex")]
#[command(about = "Extract TikZ picture environments into LLM-ready context")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract TikZ blocks and build the aggregate context file
    Extract {
        /// Source directory to scan
        #[arg(short, long, default_value = ".")]
        src: PathBuf,

        /// Output directory for extracted .tex files
        #[arg(short, long, default_value = "tikz")]
        out: PathBuf,

        /// Comma-separated list of file extensions to scan
        #[arg(short, long, default_value = ".tex,.md,.py")]
        ext: String,

        /// Path for the aggregate context file
        #[arg(short, long, default_value = "tikz_context.txt")]
        context_file: PathBuf,

        /// Preview extraction without writing files
        #[arg(short, long)]
        dry_run: bool,

        /// Show per-file processing detail
        #[arg(short, long)]
        verbose: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Skip hidden files and directories
        #[arg(long)]
        skip_hidden: bool,

        /// Maximum directory depth
        #[arg(long)]
        max_depth: Option<usize>,
    },

    /// List the files a run would scan
    Files {
        /// Source directory to scan
        #[arg(short, long, default_value = ".")]
        src: PathBuf,

        /// Comma-separated list of file extensions to scan
        #[arg(short, long, default_value = ".tex,.md,.py")]
        ext: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Skip hidden files and directories
        #[arg(long)]
        skip_hidden: bool,

        /// Maximum directory depth
        #[arg(long)]
        max_depth: Option<usize>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();
    let json_output = json_flag(&cli.command);

    let result = match cli.command {
        Commands::Extract {
            src,
            out,
            ext,
            context_file,
            dry_run,
            verbose,
            json,
            skip_hidden,
            max_depth,
        } => run_extract(
            src,
            out,
            ext,
            context_file,
            dry_run,
            verbose,
            json,
            skip_hidden,
            max_depth,
        ),
        Commands::Files {
            src,
            ext,
            json,
            skip_hidden,
            max_depth,
        } => run_files(src, ext, json, skip_hidden, max_depth),
        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "tikzex", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        if json_output {
            #[derive(Serialize)]
            struct ErrorOutput {
                error: String,
            }

            let payload = ErrorOutput {
                error: e.to_string(),
            };

            let json = serde_json::to_string(&payload)
                .unwrap_or_else(|_| "{\"error\":\"serialization failed\"}".to_string());
            eprintln!("{json}");
        } else {
            eprintln!("error: {}", e);
        }
        std::process::exit(exit_code(&e));
    }
}

fn json_flag(cmd: &Commands) -> bool {
    match cmd {
        Commands::Extract { json, .. } => *json,
        Commands::Files { json, .. } => *json,
        Commands::Completions { .. } => false,
    }
}

// --- Extract command ---

#[derive(Serialize)]
struct SkipInfo {
    path: String,
    reason: String,
}

#[derive(Serialize)]
struct ExtractOutput<'a> {
    dry_run: bool,
    files_discovered: usize,
    files_with_blocks: usize,
    total_blocks: usize,
    total_tokens: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    context_file: Option<String>,
    skipped: Vec<SkipInfo>,
    records: &'a [ExtractionRecord],
}

#[allow(clippy::too_many_arguments)]
fn run_extract(
    src: PathBuf,
    out: PathBuf,
    ext: String,
    context_file: PathBuf,
    dry_run: bool,
    verbose: bool,
    json: bool,
    skip_hidden: bool,
    max_depth: Option<usize>,
) -> Result<(), TikzexError> {
    let extensions = ExtensionSet::parse(&ext)?;

    let mut builder = Tikzex::new(&src)
        .output_dir(&out)
        .context_file(&context_file)
        .extensions(extensions.clone())
        .dry_run(dry_run)
        .skip_hidden(skip_hidden);
    if let Some(depth) = max_depth {
        builder = builder.max_depth(depth);
    }

    let result = builder.run()?;

    if json {
        let output = ExtractOutput {
            dry_run,
            files_discovered: result.files_discovered,
            files_with_blocks: result.source_files().len(),
            total_blocks: result.total_blocks(),
            total_tokens: result.total_tokens(),
            context_file: result
                .context_path
                .as_ref()
                .map(|p| p.display().to_string()),
            skipped: result
                .skipped
                .iter()
                .map(|s| SkipInfo {
                    path: s.path.display().to_string(),
                    reason: s.reason.clone(),
                })
                .collect(),
            records: &result.records,
        };
        let json = serde_json::to_string_pretty(&output)
            .map_err(|e| TikzexError::Io(std::io::Error::other(e.to_string())))?;
        println!("{json}");
        return Ok(());
    }

    if verbose {
        println!("Source directory: {}", src.display());
        println!("Output directory: {}", out.display());
        println!("Context file: {}", context_file.display());
        let exts: Vec<_> = extensions.iter().collect();
        println!("Extensions: {}", exts.join(", "));
        println!();

        for source in result.source_files() {
            let records: Vec<_> = result.records_for(source).collect();
            println!("{}: {} block(s)", source.display(), records.len());
            for record in records {
                let name = record
                    .output_path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                if dry_run {
                    println!("  Would create: {name}");
                } else {
                    println!("  Created: {name}");
                }
            }
        }

        if !result.skipped.is_empty() {
            println!();
            println!("Skipped files:");
            for skip in &result.skipped {
                println!("  {}: {}", skip.path.display(), skip.reason);
            }
        }
        println!();
    }

    let processed = result.source_files().len();
    if dry_run {
        println!("DRY RUN SUMMARY:");
        println!(
            "Would process {} of {} discovered files",
            processed, result.files_discovered
        );
        println!("Would extract {} TikZ blocks", result.total_blocks());
    } else {
        println!("EXTRACTION SUMMARY:");
        println!(
            "Processed {} of {} discovered files",
            processed, result.files_discovered
        );
        println!("Extracted {} TikZ blocks", result.total_blocks());
    }

    if !result.skipped.is_empty() {
        println!("Skipped {} files", result.skipped.len());
        if !verbose {
            println!("Use --verbose to see skip details.");
        }
    }

    if result.is_empty() {
        println!();
        if result.files_discovered == 0 {
            println!("No files found matching the specified extensions.");
            println!("Searched in: {}", src.display());
        } else {
            println!("No TikZ blocks found - nothing written.");
        }
        return Ok(());
    }

    match &result.context_path {
        Some(path) => println!(
            "Created context file: {} (~{} tokens)",
            path.display(),
            result.total_tokens()
        ),
        None => println!("Would create context file: {}", context_file.display()),
    }

    Ok(())
}

// --- Files command ---

fn run_files(
    src: PathBuf,
    ext: String,
    json: bool,
    skip_hidden: bool,
    max_depth: Option<usize>,
) -> Result<(), TikzexError> {
    let extensions = ExtensionSet::parse(&ext)?;
    let options = WalkOptions {
        max_depth,
        skip_hidden,
        follow_symlinks: false,
    };

    let discovered = match discover_files(&src, &extensions, &options) {
        Ok(d) => d,
        Err(WalkError::NotFound { path }) => return Err(TikzexError::SourceNotFound(path)),
        Err(WalkError::NotADirectory { path }) => {
            return Err(TikzexError::SourceNotADirectory(path))
        }
        Err(e) => return Err(e.into()),
    };

    if json {
        #[derive(Serialize)]
        struct FilesOutput {
            count: usize,
            files: Vec<String>,
            errors: Vec<String>,
        }

        let output = FilesOutput {
            count: discovered.files.len(),
            files: discovered
                .files
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            errors: discovered.errors.iter().map(|e| e.to_string()).collect(),
        };
        let json = serde_json::to_string_pretty(&output)
            .map_err(|e| TikzexError::Io(std::io::Error::other(e.to_string())))?;
        println!("{json}");
    } else {
        for file in &discovered.files {
            let relative = file.strip_prefix(&src).unwrap_or(file);
            println!("{}", relative.display());
        }
        for error in &discovered.errors {
            eprintln!("warning: {error}");
        }
        println!("Found {} files", discovered.files.len());
    }

    Ok(())
}
