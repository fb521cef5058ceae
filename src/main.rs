//! DirScope — directory-tree storage scanner.
//!
//! Thin binary entry point. All logic lives in the `dirscope-core` crate.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use dirscope_core::model::size::format_count;
use dirscope_core::{report, Scanner};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Csv,
}

/// Walk a directory tree and report folder weights, extension buckets and
/// the largest files.
#[derive(Debug, Parser)]
#[command(name = "dirscope", version, about)]
struct Cli {
    /// Directory to scan.
    path: PathBuf,

    /// Report format written to stdout.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Log every interim progress snapshot.
    #[arg(long)]
    progress: bool,

    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialise structured logging on stderr so stdout carries only the report.
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    // An unreachable root is not fatal: the scan reports it as an error.
    let root = std::fs::canonicalize(&cli.path).unwrap_or_else(|_| cli.path.clone());

    let scanner = Scanner::new();
    let result = scanner.scan_directory_with(root, |snapshot| {
        if cli.progress && snapshot.is_scanning {
            tracing::info!(
                "{} files, {} errors, {} elapsed",
                format_count(snapshot.total_files),
                snapshot.error_count,
                snapshot.scan_duration
            );
        }
    });

    match cli.format {
        OutputFormat::Text => print!("{}", report::render_text(&result)),
        OutputFormat::Json => {
            println!("{}", report::to_json(&result).context("failed to render JSON report")?)
        }
        OutputFormat::Csv => report::write_csv(&result, std::io::stdout().lock())
            .context("failed to write CSV report")?,
    }

    Ok(())
}
