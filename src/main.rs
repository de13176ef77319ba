//! dupesweep - find exact duplicates and reclaim disk space.
//!
//! Usage:
//!   dsweep scan [PATH]       Scan for files and exact duplicates
//!   dsweep sizes [PATH]      Directory size breakdown
//!   dsweep delete <PATH>     Delete a file and record it in the ledger
//!   dsweep stats             Cumulative deletion statistics
//!   dsweep --help            Show help

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result};

use dupesweep_analyze::DirSizeAnalyzer;
use dupesweep_core::format_size;
use dupesweep_ops::{DeletionLedger, delete_file};
use dupesweep_scan::{FileCatalog, ScanConfig, Scanner};

/// Default ledger location, next to the working directory.
const DEFAULT_LEDGER: &str = "deletion_stats.json";

#[derive(Parser)]
#[command(
    name = "dsweep",
    version,
    about = "Exact-duplicate detection and directory size analysis",
    long_about = "dupesweep scans a directory tree, fingerprints file content, \
                  groups exact duplicates, breaks down directory sizes, and \
                  keeps a durable ledger of everything deleted through it."
)]
struct Cli {
    /// Ledger file for cumulative deletion statistics
    #[arg(long, global = true, default_value = DEFAULT_LEDGER)]
    ledger: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan a directory and report files plus exact-duplicate groups
    Scan {
        /// Path to scan
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Descend into subdirectories
        #[arg(short, long)]
        recursive: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Break down a directory's size by subdirectory
    Sizes {
        /// Directory to analyze
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Delete a file and record the deletion in the ledger
    Delete {
        /// File to delete
        path: PathBuf,
    },

    /// Show cumulative deletion statistics
    Stats {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Scan {
            path,
            recursive,
            format,
        } => run_scan(&path, recursive, format),
        Command::Sizes { path, format } => run_sizes(&path, format),
        Command::Delete { path } => run_delete(&path, &cli.ledger),
        Command::Stats { format } => run_stats(&cli.ledger, format),
    }
}

/// Scan and print the file list plus exact-duplicate groups.
fn run_scan(path: &PathBuf, recursive: bool, format: OutputFormat) -> Result<()> {
    eprintln!("Scanning {}...", path.display());

    let config = ScanConfig::new(path).with_recursive(recursive);
    let catalog = Scanner::new(config).scan().context("Scan failed")?;
    let groups = catalog.group_by_fingerprint();

    match format {
        OutputFormat::Text => {
            println!();
            println!(
                " {} files, {} total",
                catalog.len(),
                format_size(catalog.total_size())
            );
            for record in catalog.records() {
                let fp = record
                    .fingerprint
                    .map(|f| f.hex_prefix(16))
                    .unwrap_or_else(|| "----------------".to_string());
                println!(
                    "   {:>10}  {}  {}",
                    format_size(record.size),
                    fp,
                    record.path.display()
                );
            }

            println!();
            if groups.is_empty() {
                println!(" No exact duplicates found.");
            } else {
                println!(" {} exact-duplicate group(s):", groups.len());
                for (i, group) in groups.iter().enumerate() {
                    println!(
                        " Group {} ({} files, {} reclaimable)",
                        i + 1,
                        group.count(),
                        format_size(group.wasted_bytes())
                    );
                    for record in &group.records {
                        println!("   {}", record.path.display());
                    }
                }
            }

            if !catalog.warnings().is_empty() {
                println!();
                println!(" {} warning(s) during scan", catalog.warnings().len());
            }
        }
        OutputFormat::Json => {
            let out = serde_json::json!({
                "scanned_at": catalog.scanned_at,
                "files_count": catalog.len(),
                "total_size_bytes": catalog.total_size(),
                "files": catalog.records(),
                "exact_duplicates": groups,
                "warnings": catalog.warnings(),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }

    Ok(())
}

/// Print a directory size breakdown.
fn run_sizes(path: &PathBuf, format: OutputFormat) -> Result<()> {
    let summary = DirSizeAnalyzer::new()
        .summarize(path)
        .context("Size analysis failed")?;

    match format {
        OutputFormat::Text => {
            println!();
            println!(" {} - {}", summary.path.display(), summary.human_size);
            println!(" {} subdirectories:", summary.subdirectory_count);
            for dir in &summary.subdirectories {
                let marker = if dir.skipped { " (skipped)" } else { "" };
                println!("   {:>12}  {}{}", dir.human_size, dir.name, marker);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}

/// Delete a file and print the updated ledger snapshot.
fn run_delete(path: &PathBuf, ledger_path: &PathBuf) -> Result<()> {
    let mut ledger = DeletionLedger::load(ledger_path);
    // The CLI has no live catalog; deletion bookkeeping still flows
    // through the same engine call the scan layer uses.
    let mut catalog = FileCatalog::new(".");

    let stats = delete_file(path, &mut catalog, &mut ledger)
        .with_context(|| format!("Could not delete {}", path.display()))?;

    println!("Deleted {}", path.display());
    println!(
        "Total: {} file(s), {} saved",
        stats.total_files_deleted, stats.human_bytes_saved
    );

    Ok(())
}

/// Print the ledger snapshot.
fn run_stats(ledger_path: &PathBuf, format: OutputFormat) -> Result<()> {
    let ledger = DeletionLedger::load(ledger_path);
    let stats = ledger.stats();

    match format {
        OutputFormat::Text => {
            println!(" Files deleted: {}", stats.total_files_deleted);
            println!(" Space saved:   {}", stats.human_bytes_saved);
            println!(" Since:         {}", stats.created_at.to_rfc3339());
            println!(" Last updated:  {}", stats.last_updated.to_rfc3339());
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }

    Ok(())
}
