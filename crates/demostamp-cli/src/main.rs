//! demostamp CLI
//!
//! Backfills `createTime`/`updateTime`/`pinnedTime` (and `href`) into demo
//! conversation fixtures, reading strict JSON or a TS-like
//! `export const DEMO = {...};` module and always writing strict JSON.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use demostamp_core::{resolve_anchor, stamp_file, PatchStats, StampOptions, DEFAULT_NOW};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "demostamp")]
#[command(
    author,
    version,
    about = "Add coherent createTime/updateTime to demo data (JSON or TS-like literal)"
)]
struct Cli {
    /// Input file (.json or TS-like object literal)
    input: PathBuf,
    /// Output JSON file
    output: PathBuf,
    /// Fixed anchor instant (ISO-8601). Pass an empty string to use the current time.
    #[arg(long, default_value = DEFAULT_NOW)]
    now: String,
    /// Overwrite existing createTime/updateTime/pinnedTime if present
    #[arg(long)]
    overwrite: bool,
    /// Suppress progress output on stdout
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let now = resolve_anchor(Some(cli.now.as_str()))?;
    let opts = StampOptions {
        now,
        overwrite: cli.overwrite,
    };

    if !cli.quiet {
        println!("{} {}", "Stamping".green().bold(), cli.input.display());
    }
    tracing::debug!(%now, overwrite = cli.overwrite, "resolved anchor");

    let stats = stamp_file(&cli.input, &cli.output, &opts)
        .with_context(|| format!("failed to stamp `{}`", cli.input.display()))?;

    if !cli.quiet {
        println!("  {} {}", "→".cyan(), cli.output.display());
        println!("  {}", summary(&stats));
    }
    Ok(())
}

fn summary(stats: &PatchStats) -> String {
    format!(
        "items={} patched={} skipped={} href={} gizmoId={} createTime={} updateTime={} pinnedTime={}",
        stats.visited,
        stats.patched(),
        stats.skipped,
        stats.href_filled,
        stats.gizmo_normalized,
        stats.create_written,
        stats.update_written,
        stats.pinned_written,
    )
}
