//! zonescan CLI - partition table inspection for disk images
//!
//! Prints the MBR or GPT partition table of an image file, or the same report
//! as JSON with `--json`.

mod render;

use anyhow::{Context, Result};
use clap::Parser;
use render::{write_json, write_report, RenderOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;
use zonescan_core::{validate_file_path, AnalysisReport};
use zonescan_pipeline::{ImageSource, SourceConfig};
use zonescan_zones::{analyze, analyze_stream};

#[derive(Parser)]
#[command(name = "zonescan")]
#[command(about = "Inspect MBR and GPT partition tables in disk images", long_about = None)]
#[command(version)]
struct Cli {
    /// Disk image file
    image: PathBuf,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Read the image through buffered I/O instead of memory mapping
    #[arg(long)]
    no_mmap: bool,

    /// Show type and unique GUIDs of GPT partitions
    #[arg(long)]
    guids: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the report
    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = SourceConfig {
        use_mmap: !cli.no_mmap,
        ..SourceConfig::default()
    };
    let report = analyze_path(&cli.image, config)?;

    let mut out = io::stdout().lock();
    if cli.json {
        write_json(&mut out, &report)?;
    } else if report.is_success() {
        write_report(&mut out, &report, RenderOptions { show_guids: cli.guids })?;
    }
    out.flush()?;

    if let Some(error) = report.error() {
        anyhow::bail!("{}", error);
    }

    Ok(())
}

/// Open the image at `path` and analyse it
///
/// The report is labelled with `path` as given on the command line.
fn analyze_path(path: &Path, config: SourceConfig) -> Result<AnalysisReport> {
    let label = path.display().to_string();
    let canonical = validate_file_path(&path.to_string_lossy())
        .with_context(|| format!("cannot open {}", label))?;

    let source = ImageSource::open(&canonical, config.clone())
        .with_context(|| format!("failed to read {}", label))?;
    tracing::info!(kind = source.identify(), bytes = source.len(), "analysing {}", label);

    let report = match source {
        ImageSource::Mapped(image) => analyze(image.prefix(config.max_capture), &label),
        ImageSource::Stream { mut file, .. } => analyze_stream(&mut file, &label, config.max_capture),
    };

    Ok(report)
}
