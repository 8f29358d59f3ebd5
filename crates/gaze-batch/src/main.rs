//! `gaze-classify`: classify synchronized eye-tracking recordings.

use anyhow::Context;
use clap::Parser;
use gaze_batch::{pending_recordings, BatchConfig, BatchRunner};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "gaze-classify", version, about = "I-VT eye-state classification of gaze recordings")]
struct Cli {
    /// Configuration file (TOML, YAML or JSON); `GAZE_*` variables override it
    #[arg(short, long)]
    config: Option<String>,

    /// Directory of synchronized recordings
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Directory for annotated recordings
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Worker threads (0 = one per core)
    #[arg(short, long)]
    workers: Option<usize>,

    /// Write a JSON summary next to every annotated table
    #[arg(long)]
    summaries: bool,

    /// List pending recordings and exit
    #[arg(long)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gaze_ivt=info,gaze_batch=info".into()),
        )
        .init();

    let mut config = BatchConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(input) = cli.input {
        config.input_dir = input;
    }
    if let Some(output) = cli.output {
        config.output_dir = output;
    }
    if let Some(workers) = cli.workers {
        config.workers = workers;
    }
    config.write_summaries |= cli.summaries;
    config.validate()?;

    if cli.dry_run {
        for path in pending_recordings(&config.input_dir, &config.output_dir)? {
            println!("{}", path.display());
        }
        return Ok(());
    }

    let runner = BatchRunner::new(config)?;
    let report = runner.run()?;

    info!(
        processed = report.processed.len(),
        skipped = report.skipped,
        failed = report.failed.len(),
        "done"
    );

    if !report.is_success() {
        for (id, error) in &report.failed {
            eprintln!("{id}: {error}");
        }
        anyhow::bail!("{} recording(s) failed", report.failed.len());
    }
    Ok(())
}
