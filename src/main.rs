//! bench-compare CLI
//!
//! Feed it the output of repeated `cargo bench` runs:
//! ```text
//! for i in 1 2 3; do cargo bench; done | bench-compare
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info};

use bench_compare::{parser, report, Report};

/// bench-compare: keep the best time per benchmark and compare fixed pairs
#[derive(Parser, Debug)]
#[command(name = "bench-compare")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Files containing cargo bench output, read in order (default: stdin)
    #[arg(value_name = "FILE")]
    inputs: Vec<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they never mix with the report
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let registry = if cli.inputs.is_empty() {
        debug!("Reading benchmark output from stdin");
        parser::parse_from_stdin().context("Failed to parse benchmark output from stdin")?
    } else {
        parser::parse_from_files(&cli.inputs)
            .with_context(|| format!("Failed to parse benchmark output from {:?}", cli.inputs))?
    };

    info!("Collected best times for {} benchmarks", registry.len());

    let mut stdout = std::io::stdout().lock();
    if cli.json {
        let report = Report::build(registry).context("Failed to build report")?;
        report
            .write_json(&mut stdout)
            .context("Failed to write report")?;
    } else {
        report::write_text(registry, &mut stdout).context("Failed to write report")?;
    }

    Ok(())
}
