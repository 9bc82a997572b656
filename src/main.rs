//! Command line entry point: parse flags, run the pipeline, print the report.

use anyhow::{Context, Result};
use clap::Parser;
use prodpeak::pipeline::DEFAULT_LIMIT;
use prodpeak::{find_peaks, PipelineConfig, ReportMode};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "prodpeak",
    version,
    about = "Find the products with the highest price and rating in a file."
)]
struct Args {
    /// Input file; the extension (json or csv) selects the line format
    #[arg(long, default_value = "file")]
    filename: PathBuf,

    /// Number of records being reduced at the same time (1 to 1048576)
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    limit: usize,

    /// Print product names or the maximum values
    #[arg(long, value_enum, default_value_t = ReportMode::Names)]
    report: ReportMode,

    /// Worker threads for the reduction tasks, 0 for one per core
    #[arg(long, default_value_t = 0)]
    threads: usize,
}

impl Args {
    fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            limit: self.limit,
            threads: self.threads,
            report: self.report,
        }
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let summary = find_peaks(&args.filename, &args.pipeline_config())
        .with_context(|| format!("processing {}", args.filename.display()))?;

    println!("{}", summary.report);
    Ok(())
}
