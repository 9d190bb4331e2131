use std::fs::File;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use itax_core::TaxEngine;
use itax_data::{BatchProcessor, TaxpayerLoader, write_rows};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Compute income tax for every taxpayer profile in a CSV file.
///
/// The CSV file should have the following columns:
/// - id: Identifier copied to the output
/// - gross_income: Annual gross income in rupees
/// - age: Age in whole years
/// - regime: `new` or `old` (optional, defaults to `new`)
/// - is_salaried: `true` or `false` (optional, defaults to `true`)
/// - deductions_80c: Section 80C deductions (optional)
/// - health_insurance_premium: Health insurance premium (optional)
#[derive(Parser, Debug)]
#[command(name = "itax-batch")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing taxpayer profiles
    #[arg(short, long)]
    file: PathBuf,

    /// Write results to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Compare both regimes instead of resolving each row's own regime
    #[arg(short, long, default_value_t = false)]
    compare: bool,
}

/// Logs go to stderr so stdout stays valid CSV.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();

    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open: {}", args.file.display()))?;

    let profiles = TaxpayerLoader::load(file)
        .with_context(|| format!("Failed to load profiles: {}", args.file.display()))?;

    info!(count = profiles.len(), "loaded taxpayer profiles");

    let engine = TaxEngine::default();
    let processor = BatchProcessor::new(&engine);

    let writer: Box<dyn io::Write> = match &args.output {
        Some(path) => Box::new(
            File::create(path)
                .with_context(|| format!("Failed to create: {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };

    if args.compare {
        write_rows(writer, &processor.compare_all(&profiles))
            .context("Failed to write comparison results")?;
    } else {
        write_rows(writer, &processor.resolve_all(&profiles))
            .context("Failed to write results")?;
    }

    if let Some(path) = &args.output {
        info!(path = %path.display(), "wrote results");
    }

    Ok(())
}
