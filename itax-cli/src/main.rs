use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::{debug, info};

use itax_cli::config::AppConfig;
use itax_cli::report::{self, OutputFormat};
use itax_cli::{logging, utils};
use itax_core::advisory::provider::SECTION_80C_LIMIT;
use itax_core::advisory::{InsightRegistry, TaxAdvisor};
use itax_core::{Regime, TaxEngine, TaxInput};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Indian income tax calculator for FY 2025-26.
///
/// Computes tax under the new and old regimes, compares them and prints
/// the slab tables.
#[derive(Debug, Parser)]
#[command(name = "itax", version)]
struct Cli {
    /// TOML configuration file (defaults to ./itax.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level or filter directive; overrides the configuration file.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute tax under one regime.
    Calculate {
        #[command(flatten)]
        taxpayer: TaxpayerArgs,

        /// Tax regime: new or old.
        #[arg(long, default_value = "new", value_parser = Regime::parse)]
        regime: Regime,

        /// Ask the configured insight provider for advice.
        #[arg(long)]
        insights: bool,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Compare both regimes and recommend the cheaper one.
    Compare {
        #[command(flatten)]
        taxpayer: TaxpayerArgs,

        /// Ask the configured insight provider for advice.
        #[arg(long)]
        insights: bool,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print the slab table for a regime.
    Slabs {
        /// Tax regime: new or old.
        #[arg(long, default_value = "new", value_parser = Regime::parse)]
        regime: Regime,

        /// Age in years; selects the old-regime exemption.
        #[arg(long, default_value_t = 30)]
        age: u32,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

/// Taxpayer details shared by `calculate` and `compare`.
///
/// Amounts accept `1200000`, `12,00,000`, `12L` or `1.2Cr`.
#[derive(Debug, Args)]
struct TaxpayerArgs {
    /// Annual gross income.
    #[arg(long, value_parser = utils::parse_amount)]
    income: Decimal,

    /// Age in years.
    #[arg(long)]
    age: u32,

    /// No standard deduction under the new regime.
    #[arg(long)]
    self_employed: bool,

    /// Section 80C investments; capped at ₹1,50,000.
    #[arg(long = "deductions-80c", value_parser = utils::parse_amount, default_value = "0")]
    deductions_80c: Decimal,

    /// Health insurance premium.
    #[arg(long, value_parser = utils::parse_amount, default_value = "0")]
    health_insurance: Decimal,
}

impl TaxpayerArgs {
    fn to_input(
        &self,
        regime: Regime,
    ) -> TaxInput {
        TaxInput::new(self.income, self.age, regime)
            .with_salaried(!self.self_employed)
            .with_deductions_80c(utils::clamp_deduction(
                self.deductions_80c,
                SECTION_80C_LIMIT,
                "deductions_80c",
            ))
            .with_health_insurance_premium(self.health_insurance)
    }
}

// ─── commands ────────────────────────────────────────────────────────────────

async fn build_advisor(
    config: &AppConfig,
    engine: TaxEngine,
) -> anyhow::Result<TaxAdvisor> {
    debug!("creating {} insight provider", config.insights.backend);
    let registry = InsightRegistry::with_builtin();
    let provider = registry
        .create(&config.insights)
        .await
        .context("Failed to create insight provider")?;

    Ok(TaxAdvisor::new(engine, provider)
        .with_timeout(Duration::from_secs(config.insights.timeout_secs)))
}

async fn calculate(
    config: &AppConfig,
    engine: TaxEngine,
    input: TaxInput,
    insights: bool,
    format: OutputFormat,
) -> anyhow::Result<String> {
    input.validate().context("Invalid taxpayer details")?;

    if !insights {
        let result = engine.resolve(&input).rounded();
        return Ok(match format {
            OutputFormat::Text => report::render_result(&result),
            OutputFormat::Json => serde_json::to_string_pretty(&result)?,
        });
    }

    let advisor = build_advisor(config, engine).await?;
    let mut tax_report = advisor.advise(&input).await;
    tax_report.result = tax_report.result.rounded();

    Ok(match format {
        OutputFormat::Text => {
            report::render_result(&tax_report.result)
                + &report::render_insights(&tax_report.provider, &tax_report.ai_insights)
        }
        OutputFormat::Json => serde_json::to_string_pretty(&tax_report)?,
    })
}

async fn compare(
    config: &AppConfig,
    engine: TaxEngine,
    input: TaxInput,
    insights: bool,
    format: OutputFormat,
) -> anyhow::Result<String> {
    input.validate().context("Invalid taxpayer details")?;

    if !insights {
        let comparison = engine.compare_input(&input).rounded();
        return Ok(match format {
            OutputFormat::Text => report::render_comparison(&comparison),
            OutputFormat::Json => serde_json::to_string_pretty(&comparison)?,
        });
    }

    let advisor = build_advisor(config, engine).await?;
    let mut comparison_report = advisor.advise_comparison(&input).await;
    comparison_report.comparison = comparison_report.comparison.rounded();

    Ok(match format {
        OutputFormat::Text => {
            report::render_comparison(&comparison_report.comparison)
                + &report::render_insights(
                    &comparison_report.provider,
                    &comparison_report.ai_insights,
                )
        }
        OutputFormat::Json => serde_json::to_string_pretty(&comparison_report)?,
    })
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;
    let level = cli.log_level.as_deref().unwrap_or(&config.logging.level);
    logging::init_logging(level, config.logging.file.as_deref())?;

    let engine = TaxEngine::default();
    info!(financial_year = engine.financial_year(), "itax starting");

    let output = match cli.command {
        Command::Calculate {
            taxpayer,
            regime,
            insights,
            format,
        } => calculate(&config, engine, taxpayer.to_input(regime), insights, format).await?,
        Command::Compare {
            taxpayer,
            insights,
            format,
        } => compare(&config, engine, taxpayer.to_input(Regime::New), insights, format).await?,
        Command::Slabs {
            regime,
            age,
            format,
        } => {
            let schedule = engine.schedule(regime, age);
            match format {
                OutputFormat::Text => report::render_schedule(&schedule),
                OutputFormat::Json => serde_json::to_string_pretty(&schedule)?,
            }
        }
    };

    println!("{}", output.trim_end());
    Ok(())
}
