//! Rate calculation CLI
//!
//! Provides commands for:
//! - `mean`: mean bid and ask of a quote batch
//! - `usd-mid`: USD mid-rate of a base-pair batch
//! - `convert`: cross rate through a USD mid-rate
//! - `divergence`: divergence report for an old and a new rate
//!
//! Results are printed to stdout as JSON. Configuration is read from
//! `config/default.toml`, `config/{RUN_MODE}.toml` and `RATE_ENGINE_*`
//! environment variables.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use fx_rate_engine::application::services::{DecimalRateCalculator, RateCalculator};
use fx_rate_engine::domain::services::{DecimalEngine, DivergenceDetector};
use fx_rate_engine::domain::value_objects::{
    DivergenceThreshold, MidDivisor, RatePair, RateSnapshot, RateType, parse_exact,
};
use fx_rate_engine::infrastructure::{EngineConfig, init_logging};
use rust_decimal::Decimal;
use serde_json::json;

/// Rate calculation CLI
#[derive(Parser)]
#[command(name = "rate_calc")]
#[command(about = "Exact-decimal currency rate aggregation")]
#[command(version)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Command,
}

/// Available commands
#[derive(Subcommand)]
enum Command {
    /// Mean bid and mean ask
    Mean(QuoteArgs),
    /// USD mid-rate: (mean bid + mean ask) / divisor
    UsdMid {
        #[command(flatten)]
        quotes: QuoteArgs,
        /// Overrides the configured mid divisor
        #[arg(long, value_parser = parse_decimal)]
        divisor: Option<Decimal>,
    },
    /// Cross rate through a USD mid-rate
    Convert {
        /// Raw rate type, e.g. EUR_USD
        #[arg(long)]
        rate_type: String,
        /// USD mid-rate
        #[arg(long, value_parser = parse_decimal)]
        mid: Decimal,
        #[command(flatten)]
        quotes: QuoteArgs,
    },
    /// Divergence of a new rate from an old one
    Divergence {
        /// Reference rate as BID,ASK
        #[arg(long, value_parser = parse_pair)]
        old: RatePair,
        /// Candidate rate as BID,ASK
        #[arg(long, value_parser = parse_pair)]
        new: RatePair,
        /// Overrides the configured threshold, in percent
        #[arg(long, value_parser = parse_decimal)]
        threshold: Option<Decimal>,
    },
}

/// A batch of quotes
#[derive(Args)]
struct QuoteArgs {
    /// Comma-separated bids
    #[arg(long, value_delimiter = ',', value_parser = parse_decimal)]
    bids: Vec<Decimal>,
    /// Comma-separated asks
    #[arg(long, value_delimiter = ',', value_parser = parse_decimal)]
    asks: Vec<Decimal>,
}

fn parse_decimal(text: &str) -> Result<Decimal, String> {
    parse_exact(text).map_err(|err| err.to_string())
}

fn parse_pair(text: &str) -> Result<RatePair, String> {
    let (bid, ask) = text
        .split_once(',')
        .ok_or_else(|| format!("expected BID,ASK, got '{text}'"))?;
    Ok(RatePair::new(parse_decimal(bid)?, parse_decimal(ask)?))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = EngineConfig::load().context("loading configuration")?;
    init_logging(&config.logging).context("initialising logging")?;
    config.install_precision()?;

    let calculator = DecimalRateCalculator::from_config(&config)?;

    let output = match cli.command {
        Command::Mean(quotes) => {
            let mean = calculator.calculate_mean_rate(&quotes.bids, &quotes.asks)?;
            json!({ "mean": mean })
        }
        Command::UsdMid { quotes, divisor } => {
            let calculator = match divisor {
                Some(divisor) => DecimalRateCalculator::new(
                    DecimalEngine::global(),
                    calculator.threshold(),
                    MidDivisor::new(divisor)?,
                    config.base_pair()?,
                ),
                None => calculator,
            };
            let mid = calculator.calculate_usd_mid(&quotes.bids, &quotes.asks)?;
            json!({ "usd_mid": mid, "divisor": calculator.divisor().value() })
        }
        Command::Convert {
            rate_type,
            mid,
            quotes,
        } => {
            let rate_type = RateType::new(rate_type)?;
            let rate =
                calculator.calculate_for_raw_rate_type(&rate_type, mid, &quotes.bids, &quotes.asks)?;
            serde_json::to_value(rate)?
        }
        Command::Divergence {
            old,
            new,
            threshold,
        } => {
            let threshold = match threshold {
                Some(threshold) => DivergenceThreshold::new(threshold)?,
                None => config.threshold()?,
            };
            let report = DivergenceDetector::new(DecimalEngine::global(), threshold)
                .assess(&RateSnapshot::new(old, new))?;
            serde_json::to_value(report)?
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
