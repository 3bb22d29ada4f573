// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! Cloudspend CLI - cloud billing cost ingestion from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Backfill 35 days into the time-series database, newest first
//! cloudspend --subscription-id $SUB ingest --start-date 2018-10-28 --days 35 --backward
//!
//! # Print one day's usage line items and per-provider totals
//! cloudspend --subscription-id $SUB usage --date 2018-07-03
//!
//! # Print the whole current billing period
//! cloudspend --subscription-id $SUB usage
//!
//! # Which billing period covers a date?
//! cloudspend --subscription-id $SUB period --date 2018-07-03
//!
//! # JSON output
//! cloudspend --subscription-id $SUB usage --date 2018-07-03 --format json
//! ```

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, error};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cloudspend_billing::{BearerToken, RestClient};

use commands::{ingest, period, usage};

// ============================================================================
// CLI Definition
// ============================================================================

/// Cloudspend CLI - cloud billing cost ingestion.
#[derive(Parser)]
#[command(name = "cloudspend")]
#[command(about = "Cloud billing usage ingestion and cost aggregation CLI")]
#[command(long_about = r#"
Cloudspend pulls usage line items from the cloud billing API, aggregates
pretax cost per resource provider, and writes the result to a time-series
database.

The billing bearer token is read from CLOUDSPEND_BILLING_TOKEN.

Examples:
  cloudspend --subscription-id $SUB ingest --start-date 2018-10-28 --days 35 --backward
  cloudspend --subscription-id $SUB usage --date 2018-07-03
  cloudspend --subscription-id $SUB period --date 2018-07-03
"#)]
#[command(version)]
#[command(author = "Cloudspend Contributors")]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// The ID of the subscription (required).
    #[arg(long, global = true)]
    pub subscription_id: Option<String>,

    /// The address to listen on for scraping HTTP requests. Accepted for
    /// deployment parity; no endpoint is served yet.
    #[arg(long, default_value = ":8080", global = true)]
    pub listen_address: String,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Time-series database name.
    #[arg(long, default_value = "prometheus", global = true)]
    pub db_name: String,

    /// Time-series database username.
    #[arg(long, default_value = "prom", global = true)]
    pub db_user: String,

    /// Time-series database password.
    #[arg(long, default_value = "prom", global = true)]
    pub db_password: String,

    /// Time-series database address.
    #[arg(long, default_value = "http://localhost:8086", global = true)]
    pub db_address: String,

    /// Verbose output (debug-level logging).
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Ingest a date range into the time-series database.
    #[command(visible_alias = "i")]
    Ingest(ingest::IngestArgs),

    /// Print usage line items and per-provider totals for one day, or
    /// for the whole current billing period when --date is omitted.
    #[command(visible_alias = "u")]
    Usage(usage::UsageArgs),

    /// Resolve which billing period covers a date.
    #[command(visible_alias = "p")]
    Period(period::PeriodArgs),
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    Text,
    /// Machine-readable JSON.
    Json,
}

// ============================================================================
// Entry Point
// ============================================================================

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_env("CLOUDSPEND_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli).await {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            error!("{e:#}");
            std::process::exit(1);
        }
    }
}

async fn run(cli: &Cli) -> Result<i32> {
    let Some(subscription_id) = cli.subscription_id.as_deref() else {
        anyhow::bail!("You must provide a subscription id by using the --subscription-id flag.");
    };
    debug!(listen_address = %cli.listen_address, "Scrape endpoint not served yet");

    let token = BearerToken::from_env()?;
    let client = RestClient::new(subscription_id, token)?;

    match &cli.command {
        Commands::Ingest(args) => ingest::run(args, cli, client).await,
        Commands::Usage(args) => usage::run(args, cli, &client).await,
        Commands::Period(args) => period::run(args, cli, &client).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_ingest() {
        let cli = Cli::try_parse_from([
            "cloudspend",
            "--subscription-id",
            "sub-1",
            "ingest",
            "--start-date",
            "2018-10-28",
            "--days",
            "35",
            "--backward",
        ])
        .unwrap();
        assert_eq!(cli.subscription_id.as_deref(), Some("sub-1"));
        assert!(matches!(cli.command, Commands::Ingest(_)));
    }

    #[test]
    fn test_cli_parses_usage_with_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "cloudspend",
            "usage",
            "--date",
            "2018-07-03",
            "--subscription-id",
            "sub-1",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_usage_date_is_optional() {
        // Without --date the command covers the whole current period.
        let cli = Cli::try_parse_from(["cloudspend", "--subscription-id", "sub-1", "usage"]).unwrap();
        match cli.command {
            Commands::Usage(args) => assert!(args.date.is_none()),
            _ => panic!("expected usage command"),
        }
    }

    #[test]
    fn test_subscription_id_is_optional_at_parse_time() {
        // Presence is enforced at startup, not by the parser, so the
        // error can be a single fatal log line.
        let cli = Cli::try_parse_from(["cloudspend", "period", "--date", "2018-07-03"]).unwrap();
        assert!(cli.subscription_id.is_none());
    }

    #[test]
    fn test_sink_defaults_match_deployment() {
        let cli = Cli::try_parse_from(["cloudspend", "period", "--date", "2018-07-03"]).unwrap();
        assert_eq!(cli.db_name, "prometheus");
        assert_eq!(cli.db_address, "http://localhost:8086");
    }
}
