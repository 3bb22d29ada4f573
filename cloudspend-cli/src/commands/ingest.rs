//! Ingest command - backfill a date range into the time-series database.

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use tracing::info;

use cloudspend_billing::RestClient;
use cloudspend_core::GroupingPolicy;
use cloudspend_ingest::{DateRange, Direction, IngestOptions, IngestPipeline};
use cloudspend_sink::{InfluxSink, SinkConfig};

use crate::output::{json, text};
use crate::{Cli, OutputFormat};

/// Arguments for the ingest command.
#[derive(Args)]
pub struct IngestArgs {
    /// First date to process (YYYY-MM-DD).
    #[arg(long)]
    pub start_date: NaiveDate,

    /// Number of days to process.
    #[arg(long, default_value = "1")]
    pub days: u32,

    /// Walk backward from the start date (backfill shape).
    #[arg(long)]
    pub backward: bool,

    /// How aggregate sums are keyed.
    #[arg(long, default_value = "provider-currency")]
    pub group_by: GroupBy,

    /// Also forward every raw usage record, not just the aggregate.
    #[arg(long)]
    pub raw: bool,

    /// Abort the whole run on the first failed day.
    #[arg(long)]
    pub fail_fast: bool,
}

/// Aggregate key shapes selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GroupBy {
    /// Provider label only (conflates currencies).
    Provider,
    /// Provider label and currency.
    ProviderCurrency,
}

impl From<GroupBy> for GroupingPolicy {
    fn from(group_by: GroupBy) -> Self {
        match group_by {
            GroupBy::Provider => GroupingPolicy::ByProvider,
            GroupBy::ProviderCurrency => GroupingPolicy::ByProviderAndCurrency,
        }
    }
}

/// Runs the ingest command. Returns the process exit code.
pub async fn run(args: &IngestArgs, cli: &Cli, client: RestClient) -> Result<i32> {
    let sink = InfluxSink::new(SinkConfig {
        database: cli.db_name.clone(),
        username: cli.db_user.clone(),
        password: cli.db_password.clone(),
        address: cli.db_address.clone(),
    })?;

    let direction = if args.backward {
        Direction::Backward
    } else {
        Direction::Forward
    };
    let range = DateRange::new(args.start_date, args.days, direction);

    info!(
        start = %args.start_date,
        days = args.days,
        backward = args.backward,
        "Starting ingestion run"
    );

    let options = IngestOptions {
        policy: args.group_by.into(),
        write_raw_records: args.raw,
        fail_fast: args.fail_fast,
    };
    let pipeline = IngestPipeline::new(client, sink, options);
    let report = pipeline.run(range).await?;

    match cli.format {
        OutputFormat::Text => text::print_report(&report),
        OutputFormat::Json => json::print_report(&report)?,
    }

    // A partial backfill is still useful; only a fully failed run is an
    // error exit (fail-fast runs never reach this point on failure).
    Ok(i32::from(report.all_failed()))
}
