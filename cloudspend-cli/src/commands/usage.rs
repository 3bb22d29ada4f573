//! Usage command - print usage line items and per-provider totals.
//!
//! With `--date`, lists that day's line items through the date-filtered
//! pager. Without it, lists the entire billing period covering today
//! through the unfiltered pager.

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use clap::Args;
use tracing::info;

use cloudspend_billing::{resolve_period, RestClient, UsageFilter, UsagePager};
use cloudspend_core::{classify, CostAggregate, ProviderLabel, UsageRecord};

use crate::output::{json, text};
use crate::{Cli, OutputFormat};

/// Arguments for the usage command.
#[derive(Args)]
pub struct UsageArgs {
    /// Date to inspect (YYYY-MM-DD). Omit to list the whole billing
    /// period covering today.
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

/// Runs the usage command. Returns the process exit code.
pub async fn run(args: &UsageArgs, cli: &Cli, client: &RestClient) -> Result<i32> {
    let (anchor, filter) = match args.date {
        Some(date) => (date, UsageFilter::usage_start_on(date)),
        None => (Utc::now().date_naive(), UsageFilter::none()),
    };

    let period = resolve_period(client, anchor).await?;
    info!(
        period = %period.name,
        date_filtered = args.date.is_some(),
        "Listing usage"
    );

    let pager = UsagePager::new(client, &period.name, filter);
    let records = pager.collect_all().await?;

    let mut labeled: Vec<(UsageRecord, ProviderLabel)> = Vec::with_capacity(records.len());
    let mut aggregate = CostAggregate::new();
    for record in records {
        let provider = classify(&record.instance_id)?;
        aggregate.add(&record)?;
        labeled.push((record, provider));
    }

    match cli.format {
        OutputFormat::Text => {
            text::print_usage_table(&labeled);
            text::print_aggregate(&aggregate);
        }
        OutputFormat::Json => json::print_usage(&labeled, &aggregate)?,
    }

    Ok(0)
}
