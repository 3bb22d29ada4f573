//! Period command - resolve which billing period covers a date.

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use serde_json::json;

use cloudspend_billing::{resolve_period, RestClient};

use crate::{Cli, OutputFormat};

/// Arguments for the period command.
#[derive(Args)]
pub struct PeriodArgs {
    /// Date to resolve (YYYY-MM-DD).
    #[arg(long)]
    pub date: NaiveDate,
}

/// Runs the period command. Returns the process exit code.
pub async fn run(args: &PeriodArgs, cli: &Cli, client: &RestClient) -> Result<i32> {
    let period = resolve_period(client, args.date).await?;

    match cli.format {
        OutputFormat::Text => {
            println!(
                "{} covers {} ({} - {})",
                period.name, args.date, period.start_date, period.end_date
            );
        }
        OutputFormat::Json => {
            let value = json!({
                "date": args.date,
                "period": {
                    "name": period.name,
                    "start_date": period.start_date,
                    "end_date": period.end_date,
                },
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }

    Ok(0)
}
