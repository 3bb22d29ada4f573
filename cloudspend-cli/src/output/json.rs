//! JSON output formatting.

use anyhow::Result;
use serde_json::{json, Value};

use cloudspend_core::{CostAggregate, ProviderLabel, UsageRecord};
use cloudspend_ingest::IngestReport;

fn aggregate_value(aggregate: &CostAggregate) -> Value {
    let totals: Vec<Value> = aggregate
        .sorted_entries()
        .into_iter()
        .map(|(key, total)| {
            json!({
                "provider": key.provider,
                "currency": key.currency,
                "total": total,
            })
        })
        .collect();
    Value::Array(totals)
}

/// Builds the JSON document for one day's usage listing.
pub fn usage_value(records: &[(UsageRecord, ProviderLabel)], aggregate: &CostAggregate) -> Value {
    let items: Vec<Value> = records
        .iter()
        .map(|(record, provider)| {
            json!({
                "instance_id": record.instance_id,
                "provider": provider,
                "pretax_cost": record.pretax_cost,
                "currency": record.currency,
                "usage_start": record.usage_start,
                "usage_end": record.usage_end,
            })
        })
        .collect();

    json!({
        "records": items,
        "totals": aggregate_value(aggregate),
    })
}

/// Builds the JSON document for an ingestion run report.
pub fn report_value(report: &IngestReport) -> Value {
    let succeeded: Vec<Value> = report
        .succeeded
        .iter()
        .map(|day| {
            json!({
                "date": day.date,
                "period": day.period,
                "records": day.records,
                "buckets": day.buckets,
                "total": day.total,
            })
        })
        .collect();
    let failed: Vec<Value> = report
        .failed
        .iter()
        .map(|failure| {
            json!({
                "date": failure.date,
                "error": failure.error.to_string(),
            })
        })
        .collect();

    json!({
        "days_attempted": report.days_attempted(),
        "succeeded": succeeded,
        "failed": failed,
    })
}

/// Prints one day's usage listing as pretty JSON.
pub fn print_usage(
    records: &[(UsageRecord, ProviderLabel)],
    aggregate: &CostAggregate,
) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(&usage_value(records, aggregate))?
    );
    Ok(())
}

/// Prints an ingestion run report as pretty JSON.
pub fn print_report(report: &IngestReport) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&report_value(report))?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use cloudspend_core::classify;

    #[test]
    fn test_usage_value_shape() {
        let record = UsageRecord {
            instance_id: "/subscriptions/x/resourceGroups/g/providers/Microsoft.Compute/vm/a"
                .to_string(),
            pretax_cost: "1.50".parse().unwrap(),
            currency: "EUR".to_string(),
            usage_start: Utc.with_ymd_and_hms(2018, 9, 3, 0, 0, 0).unwrap(),
            usage_end: Utc.with_ymd_and_hms(2018, 9, 4, 0, 0, 0).unwrap(),
            is_estimated: None,
        };
        let provider = classify(&record.instance_id).unwrap();
        let mut aggregate = CostAggregate::new();
        aggregate.add(&record).unwrap();

        let value = usage_value(&[(record, provider)], &aggregate);
        assert_eq!(value["records"][0]["provider"], "Microsoft.Compute/vm");
        assert_eq!(value["totals"][0]["total"], "1.50");
    }

    #[test]
    fn test_report_value_counts() {
        let value = report_value(&IngestReport::default());
        assert_eq!(value["days_attempted"], 0);
        assert!(value["succeeded"].as_array().unwrap().is_empty());
    }
}
