//! Text output formatting.

use cloudspend_core::{CostAggregate, ProviderLabel, UsageRecord};
use cloudspend_ingest::IngestReport;

/// Formats one day's line items as the classic usage table.
pub fn format_usage_table(records: &[(UsageRecord, ProviderLabel)]) -> String {
    let mut lines = vec![
        "Pretax cost Currency, Usage start - Usage end, Provider".to_string(),
        "----------------------------------------------------------".to_string(),
    ];

    for (record, provider) in records {
        lines.push(format!(
            "{} {}, {} - {}, {}",
            record.pretax_cost,
            record.currency,
            record.usage_start.format("%Y-%m-%d %H:%M"),
            record.usage_end.format("%Y-%m-%d %H:%M"),
            provider
        ));
    }

    lines.join("\n")
}

/// Formats per-provider totals, one bucket per line in sorted key order.
pub fn format_aggregate(aggregate: &CostAggregate) -> String {
    if aggregate.is_empty() {
        return "No usage recorded.".to_string();
    }

    let mut lines = vec!["Per-provider totals:".to_string()];
    for (key, total) in aggregate.sorted_entries() {
        lines.push(format!("  {key}: {total}"));
    }
    lines.join("\n")
}

/// Formats an ingestion run report.
pub fn format_report(report: &IngestReport) -> String {
    let mut lines = vec![format!(
        "Ingested {} of {} days",
        report.succeeded.len(),
        report.days_attempted()
    )];

    for day in &report.succeeded {
        lines.push(format!(
            "  {} [{}]: {} records, {} buckets, total {}",
            day.date, day.period, day.records, day.buckets, day.total
        ));
    }
    for failure in &report.failed {
        lines.push(format!("  {} FAILED: {}", failure.date, failure.error));
    }

    lines.join("\n")
}

/// Prints the usage table to stdout.
pub fn print_usage_table(records: &[(UsageRecord, ProviderLabel)]) {
    println!("{}", format_usage_table(records));
}

/// Prints per-provider totals to stdout.
pub fn print_aggregate(aggregate: &CostAggregate) {
    println!("{}", format_aggregate(aggregate));
}

/// Prints a run report to stdout.
pub fn print_report(report: &IngestReport) {
    println!("{}", format_report(report));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use cloudspend_core::classify;

    fn labeled_record() -> (UsageRecord, ProviderLabel) {
        let record = UsageRecord {
            instance_id: "/subscriptions/x/resourceGroups/g/providers/Microsoft.Compute/vm/a"
                .to_string(),
            pretax_cost: "1.50".parse().unwrap(),
            currency: "EUR".to_string(),
            usage_start: Utc.with_ymd_and_hms(2018, 9, 3, 0, 0, 0).unwrap(),
            usage_end: Utc.with_ymd_and_hms(2018, 9, 3, 23, 59, 0).unwrap(),
            is_estimated: None,
        };
        let provider = classify(&record.instance_id).unwrap();
        (record, provider)
    }

    #[test]
    fn test_usage_table_layout() {
        let table = format_usage_table(&[labeled_record()]);
        assert!(table.starts_with("Pretax cost Currency"));
        assert!(table.contains(
            "1.50 EUR, 2018-09-03 00:00 - 2018-09-03 23:59, Microsoft.Compute/vm"
        ));
    }

    #[test]
    fn test_aggregate_output() {
        let (record, _) = labeled_record();
        let mut aggregate = CostAggregate::new();
        aggregate.add(&record).unwrap();

        let out = format_aggregate(&aggregate);
        assert!(out.contains("Microsoft.Compute/vm [EUR]: 1.50"));
    }

    #[test]
    fn test_empty_aggregate_output() {
        assert_eq!(format_aggregate(&CostAggregate::new()), "No usage recorded.");
    }

    #[test]
    fn test_empty_report() {
        let out = format_report(&IngestReport::default());
        assert_eq!(out, "Ingested 0 of 0 days");
    }
}
