//! InfluxDB line protocol encoding.
//!
//! One point per line: `measurement,tag=value field=value timestamp`.
//! Tag keys and values must escape commas, spaces, and equals signs;
//! timestamps are written in seconds (the write endpoint is called with
//! `precision=s`).

use chrono::NaiveDate;
use cloudspend_core::{CostAggregate, ProviderLabel, UsageRecord};

/// Measurement name for aggregated per-provider cost points.
pub const COST_MEASUREMENT: &str = "cloud_cost";

/// Measurement name for raw usage record points.
pub const USAGE_MEASUREMENT: &str = "cloud_usage";

/// Escapes a tag key or value per the line protocol rules.
fn escape_tag(value: &str) -> String {
    value
        .replace(',', "\\,")
        .replace('=', "\\=")
        .replace(' ', "\\ ")
}

fn timestamp_for(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map_or(0, |dt| dt.and_utc().timestamp())
}

/// Encodes one aggregate as one line per bucket, timestamped at midnight
/// UTC of `date`. Buckets are emitted in sorted key order so the encoding
/// is deterministic.
pub fn encode_aggregate(date: NaiveDate, aggregate: &CostAggregate) -> String {
    let timestamp = timestamp_for(date);
    let mut lines = Vec::with_capacity(aggregate.len());

    for (key, total) in aggregate.sorted_entries() {
        let mut tags = format!("provider={}", escape_tag(key.provider.as_str()));
        if let Some(currency) = &key.currency {
            tags.push_str(",currency=");
            tags.push_str(&escape_tag(currency));
        }
        lines.push(format!(
            "{COST_MEASUREMENT},{tags} pretax_cost={total} {timestamp}"
        ));
    }

    lines.join("\n")
}

/// Encodes one raw usage record, timestamped at its usage window start.
pub fn encode_record(record: &UsageRecord, provider: &ProviderLabel) -> String {
    let timestamp = record.usage_start.timestamp();
    format!(
        "{USAGE_MEASUREMENT},provider={},currency={} pretax_cost={} {timestamp}",
        escape_tag(provider.as_str()),
        escape_tag(&record.currency),
        record.pretax_cost,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use cloudspend_core::{classify, CostAggregate};

    const VM_A: &str = "/subscriptions/x/resourceGroups/g/providers/Microsoft.Compute/vm/a";

    fn record(cost: &str) -> UsageRecord {
        UsageRecord {
            instance_id: VM_A.to_string(),
            pretax_cost: cost.parse().unwrap(),
            currency: "EUR".to_string(),
            usage_start: Utc.with_ymd_and_hms(2018, 9, 3, 0, 0, 0).unwrap(),
            usage_end: Utc.with_ymd_and_hms(2018, 9, 4, 0, 0, 0).unwrap(),
            is_estimated: None,
        }
    }

    #[test]
    fn test_encode_record() {
        let rec = record("1.50");
        let provider = classify(&rec.instance_id).unwrap();
        let line = encode_record(&rec, &provider);
        assert_eq!(
            line,
            "cloud_usage,provider=Microsoft.Compute/vm,currency=EUR pretax_cost=1.50 1535932800"
        );
    }

    #[test]
    fn test_encode_aggregate_one_line_per_bucket() {
        let mut aggregate = CostAggregate::new();
        aggregate.add(&record("1.50")).unwrap();
        aggregate.add(&record("0.75")).unwrap();

        let encoded = encode_aggregate(NaiveDate::from_ymd_opt(2018, 9, 3).unwrap(), &aggregate);
        assert_eq!(
            encoded,
            "cloud_cost,provider=Microsoft.Compute/vm,currency=EUR pretax_cost=2.25 1535932800"
        );
    }

    #[test]
    fn test_tag_escaping() {
        assert_eq!(escape_tag("a b,c=d"), "a\\ b\\,c\\=d");
    }

    #[test]
    fn test_empty_aggregate_encodes_to_nothing() {
        let encoded =
            encode_aggregate(NaiveDate::from_ymd_opt(2018, 9, 3).unwrap(), &CostAggregate::new());
        assert!(encoded.is_empty());
    }
}
