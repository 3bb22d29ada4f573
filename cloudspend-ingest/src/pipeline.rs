//! The per-day ingestion pipeline.

use chrono::{Days, NaiveDate};
use tracing::{info, warn};

use cloudspend_billing::{resolve_period, BillingApi, UsageFilter, UsagePager};
use cloudspend_core::{classify, CostAggregate, GroupingPolicy};
use cloudspend_sink::CostSink;

use crate::error::IngestError;
use crate::report::{DayFailure, DaySummary, IngestReport};

// ============================================================================
// Date Range
// ============================================================================

/// Which way a run walks through its dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Oldest to newest.
    #[default]
    Forward,
    /// Newest to oldest, the shape of a backfill starting from today.
    Backward,
}

/// A contiguous run of calendar days, walked in either direction.
#[derive(Debug, Clone, Copy)]
pub struct DateRange {
    start: NaiveDate,
    days: u32,
    direction: Direction,
}

impl DateRange {
    /// A range of `days` days beginning at `start`.
    pub fn new(start: NaiveDate, days: u32, direction: Direction) -> Self {
        Self {
            start,
            days,
            direction,
        }
    }

    /// Iterates the dates in processing order.
    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let (start, direction) = (self.start, self.direction);
        (0..self.days).filter_map(move |offset| match direction {
            Direction::Forward => start.checked_add_days(Days::new(u64::from(offset))),
            Direction::Backward => start.checked_sub_days(Days::new(u64::from(offset))),
        })
    }
}

// ============================================================================
// Options
// ============================================================================

/// Knobs for one ingestion run.
#[derive(Debug, Clone, Default)]
pub struct IngestOptions {
    /// How aggregate sums are keyed.
    pub policy: GroupingPolicy,
    /// Also forward every raw record to the sink, not just the aggregate.
    pub write_raw_records: bool,
    /// Abort the run on the first failed day instead of isolating it.
    pub fail_fast: bool,
}

// ============================================================================
// Pipeline
// ============================================================================

/// Drives a date range through resolve → page → aggregate → write.
///
/// The pipeline owns the sink for the lifetime of the run and owns one
/// aggregate at a time; nothing is shared across days.
#[derive(Debug)]
pub struct IngestPipeline<A, S> {
    api: A,
    sink: S,
    options: IngestOptions,
}

impl<A: BillingApi, S: CostSink> IngestPipeline<A, S> {
    /// Creates a pipeline over a billing API and a sink.
    pub fn new(api: A, sink: S, options: IngestOptions) -> Self {
        Self { api, sink, options }
    }

    /// Runs the pipeline over `range`, one day at a time.
    ///
    /// Per-day failures are collected into the report and the run
    /// continues, except when the day failed with an authorization error
    /// (nothing later can succeed) or `fail_fast` is set.
    ///
    /// # Errors
    ///
    /// Under `fail_fast`, the first day's error. Otherwise the run itself
    /// always completes and errors live in the report.
    pub async fn run(&self, range: DateRange) -> Result<IngestReport, IngestError> {
        let mut report = IngestReport::default();

        for date in range.iter() {
            match self.ingest_day(date).await {
                Ok(summary) => {
                    info!(
                        date = %summary.date,
                        period = %summary.period,
                        records = summary.records,
                        buckets = summary.buckets,
                        total = %summary.total,
                        "Ingested day"
                    );
                    report.succeeded.push(summary);
                }
                Err(error) => {
                    if self.options.fail_fast {
                        return Err(error);
                    }
                    warn!(date = %date, error = %error, "Day failed, continuing run");
                    let fatal = error.is_authorization();
                    report.failed.push(DayFailure { date, error });
                    if fatal {
                        warn!("Authorization failure, aborting remaining days");
                        break;
                    }
                }
            }
        }

        Ok(report)
    }

    /// Ingests a single day: resolve its period, pull its records through
    /// a date-filtered pager, aggregate, and write.
    ///
    /// # Errors
    ///
    /// Any [`IngestError`] from resolution, paging, classification, or
    /// the sink write. Nothing is written for a day that errors before
    /// its aggregate write.
    pub async fn ingest_day(&self, date: NaiveDate) -> Result<DaySummary, IngestError> {
        let period = resolve_period(&self.api, date).await?;
        let pager = UsagePager::new(&self.api, &period.name, UsageFilter::usage_start_on(date));
        let records = pager.collect_all().await?;

        let mut aggregate = CostAggregate::with_policy(self.options.policy);
        aggregate.accumulate(&records)?;

        if self.options.write_raw_records {
            for record in &records {
                let provider = classify(&record.instance_id)?;
                self.sink.write_record(record, &provider).await?;
            }
        }

        self.sink.write_aggregate(date, &aggregate).await?;

        Ok(DaySummary {
            date,
            period: period.name,
            records: records.len(),
            buckets: aggregate.len(),
            total: aggregate.grand_total(),
        })
    }
}
