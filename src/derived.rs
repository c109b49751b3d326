//! Derived metrics computed from a finished snapshot.
//!
//! Nothing here may run before the aggregator has drained its input: every
//! ratio depends on final totals. [`crate::aggregation::Aggregator::finish`]
//! is the only producer of snapshots, which enforces that ordering.

use std::cmp::Ordering;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::config::{AveragingConfig, AveragingMode};
use crate::core::{is_bookkeeping_key, MetricsSnapshot, READ, UNREAD};

/// Percentage of articles read; zero when there are no articles.
pub fn read_rate(read: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        read as f64 / total as f64 * 100.0
    }
}

/// Earliest and latest record dates seen during aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObservedSpan {
    pub earliest: NaiveDate,
    pub latest: NaiveDate,
}

impl ObservedSpan {
    pub fn single(date: NaiveDate) -> Self {
        Self {
            earliest: date,
            latest: date,
        }
    }

    pub fn include(&mut self, date: NaiveDate) {
        self.earliest = self.earliest.min(date);
        self.latest = self.latest.max(date);
    }

    /// Months covered by the span, at least one.
    ///
    /// Whole calendar months between the endpoints, plus the elapsed fraction
    /// of the reference month when the data reaches into it, otherwise plus
    /// one full month for the latest month.
    pub fn months(&self, reference: NaiveDate) -> f64 {
        let whole = (self.latest.year() - self.earliest.year()) * 12
            + self.latest.month() as i32
            - self.earliest.month() as i32;
        let whole = whole.max(1) as f64;

        if self.latest.year() == reference.year() && self.latest.month() == reference.month() {
            whole + reference.day() as f64 / days_in_month(reference) as f64
        } else {
            whole + 1.0
        }
    }
}

fn days_in_month(date: NaiveDate) -> u32 {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(30)
}

/// Average articles per month under the configured window.
pub fn average_per_month(
    total: u64,
    averaging: &AveragingConfig,
    span: Option<ObservedSpan>,
    reference: NaiveDate,
) -> f64 {
    let months = match averaging.mode {
        AveragingMode::Fixed => averaging.window_months as f64,
        AveragingMode::ObservedSpan => span.map(|s| s.months(reference)).unwrap_or(1.0),
    };
    if months > 0.0 {
        total as f64 / months
    } else {
        0.0
    }
}

/// A calendar month present in the data.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Period {
    pub year: String,
    pub month: String,
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.year, self.month)
    }
}

/// Totals for one source, as shown in source lists and charts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSummary {
    pub name: String,
    pub total: u64,
    pub read: u64,
    pub unread: u64,
}

/// Every source with its totals, sorted by total descending then name.
///
/// Sources known only from metadata appear with zero counts.
pub fn source_summaries(snapshot: &MetricsSnapshot) -> Vec<SourceSummary> {
    let mut summaries: Vec<SourceSummary> = snapshot
        .source_names()
        .into_iter()
        .map(|name| {
            let status = snapshot.read_status(&name);
            SourceSummary {
                total: snapshot.by_source.get(&name).copied().unwrap_or(0),
                read: status[READ],
                unread: status[UNREAD],
                name,
            }
        })
        .collect();
    summaries.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.name.cmp(&b.name)));
    summaries
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedMetrics {
    pub read_rate: f64,
    pub avg_articles_per_month: f64,
    pub top_read_rate_source: Option<String>,
    pub most_unread_source: Option<String>,
    /// Latest month present in the data, never wall-clock "now"
    pub current_period: Option<Period>,
    pub current_period_read_count: u64,
}

impl DerivedMetrics {
    pub fn compute(snapshot: &MetricsSnapshot) -> Self {
        let current_period = latest_period(snapshot);
        let current_period_read_count = current_period
            .as_ref()
            .map(|p| read_count_for_month(snapshot, &p.month))
            .unwrap_or(0);

        Self {
            read_rate: read_rate(snapshot.read_count, snapshot.total_articles),
            avg_articles_per_month: snapshot.avg_articles_per_month,
            top_read_rate_source: top_read_rate_source(snapshot),
            most_unread_source: most_unread_source(snapshot),
            current_period,
            current_period_read_count,
        }
    }
}

/// Pick the best-ranked name; equal ranks go to the alphabetically first name.
fn leader<'a, T>(
    candidates: impl IntoIterator<Item = (&'a str, T)>,
    rank: impl Fn(&T, &T) -> Ordering,
) -> Option<String> {
    candidates
        .into_iter()
        .max_by(|(a_name, a), (b_name, b)| rank(a, b).then_with(|| b_name.cmp(a_name)))
        .map(|(name, _)| name.to_string())
}

/// Source with the highest read percentage; none when nothing has been read.
///
/// Rates are compared exactly as fractions so equal ratios always tie.
pub fn top_read_rate_source(snapshot: &MetricsSnapshot) -> Option<String> {
    leader(
        snapshot
            .by_source_read_status
            .iter()
            .filter(|(name, _)| !is_bookkeeping_key(name))
            .map(|(name, counts)| (name.as_str(), (counts[READ], counts[READ] + counts[UNREAD])))
            .filter(|(_, (read, _))| *read > 0),
        |(a_read, a_total), (b_read, b_total)| {
            (*a_read as u128 * *b_total as u128).cmp(&(*b_read as u128 * *a_total as u128))
        },
    )
}

/// Source with the most unread articles; none when nothing is unread.
pub fn most_unread_source(snapshot: &MetricsSnapshot) -> Option<String> {
    leader(
        snapshot
            .unread_by_source
            .iter()
            .filter(|(name, unread)| !is_bookkeeping_key(name) && **unread > 0)
            .map(|(name, unread)| (name.as_str(), *unread)),
        |a, b| a.cmp(b),
    )
}

/// Latest year, then latest month within it, that holds any articles.
pub fn latest_period(snapshot: &MetricsSnapshot) -> Option<Period> {
    snapshot
        .by_year_and_month
        .iter()
        .flat_map(|(year, months)| {
            months
                .iter()
                .filter(|(_, count)| **count > 0)
                .map(move |(month, _)| Period {
                    year: year.clone(),
                    month: month.clone(),
                })
        })
        .max()
}

/// Read articles recorded for a month key in the month/source breakdown.
pub fn read_count_for_month(snapshot: &MetricsSnapshot, month: &str) -> u64 {
    snapshot
        .by_month_and_source
        .get(month)
        .map(|sources| sources.values().map(|counts| counts[READ]).sum())
        .unwrap_or(0)
}
