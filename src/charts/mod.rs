//! Chart-ready payloads compiled from a snapshot.
//!
//! Each payload is computed independently from the snapshot alone, uses only
//! ordered collections, and therefore serializes byte-identically every time
//! it is compiled from the same snapshot.

pub mod colors;

use serde::{Deserialize, Serialize};

use crate::config::SourceRegistry;
use crate::core::{AgeBucket, MetricsSnapshot};
use crate::derived::{source_summaries, SourceSummary};

pub use colors::{hashed_color, source_color, BORDER_COLOR};

pub const SHORT_MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Two-digit month keys `01`..`12`.
pub fn month_keys() -> impl Iterator<Item = String> {
    (1..=12).map(|m| format!("{m:02}"))
}

/// Labels with one series of values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesChart {
    pub labels: Vec<String>,
    pub data: Vec<u64>,
}

/// Labels with paired read and unread series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadUnreadChart {
    pub labels: Vec<String>,
    pub read_data: Vec<u64>,
    pub unread_data: Vec<u64>,
}

/// One stacked dataset in Chart.js shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<u64>,
    pub background_color: String,
    pub border_color: String,
    pub border_width: u32,
}

/// Twelve month slots with one stacked dataset per source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackedMonthChart {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
    pub total_data: Vec<u64>,
}

/// The seven visualizations handed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPayloads {
    pub year_breakdown: SeriesChart,
    pub read_unread_by_year: ReadUnreadChart,
    pub month_aggregate: StackedMonthChart,
    pub read_unread_by_month: ReadUnreadChart,
    pub read_unread_by_source: ReadUnreadChart,
    pub unread_age_distribution: SeriesChart,
    pub unread_by_year: SeriesChart,
}

pub struct ChartCompiler<'a> {
    registry: &'a SourceRegistry,
}

impl<'a> ChartCompiler<'a> {
    pub fn new(registry: &'a SourceRegistry) -> Self {
        Self { registry }
    }

    pub fn compile(&self, snapshot: &MetricsSnapshot) -> ChartPayloads {
        let sources = source_summaries(snapshot);
        ChartPayloads {
            year_breakdown: year_breakdown(snapshot),
            read_unread_by_year: read_unread_by_year(snapshot),
            month_aggregate: month_aggregate(snapshot, &sources, self.registry),
            read_unread_by_month: read_unread_by_month(snapshot),
            read_unread_by_source: read_unread_by_source(&sources),
            unread_age_distribution: unread_age_distribution(snapshot),
            unread_by_year: unread_by_year(snapshot),
        }
    }
}

/// Years, newest first, with raw article counts.
pub fn year_breakdown(snapshot: &MetricsSnapshot) -> SeriesChart {
    let (labels, data): (Vec<String>, Vec<u64>) = snapshot
        .by_year
        .iter()
        .rev()
        .map(|(year, count)| (year.clone(), *count))
        .unzip();
    SeriesChart { labels, data }
}

/// Per year, newest first: the year's month totals as the read series and
/// the year-merged unread counts of the months that year has data for.
pub fn read_unread_by_year(snapshot: &MetricsSnapshot) -> ReadUnreadChart {
    let mut chart = ReadUnreadChart {
        labels: Vec::new(),
        read_data: Vec::new(),
        unread_data: Vec::new(),
    };

    for year in snapshot.by_year.keys().rev() {
        let months = snapshot.by_year_and_month.get(year);
        let read = months.map(|m| m.values().sum::<u64>()).unwrap_or(0);
        let unread = months
            .map(|m| {
                m.keys()
                    .filter_map(|month| snapshot.unread_by_month.get(month))
                    .sum::<u64>()
            })
            .unwrap_or(0);

        chart.labels.push(year.clone());
        chart.read_data.push(read);
        chart.unread_data.push(unread);
    }
    chart
}

/// Jan..Dec merged across years, stacked by source.
pub fn month_aggregate(
    snapshot: &MetricsSnapshot,
    sources: &[SourceSummary],
    registry: &SourceRegistry,
) -> StackedMonthChart {
    let datasets = sources
        .iter()
        .map(|source| ChartDataset {
            label: source.name.clone(),
            data: month_keys()
                .map(|month| {
                    snapshot
                        .by_month_and_source
                        .get(&month)
                        .and_then(|by_source| by_source.get(&source.name))
                        .map(|counts| counts[0] + counts[1])
                        .unwrap_or(0)
                })
                .collect(),
            background_color: source_color(registry, &source.name),
            border_color: BORDER_COLOR.to_string(),
            border_width: 1,
        })
        .collect();

    StackedMonthChart {
        labels: SHORT_MONTH_NAMES.iter().map(|m| m.to_string()).collect(),
        datasets,
        total_data: month_keys()
            .map(|month| snapshot.by_month.get(&month).copied().unwrap_or(0))
            .collect(),
    }
}

/// Jan..Dec merged across years.
pub fn read_unread_by_month(snapshot: &MetricsSnapshot) -> ReadUnreadChart {
    let (read_data, unread_data): (Vec<u64>, Vec<u64>) = month_keys()
        .map(|month| {
            let total = snapshot.by_month.get(&month).copied().unwrap_or(0);
            let unread = snapshot.unread_by_month.get(&month).copied().unwrap_or(0);
            (total.saturating_sub(unread), unread)
        })
        .unzip();

    ReadUnreadChart {
        labels: SHORT_MONTH_NAMES.iter().map(|m| m.to_string()).collect(),
        read_data,
        unread_data,
    }
}

/// Sources ordered by total descending, then name.
pub fn read_unread_by_source(sources: &[SourceSummary]) -> ReadUnreadChart {
    ReadUnreadChart {
        labels: sources.iter().map(|s| s.name.clone()).collect(),
        read_data: sources.iter().map(|s| s.read).collect(),
        unread_data: sources.iter().map(|s| s.unread).collect(),
    }
}

/// The five age buckets in their fixed display order.
pub fn unread_age_distribution(snapshot: &MetricsSnapshot) -> SeriesChart {
    SeriesChart {
        labels: AgeBucket::ALL.iter().map(|b| b.label().to_string()).collect(),
        data: AgeBucket::ALL
            .iter()
            .map(|b| snapshot.age_bucket_count(*b))
            .collect(),
    }
}

/// Unread counts per year, newest first.
pub fn unread_by_year(snapshot: &MetricsSnapshot) -> SeriesChart {
    let (labels, data): (Vec<String>, Vec<u64>) = snapshot
        .unread_by_year
        .iter()
        .rev()
        .map(|(year, count)| (year.clone(), *count))
        .unzip();
    SeriesChart { labels, data }
}
