//! Renderer-facing view model.
//!
//! Everything the template layer shows is computed here: totals, badges,
//! per-source and per-month tables, chart payloads and pre-formatted text.
//! Every known source and every month slot is present, with zeros where the
//! snapshot has no data, so the renderer never has to guard against a
//! missing key.

pub mod evolution;
pub mod format;

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::charts::{month_keys, ChartCompiler, ChartPayloads, SHORT_MONTH_NAMES};
use crate::config::{DisplayConfig, KeyMetricKind, SourceRegistry};
use crate::core::{AgeBucket, ArticleMeta, MetricsSnapshot, DATE_FORMAT};
use crate::derived::{self, DerivedMetrics, SourceSummary};

pub use evolution::{load_evolution, Chapter, Milestone};

/// A titled, pre-formatted figure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyMetric {
    pub title: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceInfo {
    pub name: String,
    pub count: u64,
    pub read: u64,
    pub unread: u64,
    pub read_pct: f64,
    pub read_pct_display: String,
    pub author_count: u64,
    /// Date the source was added, empty when unknown.
    pub added: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearInfo {
    pub year: String,
    pub count: u64,
}

/// One calendar month merged across years.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthInfo {
    pub name: String,
    pub month: String,
    pub total: u64,
    pub sources: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgeBucketInfo {
    pub key: String,
    pub label: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
    pub title: String,
    pub report_date: String,
    pub history_dates: Vec<String>,
    pub last_updated: String,
    pub key_metrics: Vec<KeyMetric>,
    pub highlight_metrics: Vec<KeyMetric>,
    pub total_articles: u64,
    pub read_count: u64,
    pub unread_count: u64,
    pub read_rate: f64,
    pub read_rate_display: String,
    pub avg_articles_per_month: f64,
    pub avg_articles_per_month_display: String,
    /// Latest month with data as `YYYY-MM`, or `-`.
    pub current_period: String,
    pub sources: Vec<SourceInfo>,
    pub months: Vec<MonthInfo>,
    pub years: Vec<YearInfo>,
    pub all_years: Vec<String>,
    pub all_sources: Vec<String>,
    pub charts: ChartPayloads,
    pub top_oldest_unread_articles: Vec<ArticleMeta>,
    pub unread_age_distribution: Vec<AgeBucketInfo>,
    pub skipped_records: u64,
    pub evolution: Vec<Chapter>,
}

/// Merges a finished snapshot with its derived metrics, chart payloads and
/// display settings.
pub struct ViewModelAssembler<'a> {
    display: &'a DisplayConfig,
    charts: ChartCompiler<'a>,
}

impl<'a> ViewModelAssembler<'a> {
    pub fn new(display: &'a DisplayConfig, registry: &'a SourceRegistry) -> Self {
        Self {
            display,
            charts: ChartCompiler::new(registry),
        }
    }

    /// Build the view model for one snapshot.
    ///
    /// `history` lists every artifact date available, in any order.
    pub fn assemble(
        &self,
        snapshot: &MetricsSnapshot,
        history: &[NaiveDate],
        evolution: Vec<Chapter>,
    ) -> ViewModel {
        let derived = DerivedMetrics::compute(snapshot);
        let summaries = derived::source_summaries(snapshot);
        let sources = source_infos(snapshot, &summaries);
        let all_sources: Vec<String> = sources.iter().map(|s| s.name.clone()).collect();
        let years = year_infos(snapshot);

        let mut history: Vec<NaiveDate> = history.to_vec();
        history.sort_unstable_by(|a, b| b.cmp(a));
        history.dedup();

        ViewModel {
            title: self.display.title.clone(),
            report_date: snapshot.last_updated.format(DATE_FORMAT).to_string(),
            history_dates: history
                .iter()
                .map(|d| d.format(DATE_FORMAT).to_string())
                .collect(),
            last_updated: format::timestamp(&snapshot.last_updated),
            key_metrics: self.key_metrics(snapshot, &derived),
            highlight_metrics: highlight_metrics(&derived),
            total_articles: snapshot.total_articles,
            read_count: snapshot.read_count,
            unread_count: snapshot.unread_count,
            read_rate: derived.read_rate,
            read_rate_display: format::percentage(derived.read_rate),
            avg_articles_per_month: derived.avg_articles_per_month,
            avg_articles_per_month_display: format::whole(derived.avg_articles_per_month),
            current_period: format::badge(
                derived
                    .current_period
                    .as_ref()
                    .map(|p| p.to_string())
                    .as_deref(),
            ),
            months: month_infos(snapshot, &all_sources),
            all_years: years.iter().map(|y| y.year.clone()).collect(),
            years,
            sources,
            all_sources,
            charts: self.charts.compile(snapshot),
            top_oldest_unread_articles: snapshot.top_oldest_unread_articles.clone(),
            unread_age_distribution: AgeBucket::ALL
                .iter()
                .map(|bucket| AgeBucketInfo {
                    key: bucket.key().to_string(),
                    label: bucket.label().to_string(),
                    count: snapshot.age_bucket_count(*bucket),
                })
                .collect(),
            skipped_records: snapshot.skipped_records,
            evolution,
        }
    }

    fn key_metrics(&self, snapshot: &MetricsSnapshot, derived: &DerivedMetrics) -> Vec<KeyMetric> {
        self.display
            .key_metrics
            .iter()
            .map(|kind| KeyMetric {
                title: kind.title().to_string(),
                value: match kind {
                    KeyMetricKind::Total => snapshot.total_articles.to_string(),
                    KeyMetricKind::ReadRate => format::percentage(derived.read_rate),
                    KeyMetricKind::Read => snapshot.read_count.to_string(),
                    KeyMetricKind::Unread => snapshot.unread_count.to_string(),
                    KeyMetricKind::AvgPerMonth => format::whole(derived.avg_articles_per_month),
                },
            })
            .collect()
    }
}

fn highlight_metrics(derived: &DerivedMetrics) -> Vec<KeyMetric> {
    let latest_month = derived
        .current_period
        .as_ref()
        .map(|_| derived.current_period_read_count.to_string());

    vec![
        KeyMetric {
            title: "🎯 Top Read Rate Source".to_string(),
            value: format::badge(derived.top_read_rate_source.as_deref()),
        },
        KeyMetric {
            title: "📚 Most Unread Source".to_string(),
            value: format::badge(derived.most_unread_source.as_deref()),
        },
        KeyMetric {
            title: "✅ Latest Month's Articles".to_string(),
            value: format::badge(latest_month.as_deref()),
        },
    ]
}

fn source_infos(snapshot: &MetricsSnapshot, summaries: &[SourceSummary]) -> Vec<SourceInfo> {
    summaries
        .iter()
        .map(|summary| {
            let read_pct = derived::read_rate(summary.read, summary.total);
            SourceInfo {
                name: summary.name.clone(),
                count: summary.total,
                read: summary.read,
                unread: summary.unread,
                read_pct,
                read_pct_display: format::percentage(read_pct),
                author_count: snapshot
                    .provider_counts
                    .get(&summary.name)
                    .copied()
                    .unwrap_or(0),
                added: snapshot
                    .source_metadata
                    .get(&summary.name)
                    .map(|meta| meta.added.clone())
                    .unwrap_or_default(),
            }
        })
        .collect()
}

fn year_infos(snapshot: &MetricsSnapshot) -> Vec<YearInfo> {
    snapshot
        .by_year
        .iter()
        .rev()
        .map(|(year, count)| YearInfo {
            year: year.clone(),
            count: *count,
        })
        .collect()
}

fn month_infos(snapshot: &MetricsSnapshot, sources: &[String]) -> Vec<MonthInfo> {
    month_keys()
        .zip(SHORT_MONTH_NAMES)
        .map(|(month, name)| {
            let by_source = snapshot.by_month_and_source.get(&month);
            let counts: BTreeMap<String, u64> = sources
                .iter()
                .map(|source| {
                    let count = by_source
                        .and_then(|m| m.get(source))
                        .map(|c| c[0] + c[1])
                        .unwrap_or(0);
                    (source.clone(), count)
                })
                .collect();
            MonthInfo {
                name: name.to_string(),
                total: snapshot.by_month.get(&month).copied().unwrap_or(0),
                month,
                sources: counts,
            }
        })
        .collect()
}
