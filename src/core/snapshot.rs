//! The metrics snapshot: one fully aggregated, immutable result per run.
//!
//! Field names are the public artifact contract consumed by the rendering
//! stage. New fields must be additive and carry `#[serde(default)]` so older
//! artifacts keep loading.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::record::ArticleMeta;

/// `[read, unread]` counter pair.
pub type ReadUnread = [u64; 2];

/// Index of the read counter in a [`ReadUnread`] pair.
pub const READ: usize = 0;
/// Index of the unread counter in a [`ReadUnread`] pair.
pub const UNREAD: usize = 1;

/// Keys older artifacts stored inside source maps that are not sources.
pub const BOOKKEEPING_KEYS: &[&str] = &["substack_author_count"];

pub fn is_bookkeeping_key(name: &str) -> bool {
    BOOKKEEPING_KEYS.contains(&name)
}

/// Unread backlog age ranges, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AgeBucket {
    LessThanOneMonth,
    OneToThreeMonths,
    ThreeToSixMonths,
    SixToTwelveMonths,
    OlderThanOneYear,
}

impl AgeBucket {
    pub const ALL: [AgeBucket; 5] = [
        AgeBucket::LessThanOneMonth,
        AgeBucket::OneToThreeMonths,
        AgeBucket::ThreeToSixMonths,
        AgeBucket::SixToTwelveMonths,
        AgeBucket::OlderThanOneYear,
    ];

    /// Key used in the snapshot's age distribution map.
    pub const fn key(self) -> &'static str {
        match self {
            AgeBucket::LessThanOneMonth => "less_than_1_month",
            AgeBucket::OneToThreeMonths => "1_to_3_months",
            AgeBucket::ThreeToSixMonths => "3_to_6_months",
            AgeBucket::SixToTwelveMonths => "6_to_12_months",
            AgeBucket::OlderThanOneYear => "older_than_1year",
        }
    }

    /// Human-readable chart label.
    pub const fn label(self) -> &'static str {
        match self {
            AgeBucket::LessThanOneMonth => "Less than 1 month",
            AgeBucket::OneToThreeMonths => "1-3 months",
            AgeBucket::ThreeToSixMonths => "3-6 months",
            AgeBucket::SixToTwelveMonths => "6-12 months",
            AgeBucket::OlderThanOneYear => "Older than 1 year",
        }
    }
}

/// Governance data about a known source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceMeta {
    pub added: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub total_articles: u64,
    pub by_source: BTreeMap<String, u64>,
    pub by_source_read_status: BTreeMap<String, ReadUnread>,
    pub by_year: BTreeMap<String, u64>,
    /// Two-digit month key, merged across years.
    pub by_month: BTreeMap<String, u64>,
    pub by_year_and_month: BTreeMap<String, BTreeMap<String, u64>>,
    #[serde(rename = "by_month_and_source_read_status")]
    pub by_month_and_source: BTreeMap<String, BTreeMap<String, ReadUnread>>,
    pub by_category: BTreeMap<String, ReadUnread>,
    pub by_category_and_source: BTreeMap<String, BTreeMap<String, ReadUnread>>,
    pub read_unread_totals: ReadUnread,
    pub unread_by_month: BTreeMap<String, u64>,
    pub unread_by_category: BTreeMap<String, u64>,
    pub unread_by_source: BTreeMap<String, u64>,
    pub unread_by_year: BTreeMap<String, u64>,
    pub unread_article_age_distribution: BTreeMap<String, u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oldest_unread_article: Option<ArticleMeta>,
    #[serde(default)]
    pub top_oldest_unread_articles: Vec<ArticleMeta>,
    pub source_metadata: BTreeMap<String, SourceMeta>,
    pub read_count: u64,
    pub unread_count: u64,
    pub read_rate: f64,
    pub avg_articles_per_month: f64,
    pub last_updated: DateTime<Utc>,
    /// Provider (author) rows counted per source, e.g. Substack authors.
    #[serde(default)]
    pub provider_counts: BTreeMap<String, u64>,
    #[serde(default)]
    pub skipped_records: u64,
    #[serde(default)]
    pub undated_records: u64,
}

impl MetricsSnapshot {
    /// An empty snapshot stamped with the run's reference time.
    pub fn empty(last_updated: DateTime<Utc>) -> Self {
        Self {
            total_articles: 0,
            by_source: BTreeMap::new(),
            by_source_read_status: BTreeMap::new(),
            by_year: BTreeMap::new(),
            by_month: BTreeMap::new(),
            by_year_and_month: BTreeMap::new(),
            by_month_and_source: BTreeMap::new(),
            by_category: BTreeMap::new(),
            by_category_and_source: BTreeMap::new(),
            read_unread_totals: [0, 0],
            unread_by_month: BTreeMap::new(),
            unread_by_category: BTreeMap::new(),
            unread_by_source: BTreeMap::new(),
            unread_by_year: BTreeMap::new(),
            unread_article_age_distribution: BTreeMap::new(),
            oldest_unread_article: None,
            top_oldest_unread_articles: Vec::new(),
            source_metadata: BTreeMap::new(),
            read_count: 0,
            unread_count: 0,
            read_rate: 0.0,
            avg_articles_per_month: 0.0,
            last_updated,
            provider_counts: BTreeMap::new(),
            skipped_records: 0,
            undated_records: 0,
        }
    }

    /// Every source the renderer should know about: sources with data plus
    /// sources that only appear in the governance metadata. Sorted by name.
    pub fn source_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .by_source
            .keys()
            .chain(self.source_metadata.keys())
            .filter(|name| !is_bookkeeping_key(name))
            .cloned()
            .collect();
        names.sort();
        names.dedup();
        names
    }

    pub fn read_status(&self, source: &str) -> ReadUnread {
        self.by_source_read_status
            .get(source)
            .copied()
            .unwrap_or_default()
    }

    pub fn age_bucket_count(&self, bucket: AgeBucket) -> u64 {
        self.unread_article_age_distribution
            .get(bucket.key())
            .copied()
            .unwrap_or(0)
    }

    /// Check the count invariants every finished snapshot must satisfy.
    ///
    /// Returns one message per broken invariant; empty means consistent.
    pub fn invariant_violations(&self) -> Vec<String> {
        let mut violations = Vec::new();

        if self.read_count + self.unread_count != self.total_articles {
            violations.push(format!(
                "read ({}) + unread ({}) != total ({})",
                self.read_count, self.unread_count, self.total_articles
            ));
        }

        let by_source_sum: u64 = self.by_source.values().sum();
        if by_source_sum != self.total_articles {
            violations.push(format!(
                "sum of by_source ({}) != total ({})",
                by_source_sum, self.total_articles
            ));
        }

        for (source, count) in &self.by_source {
            let [read, unread] = self.read_status(source);
            if read + unread != *count {
                violations.push(format!(
                    "source {source}: read ({read}) + unread ({unread}) != {count}"
                ));
            }
        }

        for (year, count) in &self.by_year {
            let months: u64 = self
                .by_year_and_month
                .get(year)
                .map(|m| m.values().sum())
                .unwrap_or(0);
            if months != *count {
                violations.push(format!(
                    "year {year}: sum of months ({months}) != {count}"
                ));
            }
        }
        for year in self.by_year_and_month.keys() {
            if !self.by_year.contains_key(year) {
                violations.push(format!("year {year} has months but no yearly total"));
            }
        }

        let aged: u64 = self.unread_article_age_distribution.values().sum();
        if aged != self.unread_count {
            violations.push(format!(
                "sum of age distribution ({aged}) != unread ({})",
                self.unread_count
            ));
        }

        if !self.read_rate.is_finite() || (self.total_articles == 0 && self.read_rate != 0.0) {
            violations.push(format!(
                "read rate {} invalid for {} articles",
                self.read_rate, self.total_articles
            ));
        }

        violations
    }
}
