//! Single-pass aggregation of article records into a metrics snapshot.
//!
//! The [`Aggregator`] owns the snapshot while records stream in and only
//! releases it through [`Aggregator::finish`], so derived ratios are never
//! computed from partial totals.

pub mod age;
pub mod backlog;

use chrono::{DateTime, NaiveDate, Utc};

use crate::config::{AveragingConfig, SourceRegistry};
use crate::core::{
    AgeBucket, ArticleMeta, ArticleRecord, Error, MetricsSnapshot, RawRow, RecordIssue,
    DATE_FORMAT, READ, UNREAD,
};
use crate::derived::{self, ObservedSpan};

pub use backlog::OldestUnread;

pub struct Aggregator<'a> {
    registry: &'a SourceRegistry,
    reference_time: DateTime<Utc>,
    snapshot: MetricsSnapshot,
    backlog: OldestUnread,
    span: Option<ObservedSpan>,
}

impl<'a> Aggregator<'a> {
    pub fn new(
        registry: &'a SourceRegistry,
        reference_time: DateTime<Utc>,
        top_oldest_count: usize,
    ) -> Self {
        Self {
            registry,
            reference_time,
            snapshot: MetricsSnapshot::empty(reference_time),
            backlog: OldestUnread::new(top_oldest_count),
            span: None,
        }
    }

    fn reference_date(&self) -> NaiveDate {
        self.reference_time.date_naive()
    }

    /// Validate and count one row. A row missing a required field is
    /// counted as skipped and its issue returned; nothing else changes.
    pub fn ingest(&mut self, row: RawRow) -> Result<(), RecordIssue> {
        match ArticleRecord::try_from(row) {
            Ok(record) => {
                self.accumulate(record);
                Ok(())
            }
            Err(issue) => {
                self.snapshot.skipped_records += 1;
                Err(issue)
            }
        }
    }

    /// Ingest every row, logging the ones that had to be skipped.
    pub fn ingest_all(&mut self, rows: impl IntoIterator<Item = RawRow>) {
        for (index, row) in rows.into_iter().enumerate() {
            if let Err(issue) = self.ingest(row) {
                log::warn!("{}", Error::Record { index, issue });
            }
        }
    }

    /// Count provider rows (e.g. one row per Substack author) per source.
    pub fn record_providers<S: AsRef<str>>(&mut self, providers: &[S]) {
        for provider in providers {
            let name = provider.as_ref().trim();
            if name.is_empty() {
                continue;
            }
            *self
                .snapshot
                .provider_counts
                .entry(self.registry.normalize(name))
                .or_default() += 1;
        }
    }

    fn accumulate(&mut self, record: ArticleRecord) {
        let source = self.registry.normalize(&record.source);
        let category = record
            .category
            .as_deref()
            .map(|c| self.registry.normalize(c))
            .unwrap_or_else(|| source.clone());
        let bit = if record.read { READ } else { UNREAD };

        let s = &mut self.snapshot;
        s.total_articles += 1;
        *s.by_source.entry(source.clone()).or_default() += 1;
        s.by_source_read_status.entry(source.clone()).or_default()[bit] += 1;
        s.by_category.entry(category.clone()).or_default()[bit] += 1;
        s.by_category_and_source
            .entry(category.clone())
            .or_default()
            .entry(source.clone())
            .or_default()[bit] += 1;

        if record.read {
            s.read_count += 1;
        } else {
            s.unread_count += 1;
            *s.unread_by_source.entry(source.clone()).or_default() += 1;
            *s.unread_by_category.entry(category.clone()).or_default() += 1;
        }

        match record.parsed_date() {
            Some(date) => self.accumulate_dated(date, &record, source, category),
            None => {
                log::debug!(
                    "Record {:?} has unparsable date {:?}; skipping temporal breakdowns",
                    record.title,
                    record.date
                );
                s.undated_records += 1;
                if !record.read {
                    // Unknown age: count it with the oldest backlog.
                    *s.unread_article_age_distribution
                        .entry(AgeBucket::OlderThanOneYear.key().to_string())
                        .or_default() += 1;
                }
            }
        }
    }

    fn accumulate_dated(
        &mut self,
        date: NaiveDate,
        record: &ArticleRecord,
        source: String,
        category: String,
    ) {
        let year = date.format("%Y").to_string();
        let month = date.format("%m").to_string();
        let bit = if record.read { READ } else { UNREAD };

        match self.span.as_mut() {
            Some(span) => span.include(date),
            None => self.span = Some(ObservedSpan::single(date)),
        }

        let reference = self.reference_date();
        let s = &mut self.snapshot;
        *s.by_year.entry(year.clone()).or_default() += 1;
        *s.by_month.entry(month.clone()).or_default() += 1;
        *s.by_year_and_month
            .entry(year.clone())
            .or_default()
            .entry(month.clone())
            .or_default() += 1;
        s.by_month_and_source
            .entry(month.clone())
            .or_default()
            .entry(source)
            .or_default()[bit] += 1;

        if record.read {
            return;
        }

        *s.unread_by_month.entry(month).or_default() += 1;
        *s.unread_by_year.entry(year).or_default() += 1;
        let bucket = age::classify(date, reference);
        *s.unread_article_age_distribution
            .entry(bucket.key().to_string())
            .or_default() += 1;

        self.backlog.offer(
            date,
            ArticleMeta {
                title: record.title.clone(),
                date: date.format(DATE_FORMAT).to_string(),
                link: record.link.clone(),
                category,
                read: false,
            },
        );
    }

    /// Close aggregation and compute the snapshot's derived scalars.
    pub fn finish(self, averaging: &AveragingConfig) -> MetricsSnapshot {
        let reference = self.reference_date();
        let mut snapshot = self.snapshot;

        snapshot.read_unread_totals = [snapshot.read_count, snapshot.unread_count];
        snapshot.read_rate = derived::read_rate(snapshot.read_count, snapshot.total_articles);
        snapshot.avg_articles_per_month =
            derived::average_per_month(snapshot.total_articles, averaging, self.span, reference);

        let (oldest, top) = self.backlog.into_parts();
        snapshot.oldest_unread_article = oldest;
        snapshot.top_oldest_unread_articles = top;
        snapshot.source_metadata = self.registry.metadata();
        snapshot.last_updated = self.reference_time;

        if let Some(span) = self.span {
            log::debug!(
                "Data span: {} to {}",
                span.earliest.format(DATE_FORMAT),
                span.latest.format(DATE_FORMAT)
            );
        }
        snapshot
    }
}
