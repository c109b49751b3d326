//! End-to-end runs: records to snapshot artifact, artifact to view model.
//!
//! Collaborators are passed in explicitly so tests can substitute any stage.

use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, Utc};

use crate::aggregation::Aggregator;
use crate::config::AppConfig;
use crate::core::{Error, MetricsSnapshot, Result};
use crate::io::{ArtifactStore, RecordSource};
use crate::view_model::{load_evolution, ViewModel, ViewModelAssembler};

/// Fetch every row from `source` and aggregate it into a checked snapshot.
pub fn build_snapshot(
    source: &dyn RecordSource,
    config: &AppConfig,
    reference_time: DateTime<Utc>,
) -> Result<MetricsSnapshot> {
    let origin = source.describe();
    log::debug!("Fetching records from {origin}");
    let providers = source.fetch_providers()?;
    let rows = source.fetch_rows()?;
    log::debug!("Fetched {} rows and {} providers", rows.len(), providers.len());

    let registry = config.registry();
    let mut aggregator =
        Aggregator::new(&registry, reference_time, config.backlog.top_oldest_count);
    aggregator.record_providers(&providers);
    aggregator.ingest_all(rows);
    let snapshot = aggregator.finish(&config.averaging);

    if snapshot.skipped_records > 0 {
        log::warn!(
            "Skipped {} malformed rows from {}",
            snapshot.skipped_records,
            origin
        );
    }

    let violations = snapshot.invariant_violations();
    if !violations.is_empty() {
        return Err(Error::Inconsistent(violations));
    }
    Ok(snapshot)
}

/// Aggregate `source` and persist the snapshot as a dated artifact.
pub fn run_metrics(
    source: &dyn RecordSource,
    config: &AppConfig,
    reference_time: DateTime<Utc>,
    store: &ArtifactStore,
) -> Result<PathBuf> {
    let snapshot = build_snapshot(source, config, reference_time)?;
    log::info!(
        "Aggregated {} articles ({} read, {} unread)",
        snapshot.total_articles,
        snapshot.read_count,
        snapshot.unread_count
    );
    store.write(&snapshot)
}

/// Assemble the view model for an already loaded snapshot.
pub fn build_view_model(
    snapshot: &MetricsSnapshot,
    config: &AppConfig,
    history: &[NaiveDate],
) -> ViewModel {
    let registry = config.registry();
    let evolution = config
        .paths
        .evolution
        .as_deref()
        .map(load_evolution)
        .unwrap_or_default();
    ViewModelAssembler::new(&config.display, &registry).assemble(snapshot, history, evolution)
}

/// Load the artifact for `date`, or the newest one, and assemble its view model.
pub fn run_analytics(
    store: &ArtifactStore,
    config: &AppConfig,
    date: Option<NaiveDate>,
) -> Result<ViewModel> {
    let history = store.dates()?;
    let date = match date {
        Some(date) => date,
        None => store.latest()?,
    };
    let snapshot = store.load(date)?;
    Ok(build_view_model(&snapshot, config, &history))
}
