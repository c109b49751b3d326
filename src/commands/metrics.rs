use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::commands::reference_time;
use crate::config::load_config;
use crate::core::Error;
use crate::io::{ArtifactStore, JsonFileSource};
use crate::pipeline;

/// Options for `reading-analytics metrics`.
#[derive(Debug, Clone, Default)]
pub struct MetricsConfig {
    pub input: Option<PathBuf>,
    pub metrics_dir: Option<PathBuf>,
    pub as_of: Option<NaiveDate>,
    pub config: Option<PathBuf>,
}

pub fn run_metrics(options: MetricsConfig) -> Result<()> {
    let input = options.input.ok_or_else(|| {
        Error::configuration("no input given; pass --input or set READING_ANALYTICS_INPUT")
    })?;
    let config = load_config(options.config.as_deref())?;
    let metrics_dir = options
        .metrics_dir
        .unwrap_or_else(|| config.paths.metrics_dir.clone());

    let source = JsonFileSource::open(&input)?;
    let store = ArtifactStore::new(metrics_dir);
    let path = pipeline::run_metrics(&source, &config, reference_time(options.as_of), &store)
        .context("metrics run failed")?;

    println!("Wrote {}", path.display());
    Ok(())
}
