use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::ValueEnum;

use crate::config::load_config;
use crate::io::writers::{JsonWriter, TerminalWriter, ViewModelWriter};
use crate::io::{write_atomically, ArtifactStore};
use crate::pipeline;
use crate::view_model::ViewModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Terminal,
}

/// Options for `reading-analytics analytics`.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsConfig {
    pub metrics_dir: Option<PathBuf>,
    pub date: Option<NaiveDate>,
    pub output: Option<PathBuf>,
    pub format: OutputFormat,
    pub config: Option<PathBuf>,
}

pub fn run_analytics(options: AnalyticsConfig) -> Result<()> {
    let config = load_config(options.config.as_deref())?;
    let metrics_dir = options
        .metrics_dir
        .unwrap_or_else(|| config.paths.metrics_dir.clone());
    let store = ArtifactStore::new(metrics_dir);

    let view_model = pipeline::run_analytics(&store, &config, options.date)?;

    match options.output {
        Some(path) => {
            let rendered = render(&view_model, options.format)?;
            write_atomically(&path, &rendered)?;
            log::info!("Wrote view model {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_view_model(&mut handle, &view_model, options.format)?;
            handle.flush()?;
        }
    }
    Ok(())
}

/// Render the view model into memory in the requested format.
pub fn render(view_model: &ViewModel, format: OutputFormat) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    write_view_model(&mut buffer, view_model, format)?;
    Ok(buffer)
}

fn write_view_model<W: Write>(writer: W, view_model: &ViewModel, format: OutputFormat) -> Result<()> {
    let written = match format {
        OutputFormat::Json => JsonWriter::new(writer).write_view_model(view_model),
        OutputFormat::Terminal => TerminalWriter::new(writer).write_view_model(view_model),
    };
    written.context("failed to write view model")
}
