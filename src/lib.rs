// Export modules for library usage
pub mod aggregation;
pub mod charts;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod derived;
pub mod io;
pub mod pipeline;
pub mod view_model;

// Re-export commonly used types
pub use crate::aggregation::Aggregator;
pub use crate::charts::{ChartCompiler, ChartPayloads};
pub use crate::config::{AppConfig, AveragingConfig, AveragingMode, SourceRegistry};
pub use crate::core::{
    AgeBucket, ArticleMeta, ArticleRecord, Error, MetricsSnapshot, RawRow, RecordIssue, Result,
};
pub use crate::derived::DerivedMetrics;
pub use crate::io::{ArtifactStore, JsonFileSource, RecordSource, StaticSource};
pub use crate::pipeline::{build_snapshot, build_view_model, run_analytics, run_metrics};
pub use crate::view_model::{ViewModel, ViewModelAssembler};
