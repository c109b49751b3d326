//! Configuration for reading-analytics runs.
//!
//! Configuration is read from `.reading-analytics.toml` (see [`loader`]) and
//! every section falls back to defaults when absent.

pub mod loader;
pub mod sources;
pub mod validation;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub use loader::{load_config, CONFIG_FILE_NAME};
pub use sources::{SourceConfig, SourceRegistry};
pub use validation::validate_config;

/// Default averaging window in months.
pub const DEFAULT_WINDOW_MONTHS: u32 = 36;

/// Length of the oldest-unread backlog list.
pub const DEFAULT_TOP_OLDEST_COUNT: usize = 3;

pub const DEFAULT_TITLE: &str = "📚 Personal Reading Analytics";

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub averaging: AveragingConfig,

    #[serde(default)]
    pub backlog: BacklogConfig,

    #[serde(default)]
    pub display: DisplayConfig,

    /// Known sources layered over the built-in registry
    #[serde(default)]
    pub sources: Vec<SourceConfig>,

    #[serde(default)]
    pub paths: PathsConfig,
}

impl AppConfig {
    pub fn registry(&self) -> SourceRegistry {
        SourceRegistry::with_overrides(&self.sources)
    }
}

/// How the articles-per-month denominator is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum AveragingMode {
    /// Divide by `window_months`
    #[default]
    Fixed,
    /// Divide by the month span covered by the dated records
    ObservedSpan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AveragingConfig {
    #[serde(default)]
    pub mode: AveragingMode,

    #[serde(default = "default_window_months")]
    pub window_months: u32,
}

impl Default for AveragingConfig {
    fn default() -> Self {
        Self {
            mode: AveragingMode::Fixed,
            window_months: DEFAULT_WINDOW_MONTHS,
        }
    }
}

fn default_window_months() -> u32 {
    DEFAULT_WINDOW_MONTHS
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BacklogConfig {
    #[serde(default = "default_top_oldest_count")]
    pub top_oldest_count: usize,
}

impl Default for BacklogConfig {
    fn default() -> Self {
        Self {
            top_oldest_count: DEFAULT_TOP_OLDEST_COUNT,
        }
    }
}

fn default_top_oldest_count() -> usize {
    DEFAULT_TOP_OLDEST_COUNT
}

/// Headline figures the view model lists, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyMetricKind {
    Total,
    ReadRate,
    Read,
    Unread,
    AvgPerMonth,
}

impl KeyMetricKind {
    pub const ALL: [KeyMetricKind; 5] = [
        KeyMetricKind::Total,
        KeyMetricKind::ReadRate,
        KeyMetricKind::Read,
        KeyMetricKind::Unread,
        KeyMetricKind::AvgPerMonth,
    ];

    pub const fn title(self) -> &'static str {
        match self {
            KeyMetricKind::Total => "Total Articles",
            KeyMetricKind::ReadRate => "Read Rate",
            KeyMetricKind::Read => "Read",
            KeyMetricKind::Unread => "Unread",
            KeyMetricKind::AvgPerMonth => "Avg/Month",
        }
    }
}

/// Static presentation settings handed through to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_key_metrics")]
    pub key_metrics: Vec<KeyMetricKind>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            key_metrics: default_key_metrics(),
        }
    }
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_key_metrics() -> Vec<KeyMetricKind> {
    KeyMetricKind::ALL.to_vec()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory holding the dated snapshot artifacts
    #[serde(default = "default_metrics_dir")]
    pub metrics_dir: PathBuf,

    /// Optional YAML timeline shown alongside the analytics
    #[serde(default)]
    pub evolution: Option<PathBuf>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            metrics_dir: default_metrics_dir(),
            evolution: None,
        }
    }
}

fn default_metrics_dir() -> PathBuf {
    PathBuf::from("metrics")
}
