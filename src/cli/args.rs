use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::commands::analytics::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "reading-analytics")]
#[command(about = "Reading-history metrics snapshots and analytics view models", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short = 'q', long = "quiet", global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Aggregate reading records into a dated snapshot artifact
    Metrics {
        /// JSON export of the reading list
        #[arg(short, long, env = "READING_ANALYTICS_INPUT")]
        input: Option<PathBuf>,

        /// Directory holding snapshot artifacts
        #[arg(long = "metrics-dir", env = "READING_ANALYTICS_METRICS_DIR")]
        metrics_dir: Option<PathBuf>,

        /// Reference date for age buckets and the artifact name (YYYY-MM-DD)
        #[arg(long = "as-of")]
        as_of: Option<NaiveDate>,

        /// Configuration file (defaults to .reading-analytics.toml discovery)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Build the analytics view model from a snapshot artifact
    Analytics {
        /// Directory holding snapshot artifacts
        #[arg(long = "metrics-dir", env = "READING_ANALYTICS_METRICS_DIR")]
        metrics_dir: Option<PathBuf>,

        /// Artifact date to use instead of the latest (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Configuration file (defaults to .reading-analytics.toml discovery)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Initialize a reading-analytics configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}
