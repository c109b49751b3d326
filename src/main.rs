use std::process::ExitCode;

use anyhow::Result;
use reading_analytics::cli::{self, Commands};
use reading_analytics::commands::analytics::{run_analytics, AnalyticsConfig};
use reading_analytics::commands::init::init_config;
use reading_analytics::commands::metrics::{run_metrics, MetricsConfig};

fn main() -> ExitCode {
    let cli = cli::parse_args();
    cli::init_logging(cli.verbose, cli.quiet);

    match dispatch(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // One diagnostic line: the error chain joined by ": ".
            let message = format!("{err:#}").replace('\n', " ");
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Metrics {
            input,
            metrics_dir,
            as_of,
            config,
        } => run_metrics(MetricsConfig {
            input,
            metrics_dir,
            as_of,
            config,
        }),
        Commands::Analytics {
            metrics_dir,
            date,
            output,
            format,
            config,
        } => run_analytics(AnalyticsConfig {
            metrics_dir,
            date,
            output,
            format,
            config,
        }),
        Commands::Init { force } => init_config(force),
    }
}
