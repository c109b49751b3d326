//! Runtime setup for the CLI.

use env_logger::Env;

/// Log level implied by the verbosity flags.
pub fn log_level(verbose: u8, quiet: bool) -> &'static str {
    match (quiet, verbose) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    }
}

/// Initialise `env_logger` once. `RUST_LOG` takes precedence over the flags.
pub fn init_logging(verbose: u8, quiet: bool) {
    let env = Env::default().default_filter_or(log_level(verbose, quiet));
    if let Err(e) = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_target(false)
        .try_init()
    {
        eprintln!("Note: logger already initialized: {e}");
    }
}
