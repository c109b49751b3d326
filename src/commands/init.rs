use crate::config::CONFIG_FILE_NAME;
use crate::io;
use anyhow::Result;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG: &str = r##"# Reading analytics configuration

[averaging]
# "fixed" divides by window_months, "observed-span" by the months the data covers
mode = "fixed"
window_months = 36

[backlog]
top_oldest_count = 3

[display]
title = "📚 Personal Reading Analytics"
key_metrics = ["total", "read_rate", "read", "unread", "avg_per_month"]

[paths]
metrics_dir = "metrics"
# evolution = "content/evolution.yml"

# Additional sources, or overrides for the built-in ones
# [[sources]]
# name = "Hacker News"
# color = "#ff6600"
# added = "2025-12-01"
# aliases = ["hn"]
"##;

pub fn init_config(force: bool) -> Result<()> {
    let path = init_config_in(Path::new("."), force)?;
    println!("Created {} configuration file", path.display());
    Ok(())
}

/// Write the default configuration into `dir`.
pub fn init_config_in(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    io::write_atomically(&config_path, DEFAULT_CONFIG.as_bytes())?;
    Ok(config_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::parse_config;
    use crate::config::AppConfig;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn default_config_parses_to_defaults() {
        assert_eq!(parse_config(DEFAULT_CONFIG).unwrap(), AppConfig::default());
    }

    #[test]
    fn commented_source_example_is_valid_when_enabled() {
        let enabled: String = DEFAULT_CONFIG
            .lines()
            .skip_while(|line| !line.starts_with("# [[sources]]"))
            .map(|line| line.trim_start_matches("# "))
            .collect::<Vec<_>>()
            .join("\n");

        let config = parse_config(&enabled).unwrap();
        assert_eq!(config.sources.len(), 1);
        assert_eq!(config.sources[0].color.as_deref(), Some("#ff6600"));
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "# mine").unwrap();

        assert!(init_config_in(dir.path(), false).is_err());
        assert_eq!(
            std::fs::read_to_string(dir.path().join(CONFIG_FILE_NAME)).unwrap(),
            "# mine"
        );

        init_config_in(dir.path(), true).unwrap();
        assert_eq!(
            std::fs::read_to_string(dir.path().join(CONFIG_FILE_NAME)).unwrap(),
            DEFAULT_CONFIG
        );
    }
}
