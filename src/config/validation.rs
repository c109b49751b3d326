use std::collections::HashSet;

use super::AppConfig;
use crate::core::{Error, Result};

/// Upper bound for `backlog.top_oldest_count`.
pub const MAX_TOP_OLDEST: usize = 100;

/// Reject configurations that would produce meaningless metrics.
///
/// All problems are collected so a single error lists every issue.
pub fn validate_config(config: &AppConfig) -> Result<()> {
    let mut problems = Vec::new();

    if config.averaging.window_months == 0 {
        problems.push("averaging.window_months must be at least 1".to_string());
    }
    match config.backlog.top_oldest_count {
        0 => problems.push("backlog.top_oldest_count must be at least 1".to_string()),
        n if n > MAX_TOP_OLDEST => problems.push(format!(
            "backlog.top_oldest_count must be at most {MAX_TOP_OLDEST}, got {n}"
        )),
        _ => {}
    }
    if config.display.key_metrics.is_empty() {
        problems.push("display.key_metrics must list at least one metric".to_string());
    }

    let mut seen = HashSet::new();
    for source in &config.sources {
        let name = source.name.trim();
        if name.is_empty() {
            problems.push("sources entries need a non-empty name".to_string());
            continue;
        }
        if !seen.insert(name.to_lowercase()) {
            problems.push(format!("source {name} is configured more than once"));
        }
        if let Some(color) = &source.color {
            if !is_hex_color(color) {
                problems.push(format!(
                    "source {name} has color {color:?}, expected #rrggbb"
                ));
            }
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(Error::configuration(problems.join("; ")))
    }
}

fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SourceConfig;

    fn source(name: &str, color: Option<&str>) -> SourceConfig {
        SourceConfig {
            name: name.into(),
            color: color.map(String::from),
            added: None,
            aliases: Vec::new(),
        }
    }

    #[test]
    fn defaults_are_valid() {
        assert!(validate_config(&AppConfig::default()).is_ok());
    }

    #[test]
    fn collects_every_problem() {
        let mut config = AppConfig::default();
        config.averaging.window_months = 0;
        config.backlog.top_oldest_count = usize::MAX;
        config.sources = vec![
            source("Blog", Some("red")),
            source("blog", None),
        ];

        let message = validate_config(&config).unwrap_err().to_string();
        assert!(message.contains("window_months"));
        assert!(message.contains("top_oldest_count must be at most 100"));
        assert!(message.contains("expected #rrggbb"));
        assert!(message.contains("more than once"));
    }

    #[test]
    fn hex_colors() {
        assert!(is_hex_color("#00f2fe"));
        assert!(is_hex_color("#ABCDEF"));
        assert!(!is_hex_color("00f2fe"));
        assert!(!is_hex_color("#00f2f"));
        assert!(!is_hex_color("#00f2fg"));
    }
}
