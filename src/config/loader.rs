use std::fs;
use std::path::{Path, PathBuf};

use super::validation::validate_config;
use super::AppConfig;
use crate::core::{Error, Result};

pub const CONFIG_FILE_NAME: &str = ".reading-analytics.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Parse and validate config from a TOML string
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    let config = toml::from_str::<AppConfig>(contents).map_err(|e| {
        Error::configuration(format!("failed to parse {}: {}", CONFIG_FILE_NAME, e.message()))
    })?;
    validate_config(&config)?;
    Ok(config)
}

/// Load configuration.
///
/// An explicit path must exist and parse. Without one, the current directory
/// and its ancestors are searched; a discovered file that fails to load only
/// produces a warning and defaults are used.
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig> {
    if let Some(path) = explicit {
        let contents = fs::read_to_string(path).map_err(|e| {
            Error::configuration(format!("cannot read config {}: {}", path.display(), e))
        })?;
        let config = parse_config(&contents)?;
        log::debug!("Loaded config from {}", path.display());
        return Ok(config);
    }

    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            return Ok(AppConfig::default());
        }
    };

    Ok(directory_ancestors(current, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            AppConfig::default()
        }))
}

fn try_load_config_from_path(config_path: &Path) -> Option<AppConfig> {
    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            // Only log actual errors, not "file not found"
            if e.kind() != std::io::ErrorKind::NotFound {
                log::warn!(
                    "Failed to read config file {}: {}",
                    config_path.display(),
                    e
                );
            }
            return None;
        }
    };

    match parse_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("{}. Using defaults.", e);
            None
        }
    }
}

/// Directory ancestors of `start`, nearest first, up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}
