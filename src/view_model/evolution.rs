//! Project timeline shown next to the analytics.
//!
//! The timeline is optional decoration. A missing or broken file leaves it
//! empty and never fails the run.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionData {
    #[serde(default)]
    pub chapters: Vec<Chapter>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub intro: String,
    #[serde(default)]
    pub timeline: Vec<Milestone>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub artifacts: Vec<Artifact>,
    #[serde(default)]
    pub description: String,
    /// Filled from `description` after loading.
    #[serde(default)]
    pub description_lines: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    pub name: String,
    pub url: String,
}

/// Parse a timeline document and normalise its milestones.
pub fn parse_evolution(contents: &str) -> Result<Vec<Chapter>, serde_yaml::Error> {
    let mut data: EvolutionData = serde_yaml::from_str(contents)?;
    for chapter in &mut data.chapters {
        for milestone in &mut chapter.timeline {
            milestone.description_lines = description_lines(&milestone.description);
        }
        // ISO-like date strings sort chronologically; newest first.
        chapter.timeline.sort_by(|a, b| b.date.cmp(&a.date));
    }
    Ok(data.chapters)
}

/// Load the timeline at `path`, or an empty one with a warning.
pub fn load_evolution(path: &Path) -> Vec<Chapter> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            log::warn!("Evolution timeline {} not loaded: {}", path.display(), e);
            return Vec::new();
        }
    };

    match parse_evolution(&contents) {
        Ok(chapters) => {
            log::debug!(
                "Loaded {} timeline chapters from {}",
                chapters.len(),
                path.display()
            );
            chapters
        }
        Err(e) => {
            log::warn!("Failed to parse evolution timeline {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

/// Split a free-text description into display lines.
///
/// Blank lines are dropped, a leading `- ` bullet is removed, and a line
/// wrapped in double quotes loses them.
pub fn description_lines(description: &str) -> Vec<String> {
    description
        .trim()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let line = line.strip_prefix("- ").unwrap_or(line).trim();
            line.strip_prefix('"')
                .and_then(|inner| inner.strip_suffix('"'))
                .unwrap_or(line)
                .to_string()
        })
        .collect()
}
