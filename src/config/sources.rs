//! Registry of known reading sources.
//!
//! The registry drives three things: case-insensitive name normalisation,
//! fixed chart colors, and the `source_metadata` governance map. Names that
//! are not registered pass through unchanged, so a newly onboarded source
//! aggregates correctly without a code or config change.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::core::SourceMeta;

/// One known source as configured under `[[sources]]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Canonical display name
    pub name: String,

    /// Fixed chart color, `#rrggbb`
    #[serde(default)]
    pub color: Option<String>,

    /// When the source was onboarded (`YYYY-MM-DD` or `initial`)
    #[serde(default)]
    pub added: Option<String>,

    /// Extra spellings that normalise to this source
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl SourceConfig {
    fn builtin(name: &str, color: &str, added: &str) -> Self {
        Self {
            name: name.to_string(),
            color: Some(color.to_string()),
            added: Some(added.to_string()),
            aliases: Vec::new(),
        }
    }
}

/// Sources known before any configuration is applied.
pub fn builtin_sources() -> Vec<SourceConfig> {
    vec![
        SourceConfig::builtin("Substack", "#667eea", "initial"),
        SourceConfig::builtin("freeCodeCamp", "#764ba2", "initial"),
        SourceConfig::builtin("GitHub", "#f093fb", "2024-03-18"),
        SourceConfig::builtin("Shopify", "#4facfe", "2025-03-05"),
        SourceConfig::builtin("Stripe", "#00f2fe", "2025-11-19"),
    ]
}

#[derive(Debug, Clone)]
pub struct SourceRegistry {
    sources: Vec<SourceConfig>,
    lookup: HashMap<String, usize>,
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::new(builtin_sources())
    }
}

impl SourceRegistry {
    pub fn new(sources: Vec<SourceConfig>) -> Self {
        let lookup = sources
            .iter()
            .enumerate()
            .flat_map(|(idx, source)| {
                std::iter::once(&source.name)
                    .chain(source.aliases.iter())
                    .map(move |name| (name.trim().to_lowercase(), idx))
            })
            .collect();
        Self { sources, lookup }
    }

    /// Built-in sources with configured entries merged on top.
    ///
    /// An override whose name matches a built-in (case-insensitively) replaces
    /// the fields it sets; any other override registers a new source.
    pub fn with_overrides(overrides: &[SourceConfig]) -> Self {
        let mut sources = builtin_sources();
        for entry in overrides {
            match sources
                .iter_mut()
                .find(|s| s.name.eq_ignore_ascii_case(entry.name.trim()))
            {
                Some(existing) => {
                    existing.name = entry.name.trim().to_string();
                    if entry.color.is_some() {
                        existing.color = entry.color.clone();
                    }
                    if entry.added.is_some() {
                        existing.added = entry.added.clone();
                    }
                    existing.aliases.extend(entry.aliases.iter().cloned());
                }
                None => sources.push(entry.clone()),
            }
        }
        Self::new(sources)
    }

    /// Canonical spelling of a source name, or the trimmed input if unknown.
    pub fn normalize(&self, raw: &str) -> String {
        let trimmed = raw.trim();
        self.lookup
            .get(&trimmed.to_lowercase())
            .map(|&idx| self.sources[idx].name.clone())
            .unwrap_or_else(|| trimmed.to_string())
    }

    /// Fixed color for a canonical source name.
    pub fn color(&self, name: &str) -> Option<&str> {
        self.sources
            .iter()
            .find(|s| s.name == name)
            .and_then(|s| s.color.as_deref())
    }

    /// Governance metadata for every source with a known onboarding date.
    pub fn metadata(&self) -> BTreeMap<String, SourceMeta> {
        self.sources
            .iter()
            .filter_map(|s| {
                s.added.as_ref().map(|added| {
                    (
                        s.name.clone(),
                        SourceMeta {
                            added: added.clone(),
                        },
                    )
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_known_names_case_insensitively() {
        let registry = SourceRegistry::default();
        assert_eq!(registry.normalize("github"), "GitHub");
        assert_eq!(registry.normalize("FREECODECAMP"), "freeCodeCamp");
        assert_eq!(registry.normalize("  substack "), "Substack");
    }

    #[test]
    fn unknown_names_pass_through_trimmed() {
        let registry = SourceRegistry::default();
        assert_eq!(registry.normalize(" Hacker News"), "Hacker News");
        assert_eq!(registry.color("Hacker News"), None);
    }

    #[test]
    fn overrides_merge_into_builtins_and_register_new_sources() {
        let registry = SourceRegistry::with_overrides(&[
            SourceConfig {
                name: "github".into(),
                color: Some("#000000".into()),
                added: None,
                aliases: vec!["gh".into()],
            },
            SourceConfig {
                name: "Netflix Tech".into(),
                color: None,
                added: Some("2026-01-04".into()),
                aliases: vec!["netflix".into()],
            },
        ]);

        assert_eq!(registry.normalize("GH"), "github");
        assert_eq!(registry.color("github"), Some("#000000"));
        assert_eq!(registry.normalize("netflix"), "Netflix Tech");

        let metadata = registry.metadata();
        assert_eq!(metadata["github"].added, "2024-03-18");
        assert_eq!(metadata["Netflix Tech"].added, "2026-01-04");
        assert_eq!(metadata.len(), 6);
    }
}
