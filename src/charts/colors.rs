//! Chart colors for sources.

use crate::config::SourceRegistry;

/// Neutral outline shared by every stacked dataset.
pub const BORDER_COLOR: &str = "#2d3748";

/// Fixed color for known sources, hashed color for everything else.
pub fn source_color(registry: &SourceRegistry, name: &str) -> String {
    registry
        .color(name)
        .map(str::to_string)
        .unwrap_or_else(|| hashed_color(name))
}

/// Stable `#rrggbb` color derived from a name.
///
/// djb2 over the UTF-8 bytes, reduced modulo the 24-bit RGB space.
pub fn hashed_color(name: &str) -> String {
    let hash = name
        .bytes()
        .fold(5381u32, |h, b| (h << 5).wrapping_add(h).wrapping_add(b as u32));
    format!("#{:06x}", hash % 0xFF_FFFF)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashed_colors_are_stable_and_six_digits() {
        let color = hashed_color("Hacker News");
        assert_eq!(color, hashed_color("Hacker News"));
        assert_eq!(color.len(), 7);
        assert!(color.starts_with('#'));
        assert_ne!(hashed_color("Hacker News"), hashed_color("Lobsters"));
    }

    #[test]
    fn empty_name_hashes_to_seed() {
        assert_eq!(hashed_color(""), format!("#{:06x}", 5381));
    }

    #[test]
    fn known_sources_keep_their_color() {
        let registry = SourceRegistry::default();
        assert_eq!(source_color(&registry, "Substack"), "#667eea");
        assert_eq!(
            source_color(&registry, "Lobsters"),
            hashed_color("Lobsters")
        );
    }
}
