//! Display formatting for pre-rendered view-model values.

use chrono::{DateTime, Utc};

/// Placeholder shown for a badge without a value.
pub const EMPTY_VALUE: &str = "-";

/// One decimal place with a percent sign, e.g. `66.7%`.
pub fn percentage(value: f64) -> String {
    format!("{value:.1}%")
}

/// Rounded to a whole number, e.g. `4`.
pub fn whole(value: f64) -> String {
    format!("{value:.0}")
}

pub fn badge(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => EMPTY_VALUE.to_string(),
    }
}

pub fn timestamp(value: &DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M UTC").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn percentages_use_one_decimal() {
        assert_eq!(percentage(200.0 / 3.0), "66.7%");
        assert_eq!(percentage(0.0), "0.0%");
        assert_eq!(percentage(100.0), "100.0%");
    }

    #[test]
    fn averages_round_to_whole_numbers() {
        assert_eq!(whole(4.4), "4");
        assert_eq!(whole(0.0), "0");
    }

    #[test]
    fn empty_badges_render_a_dash() {
        assert_eq!(badge(None), "-");
        assert_eq!(badge(Some("  ")), "-");
        assert_eq!(badge(Some("GitHub")), "GitHub");
    }

    #[test]
    fn timestamps_are_minute_precision_utc() {
        let at = Utc.with_ymd_and_hms(2025, 11, 20, 8, 5, 59).unwrap();
        assert_eq!(timestamp(&at), "2025-11-20 08:05 UTC");
    }
}
