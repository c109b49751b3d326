//! Property-based tests for snapshot invariants
//!
//! These tests verify invariants that should hold for all inputs:
//! - Count identities between totals and every breakdown
//! - The age distribution covers the whole backlog
//! - Chart compilation is deterministic
//! - Snapshots survive a JSON round trip unchanged

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;
use reading_analytics::{
    build_snapshot, AppConfig, ChartCompiler, MetricsSnapshot, RawRow, SourceRegistry,
    StaticSource,
};

fn reference() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 11, 20, 12, 0, 0).unwrap()
}

/// Generate a row; some dates are malformed and some fields missing.
fn raw_row() -> impl Strategy<Value = RawRow> {
    let date = prop_oneof![
        8 => (2019i32..=2026, 1u32..=12, 1u32..=28)
            .prop_map(|(y, m, d)| format!("{y:04}-{m:02}-{d:02}")),
        1 => Just("not-a-date".to_string()),
    ];
    let source = prop::sample::select(vec![
        "github", "GitHub", "Substack", "stripe", "Lobsters", "freecodecamp",
    ]);
    (
        date,
        "[a-z]{1,8}",
        any::<bool>(),
        source,
        prop::option::weighted(0.9, Just(())),
    )
        .prop_map(|(date, title, read, source, keep_link)| {
            let mut row = RawRow::new(&date, &title, &format!("https://x/{title}"), source, read);
            if keep_link.is_none() {
                row.link = None;
            }
            row
        })
}

fn snapshot(rows: Vec<RawRow>) -> MetricsSnapshot {
    build_snapshot(&StaticSource::new(rows), &AppConfig::default(), reference())
        .expect("aggregation never fails for in-memory rows")
}

proptest! {
    #[test]
    fn prop_count_invariants_hold(rows in prop::collection::vec(raw_row(), 0..60)) {
        let row_count = rows.len() as u64;
        let s = snapshot(rows);

        prop_assert!(s.invariant_violations().is_empty());
        prop_assert_eq!(s.read_count + s.unread_count, s.total_articles);
        prop_assert_eq!(s.by_source.values().sum::<u64>(), s.total_articles);
        prop_assert_eq!(
            s.unread_article_age_distribution.values().sum::<u64>(),
            s.unread_count
        );
        prop_assert_eq!(s.total_articles + s.skipped_records, row_count);
        prop_assert!(s.read_rate.is_finite());
        if s.total_articles == 0 {
            prop_assert_eq!(s.read_rate, 0.0);
        }
        for (year, count) in &s.by_year {
            prop_assert_eq!(s.by_year_and_month[year].values().sum::<u64>(), *count);
        }
    }

    #[test]
    fn prop_backlog_is_sorted_and_bounded(rows in prop::collection::vec(raw_row(), 0..60)) {
        let s = snapshot(rows);
        let top = &s.top_oldest_unread_articles;

        prop_assert!(top.len() <= 3);
        prop_assert!(top.windows(2).all(|w| w[0].date <= w[1].date));
        prop_assert_eq!(s.oldest_unread_article.as_ref(), top.first());
        prop_assert!(top.iter().all(|a| !a.read));
    }

    #[test]
    fn prop_chart_compilation_is_deterministic(rows in prop::collection::vec(raw_row(), 0..40)) {
        let s = snapshot(rows);
        let registry = SourceRegistry::default();
        let compiler = ChartCompiler::new(&registry);

        let first = serde_json::to_string(&compiler.compile(&s)).unwrap();
        let second = serde_json::to_string(&compiler.compile(&s)).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_snapshot_json_round_trip(rows in prop::collection::vec(raw_row(), 0..40)) {
        let s = snapshot(rows);
        let json = serde_json::to_string(&s).unwrap();
        let parsed: MetricsSnapshot = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(parsed, s);
    }

    #[test]
    fn prop_result_ignores_input_order(rows in prop::collection::vec(raw_row(), 0..40)) {
        let forward = snapshot(rows.clone());
        let mut reversed = rows;
        reversed.reverse();
        prop_assert_eq!(snapshot(reversed), forward);
    }
}
