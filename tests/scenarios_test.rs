//! End-to-end aggregation scenarios over in-memory sources.

use chrono::{DateTime, Days, TimeZone, Utc};
use pretty_assertions::assert_eq;
use reading_analytics::core::AgeBucket;
use reading_analytics::derived::DerivedMetrics;
use reading_analytics::{build_snapshot, AppConfig, MetricsSnapshot, RawRow, StaticSource};
use std::collections::BTreeMap;

fn reference() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 11, 20, 0, 0, 0).unwrap()
}

fn snapshot_of(rows: Vec<RawRow>) -> MetricsSnapshot {
    build_snapshot(&StaticSource::new(rows), &AppConfig::default(), reference()).unwrap()
}

#[test]
fn three_github_records_two_read() {
    let snapshot = snapshot_of(vec![
        RawRow::new("2025-11-01", "a", "l1", "GitHub", true),
        RawRow::new("2025-11-05", "b", "l2", "GitHub", false),
        RawRow::new("2025-11-09", "c", "l3", "GitHub", true),
    ]);

    assert_eq!(snapshot.total_articles, 3);
    assert_eq!(snapshot.read_count, 2);
    assert_eq!(snapshot.unread_count, 1);
    assert_eq!(snapshot.by_source, BTreeMap::from([("GitHub".to_string(), 3)]));
    assert!((snapshot.read_rate - 66.7).abs() < 0.05);
    assert_eq!(format!("{:.1}", snapshot.read_rate), "66.7");
}

#[test]
fn empty_input_yields_empty_maps_and_zero_rate() {
    let snapshot = snapshot_of(Vec::new());

    assert_eq!(snapshot.total_articles, 0);
    assert_eq!(snapshot.read_rate, 0.0);
    assert!(snapshot.by_source.is_empty());
    assert!(snapshot.by_year_and_month.is_empty());
    assert!(snapshot.unread_article_age_distribution.is_empty());

    // Every map is still serialized, so consumers never see a missing key.
    let json = serde_json::to_value(&snapshot).unwrap();
    for key in [
        "by_source",
        "by_source_read_status",
        "by_year",
        "by_month",
        "by_year_and_month",
        "by_month_and_source_read_status",
        "by_category",
        "by_category_and_source",
        "unread_by_month",
        "unread_by_category",
        "unread_by_source",
        "unread_by_year",
        "unread_article_age_distribution",
        "source_metadata",
    ] {
        assert!(json[key].is_object(), "{key} should be an object");
    }
}

#[test]
fn record_older_than_a_year_is_the_oldest_unread() {
    let date = reference()
        .date_naive()
        .checked_sub_days(Days::new(400))
        .unwrap()
        .format("%Y-%m-%d")
        .to_string();
    let snapshot = snapshot_of(vec![
        RawRow::new(&date, "ancient", "l1", "Substack", false),
        RawRow::new("2025-11-10", "fresh", "l2", "Substack", false),
    ]);

    assert_eq!(snapshot.age_bucket_count(AgeBucket::OlderThanOneYear), 1);
    assert_eq!(snapshot.age_bucket_count(AgeBucket::LessThanOneMonth), 1);
    let oldest = snapshot.oldest_unread_article.as_ref().unwrap();
    assert_eq!(oldest.title, "ancient");
    assert_eq!(oldest.date, date);
    assert_eq!(snapshot.top_oldest_unread_articles[0], *oldest);
}

#[test]
fn most_unread_tie_breaks_alphabetically() {
    let mut rows = Vec::new();
    for i in 0..5 {
        rows.push(RawRow::new("2025-10-01", &format!("s{i}"), &format!("ls{i}"), "Stripe", false));
        rows.push(RawRow::new("2025-10-01", &format!("h{i}"), &format!("lh{i}"), "Shopify", false));
    }

    let forward = snapshot_of(rows.clone());
    rows.reverse();
    let backward = snapshot_of(rows);

    for snapshot in [&forward, &backward] {
        let derived = DerivedMetrics::compute(snapshot);
        assert_eq!(derived.most_unread_source.as_deref(), Some("Shopify"));
    }
}

#[test]
fn months_merge_across_years_but_year_months_stay_separate() {
    let snapshot = snapshot_of(vec![
        RawRow::new("2024-03-10", "a", "l1", "GitHub", true),
        RawRow::new("2025-03-12", "b", "l2", "GitHub", false),
    ]);

    assert_eq!(snapshot.by_month["03"], 2);
    assert_eq!(snapshot.by_year_and_month["2024"]["03"], 1);
    assert_eq!(snapshot.by_year_and_month["2025"]["03"], 1);
}

#[test]
fn malformed_rows_are_skipped_not_fatal() {
    let mut missing_link = RawRow::new("2025-11-01", "a", "l1", "GitHub", true);
    missing_link.link = None;

    let snapshot = snapshot_of(vec![
        missing_link,
        RawRow::new("2025-11-02", "b", "l2", "GitHub", true),
    ]);
    assert_eq!(snapshot.total_articles, 1);
    assert_eq!(snapshot.skipped_records, 1);
}

#[test]
fn top_read_rate_uses_exact_ratios() {
    // 1/3 and 2/6 are equal; the alphabetically first source wins.
    let mut rows = vec![
        RawRow::new("2025-11-01", "z1", "z1", "Stripe", true),
        RawRow::new("2025-11-01", "z2", "z2", "Stripe", false),
        RawRow::new("2025-11-01", "z3", "z3", "Stripe", false),
    ];
    for i in 0..6 {
        rows.push(RawRow::new("2025-11-01", &format!("g{i}"), &format!("g{i}"), "GitHub", i < 2));
    }

    let derived = DerivedMetrics::compute(&snapshot_of(rows));
    assert_eq!(derived.top_read_rate_source.as_deref(), Some("GitHub"));
}

#[test]
fn current_period_is_latest_month_in_data() {
    let snapshot = snapshot_of(vec![
        RawRow::new("2024-12-01", "a", "l1", "GitHub", true),
        RawRow::new("2025-02-03", "b", "l2", "GitHub", true),
        RawRow::new("2025-02-04", "c", "l3", "Stripe", false),
    ]);

    let derived = DerivedMetrics::compute(&snapshot);
    let period = derived.current_period.unwrap();
    assert_eq!(period.to_string(), "2025-02");
    assert_eq!(derived.current_period_read_count, 1);
}
