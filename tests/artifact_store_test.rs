use chrono::{NaiveDate, TimeZone, Utc};
use pretty_assertions::assert_eq;
use reading_analytics::{ArtifactStore, Error, MetricsSnapshot};
use std::fs;
use tempfile::TempDir;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn snapshot_on(day: &str) -> MetricsSnapshot {
    let d = date(day);
    MetricsSnapshot::empty(Utc.from_utc_datetime(&d.and_hms_opt(7, 0, 0).unwrap()))
}

#[test]
fn latest_is_the_greatest_date() {
    let dir = TempDir::new().unwrap();
    let store = ArtifactStore::new(dir.path());
    for day in ["2025-10-31", "2025-11-20", "2024-12-31"] {
        store.write(&snapshot_on(day)).unwrap();
    }

    assert_eq!(store.latest().unwrap(), date("2025-11-20"));
    assert_eq!(
        store.dates().unwrap(),
        vec![date("2025-11-20"), date("2025-10-31"), date("2024-12-31")]
    );
}

#[test]
fn unrelated_files_are_ignored() {
    let dir = TempDir::new().unwrap();
    let store = ArtifactStore::new(dir.path());
    store.write(&snapshot_on("2025-01-02")).unwrap();
    fs::write(dir.path().join("latest.json"), "{}").unwrap();
    fs::write(dir.path().join("2099-01-01.txt"), "").unwrap();
    fs::write(dir.path().join("2099-13-01.json"), "{}").unwrap();

    assert_eq!(store.dates().unwrap(), vec![date("2025-01-02")]);
}

#[test]
fn empty_directory_is_a_data_source_error() {
    let dir = TempDir::new().unwrap();
    let err = ArtifactStore::new(dir.path()).latest().unwrap_err();

    assert!(matches!(err, Error::DataSource { .. }));
    assert!(err.to_string().contains(&dir.path().display().to_string()));
}

#[test]
fn write_creates_directory_and_leaves_only_the_artifact() {
    let dir = TempDir::new().unwrap();
    let store = ArtifactStore::new(dir.path().join("metrics"));
    let path = store.write(&snapshot_on("2025-11-20")).unwrap();

    assert_eq!(path, dir.path().join("metrics").join("2025-11-20.json"));
    let names: Vec<String> = fs::read_dir(store.dir())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["2025-11-20.json"]);
}

#[test]
fn same_day_runs_replace_the_artifact() {
    let dir = TempDir::new().unwrap();
    let store = ArtifactStore::new(dir.path());
    let mut snapshot = snapshot_on("2025-11-20");
    store.write(&snapshot).unwrap();
    snapshot.skipped_records = 4;
    store.write(&snapshot).unwrap();

    assert_eq!(store.load(date("2025-11-20")).unwrap().skipped_records, 4);
}

#[test]
fn load_round_trips_the_snapshot() {
    let dir = TempDir::new().unwrap();
    let store = ArtifactStore::new(dir.path());
    let snapshot = snapshot_on("2025-11-20");
    store.write(&snapshot).unwrap();

    let (day, loaded) = store.load_latest().unwrap();
    assert_eq!(day, date("2025-11-20"));
    assert_eq!(loaded, snapshot);
}

#[test]
fn corrupt_artifact_is_a_serialization_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("2025-11-20.json"), "{\"total_articles\": ").unwrap();

    let err = ArtifactStore::new(dir.path())
        .load(date("2025-11-20"))
        .unwrap_err();
    assert!(matches!(err, Error::Serialization { .. }));
    assert!(err.to_string().contains("parse artifact"));
}
