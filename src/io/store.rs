//! Dated snapshot artifacts in a flat directory.
//!
//! Each run writes `YYYY-MM-DD.json`. ISO dates sort lexicographically in
//! calendar order, so the newest artifact is the greatest valid name.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::core::{Error, IoResultExt, MetricsSnapshot, Result, DATE_FORMAT};

const ARTIFACT_EXTENSION: &str = "json";

#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.dir
            .join(format!("{}.{}", date.format(DATE_FORMAT), ARTIFACT_EXTENSION))
    }

    /// Persist a snapshot under the date of its `last_updated` stamp.
    ///
    /// An existing artifact for the same date is replaced.
    pub fn write(&self, snapshot: &MetricsSnapshot) -> Result<PathBuf> {
        let path = self.path_for(snapshot.last_updated.date_naive());
        let json = serde_json::to_vec_pretty(snapshot)
            .map_err(|e| Error::serialization("serialize snapshot", e))?;
        super::write_atomically(&path, &json)?;
        log::info!("Wrote snapshot artifact {}", path.display());
        Ok(path)
    }

    /// Dates of every artifact in the directory, newest first.
    ///
    /// Files whose stem is not a calendar date are ignored. A missing
    /// directory has no artifacts.
    pub fn dates(&self) -> Result<Vec<NaiveDate>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut dates = Vec::new();
        for entry in fs::read_dir(&self.dir).fs_context("list artifacts in", &self.dir)? {
            let entry = entry.fs_context("list artifacts in", &self.dir)?;
            if let Some(date) = artifact_date(&entry.path()) {
                dates.push(date);
            }
        }
        dates.sort_unstable_by(|a, b| b.cmp(a));
        Ok(dates)
    }

    /// Date of the newest artifact.
    pub fn latest(&self) -> Result<NaiveDate> {
        self.dates()?.into_iter().next().ok_or_else(|| {
            Error::data_source(
                self.dir.display().to_string(),
                "no YYYY-MM-DD.json artifacts found",
            )
        })
    }

    pub fn load(&self, date: NaiveDate) -> Result<MetricsSnapshot> {
        let path = self.path_for(date);
        let contents = fs::read_to_string(&path).fs_context("read artifact", &path)?;
        let snapshot = serde_json::from_str(&contents).map_err(|e| {
            Error::serialization(format!("parse artifact {}", path.display()), e)
        })?;
        log::info!("Loaded snapshot artifact {}", path.display());
        Ok(snapshot)
    }

    pub fn load_latest(&self) -> Result<(NaiveDate, MetricsSnapshot)> {
        let date = self.latest()?;
        Ok((date, self.load(date)?))
    }
}

fn artifact_date(path: &Path) -> Option<NaiveDate> {
    if path.extension().and_then(|e| e.to_str()) != Some(ARTIFACT_EXTENSION) {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    let date = NaiveDate::parse_from_str(stem, DATE_FORMAT).ok()?;
    // Reject loose spellings such as `2025-1-5`.
    (date.format(DATE_FORMAT).to_string() == stem).then_some(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_canonical_date_names_are_artifacts() {
        assert!(artifact_date(Path::new("m/2025-11-20.json")).is_some());
        assert!(artifact_date(Path::new("m/2025-1-5.json")).is_none());
        assert!(artifact_date(Path::new("m/2025-02-30.json")).is_none());
        assert!(artifact_date(Path::new("m/latest.json")).is_none());
        assert!(artifact_date(Path::new("m/2025-11-20.yaml")).is_none());
        assert!(artifact_date(Path::new("m/.2025-11-20.json.tmp.1")).is_none());
    }

    #[test]
    fn missing_directory_has_no_dates() {
        let store = ArtifactStore::new("does/not/exist");
        assert!(store.dates().unwrap().is_empty());
        assert!(matches!(store.latest(), Err(Error::DataSource { .. })));
    }
}
