//! Filesystem and collaborator boundaries: record sources, the artifact
//! store and view-model writers.

pub mod source;
pub mod store;
pub mod writers;

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::{IoResultExt, Result};

pub use source::{JsonFileSource, RecordSource, StaticSource};
pub use store::ArtifactStore;

/// Temporary sibling used while `target` is being written.
fn temp_path_for(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("artifact");
    target.with_file_name(format!(".{}.tmp.{}", name, std::process::id()))
}

/// Write `data` to `target` through a temporary file and a rename, so a
/// reader sees either the old file or the complete new one.
///
/// The parent directory is created if needed. The temporary file is removed
/// when any step fails.
pub fn write_atomically(target: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).fs_context("create directory", parent)?;
    }

    let temp = temp_path_for(target);
    let outcome = fs::write(&temp, data)
        .fs_context("write temporary file", &temp)
        .and_then(|()| fs::rename(&temp, target).fs_context("rename into place", target));

    if outcome.is_err() && temp.exists() {
        if let Err(e) = fs::remove_file(&temp) {
            log::warn!("Failed to remove {}: {}", temp.display(), e);
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn creates_parent_and_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("nested").join("out.json");

        write_atomically(&target, b"{}").unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "{}");
        let names: Vec<_> = fs::read_dir(target.parent().unwrap())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("out.json")]);
    }

    #[test]
    fn replaces_existing_file() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("out.json");
        fs::write(&target, "old").unwrap();

        write_atomically(&target, b"new").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "new");
    }

    #[test]
    fn failed_rename_removes_temp_file() {
        let dir = TempDir::new().unwrap();
        // A directory in the way makes the rename fail.
        let target = dir.path().join("taken");
        fs::create_dir_all(target.join("child")).unwrap();

        let err = write_atomically(&target, b"data").unwrap_err();
        assert!(err.to_string().contains("rename into place"));
        assert!(!temp_path_for(&target).exists());
    }
}
