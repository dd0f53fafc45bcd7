use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::entry::{Entry, SourceData};
use crate::TARGET_STORE;

/// Loads the prior snapshot. A missing or unreadable file and malformed
/// JSON all degrade to an empty prior state: on the next run every
/// ongoing entry simply counts as new again. Never fatal.
pub fn load_snapshot(path: &Path) -> Vec<Entry> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            warn!(
                target: TARGET_STORE,
                "Could not read snapshot {}: {}. Starting fresh.",
                path.display(),
                err
            );
            return Vec::new();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(entries) => entries,
        Err(err) => {
            warn!(
                target: TARGET_STORE,
                "Could not decode snapshot {}: {}. Starting fresh.",
                path.display(),
                err
            );
            Vec::new()
        }
    }
}

/// Overwrites the snapshot file with the full current state.
pub fn save_snapshot(path: &Path, entries: &[Entry]) -> Result<()> {
    let json = serde_json::to_string_pretty(entries)?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write snapshot to {}", path.display()))?;
    info!(
        target: TARGET_STORE,
        "Saved snapshot with {} ongoing entries to {}",
        entries.len(),
        path.display()
    );
    Ok(())
}

/// Loads the source document. Unlike the snapshot, the source is a hard
/// contract: any read or parse failure (including a missing `entries`
/// field) aborts the run before anything is written.
pub fn load_source(path: &Path) -> Result<SourceData> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read source file {}", path.display()))?;
    let source: SourceData = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse source file {}", path.display()))?;
    info!(
        target: TARGET_STORE,
        "Loaded source with {} entries from {}",
        source.entries.len(),
        path.display()
    );
    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_snapshot_is_empty() {
        let dir = tempdir().unwrap();
        assert!(load_snapshot(&dir.path().join("absent.json")).is_empty());
    }

    #[test]
    fn corrupt_snapshot_is_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("truncated.json");
        fs::write(&path, "[{\"id\": \"1\"").unwrap();
        assert!(load_snapshot(&path).is_empty());
    }

    #[test]
    fn snapshot_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        let entries = vec![Entry {
            id: Some("42".to_string()),
            status: Some("ONGOING".to_string()),
            title: Some("Fix the bridge".to_string()),
            first_seen: Some("2024-01-01T00:00:00Z".to_string()),
            ..Entry::default()
        }];

        save_snapshot(&path, &entries).unwrap();
        assert_eq!(load_snapshot(&path), entries);
    }

    #[test]
    fn save_overwrites_the_previous_snapshot() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        let old = vec![Entry {
            id: Some("old".to_string()),
            ..Entry::default()
        }];
        save_snapshot(&path, &old).unwrap();
        save_snapshot(&path, &[]).unwrap();
        assert!(load_snapshot(&path).is_empty());
    }

    #[test]
    fn missing_source_is_fatal() {
        let dir = tempdir().unwrap();
        assert!(load_source(&dir.path().join("absent.json")).is_err());
    }

    #[test]
    fn source_without_entries_field_is_fatal() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("source.json");
        fs::write(&path, "{\"items\": []}").unwrap();
        assert!(load_source(&path).is_err());
    }

    #[test]
    fn well_formed_source_loads() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("source.json");
        fs::write(
            &path,
            "{\"entries\": [{\"id\": \"1\", \"status\": \"ONGOING\"}]}",
        )
        .unwrap();
        let source = load_source(&path).unwrap();
        assert_eq!(source.entries.len(), 1);
    }
}
