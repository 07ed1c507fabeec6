//! Snapshot archive.
//!
//! Every published snapshot can be copied into the archive directory under a
//! timestamp file name; the manifest lists what is available for recall.
//! Loading a named snapshot follows the same wholesale-replacement contract
//! as a live refresh - the caller swaps it into the store.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::RosterError;
use crate::roster::{RosterSnapshot, SnapshotDocument};

/// Archive file stems sort chronologically because of this fixed format.
const ARCHIVE_STEM_FORMAT: &str = "%Y-%m-%d %H-%M-%S";

#[derive(Debug, Clone)]
pub struct SnapshotArchive {
    dir: PathBuf,
}

impl SnapshotArchive {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Archive a snapshot under its retrieval timestamp. Returns the name it
    /// was stored as.
    pub fn save(&self, snapshot: &RosterSnapshot) -> Result<String, RosterError> {
        fs::create_dir_all(&self.dir).map_err(|e| RosterError::io(&self.dir, e))?;

        let name = snapshot.retrieved_at.format(ARCHIVE_STEM_FORMAT).to_string();
        let path = self.dir.join(format!("{name}.json"));
        let content = serde_json::to_string(&SnapshotDocument::from_snapshot(snapshot))?;
        fs::write(&path, content).map_err(|e| RosterError::io(&path, e))?;

        tracing::info!(name, records = snapshot.records.len(), "archived snapshot");
        Ok(name)
    }

    /// List archived snapshot names, newest first. A missing archive
    /// directory is an empty manifest, not an error.
    pub fn manifest(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(&self.dir) else {
            return Vec::new();
        };

        let mut names: Vec<String> = entries
            .filter_map(|entry| {
                let path = entry.ok()?.path();
                if path.extension().and_then(|e| e.to_str()) != Some("json") {
                    return None;
                }
                Some(path.file_stem()?.to_str()?.to_string())
            })
            .collect();

        names.sort();
        names.reverse();
        names
    }

    /// Load a named snapshot for wholesale store replacement.
    pub fn load(&self, name: &str) -> Result<RosterSnapshot, RosterError> {
        let path = self.dir.join(format!("{name}.json"));
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(RosterError::UnknownSnapshot(name.to_string()));
            }
            Err(e) => return Err(RosterError::io(&path, e)),
        };

        let doc: SnapshotDocument = serde_json::from_str(&content)?;
        Ok(doc.into_snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::PlayerRecord;
    use chrono::NaiveDate;

    fn test_archive(tag: &str) -> SnapshotArchive {
        let dir = std::env::temp_dir().join("whoall-archive-test").join(tag);
        std::fs::remove_dir_all(&dir).ok();
        SnapshotArchive::new(dir)
    }

    fn snapshot(day: u32, hour: u32) -> RosterSnapshot {
        let ts = NaiveDate::from_ymd_opt(2023, 10, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap();
        RosterSnapshot::new(
            ts,
            vec![PlayerRecord {
                level: Some(11),
                class_name: "Magician".to_string(),
                name: "Devana".to_string(),
                race: "High Elf".to_string(),
                guild: String::new(),
                zone: "gfaydark".to_string(),
                lfg: true,
                last_updated: ts,
            }],
        )
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let archive = test_archive("round-trip");
        let snap = snapshot(10, 12);

        let name = archive.save(&snap).unwrap();
        assert_eq!(name, "2023-10-10 12-00-00");

        let loaded = archive.load(&name).unwrap();
        assert_eq!(loaded.records, snap.records);

        std::fs::remove_dir_all(archive.dir()).ok();
    }

    #[test]
    fn test_manifest_is_newest_first() {
        let archive = test_archive("manifest");
        archive.save(&snapshot(10, 12)).unwrap();
        archive.save(&snapshot(11, 8)).unwrap();
        archive.save(&snapshot(10, 18)).unwrap();

        assert_eq!(
            archive.manifest(),
            vec![
                "2023-10-11 08-00-00",
                "2023-10-10 18-00-00",
                "2023-10-10 12-00-00",
            ]
        );

        std::fs::remove_dir_all(archive.dir()).ok();
    }

    #[test]
    fn test_missing_archive_dir_is_empty_manifest() {
        let archive = test_archive("missing");
        assert!(archive.manifest().is_empty());
    }

    #[test]
    fn test_unknown_snapshot_errors() {
        let archive = test_archive("unknown");
        match archive.load("2020-01-01 00-00-00") {
            Err(RosterError::UnknownSnapshot(name)) => {
                assert_eq!(name, "2020-01-01 00-00-00");
            }
            other => panic!("expected UnknownSnapshot, got {other:?}"),
        }
    }
}
