use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::record::PlayerRecord;

/// The full roster as of one fetch.
///
/// Snapshots are immutable once built; a refresh produces a new one and the
/// store swaps the reference wholesale, so a query can never observe a
/// partially updated roster.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RosterSnapshot {
    pub retrieved_at: NaiveDateTime,
    pub records: Vec<PlayerRecord>,
}

impl RosterSnapshot {
    pub fn new(retrieved_at: NaiveDateTime, records: Vec<PlayerRecord>) -> Self {
        Self {
            retrieved_at,
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Wire shape of a published snapshot:
/// `{ "data": [PlayerRecord...], "last_updated": <epoch seconds> }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotDocument {
    /// Fractional epoch seconds, as the publisher's `time.time()` emits.
    pub last_updated: f64,
    pub data: Vec<PlayerRecord>,
}

impl SnapshotDocument {
    pub fn from_snapshot(snapshot: &RosterSnapshot) -> Self {
        let epoch = snapshot
            .retrieved_at
            .and_local_timezone(Local)
            .earliest()
            .map(|dt| dt.timestamp() as f64)
            .unwrap_or(0.0);
        Self {
            last_updated: epoch,
            data: snapshot.records.clone(),
        }
    }

    pub fn into_snapshot(self) -> RosterSnapshot {
        let retrieved_at = DateTime::from_timestamp(self.last_updated as i64, 0)
            .map(|dt| dt.with_timezone(&Local).naive_local())
            .unwrap_or_default();
        RosterSnapshot::new(retrieved_at, self.data)
    }
}

/// Holds the current roster snapshot.
///
/// Owned by the refresh mechanism; the query side reads the snapshot
/// reference exactly once per invocation via [`SnapshotStore::current`], so a
/// concurrent replacement cannot corrupt an in-flight query.
#[derive(Debug, Clone, Default)]
pub struct SnapshotStore {
    current: Arc<RosterSnapshot>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current snapshot wholesale. The prior snapshot lives on
    /// only as long as outstanding query references hold it.
    pub fn replace(&mut self, snapshot: RosterSnapshot) {
        self.current = Arc::new(snapshot);
    }

    pub fn current(&self) -> Arc<RosterSnapshot> {
        Arc::clone(&self.current)
    }

    pub fn retrieved_at(&self) -> NaiveDateTime {
        self.current.retrieved_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(name: &str) -> PlayerRecord {
        PlayerRecord {
            level: Some(10),
            class_name: "Warrior".to_string(),
            name: name.to_string(),
            race: "Human".to_string(),
            guild: String::new(),
            zone: "qeynos".to_string(),
            lfg: false,
            last_updated: NaiveDate::from_ymd_opt(2023, 10, 10)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn test_store_starts_empty() {
        let store = SnapshotStore::new();
        assert!(store.current().is_empty());
    }

    #[test]
    fn test_replace_is_wholesale() {
        let mut store = SnapshotStore::new();
        let ts = NaiveDate::from_ymd_opt(2023, 10, 10)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();

        store.replace(RosterSnapshot::new(ts, vec![record("Adan"), record("Brakis")]));
        let first = store.current();
        assert_eq!(first.len(), 2);

        store.replace(RosterSnapshot::new(ts, vec![record("Cazic")]));
        // The reference taken before the refresh still sees the old roster.
        assert_eq!(first.len(), 2);
        assert_eq!(store.current().len(), 1);
        assert_eq!(store.current().records[0].name, "Cazic");
    }

    #[test]
    fn test_document_round_trip() {
        let ts = NaiveDate::from_ymd_opt(2023, 10, 10)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let snapshot = RosterSnapshot::new(ts, vec![record("Adan")]);

        let doc = SnapshotDocument::from_snapshot(&snapshot);
        let json = serde_json::to_string(&doc).unwrap();
        let parsed: SnapshotDocument = serde_json::from_str(&json).unwrap();
        let back = parsed.into_snapshot();

        assert_eq!(back.retrieved_at, snapshot.retrieved_at);
        assert_eq!(back.records, snapshot.records);
    }
}
