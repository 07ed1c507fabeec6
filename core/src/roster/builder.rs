use chrono::{Duration, NaiveDateTime};
use hashbrown::HashMap;

use super::record::PlayerRecord;
use super::snapshot::RosterSnapshot;
use crate::who_log::WhoEntry;

/// Accumulates `/who` sightings into a roster.
///
/// Pure storage: parsing and scheduling live elsewhere. Characters are keyed
/// by name - a later sighting updates the existing entry in place (and bumps
/// `last_updated`), a first sighting appends, so the roster keeps first-seen
/// order.
#[derive(Debug, Clone, Default)]
pub struct RosterBuilder {
    records: Vec<PlayerRecord>,
    by_name: HashMap<String, usize>,
}

impl RosterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert one parsed `/who` sighting.
    ///
    /// The AFK marker is a parse-level detail and is not carried into the
    /// roster record.
    pub fn apply(&mut self, entry: WhoEntry) {
        match self.by_name.get(&entry.name) {
            Some(&idx) => {
                let record = &mut self.records[idx];
                record.level = entry.level;
                record.class_name = entry.class_name;
                record.race = entry.race;
                record.guild = entry.guild.unwrap_or_default();
                record.zone = entry.zone;
                record.lfg = entry.lfg;
                record.last_updated = entry.timestamp;
            }
            None => {
                self.by_name.insert(entry.name.clone(), self.records.len());
                self.records.push(PlayerRecord {
                    level: entry.level,
                    class_name: entry.class_name,
                    name: entry.name,
                    race: entry.race,
                    guild: entry.guild.unwrap_or_default(),
                    zone: entry.zone,
                    lfg: entry.lfg,
                    last_updated: entry.timestamp,
                });
            }
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.by_name.clear();
    }

    /// Build a snapshot of players seen within `active_window` of `now`,
    /// in first-seen order.
    pub fn snapshot(&self, now: NaiveDateTime, active_window: Duration) -> RosterSnapshot {
        let cutoff = now - active_window;
        let records = self
            .records
            .iter()
            .filter(|r| r.last_updated >= cutoff)
            .cloned()
            .collect();
        RosterSnapshot::new(now, records)
    }
}
