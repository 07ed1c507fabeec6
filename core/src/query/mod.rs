//! Filter-and-sort query engine over the in-memory roster snapshot.
//!
//! Every populated predicate is ANDed; absent predicates impose no
//! constraint. Both `filter` and `sort` are stable and non-destructive: the
//! snapshot is never mutated and equal keys keep their input order. The only
//! state the engine carries between calls is the active sort, used to
//! compute the direction toggle.

use std::cmp::Ordering;

use crate::roster::{PlayerRecord, RosterSnapshot};

// Re-export query types from shared types crate
pub use whoall_types::{FilterSpec, LevelRange, SortColumn, SortDirection, SortSpec};

#[cfg(test)]
mod engine_tests;

/// Derives filtered, re-ordered result sequences from roster snapshots.
#[derive(Debug, Clone, Default)]
pub struct QueryEngine {
    active_sort: Option<SortSpec>,
}

impl QueryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_sort(&self) -> Option<SortSpec> {
        self.active_sort
    }

    /// Apply every populated predicate, preserving the snapshot's relative
    /// order among matching records.
    pub fn filter(&self, snapshot: &RosterSnapshot, spec: &FilterSpec) -> Vec<PlayerRecord> {
        snapshot
            .records
            .iter()
            .filter(|record| matches(record, spec))
            .cloned()
            .collect()
    }

    /// Sort `results` by `column`.
    ///
    /// Requesting the currently active column flips its direction; any other
    /// column starts ascending. Returns a fresh sequence.
    pub fn sort(&mut self, results: &[PlayerRecord], column: SortColumn) -> Vec<PlayerRecord> {
        let spec = self.toggle(column);
        sort_records(results, &spec)
    }

    fn toggle(&mut self, column: SortColumn) -> SortSpec {
        let spec = match self.active_sort {
            Some(active) if active.column == column => SortSpec {
                column,
                direction: active.direction.flip(),
            },
            _ => SortSpec::ascending(column),
        };
        self.active_sort = Some(spec);
        spec
    }
}

/// Predicate check for one record against one spec.
pub fn matches(record: &PlayerRecord, spec: &FilterSpec) -> bool {
    if let Some(range) = &spec.level_range {
        // Anonymous players carry no level and cannot satisfy a range.
        match record.level {
            Some(level) if range.contains(level) => {}
            _ => return false,
        }
    }
    if let Some(class) = &spec.class
        && !record.class_name.eq_ignore_ascii_case(class)
    {
        return false;
    }
    if let Some(race) = &spec.race
        && !record.race.eq_ignore_ascii_case(race)
    {
        return false;
    }
    if let Some(guild) = &spec.guild
        && !record.guild.eq_ignore_ascii_case(guild)
    {
        return false;
    }
    if let Some(zone) = &spec.zone
        && !record.zone.eq_ignore_ascii_case(zone)
    {
        return false;
    }
    if let Some(name) = &spec.name
        && !record
            .name
            .to_ascii_lowercase()
            .contains(&name.to_ascii_lowercase())
    {
        return false;
    }
    if spec.lfg && !record.lfg {
        return false;
    }
    true
}

/// Stable sort into a fresh sequence.
pub fn sort_records(results: &[PlayerRecord], spec: &SortSpec) -> Vec<PlayerRecord> {
    let mut sorted = results.to_vec();
    sorted.sort_by(|a, b| {
        let ord = compare_column(a, b, spec.column);
        match spec.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
    sorted
}

fn compare_column(a: &PlayerRecord, b: &PlayerRecord, column: SortColumn) -> Ordering {
    match column {
        // Option ordering puts anonymous (None) players first ascending.
        SortColumn::Level => a.level.cmp(&b.level),
        SortColumn::Class => a.class_name.cmp(&b.class_name),
        SortColumn::Name => a.name.cmp(&b.name),
        SortColumn::Race => a.race.cmp(&b.race),
        SortColumn::Zone => a.zone.cmp(&b.zone),
        SortColumn::Guild => a.guild.cmp(&b.guild),
        SortColumn::Lfg => a.lfg.cmp(&b.lfg),
        SortColumn::LastUpdated => a.last_updated.cmp(&b.last_updated),
    }
}
