//! Tests for the query engine.
//!
//! Covers the AND semantics, case-insensitive matching, range handling,
//! order preservation, sort stability, and the direction toggle.

use chrono::{NaiveDate, NaiveDateTime};

use super::{FilterSpec, LevelRange, QueryEngine, SortColumn, SortSpec, sort_records};
use crate::roster::{PlayerRecord, RosterSnapshot};

fn ts(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2023, 10, 10)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

fn record(name: &str, level: u32) -> PlayerRecord {
    PlayerRecord {
        level: Some(level),
        class_name: "Warrior".to_string(),
        name: name.to_string(),
        race: "Human".to_string(),
        guild: String::new(),
        zone: "qeynos".to_string(),
        lfg: false,
        last_updated: ts(12, 0),
    }
}

fn snapshot(records: Vec<PlayerRecord>) -> RosterSnapshot {
    RosterSnapshot::new(ts(12, 30), records)
}

fn names(records: &[PlayerRecord]) -> Vec<&str> {
    records.iter().map(|r| r.name.as_str()).collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Filtering
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_empty_filter_returns_all_in_order() {
    let snap = snapshot(vec![record("Adan", 10), record("Brakis", 5), record("Cazic", 50)]);
    let engine = QueryEngine::new();

    let results = engine.filter(&snap, &FilterSpec::default());
    assert_eq!(names(&results), vec!["Adan", "Brakis", "Cazic"]);
}

#[test]
fn test_level_range_inclusive_bounds() {
    let snap = snapshot(vec![
        record("Low", 9),
        record("Min", 10),
        record("Mid", 15),
        record("Max", 20),
        record("High", 21),
    ]);
    let engine = QueryEngine::new();

    let spec = FilterSpec {
        level_range: Some(LevelRange::new(10, 20)),
        ..Default::default()
    };
    let results = engine.filter(&snap, &spec);
    assert_eq!(names(&results), vec!["Min", "Mid", "Max"]);
    assert!(results.iter().all(|r| {
        let level = r.level.unwrap();
        (10..=20).contains(&level)
    }));
}

#[test]
fn test_level_range_excludes_anonymous() {
    let mut anon = record("Mysterious", 0);
    anon.level = None;
    let snap = snapshot(vec![record("Adan", 15), anon]);
    let engine = QueryEngine::new();

    let spec = FilterSpec {
        level_range: Some(LevelRange::new(1, 60)),
        ..Default::default()
    };
    assert_eq!(names(&engine.filter(&snap, &spec)), vec!["Adan"]);
}

#[test]
fn test_partial_range_input_is_not_a_constraint() {
    // A half-filled or malformed form never becomes a range, so filtering
    // with it returns everything.
    assert_eq!(LevelRange::from_input("10", ""), None);
    assert_eq!(LevelRange::from_input("", "20"), None);
    assert_eq!(LevelRange::from_input("ten", "20"), None);

    let snap = snapshot(vec![record("Adan", 10), record("Brakis", 50)]);
    let engine = QueryEngine::new();
    let spec = FilterSpec {
        level_range: LevelRange::from_input("ten", "20"),
        ..Default::default()
    };
    assert_eq!(engine.filter(&snap, &spec).len(), 2);
}

#[test]
fn test_class_exact_match_is_case_insensitive() {
    let snap = snapshot(vec![record("Adan", 10)]);
    let engine = QueryEngine::new();

    let spec = FilterSpec {
        class: Some("warrior".to_string()),
        ..Default::default()
    };
    assert_eq!(engine.filter(&snap, &spec).len(), 1);

    let spec = FilterSpec {
        class: Some("war".to_string()),
        ..Default::default()
    };
    // Exact match, not substring.
    assert!(engine.filter(&snap, &spec).is_empty());
}

#[test]
fn test_name_substring_is_case_insensitive() {
    let snap = snapshot(vec![record("Bobthebuilder", 10), record("Adan", 10)]);
    let engine = QueryEngine::new();

    let spec = FilterSpec {
        name: Some("bob".to_string()),
        ..Default::default()
    };
    assert_eq!(names(&engine.filter(&snap, &spec)), vec!["Bobthebuilder"]);
}

#[test]
fn test_filter_preserves_relative_order() {
    let snap = snapshot(vec![
        record("Adan", 10),
        record("Brakis", 50),
        record("Cazic", 12),
        record("Dalen", 55),
        record("Erud", 14),
    ]);
    let engine = QueryEngine::new();

    let spec = FilterSpec {
        level_range: Some(LevelRange::new(1, 20)),
        ..Default::default()
    };
    assert_eq!(names(&engine.filter(&snap, &spec)), vec!["Adan", "Cazic", "Erud"]);
}

#[test]
fn test_lfg_set_keeps_only_lfg() {
    let mut seeker = record("Seeker", 10);
    seeker.lfg = true;
    let snap = snapshot(vec![record("Adan", 10), seeker]);
    let engine = QueryEngine::new();

    let spec = FilterSpec {
        lfg: true,
        ..Default::default()
    };
    assert_eq!(names(&engine.filter(&snap, &spec)), vec!["Seeker"]);
}

#[test]
fn test_lfg_unset_imposes_no_constraint() {
    let mut seeker = record("Seeker", 10);
    seeker.lfg = true;
    let snap = snapshot(vec![record("Adan", 10), seeker]);
    let engine = QueryEngine::new();

    assert_eq!(engine.filter(&snap, &FilterSpec::default()).len(), 2);
}

#[test]
fn test_predicates_combine_as_and() {
    // One matching record among three near-misses: wrong class or not LFG.
    let mut matching = record("Healbot", 20);
    matching.class_name = "Cleric".to_string();
    matching.lfg = true;

    let mut wrong_class = record("Stabber", 20);
    wrong_class.class_name = "Rogue".to_string();
    wrong_class.lfg = true;

    let mut not_lfg = record("Busy", 20);
    not_lfg.class_name = "Cleric".to_string();

    let mut also_not_lfg = record("Idle", 20);
    also_not_lfg.class_name = "Cleric".to_string();

    let snap = snapshot(vec![wrong_class, matching, not_lfg, also_not_lfg]);
    let engine = QueryEngine::new();

    let spec = FilterSpec {
        class: Some("Cleric".to_string()),
        lfg: true,
        ..Default::default()
    };
    assert_eq!(names(&engine.filter(&snap, &spec)), vec!["Healbot"]);
}

#[test]
fn test_duplicate_names_pass_through() {
    // Duplicates are never deduplicated or merged at query time.
    let snap = snapshot(vec![record("Adan", 10), record("Adan", 12)]);
    let engine = QueryEngine::new();

    let results = engine.filter(&snap, &FilterSpec::default());
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].level, Some(10));
    assert_eq!(results[1].level, Some(12));
}

// ─────────────────────────────────────────────────────────────────────────────
// Sorting
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_sort_is_stable_for_equal_keys() {
    let results = vec![record("A", 10), record("B", 5), record("C", 10)];
    let mut engine = QueryEngine::new();

    let sorted = engine.sort(&results, SortColumn::Level);
    // B(5) first; A before C preserved among the equal 10s.
    assert_eq!(names(&sorted), vec!["B", "A", "C"]);
}

#[test]
fn test_sort_toggle_flips_direction() {
    let results = vec![record("A", 10), record("B", 5), record("C", 30)];
    let mut engine = QueryEngine::new();

    let ascending = engine.sort(&results, SortColumn::Level);
    assert_eq!(names(&ascending), vec!["B", "A", "C"]);

    let descending = engine.sort(&ascending, SortColumn::Level);
    assert_eq!(names(&descending), vec!["C", "A", "B"]);

    let ascending_again = engine.sort(&descending, SortColumn::Level);
    assert_eq!(names(&ascending_again), vec!["B", "A", "C"]);
}

#[test]
fn test_new_column_starts_ascending() {
    let results = vec![record("Caz", 10), record("Abe", 5)];
    let mut engine = QueryEngine::new();

    // Drive level to descending first.
    engine.sort(&results, SortColumn::Level);
    engine.sort(&results, SortColumn::Level);

    // Switching column resets to ascending.
    let by_name = engine.sort(&results, SortColumn::Name);
    assert_eq!(names(&by_name), vec!["Abe", "Caz"]);
    assert_eq!(engine.active_sort(), Some(SortSpec::ascending(SortColumn::Name)));
}

#[test]
fn test_sort_does_not_mutate_input() {
    let results = vec![record("A", 10), record("B", 5)];
    let mut engine = QueryEngine::new();

    let sorted = engine.sort(&results, SortColumn::Level);
    assert_eq!(names(&results), vec!["A", "B"]);
    assert_eq!(names(&sorted), vec!["B", "A"]);
}

#[test]
fn test_sort_by_last_updated_is_chronological() {
    let mut early = record("Early", 10);
    early.last_updated = ts(11, 0);
    let mut late = record("Late", 10);
    late.last_updated = ts(13, 0);

    let spec = SortSpec::ascending(SortColumn::LastUpdated);
    let sorted = sort_records(&[late, early], &spec);
    assert_eq!(names(&sorted), vec!["Early", "Late"]);
}

#[test]
fn test_sort_by_lfg_false_before_true() {
    let mut seeker = record("Seeker", 10);
    seeker.lfg = true;
    let idle = record("Idle", 10);

    let spec = SortSpec::ascending(SortColumn::Lfg);
    let sorted = sort_records(&[seeker, idle], &spec);
    assert_eq!(names(&sorted), vec!["Idle", "Seeker"]);
}

#[test]
fn test_sort_level_text_is_not_numeric_text() {
    // Levels compare numerically: 9 < 10 even though "9" > "10" as text.
    let results = vec![record("Ten", 10), record("Nine", 9)];
    let spec = SortSpec::ascending(SortColumn::Level);
    assert_eq!(names(&sort_records(&results, &spec)), vec!["Nine", "Ten"]);
}

#[test]
fn test_anonymous_sorts_before_leveled_ascending() {
    let mut anon = record("Mysterious", 0);
    anon.level = None;
    let results = vec![record("Adan", 1), anon];

    let spec = SortSpec::ascending(SortColumn::Level);
    assert_eq!(names(&sort_records(&results, &spec)), vec!["Mysterious", "Adan"]);
}
