//! Query contracts for the roster query engine.
//!
//! `FilterSpec` and `SortSpec` are the entire external surface the engine
//! exposes to its callers: a front end builds one per invocation and passes
//! it in, rather than the engine reading ambient form state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Inclusive level bounds.
///
/// A range only exists once BOTH bounds are known; a half-specified range is
/// not a constraint at all. Use [`LevelRange::from_input`] when the bounds
/// come from free-text form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelRange {
    pub min: u32,
    pub max: u32,
}

impl LevelRange {
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Build a range from raw form input.
    ///
    /// Returns `None` unless both fields parse as numbers, so partial or
    /// malformed input degrades to "constraint not applied" instead of an
    /// error.
    pub fn from_input(min: &str, max: &str) -> Option<Self> {
        let min = min.trim().parse().ok()?;
        let max = max.trim().parse().ok()?;
        Some(Self { min, max })
    }

    pub fn contains(&self, level: u32) -> bool {
        self.min <= level && level <= self.max
    }
}

/// One roster query: every populated field is ANDed, absent fields impose no
/// constraint.
///
/// Text-exact fields (`class`, `race`, `guild`, `zone`) match case-insensitively;
/// `name` is a case-insensitive substring match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub level_range: Option<LevelRange>,
    pub class: Option<String>,
    pub name: Option<String>,
    pub race: Option<String>,
    pub guild: Option<String>,
    pub zone: Option<String>,
    /// When set, only players flagged LFG match. Unset imposes no constraint.
    pub lfg: bool,
}

impl FilterSpec {
    /// True when no predicate is populated (such a query returns the whole
    /// snapshot).
    pub fn is_empty(&self) -> bool {
        self.level_range.is_none()
            && self.class.is_none()
            && self.name.is_none()
            && self.race.is_none()
            && self.guild.is_none()
            && self.zone.is_none()
            && !self.lfg
    }
}

/// Sortable roster columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    Level,
    Class,
    Name,
    Race,
    Zone,
    Guild,
    Lfg,
    LastUpdated,
}

impl SortColumn {
    pub fn label(&self) -> &'static str {
        match self {
            SortColumn::Level => "Level",
            SortColumn::Class => "Class",
            SortColumn::Name => "Name",
            SortColumn::Race => "Race",
            SortColumn::Zone => "Zone",
            SortColumn::Guild => "Guild",
            SortColumn::Lfg => "LFG",
            SortColumn::LastUpdated => "Last Updated",
        }
    }
}

impl FromStr for SortColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "level" => Ok(SortColumn::Level),
            "class" => Ok(SortColumn::Class),
            "name" => Ok(SortColumn::Name),
            "race" => Ok(SortColumn::Race),
            "zone" => Ok(SortColumn::Zone),
            "guild" => Ok(SortColumn::Guild),
            "lfg" => Ok(SortColumn::Lfg),
            "last_updated" | "last-updated" | "updated" => Ok(SortColumn::LastUpdated),
            other => Err(format!("unknown sort column '{other}'")),
        }
    }
}

impl fmt::Display for SortColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Column-header marker for the active sort.
    pub fn arrow(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// The active sort: one column at a time plus a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl SortSpec {
    /// A fresh sort always starts ascending.
    pub fn ascending(column: SortColumn) -> Self {
        Self {
            column,
            direction: SortDirection::Ascending,
        }
    }
}
