use chrono::NaiveDateTime;
use memchr::memchr;

const TIMESTAMP_FORMAT: &str = "%a %b %d %H:%M:%S %Y";

/// One parsed `/who` sighting.
///
/// `afk` is carried for callers that care about presence, but the roster
/// builder drops it - the published record format has no AFK column.
#[derive(Debug, Clone, PartialEq)]
pub struct WhoEntry {
    pub timestamp: NaiveDateTime,
    pub afk: bool,
    /// `None` when the player is anonymous.
    pub level: Option<u32>,
    pub class_name: String,
    pub name: String,
    pub race: String,
    pub guild: Option<String>,
    pub zone: String,
    pub lfg: bool,
}

/// Parse a single log line as a `/who` sighting.
///
/// Returns `None` for every other kind of log line; callers feed whole log
/// files through this without pre-classifying them.
pub fn parse_who_line(line: &str) -> Option<WhoEntry> {
    let (rest, timestamp) = parse_timestamp(line)?;
    let rest = rest.trim_start();
    let (rest, afk) = parse_afk(rest);
    let (rest, (level, class_name)) = parse_level_class(rest)?;
    let (rest, name) = parse_name(rest)?;
    let (rest, race) = parse_race(rest)?;
    let (rest, guild) = parse_guild(rest);
    let (zone, lfg) = parse_zone_lfg(rest)?;

    Some(WhoEntry {
        timestamp,
        afk,
        level,
        class_name,
        name,
        race,
        guild,
        zone,
        lfg,
    })
}

// [Tue Oct 10 12:43:55 2023]
fn parse_timestamp(input: &str) -> Option<(&str, NaiveDateTime)> {
    let bytes = input.as_bytes();
    if bytes.first() != Some(&b'[') {
        return None;
    }
    let end = memchr(b']', bytes)?;
    let timestamp = NaiveDateTime::parse_from_str(&input[1..end], TIMESTAMP_FORMAT).ok()?;
    Some((&input[end + 1..], timestamp))
}

fn parse_afk(input: &str) -> (&str, bool) {
    match input.strip_prefix("AFK") {
        Some(rest) => (rest.trim_start(), true),
        None => (input, false),
    }
}

// [11 Magician], [1 Shadow Knight], [ANONYMOUS]
fn parse_level_class(input: &str) -> Option<(&str, (Option<u32>, String))> {
    let bytes = input.as_bytes();
    if bytes.first() != Some(&b'[') {
        return None;
    }
    let end = memchr(b']', bytes)?;
    let inner = input[1..end].trim();

    let parsed = match inner.split_once(' ') {
        Some(("ANONYMOUS", class_name)) => (None, class_name.trim().to_string()),
        Some((level, class_name)) => (Some(level.parse().ok()?), class_name.trim().to_string()),
        None if inner == "ANONYMOUS" => (None, String::new()),
        None => return None,
    };
    Some((&input[end + 1..], parsed))
}

fn parse_name(input: &str) -> Option<(&str, String)> {
    let input = input.trim_start();
    let paren = memchr(b'(', input.as_bytes())?;
    let name = input[..paren].trim();
    if name.is_empty() {
        return None;
    }
    Some((&input[paren..], name.to_string()))
}

// (High Elf)
fn parse_race(input: &str) -> Option<(&str, String)> {
    let bytes = input.as_bytes();
    if bytes.first() != Some(&b'(') {
        return None;
    }
    let end = memchr(b')', bytes)?;
    Some((&input[end + 1..], input[1..end].trim().to_string()))
}

// <Seekers of Souls>, absent for the guildless
fn parse_guild(input: &str) -> (&str, Option<String>) {
    let trimmed = input.trim_start();
    if trimmed.as_bytes().first() == Some(&b'<')
        && let Some(end) = memchr(b'>', trimmed.as_bytes())
    {
        return (&trimmed[end + 1..], Some(trimmed[1..end].trim().to_string()));
    }
    (input, None)
}

// ZONE: gfaydark   LFG  -- the zone may be empty, LFG is optional
fn parse_zone_lfg(input: &str) -> Option<(String, bool)> {
    let tail = input.trim_start().strip_prefix("ZONE:")?;
    let tail = tail.trim();

    if tail == "LFG" {
        return Some((String::new(), true));
    }
    if let Some(zone) = tail.strip_suffix("LFG")
        && zone.ends_with(char::is_whitespace)
    {
        return Some((zone.trim_end().to_string(), true));
    }
    Some((tail.to_string(), false))
}
