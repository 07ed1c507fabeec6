//! Centralized display formatting utilities.
//!
//! All roster display formatting goes through this module so the table
//! renderer and any future front end agree on how levels, flags, and
//! staleness read.

/// Format a player level for display.
///
/// Anonymous players (no level in the `/who` output) display as `ANON`.
///
/// # Examples
/// ```
/// use whoall_types::formatting::format_level;
/// assert_eq!(format_level(Some(50)), "50");
/// assert_eq!(format_level(None), "ANON");
/// ```
pub fn format_level(level: Option<u32>) -> String {
    match level {
        Some(level) => level.to_string(),
        None => "ANON".to_string(),
    }
}

/// Format an LFG flag as the table displays it.
///
/// # Examples
/// ```
/// use whoall_types::formatting::format_lfg;
/// assert_eq!(format_lfg(true), "Yes");
/// assert_eq!(format_lfg(false), "No");
/// ```
pub fn format_lfg(lfg: bool) -> &'static str {
    if lfg { "Yes" } else { "No" }
}

/// Format how long ago something was seen, given the elapsed seconds.
///
/// - Under a minute: `just now`
/// - Under an hour: `Xm ago`
/// - Under a day: `Xh ago`
/// - Otherwise: `Xd ago`
///
/// Negative elapsed values (clock skew between log timestamps and the local
/// clock) clamp to `just now`.
///
/// # Examples
/// ```
/// use whoall_types::formatting::format_last_seen;
/// assert_eq!(format_last_seen(12), "just now");
/// assert_eq!(format_last_seen(300), "5m ago");
/// assert_eq!(format_last_seen(7200), "2h ago");
/// assert_eq!(format_last_seen(180_000), "2d ago");
/// assert_eq!(format_last_seen(-30), "just now");
/// ```
pub fn format_last_seen(secs_ago: i64) -> String {
    if secs_ago < 60 {
        "just now".to_string()
    } else if secs_ago < 3600 {
        format!("{}m ago", secs_ago / 60)
    } else if secs_ago < 86_400 {
        format!("{}h ago", secs_ago / 3600)
    } else {
        format!("{}d ago", secs_ago / 86_400)
    }
}

/// Format a duration as `M:SS`.
///
/// # Examples
/// ```
/// use whoall_types::formatting::format_duration;
/// assert_eq!(format_duration(125), "2:05");
/// assert_eq!(format_duration(59), "0:59");
/// assert_eq!(format_duration(0), "0:00");
/// ```
pub fn format_duration(secs: i64) -> String {
    let mins = secs / 60;
    let secs = secs % 60;
    format!("{}:{:02}", mins, secs)
}
