//! `/who` output parsing from EverQuest log files.
//!
//! A `/who all` response line looks like:
//!
//! `[Tue Oct 10 12:43:55 2023] [11 Magician] Devana (High Elf) <Guild> ZONE: gfaydark LFG`
//!
//! with an optional leading `AFK` marker, `ANONYMOUS` in place of the level,
//! an optional guild, a possibly empty zone, and an optional trailing `LFG`.

mod backfill;
mod parser;

pub use backfill::{parse_log_file, parse_text};
pub use parser::{WhoEntry, parse_who_line};
