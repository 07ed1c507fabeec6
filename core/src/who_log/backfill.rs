use std::fs::File;
use std::path::Path;

use encoding_rs::WINDOWS_1252;
use memchr::memchr_iter;
use memmap2::Mmap;
use rayon::prelude::*;

use super::parser::{WhoEntry, parse_who_line};
use crate::error::RosterError;

/// Every `/who` response line carries this marker; checking the raw bytes
/// avoids decoding the vast majority of lines.
const ZONE_MARKER: &[u8] = b"ZONE:";

/// Parse every `/who` sighting in a log file.
///
/// The file is memory-mapped and split on newlines with memchr; lines are
/// parsed in parallel and non-`/who` lines are skipped. Game logs are
/// Windows-1252 encoded, so the ASCII pre-filter runs on raw bytes and only
/// matching lines are decoded.
///
/// Entries come back in file order, which matters: the roster builder's
/// upsert relies on later sightings arriving later.
pub fn parse_log_file<P: AsRef<Path>>(path: P) -> Result<Vec<WhoEntry>, RosterError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| RosterError::io(path, e))?;
    let mmap = unsafe { Mmap::map(&file) }.map_err(|e| RosterError::io(path, e))?;
    let bytes = mmap.as_ref();

    // Find all line boundaries
    let mut line_ranges: Vec<(usize, usize)> = Vec::new();
    let mut start = 0;
    for end in memchr_iter(b'\n', bytes) {
        if end > start {
            line_ranges.push((start, end));
        }
        start = end + 1;
    }
    if start < bytes.len() {
        line_ranges.push((start, bytes.len()));
    }

    let entries: Vec<WhoEntry> = line_ranges
        .par_iter()
        .filter_map(|&(start, end)| {
            let raw = &bytes[start..end];
            if !raw.windows(ZONE_MARKER.len()).any(|w| w == ZONE_MARKER) {
                return None;
            }
            let (line, _, _) = WINDOWS_1252.decode(raw);
            parse_who_line(&line)
        })
        .collect();

    tracing::debug!(
        path = %path.display(),
        lines = line_ranges.len(),
        sightings = entries.len(),
        "backfill parse complete"
    );

    Ok(entries)
}

/// Parse `/who` sightings out of already-decoded text (used for tail reads).
pub fn parse_text(text: &str) -> Vec<WhoEntry> {
    text.lines().filter_map(parse_who_line).collect()
}
