use std::{collections::HashSet, hash::Hash, sync::LazyLock};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;

use crate::error::HistoryError;

/// Prefix every playable identifier starts with.
pub const TRACK_URI_PREFIX: &str = "spotify:track:";

const TRACK_URL_PREFIX: &str = "https://open.spotify.com/track/";

/// Display format of timestamps in the history table.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

static SPOTIFY_TRACK_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https://open\.spotify\.com/track/([A-Za-z0-9]+)")
        .expect("Invalid Spotify track URL regex")
});

const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"];

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Rewrites `https://open.spotify.com/track/<id>` links to `spotify:track:<id>`.
///
/// Anything that is not such a link is returned unchanged, so applying this
/// twice gives the same result as applying it once.
pub fn normalize_track_uri(uri: &str) -> String {
    if uri.starts_with(TRACK_URL_PREFIX) {
        if let Some(id) = SPOTIFY_TRACK_URL_REGEX
            .captures(uri)
            .and_then(|caps| caps.get(1))
        {
            return format!("{}{}", TRACK_URI_PREFIX, id.as_str());
        }
    }
    uri.to_string()
}

pub fn is_playable(uri: &str) -> bool {
    uri.starts_with(TRACK_URI_PREFIX)
}

/// Normalizes `uri` and checks it can be handed to the remote client.
///
/// Callers run this before any remote call; a non-playable identifier never
/// reaches the network.
pub fn playable_track_id(uri: &str) -> Result<String, HistoryError> {
    let normalized = normalize_track_uri(uri.trim());
    if is_playable(&normalized) {
        Ok(normalized)
    } else {
        Err(HistoryError::IdentifierNotPlayable(uri.to_string()))
    }
}

/// Tolerant timestamp parser; anything it cannot read becomes `None`.
///
/// Accepts RFC 3339 (the export format), the table display format with or
/// without an offset, naive `T`-separated date-times and bare dates. Naive
/// values are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(raw, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Formats a timestamp for display; unknown timestamps render empty.
pub fn format_timestamp(timestamp: Option<DateTime<Utc>>) -> String {
    timestamp
        .map(|ts| ts.format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_default()
}

pub fn format_skipped(skipped: bool) -> String {
    if skipped { "Yes" } else { "No" }.to_string()
}

/// Removes duplicates, keeping the first occurrence of each value in place.
pub fn dedup_preserving_order<T: Eq + Hash + Clone>(items: &mut Vec<T>) {
    let mut seen = HashSet::new();
    items.retain(|item| seen.insert(item.clone()));
}

/// Rows picked from the history table, 1-based, in the order given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSelection(pub Vec<usize>);

impl RowSelection {
    pub fn rows(&self) -> &[usize] {
        &self.0
    }
}

/// Parses a comma separated list of 1-based row numbers, e.g. `1,4,7`.
///
/// Used as a clap value parser. Duplicates are kept; they collapse later
/// when the track identifiers are deduplicated.
pub fn parse_rows(s: &str) -> Result<RowSelection, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("row list cannot be empty".into());
    }

    let mut rows = Vec::new();
    for raw in s.split(',') {
        let token = raw.trim();
        if token.is_empty() {
            return Err(format!("row list '{}' contains an empty segment", s));
        }

        match token.parse::<usize>() {
            Ok(0) => return Err("row numbers start at 1".into()),
            Ok(row) => rows.push(row),
            Err(_) => return Err(format!("invalid row '{}'", token)),
        }
    }

    Ok(RowSelection(rows))
}
