use chrono::{DateTime, NaiveDate, Utc};

use crate::{error::HistoryError, types::HistoryEntry, utils};

/// Bound shown when no timestamp of a selection could be parsed.
pub const UNKNOWN_DATE: &str = "unknown";

const DAY_FORMAT: &str = "%Y-%m-%d";

/// Earliest and latest instant of a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl DateRange {
    /// Re-parses displayed timestamps and keeps the extremes.
    ///
    /// Strings that fail to parse are ignored; if all of them fail both
    /// bounds stay unknown.
    pub fn from_display_strings<S: AsRef<str>>(timestamps: &[S]) -> Self {
        let parsed: Vec<DateTime<Utc>> = timestamps
            .iter()
            .filter_map(|ts| utils::parse_timestamp(ts.as_ref()))
            .collect();

        Self {
            start: parsed.iter().min().copied(),
            end: parsed.iter().max().copied(),
        }
    }

    /// The bounds as days, or `UnresolvedDateRange` when nothing parsed.
    pub fn days(&self) -> Result<(NaiveDate, NaiveDate), HistoryError> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Ok((start.date_naive(), end.date_naive())),
            _ => Err(HistoryError::UnresolvedDateRange),
        }
    }

    /// `Playlist <start> to <end>`, with `unknown` for missing bounds.
    pub fn label(&self) -> String {
        format!(
            "Playlist {} to {}",
            format_bound(self.start),
            format_bound(self.end)
        )
    }
}

fn format_bound(bound: Option<DateTime<Utc>>) -> String {
    bound
        .map(|ts| ts.format(DAY_FORMAT).to_string())
        .unwrap_or_else(|| UNKNOWN_DATE.to_string())
}

/// A playlist ready to be created from a table selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistDraft {
    pub name: String,
    pub range: DateRange,
    /// Playable identifiers, first occurrence order, no duplicates.
    pub track_ids: Vec<String>,
}

impl PlaylistDraft {
    /// Builds the draft from selected rows in display order.
    ///
    /// Rows without a playable identifier are left out, including their
    /// timestamps. Returns `None` when no selected row is playable.
    pub fn from_selection(selected: &[&HistoryEntry]) -> Option<Self> {
        let playable: Vec<&HistoryEntry> = selected
            .iter()
            .copied()
            .filter(|entry| utils::is_playable(&utils::normalize_track_uri(&entry.track_id)))
            .collect();

        if playable.is_empty() {
            return None;
        }

        let dates: Vec<String> = playable
            .iter()
            .map(|entry| utils::format_timestamp(entry.timestamp))
            .collect();
        let range = DateRange::from_display_strings(&dates);

        let track_ids = dedup_track_ids(
            playable
                .iter()
                .map(|entry| utils::normalize_track_uri(&entry.track_id)),
        );

        Some(Self {
            name: range.label(),
            range,
            track_ids,
        })
    }
}

/// Collects identifiers, dropping repeats but keeping first-seen order.
pub fn dedup_track_ids<I>(ids: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut ids: Vec<String> = ids.into_iter().collect();
    utils::dedup_preserving_order(&mut ids);
    ids
}
