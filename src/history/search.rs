use crate::types::HistoryEntry;

/// Returns the entries whose song or creator contains `query`, ignoring case.
///
/// A blank query selects everything. The result borrows from `entries`, which
/// is never reordered or modified, so dropping the view restores the full table.
pub fn filter<'a>(entries: &'a [HistoryEntry], query: &str) -> Vec<&'a HistoryEntry> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return entries.iter().collect();
    }

    entries
        .iter()
        .filter(|entry| matches(entry, &needle))
        .collect()
}

fn matches(entry: &HistoryEntry, needle: &str) -> bool {
    entry.song.to_lowercase().contains(needle) || entry.creator.to_lowercase().contains(needle)
}
