use std::fs;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{TimeZone, Utc};
use serde_json::{Value, json};
use streamhist::cli;
use streamhist::error::HistoryError;
use streamhist::history::{self, DateRange, PlaylistDraft, dedup_track_ids};
use streamhist::management::HistoryManager;
use streamhist::types::{HistoryEntry, HistoryInput};

// Helper function to create one raw export record
fn record(ts: &str, song: &str, artist: &str, uri: &str) -> Value {
    json!({
        "ts": ts,
        "platform": "android",
        "ms_played": 183_000,
        "master_metadata_track_name": song,
        "master_metadata_album_artist_name": artist,
        "master_metadata_album_album_name": "Some Album",
        "spotify_track_uri": uri,
        "skipped": false,
    })
}

// Helper function to wrap JSON as a successfully read input
fn input(name: &str, value: Value) -> Result<HistoryInput, HistoryError> {
    Ok(HistoryInput::new(name, value.to_string()))
}

// Helper function to create a normalized entry
fn entry(day: u32, song: &str, creator: &str, track_id: &str) -> HistoryEntry {
    HistoryEntry {
        timestamp: Some(Utc.with_ymd_and_hms(2023, 1, day, 12, 0, 0).unwrap()),
        song: song.to_string(),
        creator: creator.to_string(),
        track_id: track_id.to_string(),
        skipped: false,
    }
}

fn not_cancelled() -> AtomicBool {
    AtomicBool::new(false)
}

#[test]
fn test_merge_sorts_across_files() {
    let file_a = json!([record("2023-01-02T00:00:00Z", "Later", "A", "spotify:track:a")]);
    let file_b = json!([record("2023-01-01T00:00:00Z", "Earlier", "B", "spotify:track:b")]);

    let outcome = history::ingest(
        vec![input("a.json", file_a), input("b.json", file_b)],
        &not_cancelled(),
    );

    assert!(outcome.errors.is_empty());
    assert_eq!(outcome.files_processed, 2);
    let songs: Vec<&str> = outcome.entries.iter().map(|e| e.song.as_str()).collect();
    assert_eq!(songs, vec!["Earlier", "Later"]);
}

#[test]
fn test_single_object_file_is_one_record() {
    let outcome = history::ingest(
        vec![input(
            "single.json",
            record("2023-03-01T10:00:00Z", "Solo", "Artist", "spotify:track:s"),
        )],
        &not_cancelled(),
    );

    assert_eq!(outcome.entries.len(), 1);
    assert_eq!(outcome.entries[0].song, "Solo");
    assert_eq!(
        outcome.entries[0].timestamp,
        Some(Utc.with_ymd_and_hms(2023, 3, 1, 10, 0, 0).unwrap())
    );
}

#[test]
fn test_partial_failure_keeps_valid_files() {
    let valid = json!([
        record("2023-01-01T00:00:00Z", "One", "A", "spotify:track:1"),
        record("2023-01-02T00:00:00Z", "Two", "A", "spotify:track:2"),
    ]);

    let outcome = history::ingest(
        vec![
            input("valid.json", valid),
            Ok(HistoryInput::new("broken.json", "[{\"ts\": ")),
        ],
        &not_cancelled(),
    );

    assert_eq!(outcome.entries.len(), 2);
    assert_eq!(outcome.errors.len(), 1);
    assert!(matches!(
        &outcome.errors[0],
        HistoryError::FileParse { file, .. } if file == "broken.json"
    ));
}

#[test]
fn test_non_object_content_is_a_parse_error() {
    let outcome = history::ingest(
        vec![
            input("number.json", json!(42)),
            input("mixed.json", json!([record("2023-01-01T00:00:00Z", "x", "y", "z"), 7])),
        ],
        &not_cancelled(),
    );

    assert!(outcome.entries.is_empty());
    assert_eq!(outcome.errors.len(), 2);
    assert!(outcome.errors[1].to_string().contains("item 1 is a number"));
}

#[test]
fn test_unknown_schema_is_rejected() {
    let outcome = history::ingest(
        vec![input(
            "other.json",
            json!([{ "endTime": "2023-01-01 10:00", "trackName": "Song", "artistName": "Artist" }]),
        )],
        &not_cancelled(),
    );

    assert!(outcome.entries.is_empty());
    assert!(outcome.errors[0].to_string().contains("unsupported schema"));
}

#[test]
fn test_empty_array_is_not_an_error() {
    let outcome = history::ingest(vec![input("empty.json", json!([]))], &not_cancelled());

    assert!(outcome.entries.is_empty());
    assert!(outcome.errors.is_empty());
}

#[test]
fn test_missing_fields_default() {
    let outcome = history::ingest(
        vec![input(
            "sparse.json",
            json!([{
                "ts": "yesterday-ish",
                "master_metadata_track_name": null,
                "spotify_track_uri": null,
                "skipped": null,
            }]),
        )],
        &not_cancelled(),
    );

    let parsed = &outcome.entries[0];
    assert_eq!(parsed.timestamp, None);
    assert_eq!(parsed.song, "");
    assert_eq!(parsed.creator, "");
    assert_eq!(parsed.track_id, "");
    assert!(!parsed.skipped);
}

#[test]
fn test_track_links_are_normalized_on_ingest() {
    let outcome = history::ingest(
        vec![input(
            "links.json",
            json!([record(
                "2023-01-01T00:00:00Z",
                "Song",
                "Artist",
                "https://open.spotify.com/track/abc123?si=xyz"
            )]),
        )],
        &not_cancelled(),
    );

    assert_eq!(outcome.entries[0].track_id, "spotify:track:abc123");
}

#[test]
fn test_unknown_timestamps_sort_first_and_stable() {
    let rows = json!([
        record("2023-01-03T00:00:00Z", "Third", "A", "spotify:track:3"),
        record("broken", "Unknown 1", "A", "spotify:track:u1"),
        record("2023-01-01T00:00:00Z", "First", "A", "spotify:track:1"),
        record("2023-01-01T00:00:00Z", "First again", "A", "spotify:track:1b"),
        record("", "Unknown 2", "A", "spotify:track:u2"),
    ]);

    let outcome = history::ingest(vec![input("rows.json", rows)], &not_cancelled());

    let songs: Vec<&str> = outcome.entries.iter().map(|e| e.song.as_str()).collect();
    assert_eq!(
        songs,
        vec!["Unknown 1", "Unknown 2", "First", "First again", "Third"]
    );
}

#[test]
fn test_cancel_before_start_reads_nothing() {
    let cancel = AtomicBool::new(true);
    let outcome = history::ingest(
        vec![input(
            "a.json",
            json!([record("2023-01-01T00:00:00Z", "x", "y", "z")]),
        )],
        &cancel,
    );

    assert!(outcome.cancelled);
    assert_eq!(outcome.files_processed, 0);
    assert!(outcome.entries.is_empty());
}

#[test]
fn test_cancel_mid_batch_keeps_processed_files() {
    let cancel = AtomicBool::new(false);
    let inputs = vec![
        input("a.json", json!([record("2023-01-01T00:00:00Z", "Kept", "A", "spotify:track:a")])),
        input("b.json", json!([record("2023-01-02T00:00:00Z", "Dropped", "B", "spotify:track:b")])),
    ];

    // The cancel signal arrives while the first file is processed
    let outcome = history::ingest(
        inputs
            .into_iter()
            .inspect(|_| cancel.store(true, Ordering::Relaxed)),
        &cancel,
    );

    assert!(outcome.cancelled);
    assert_eq!(outcome.files_processed, 1);
    assert_eq!(outcome.entries.len(), 1);
    assert_eq!(outcome.entries[0].song, "Kept");
}

#[test]
fn test_empty_batch_leaves_table_untouched() {
    let mut manager = HistoryManager::new();
    let first = manager.load(history::ingest(
        vec![input(
            "a.json",
            json!([record("2023-01-01T00:00:00Z", "Kept", "A", "spotify:track:a")]),
        )],
        &not_cancelled(),
    ));
    assert!(first.replaced());
    assert_eq!(manager.len(), 1);

    let second = manager.load(history::ingest(
        vec![Ok(HistoryInput::new("broken.json", "nope"))],
        &not_cancelled(),
    ));

    assert!(!second.replaced());
    assert!(matches!(
        second.empty_result,
        Some(HistoryError::EmptyResult { files: 1 })
    ));
    assert_eq!(second.errors.len(), 1);
    assert_eq!(manager.len(), 1);
    assert_eq!(manager.entries()[0].song, "Kept");
}

#[test]
fn test_new_batch_replaces_table() {
    let mut manager = HistoryManager::new();
    manager.load(history::ingest(
        vec![input("a.json", json!([record("2023-01-01T00:00:00Z", "Old", "A", "spotify:track:a")]))],
        &not_cancelled(),
    ));
    manager.load(history::ingest(
        vec![input("b.json", json!([record("2023-02-01T00:00:00Z", "New", "B", "spotify:track:b")]))],
        &not_cancelled(),
    ));

    assert_eq!(manager.len(), 1);
    assert_eq!(manager.entries()[0].song, "New");
}

#[test]
fn test_open_files_reads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("Streaming_History_Audio_2023.json");
    fs::write(
        &good,
        json!([record("2023-05-01T08:00:00Z", "On Disk", "Artist", "spotify:track:d")]).to_string(),
    )
    .unwrap();
    let missing = dir.path().join("missing.json");

    let mut manager = HistoryManager::new();
    let report = manager.open_files(&[good, missing], &not_cancelled());

    assert_eq!(report.files_processed, 2);
    assert_eq!(report.entries, 1);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].to_string().contains("missing.json"));
    assert_eq!(manager.files_loaded(), 2);
    assert_eq!(manager.entries()[0].song, "On Disk");
}

#[test]
fn test_filter_matches_song_or_creator_case_insensitive() {
    let entries = vec![
        entry(1, "Paranoid Android", "Radiohead", "spotify:track:1"),
        entry(2, "Karma Police", "RADIOHEAD", "spotify:track:2"),
        entry(3, "Android Dreams", "Someone", "spotify:track:3"),
        entry(4, "", "", "spotify:track:4"),
    ];

    let by_creator = history::filter(&entries, "radiohead");
    assert_eq!(by_creator.len(), 2);

    let by_song = history::filter(&entries, "ANDROID");
    let songs: Vec<&str> = by_song.iter().map(|e| e.song.as_str()).collect();
    assert_eq!(songs, vec!["Paranoid Android", "Android Dreams"]);

    assert!(history::filter(&entries, "nothing like this").is_empty());
}

#[test]
fn test_blank_filter_returns_everything_in_order() {
    let entries = vec![
        entry(1, "A", "x", "spotify:track:1"),
        entry(2, "B", "y", "spotify:track:2"),
        entry(3, "C", "z", "spotify:track:3"),
    ];

    let all: Vec<HistoryEntry> = history::filter(&entries, "").into_iter().cloned().collect();
    assert_eq!(all, entries);

    let blank: Vec<HistoryEntry> = history::filter(&entries, "   ").into_iter().cloned().collect();
    assert_eq!(blank, entries);
}

#[test]
fn test_clearing_search_restores_canonical_table() {
    let mut manager = HistoryManager::new();
    manager.load(history::ingest(
        vec![input(
            "a.json",
            json!([
                record("2023-01-02T00:00:00Z", "Beta", "Band", "spotify:track:b"),
                record("2023-01-01T00:00:00Z", "Alpha", "Band", "spotify:track:a"),
                record("2023-01-03T00:00:00Z", "Gamma", "Other", "spotify:track:g"),
            ]),
        )],
        &not_cancelled(),
    ));

    let narrowed = manager.search("other");
    assert_eq!(narrowed.len(), 1);

    let cleared: Vec<&str> = manager.search("").iter().map(|e| e.song.as_str()).collect();
    assert_eq!(cleared, vec!["Alpha", "Beta", "Gamma"]);
    assert_eq!(manager.len(), 3);
}

#[test]
fn test_dedup_track_ids_keeps_first_occurrence() {
    let ids = dedup_track_ids(
        ["X", "Y", "X", "Z"]
            .into_iter()
            .map(String::from),
    );
    assert_eq!(ids, vec!["X", "Y", "Z"]);
}

#[test]
fn test_playlist_draft_from_selection() {
    let x = entry(3, "x", "a", "spotify:track:X");
    let y = entry(1, "y", "a", "https://open.spotify.com/track/Y?si=1");
    let x_again = entry(5, "x", "a", "spotify:track:X");
    let z = entry(2, "z", "a", "spotify:track:Z");
    let podcast = entry(28, "episode", "show", "spotify:episode:P");

    let draft = PlaylistDraft::from_selection(&[&x, &y, &x_again, &z, &podcast]).unwrap();

    assert_eq!(
        draft.track_ids,
        vec!["spotify:track:X", "spotify:track:Y", "spotify:track:Z"]
    );
    // The non-playable row does not stretch the range
    assert_eq!(draft.name, "Playlist 2023-01-01 to 2023-01-05");
    assert!(draft.range.days().is_ok());
}

#[test]
fn test_playlist_draft_without_playable_rows() {
    let podcast = entry(1, "episode", "show", "spotify:episode:P");
    let blank = entry(2, "", "", "");

    assert_eq!(PlaylistDraft::from_selection(&[&podcast, &blank]), None);
    assert_eq!(PlaylistDraft::from_selection(&[]), None);
}

#[test]
fn test_unknown_date_fallback() {
    let range = DateRange::from_display_strings(&["garbage", "", "13/45/2023"]);

    assert_eq!(range.label(), "Playlist unknown to unknown");
    assert!(matches!(range.days(), Err(HistoryError::UnresolvedDateRange)));

    let mut undated = entry(1, "song", "artist", "spotify:track:U");
    undated.timestamp = None;
    let draft = PlaylistDraft::from_selection(&[&undated]).unwrap();
    assert_eq!(draft.name, "Playlist unknown to unknown");
}

#[test]
fn test_date_range_ignores_unparseable_strings() {
    let range = DateRange::from_display_strings(&[
        "2023-04-10 09:00:00",
        "not a date",
        "2023-02-01 23:59:59",
        "2023-03-15T12:00:00Z",
    ]);

    let (start, end) = range.days().unwrap();
    assert_eq!(start.to_string(), "2023-02-01");
    assert_eq!(end.to_string(), "2023-04-10");
    assert_eq!(range.label(), "Playlist 2023-02-01 to 2023-04-10");
}

#[test]
fn test_select_rows_from_searched_view() {
    let entries = vec![
        entry(1, "Intro", "Band", "spotify:track:1"),
        entry(2, "Jazz Night", "Quartet", "spotify:track:2"),
        entry(3, "Outro", "Band", "spotify:track:3"),
        entry(4, "Late Jazz", "Trio", "spotify:track:4"),
    ];
    let view = history::filter(&entries, "jazz");

    // Rows are 1-based positions in the searched view, not in the full table
    let picked = cli::select_rows(&view, &[2, 1]);
    let songs: Vec<&str> = picked.iter().map(|e| e.song.as_str()).collect();
    assert_eq!(songs, vec!["Late Jazz", "Jazz Night"]);
}

#[test]
fn test_select_rows_skips_out_of_range_and_keeps_duplicates() {
    let entries = vec![
        entry(1, "A", "x", "spotify:track:a"),
        entry(2, "B", "y", "spotify:track:b"),
    ];
    let view = history::filter(&entries, "");

    let picked = cli::select_rows(&view, &[0, 2, 3, 2, 1]);
    let songs: Vec<&str> = picked.iter().map(|e| e.song.as_str()).collect();
    assert_eq!(songs, vec!["B", "B", "A"]);

    // The duplicate row collapses once it becomes a playlist
    let draft = PlaylistDraft::from_selection(&picked).unwrap();
    assert_eq!(draft.track_ids, vec!["spotify:track:b", "spotify:track:a"]);

    assert!(cli::select_rows(&view, &[5]).is_empty());
}
