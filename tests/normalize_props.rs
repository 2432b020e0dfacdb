use proptest::prelude::*;
use streamhist::history::dedup_track_ids;
use streamhist::utils::{is_playable, normalize_track_uri, parse_timestamp};

proptest! {
    #[test]
    fn normalize_is_idempotent(input in ".*") {
        let once = normalize_track_uri(&input);
        prop_assert_eq!(normalize_track_uri(&once), once);
    }

    #[test]
    fn track_links_become_playable(
        link in "https://open\\.spotify\\.com/track/[A-Za-z0-9]{1,22}(\\?si=[a-z0-9]{0,8})?"
    ) {
        let normalized = normalize_track_uri(&link);
        prop_assert!(is_playable(&normalized));
        prop_assert!(!normalized.contains('?'));
    }

    #[test]
    fn parse_timestamp_never_panics(input in ".*") {
        let _ = parse_timestamp(&input);
    }

    #[test]
    fn dedup_keeps_first_occurrences(ids in prop::collection::vec("[a-c]", 0..20)) {
        let deduped = dedup_track_ids(ids.clone());

        let mut expected: Vec<String> = Vec::new();
        for id in ids {
            if !expected.contains(&id) {
                expected.push(id);
            }
        }
        prop_assert_eq!(deduped, expected);
    }
}
