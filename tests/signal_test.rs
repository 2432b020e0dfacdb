use std::sync::atomic::Ordering;

use serde_json::json;
use streamhist::history;
use streamhist::management::{Interrupt, LoadSignal};
use streamhist::types::HistoryInput;

#[test]
fn test_first_interrupt_while_loading_cancels() {
    let signal = LoadSignal::new();
    signal.begin();

    assert_eq!(signal.interrupt(), Interrupt::CancelLoad);
    assert!(signal.cancel_flag().load(Ordering::SeqCst));

    // A repeated Ctrl-C during the same load exits
    assert_eq!(signal.interrupt(), Interrupt::Exit);
}

#[test]
fn test_interrupt_after_loading_exits() {
    let signal = LoadSignal::new();
    signal.begin();
    signal.finish();

    assert_eq!(signal.interrupt(), Interrupt::Exit);
}

#[test]
fn test_interrupt_outside_any_load_exits() {
    let signal = LoadSignal::new();
    assert_eq!(signal.interrupt(), Interrupt::Exit);
}

#[test]
fn test_interrupt_after_cancelled_load_exits() {
    let signal = LoadSignal::new();
    signal.begin();
    assert_eq!(signal.interrupt(), Interrupt::CancelLoad);
    signal.finish();

    assert_eq!(signal.interrupt(), Interrupt::Exit);
}

#[test]
fn test_begin_resets_previous_cancel() {
    let signal = LoadSignal::new();
    signal.begin();
    signal.interrupt();
    signal.finish();

    signal.begin();
    assert!(!signal.cancel_flag().load(Ordering::SeqCst));
    assert_eq!(signal.interrupt(), Interrupt::CancelLoad);
}

#[test]
fn test_cancelling_through_signal_stops_ingest() {
    let signal = LoadSignal::new();
    signal.begin();

    let inputs = vec![
        Ok(HistoryInput::new(
            "a.json",
            json!([{ "ts": "2023-01-01T00:00:00Z", "master_metadata_track_name": "Kept" }])
                .to_string(),
        )),
        Ok(HistoryInput::new(
            "b.json",
            json!([{ "ts": "2023-01-02T00:00:00Z", "master_metadata_track_name": "Dropped" }])
                .to_string(),
        )),
    ];

    let outcome = history::ingest(
        inputs.into_iter().inspect(|_| {
            signal.interrupt();
        }),
        signal.cancel_flag(),
    );
    signal.finish();

    assert!(outcome.cancelled);
    assert_eq!(outcome.entries.len(), 1);
    assert_eq!(outcome.entries[0].song, "Kept");
    assert_eq!(signal.interrupt(), Interrupt::Exit);
}
