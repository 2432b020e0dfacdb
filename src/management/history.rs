use std::{path::PathBuf, sync::atomic::AtomicBool};

use crate::{
    error::HistoryError,
    history::{self, IngestOutcome},
    types::HistoryEntry,
};

/// What happened when a batch was applied to the table.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub files_processed: usize,
    pub entries: usize,
    pub errors: Vec<HistoryError>,
    pub cancelled: bool,
    /// `EmptyResult` when the batch produced nothing and the table was kept.
    pub empty_result: Option<HistoryError>,
}

impl LoadReport {
    pub fn replaced(&self) -> bool {
        self.empty_result.is_none()
    }
}

/// Owner of the canonical, timestamp-ordered history table.
///
/// The table is replaced wholesale by every successful load and only ever
/// lives in memory.
#[derive(Debug, Default)]
pub struct HistoryManager {
    entries: Vec<HistoryEntry>,
    files_loaded: usize,
}

impl HistoryManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads and ingests `paths`, then applies the result.
    pub fn open_files(&mut self, paths: &[PathBuf], cancel: &AtomicBool) -> LoadReport {
        let outcome = history::ingest(history::read_inputs(paths), cancel);
        self.load(outcome)
    }

    /// Applies an ingestion outcome.
    ///
    /// A batch without entries leaves the current table untouched and is
    /// reported through `empty_result`.
    pub fn load(&mut self, outcome: IngestOutcome) -> LoadReport {
        let mut report = LoadReport {
            files_processed: outcome.files_processed,
            entries: outcome.entries.len(),
            errors: outcome.errors,
            cancelled: outcome.cancelled,
            empty_result: None,
        };

        if outcome.entries.is_empty() {
            report.empty_result = Some(HistoryError::EmptyResult {
                files: outcome.files_processed,
            });
            return report;
        }

        self.entries = outcome.entries;
        self.files_loaded = outcome.files_processed;
        report
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Case-insensitive song/creator view; a blank query returns every entry.
    pub fn search(&self, query: &str) -> Vec<&HistoryEntry> {
        history::filter(&self.entries, query)
    }

    pub fn files_loaded(&self) -> usize {
        self.files_loaded
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
