//! # History Module
//!
//! Turns raw streaming-history exports into the canonical listening log and
//! derives views from it.
//!
//! ```text
//! export files ──► ingest (parse, merge, project, sort) ──► Vec<HistoryEntry>
//!                                                              │
//!                              search::filter ◄────────────────┤
//!                     selection::PlaylistDraft ◄───────────────┘
//! ```
//!
//! - [`ingest`] parses each file independently; a broken file is reported
//!   and skipped, never aborting the batch.
//! - [`search`] computes case-insensitive substring views without touching
//!   the canonical entries.
//! - [`selection`] names a playlist after the date range of a selection and
//!   deduplicates its track identifiers.
//!
//! Everything here is synchronous and free of network access.

pub mod ingest;
pub mod search;
pub mod selection;

pub use ingest::{IngestOutcome, ingest, read_inputs};
pub use search::filter;
pub use selection::{DateRange, PlaylistDraft, UNKNOWN_DATE, dedup_track_ids};
