use std::{
    fs,
    path::PathBuf,
    sync::atomic::{AtomicBool, Ordering},
};

use serde_json::{Map, Value};

use crate::{
    error::HistoryError,
    types::{HistoryEntry, HistoryInput},
    utils,
};

const FIELD_TS: &str = "ts";
const FIELD_SONG: &str = "master_metadata_track_name";
const FIELD_CREATOR: &str = "master_metadata_album_artist_name";
const FIELD_TRACK_URI: &str = "spotify_track_uri";
const FIELD_SKIPPED: &str = "skipped";

const RECOGNIZED_FIELDS: [&str; 5] = [
    FIELD_TS,
    FIELD_SONG,
    FIELD_CREATOR,
    FIELD_TRACK_URI,
    FIELD_SKIPPED,
];

type RawRecord = Map<String, Value>;

/// Result of one ingestion batch.
#[derive(Debug, Default)]
pub struct IngestOutcome {
    /// Projected entries of every successfully parsed file, sorted by timestamp.
    pub entries: Vec<HistoryEntry>,
    /// One error per file that could not be read or parsed.
    pub errors: Vec<HistoryError>,
    /// Files pulled from the input list, successful or not.
    pub files_processed: usize,
    /// Set when the cancel flag stopped the batch before the inputs ran out.
    pub cancelled: bool,
}

/// Reads export files lazily, one per iteration step.
///
/// Read failures are yielded as `FileParse` errors so they are reported like
/// any other broken file.
pub fn read_inputs(
    paths: &[PathBuf],
) -> impl Iterator<Item = Result<HistoryInput, HistoryError>> + '_ {
    paths.iter().map(|path| {
        let name = path.display().to_string();
        fs::read_to_string(path)
            .map(|contents| HistoryInput::new(name.clone(), contents))
            .map_err(|e| HistoryError::file_parse(name, e))
    })
}

/// Parses, merges, projects and sorts a batch of export files.
///
/// A broken file is recorded in `errors` and skipped; it never aborts the
/// batch. `cancel` is checked before each input is pulled, so records of
/// files already processed are kept and later files are never read.
pub fn ingest<I>(inputs: I, cancel: &AtomicBool) -> IngestOutcome
where
    I: IntoIterator<Item = Result<HistoryInput, HistoryError>>,
{
    let mut outcome = IngestOutcome::default();
    let mut merged: Vec<RawRecord> = Vec::new();
    let mut inputs = inputs.into_iter();

    loop {
        if cancel.load(Ordering::Relaxed) {
            outcome.cancelled = true;
            tracing::info!(
                files_processed = outcome.files_processed,
                "ingestion cancelled"
            );
            break;
        }

        let Some(input) = inputs.next() else {
            break;
        };
        outcome.files_processed += 1;

        match input.and_then(|input| parse_records(&input)) {
            Ok(records) => {
                tracing::debug!(records = records.len(), "parsed export file");
                merged.extend(records);
            }
            Err(e) => {
                tracing::warn!("{}", e);
                outcome.errors.push(e);
            }
        }
    }

    let mut entries: Vec<HistoryEntry> = merged.iter().map(project).collect();
    // stable: equal and unknown timestamps keep arrival order, unknown first
    entries.sort_by_key(|entry| entry.timestamp);
    outcome.entries = entries;
    outcome
}

/// Parses one export file into its raw records.
///
/// The file must hold an object or an array of objects. A non-empty file
/// whose records carry none of the streaming-history keys is rejected as an
/// unsupported schema rather than loaded as blank rows.
pub fn parse_records(input: &HistoryInput) -> Result<Vec<RawRecord>, HistoryError> {
    let contents = input.contents.trim_start_matches('\u{feff}');
    let value: Value = serde_json::from_str(contents)
        .map_err(|e| HistoryError::file_parse(&input.name, e))?;

    let records = match value {
        Value::Object(record) => vec![record],
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| match item {
                Value::Object(record) => Ok(record),
                other => Err(HistoryError::file_parse(
                    &input.name,
                    format!("item {} is {}, expected an object", idx, json_kind(&other)),
                )),
            })
            .collect::<Result<Vec<_>, _>>()?,
        other => {
            return Err(HistoryError::file_parse(
                &input.name,
                format!(
                    "expected an object or an array of objects, found {}",
                    json_kind(&other)
                ),
            ));
        }
    };

    let recognized = records
        .iter()
        .any(|record| RECOGNIZED_FIELDS.iter().any(|key| record.contains_key(*key)));
    if !records.is_empty() && !recognized {
        return Err(HistoryError::file_parse(
            &input.name,
            "unsupported schema: no streaming-history fields found",
        ));
    }

    Ok(records)
}

/// Projects a raw record onto the five history fields.
///
/// Missing or null values become empty strings or `false`; a missing or
/// unparseable `ts` becomes an unknown timestamp.
pub fn project(record: &RawRecord) -> HistoryEntry {
    HistoryEntry {
        timestamp: record
            .get(FIELD_TS)
            .and_then(Value::as_str)
            .and_then(utils::parse_timestamp),
        song: to_str(record.get(FIELD_SONG)),
        creator: to_str(record.get(FIELD_CREATOR)),
        track_id: utils::normalize_track_uri(&to_str(record.get(FIELD_TRACK_URI))),
        skipped: matches!(record.get(FIELD_SKIPPED), Some(Value::Bool(true))),
    }
}

fn to_str(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
