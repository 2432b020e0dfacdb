use std::{path::PathBuf, sync::Arc};

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    error, history, info,
    management::{Interrupt, LoadReport, LoadSignal, Session},
    types::{HistoryEntry, HistoryTableRow},
    utils, warning,
};

/// Prints the merged history, optionally narrowed by `search`.
pub async fn show(files: Vec<PathBuf>, search: Option<String>, limit: Option<usize>) {
    let session = open_history(files).await;
    let view = session.history().search(search.as_deref().unwrap_or_default());

    if view.is_empty() {
        info!("No entries match.");
        return;
    }

    let shown = limit.unwrap_or(view.len()).min(view.len());
    let table = Table::new(table_rows(&view[..shown]));
    println!("{}", table);

    if shown < view.len() {
        info!("Showing {} of {} entries", shown, view.len());
    } else {
        info!("{} entries", view.len());
    }
}

/// Loads `files` into a fresh session.
///
/// Ctrl-C while loading stops after the current file and keeps what was
/// merged so far. A second Ctrl-C, or any Ctrl-C once loading is done, exits.
pub(crate) async fn open_history(files: Vec<PathBuf>) -> Session {
    let total = files.len();
    let signal = Arc::new(LoadSignal::new());
    signal.begin();

    let watcher = Arc::clone(&signal);
    tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            if watcher.interrupt() == Interrupt::Exit {
                std::process::exit(130);
            }
        }
    });

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} Loading files... [{pos}/{len}] {wide_msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let worker_pb = pb.clone();
    let worker_signal = Arc::clone(&signal);
    let loaded = tokio::task::spawn_blocking(move || {
        let mut session = Session::new();
        let inputs = history::read_inputs(&files).inspect(|input| {
            if let Ok(input) = input {
                worker_pb.set_message(input.name.clone());
            }
            worker_pb.inc(1);
        });
        let report = session
            .history_mut()
            .load(history::ingest(inputs, worker_signal.cancel_flag()));
        (session, report)
    })
    .await;

    signal.finish();
    pb.finish_and_clear();

    let (session, report) = match loaded {
        Ok(loaded) => loaded,
        Err(e) => error!("Loading history failed: {}", e),
    };

    print_report(&report, total, &session);
    session
}

fn print_report(report: &LoadReport, total: usize, session: &Session) {
    for e in &report.errors {
        warning!("{}", e);
    }

    if report.cancelled {
        warning!(
            "Loading cancelled after {} of {} files",
            report.files_processed,
            total
        );
    }

    match &report.empty_result {
        Some(e) => warning!("{}", e),
        None => info!(
            "{} files loaded, {} entries",
            session.history().files_loaded(),
            session.history().len()
        ),
    }
}

/// Table rows for a view, numbered from 1 in display order.
pub fn table_rows(view: &[&HistoryEntry]) -> Vec<HistoryTableRow> {
    view.iter()
        .enumerate()
        .map(|(idx, entry)| HistoryTableRow {
            row: idx + 1,
            date: utils::format_timestamp(entry.timestamp),
            song: entry.song.clone(),
            creator: entry.creator.clone(),
            skipped: utils::format_skipped(entry.skipped),
        })
        .collect()
}

/// Picks rows (1-based, display order) out of a view.
///
/// Rows past the end are reported and skipped.
pub fn select_rows<'a>(view: &[&'a HistoryEntry], rows: &[usize]) -> Vec<&'a HistoryEntry> {
    rows.iter()
        .filter_map(|&row| match row.checked_sub(1).and_then(|idx| view.get(idx)) {
            Some(entry) => Some(*entry),
            None => {
                warning!("Row {} does not exist ({} rows shown)", row, view.len());
                None
            }
        })
        .collect()
}
