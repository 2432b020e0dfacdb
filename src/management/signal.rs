use std::sync::atomic::{AtomicBool, Ordering};

/// What a Ctrl-C does at the moment it arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupt {
    /// Stop the running batch after the current file.
    CancelLoad,
    /// Terminate the process.
    Exit,
}

/// Interrupt state shared by the Ctrl-C watcher and a loading batch.
///
/// Only the first Ctrl-C during a load cancels it. Any other Ctrl-C, a
/// repeated one or one outside a load, exits.
#[derive(Debug, Default)]
pub struct LoadSignal {
    cancel: AtomicBool,
    loading: AtomicBool,
}

impl LoadSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) {
        self.cancel.store(false, Ordering::SeqCst);
        self.loading.store(true, Ordering::SeqCst);
    }

    pub fn finish(&self) {
        self.loading.store(false, Ordering::SeqCst);
    }

    /// The flag handed to `history::ingest`.
    pub fn cancel_flag(&self) -> &AtomicBool {
        &self.cancel
    }

    /// Records a Ctrl-C and returns what the caller should do about it.
    pub fn interrupt(&self) -> Interrupt {
        if self.loading.load(Ordering::SeqCst) && !self.cancel.swap(true, Ordering::SeqCst) {
            Interrupt::CancelLoad
        } else {
            Interrupt::Exit
        }
    }
}
