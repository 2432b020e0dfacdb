//! Streaming History Viewer Library
//!
//! This library loads exported Spotify streaming-history JSON files, merges
//! them into one canonical listening log and exposes search and selection
//! helpers over it. Playback, queue and playlist actions are forwarded to the
//! Spotify Web API with already-normalized track identifiers.
//!
//! # Modules
//!
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Error kinds of the ingestion core and the remote client
//! - `history` - Ingestion, normalization, search and selection of history entries
//! - `management` - Session state, the canonical table and the token cache
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Identifier normalization and timestamp helpers
//!
//! # Example
//!
//! ```
//! use streamhist::{config, cli};
//!
//! #[tokio::main]
//! async fn main() {
//!     config::load_env().await.ok();
//!     cli::show(vec!["Streaming_History_Audio_2023.json".into()], None, Some(20)).await;
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod history;
pub mod management;
pub mod spotify;
pub mod types;
pub mod utils;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Loading {} files...", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Track added to queue");
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only used for fatal errors where the command cannot continue. The process
/// terminates with exit code 1 after printing.
///
/// # Example
///
/// ```
/// error!("Playback failed: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues such as a single unreadable export file.
///
/// # Example
///
/// ```
/// warning!("Failed to load file {}: {}", path, e);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
