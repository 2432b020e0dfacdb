use thiserror::Error;

/// Failures produced by the ingestion core.
///
/// None of these abort a batch. They are collected per file or degrade to a
/// default value, and the caller decides how to surface them.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// One input file could not be read, is not JSON, or is not an object or
    /// an array of objects in the streaming-history schema.
    #[error("Failed to load file {file}: {reason}")]
    FileParse { file: String, reason: String },

    /// The batch produced no usable records; the loaded table is unchanged.
    #[error("No records found in {files} file(s), history left unchanged")]
    EmptyResult { files: usize },

    /// The identifier is not of the form `spotify:track:<id>` after normalization.
    #[error("'{0}' is not a playable track identifier")]
    IdentifierNotPlayable(String),

    /// None of the timestamps of a selection could be parsed.
    #[error("No parseable timestamps in selection")]
    UnresolvedDateRange,
}

impl HistoryError {
    pub fn file_parse(file: impl Into<String>, reason: impl ToString) -> Self {
        HistoryError::FileParse {
            file: file.into(),
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
}

/// Failures reported by the remote account client.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("No active Spotify devices found. Please open Spotify on a device.")]
    NoActiveDevice,

    #[error("Spotify Premium is required for playback.")]
    PremiumRequired,

    #[error("Item not found: {0}")]
    NotFound(String),

    #[error("Token unavailable: {0}")]
    Token(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}
