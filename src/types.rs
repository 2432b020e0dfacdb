use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// One listening event after ingestion.
///
/// Always carries exactly these five fields, whatever else the raw export
/// record contained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// `None` when the raw `ts` was missing or unparseable.
    pub timestamp: Option<DateTime<Utc>>,
    pub song: String,
    pub creator: String,
    /// Normalized identifier; may still be non-playable.
    pub track_id: String,
    pub skipped: bool,
}

/// The contents of one export file, tagged with where it came from.
#[derive(Debug, Clone)]
pub struct HistoryInput {
    pub name: String,
    pub contents: String,
}

impl HistoryInput {
    pub fn new(name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }
}

#[derive(Tabled)]
pub struct HistoryTableRow {
    #[tabled(rename = "#")]
    pub row: usize,
    #[tabled(rename = "Date/Time")]
    pub date: String,
    #[tabled(rename = "Song")]
    pub song: String,
    #[tabled(rename = "Creator")]
    pub creator: String,
    #[tabled(rename = "Skipped")]
    pub skipped: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub product: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    pub id: Option<String>,
    pub name: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevicesResponse {
    pub devices: Vec<Device>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub public: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetUserPlaylistsResponse {
    pub items: Vec<Playlist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistResponse {
    pub snapshot_id: String,
}
