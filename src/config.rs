//! Configuration management for the Streaming History Viewer.
//!
//! Configuration values come from environment variables, optionally seeded
//! from a `.env` file in the local data directory:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf};

use crate::error::ConfigError;

const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const DEFAULT_HISTORY_PLAYLIST: &str = "history";

/// Returns the application directory inside the platform data directory.
///
/// - Linux: `~/.local/share/streamhist`
/// - macOS: `~/Library/Application Support/streamhist`
/// - Windows: `%LOCALAPPDATA%/streamhist`
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("streamhist");
    path
}

/// Loads environment variables from `streamhist/.env` in the local data directory.
///
/// Creates the directory if it doesn't exist. A missing `.env` is not an
/// error. Variables already present in the process environment are not
/// overwritten.
///
/// # Errors
///
/// Returns an error string if the directory cannot be created or the `.env`
/// file cannot be read or parsed.
pub async fn load_env() -> Result<(), String> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if !path.is_file() {
        tracing::debug!("no environment file at {}", path.display());
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| format!("{}: {}", path.display(), e))?;
    Ok(())
}

fn required(var: &'static str) -> Result<String, ConfigError> {
    env::var(var)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing(var))
}

fn optional(var: &str) -> Option<String> {
    env::var(var).ok().filter(|v| !v.trim().is_empty())
}

/// Returns the Spotify Web API base URL (`SPOTIFY_API_URL`).
pub fn spotify_apiurl() -> String {
    optional("SPOTIFY_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

/// Returns the OAuth token endpoint used for refreshing tokens (`SPOTIFY_API_TOKEN_URL`).
pub fn spotify_apitoken_url() -> String {
    optional("SPOTIFY_API_TOKEN_URL").unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string())
}

/// Returns the Spotify API client ID (`SPOTIFY_API_AUTH_CLIENT_ID`).
pub fn spotify_client_id() -> Result<String, ConfigError> {
    required("SPOTIFY_API_AUTH_CLIENT_ID")
}

/// Returns the Spotify API client secret (`SPOTIFY_API_AUTH_CLIENT_SECRET`).
///
/// The secret should never be logged.
pub fn spotify_client_secret() -> Result<String, ConfigError> {
    required("SPOTIFY_API_AUTH_CLIENT_SECRET")
}

/// An access token to use verbatim, bypassing the token cache (`SPOTIFY_ACCESS_TOKEN`).
pub fn spotify_access_token() -> Option<String> {
    optional("SPOTIFY_ACCESS_TOKEN")
}

/// A refresh token used to seed the token cache when it is empty (`SPOTIFY_REFRESH_TOKEN`).
pub fn spotify_refresh_token() -> Option<String> {
    optional("SPOTIFY_REFRESH_TOKEN")
}

/// Name of the playlist single tracks are collected in (`STREAMHIST_HISTORY_PLAYLIST`).
pub fn history_playlist_name() -> String {
    optional("STREAMHIST_HISTORY_PLAYLIST").unwrap_or_else(|| DEFAULT_HISTORY_PLAYLIST.to_string())
}
