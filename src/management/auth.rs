use std::path::PathBuf;

use chrono::Utc;
use reqwest::Client;

use crate::{config, error::RemoteError, types::Token};

/// Seconds before expiry at which a token is refreshed.
const EXPIRY_MARGIN_SECS: u64 = 240;

pub struct TokenManager {
    token: Token,
}

impl TokenManager {
    /// Loads the cached token.
    ///
    /// When there is no cache yet but `SPOTIFY_REFRESH_TOKEN` is configured,
    /// a fresh token is obtained with it and cached.
    pub async fn load() -> Result<Self, RemoteError> {
        let path = Self::token_path();
        match async_fs::read_to_string(&path).await {
            Ok(content) => {
                let token: Token = serde_json::from_str(&content)
                    .map_err(|e| RemoteError::Token(format!("{}: {}", path.display(), e)))?;
                Ok(Self { token })
            }
            Err(e) => {
                let Some(refresh_token) = config::spotify_refresh_token() else {
                    return Err(RemoteError::Token(format!(
                        "{}: {}. Set SPOTIFY_ACCESS_TOKEN or SPOTIFY_REFRESH_TOKEN.",
                        path.display(),
                        e
                    )));
                };

                tracing::debug!("seeding token cache from SPOTIFY_REFRESH_TOKEN");
                let token = refresh(&refresh_token).await?;
                let manager = Self { token };
                manager.persist().await.map_err(RemoteError::Token)?;
                Ok(manager)
            }
        }
    }

    pub async fn persist(&self) -> Result<(), String> {
        let path = Self::token_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self.token).map_err(|e| e.to_string())?;
        async_fs::write(path, json).await.map_err(|e| e.to_string())
    }

    /// Returns an access token, refreshing and re-caching it when close to expiry.
    pub async fn get_valid_token(&mut self) -> Result<String, RemoteError> {
        if self.is_expired() {
            self.token = refresh(&self.token.refresh_token).await?;
            if let Err(e) = self.persist().await {
                tracing::warn!("failed to cache refreshed token: {}", e);
            }
        }

        Ok(self.token.access_token.clone())
    }

    /// Deletes the token cache. Returns whether a cache existed.
    pub async fn clear_cache() -> Result<bool, String> {
        let path = Self::token_path();
        if !path.exists() {
            return Ok(false);
        }

        async_fs::remove_file(&path)
            .await
            .map(|_| true)
            .map_err(|e| e.to_string())
    }

    fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        now >= (self.token.obtained_at + self.token.expires_in).saturating_sub(EXPIRY_MARGIN_SECS)
    }

    fn token_path() -> PathBuf {
        config::data_dir().join("cache/token.json")
    }
}

async fn refresh(refresh_token: &str) -> Result<Token, RemoteError> {
    let client_id = config::spotify_client_id()?;
    let client_secret = config::spotify_client_secret()?;

    let res = Client::new()
        .post(config::spotify_apitoken_url())
        .basic_auth(client_id, Some(client_secret))
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ])
        .send()
        .await?
        .error_for_status()?;

    let json: serde_json::Value = res.json().await?;

    let access_token = json["access_token"]
        .as_str()
        .ok_or_else(|| RemoteError::Token("refresh response without access_token".into()))?;

    Ok(Token {
        access_token: access_token.to_string(),
        // Spotify may omit a rotated refresh token; keep the one we have
        refresh_token: json["refresh_token"]
            .as_str()
            .unwrap_or(refresh_token)
            .to_string(),
        scope: json["scope"].as_str().unwrap_or_default().to_string(),
        expires_in: json["expires_in"].as_u64().unwrap_or(3600),
        obtained_at: Utc::now().timestamp() as u64,
    })
}
