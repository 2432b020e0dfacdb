//! # Spotify Integration Module
//!
//! Thin client for the Spotify Web API endpoints the viewer forwards to. It
//! only ever receives identifiers that already passed
//! [`crate::utils::playable_track_id`], and it never inspects or retries the
//! outcome of an action beyond transport-level retries.
//!
//! ```text
//! CLI command ──► Session::client() ──► SpotifyClient
//!                                         ├── player   (devices, queue, next, pause, play, /me)
//!                                         └── playlist (list, create, add items)
//! ```
//!
//! ## Error Handling
//!
//! - `502 Bad Gateway` is retried a few times with a fixed delay.
//! - `429 Too Many Requests` waits for `Retry-After` when it is at most
//!   120 seconds, otherwise the error is returned.
//! - `404 Not Found` becomes [`RemoteError::NotFound`].
//! - Everything else is surfaced as [`RemoteError::Http`].

pub mod player;
pub mod playlist;

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use tokio::time::sleep;

use crate::error::RemoteError;

const MAX_RETRIES: u32 = 3;
const BAD_GATEWAY_DELAY: Duration = Duration::from_secs(10);
const MAX_RETRY_AFTER_SECS: u64 = 120;

pub struct SpotifyClient {
    http: Client,
    api_url: String,
    token: String,
}

impl SpotifyClient {
    pub fn new(api_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_url: api_url.into(),
            token: token.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url.trim_end_matches('/'), path)
    }

    /// Sends the request built by `build`, retrying transient failures.
    ///
    /// `what` names the requested resource in `NotFound` errors.
    async fn send<F>(&self, what: &str, build: F) -> Result<Response, RemoteError>
    where
        F: Fn(&Client) -> RequestBuilder,
    {
        let mut attempt = 0;

        loop {
            attempt += 1;
            let response = build(&self.http).bearer_auth(&self.token).send().await?;

            match response.status() {
                StatusCode::BAD_GATEWAY if attempt <= MAX_RETRIES => {
                    tracing::debug!(attempt, "bad gateway from Spotify, retrying");
                    sleep(BAD_GATEWAY_DELAY).await;
                }
                StatusCode::TOO_MANY_REQUESTS if attempt <= MAX_RETRIES => {
                    let retry_after = response
                        .headers()
                        .get("Retry-After")
                        .and_then(|v| v.to_str().ok())
                        .and_then(|v| v.parse::<u64>().ok())
                        .unwrap_or(1);

                    if retry_after > MAX_RETRY_AFTER_SECS {
                        tracing::warn!(retry_after, "rate limited for too long, giving up");
                        return Ok(response.error_for_status()?);
                    }

                    tracing::debug!(retry_after, "rate limited by Spotify, waiting");
                    sleep(Duration::from_secs(retry_after)).await;
                }
                StatusCode::NOT_FOUND => return Err(RemoteError::NotFound(what.to_string())),
                _ => return Ok(response.error_for_status()?),
            }
        }
    }
}
