use crate::{
    config,
    error::RemoteError,
    management::{HistoryManager, TokenManager},
    spotify::SpotifyClient,
};

/// Everything one run of the viewer works with: the loaded history and,
/// once a remote action needs it, the Spotify client.
#[derive(Default)]
pub struct Session {
    history: HistoryManager,
    client: Option<SpotifyClient>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut HistoryManager {
        &mut self.history
    }

    /// Returns the Spotify client, creating it on first use.
    ///
    /// `SPOTIFY_ACCESS_TOKEN` wins over the token cache.
    pub async fn client(&mut self) -> Result<&SpotifyClient, RemoteError> {
        let client = match self.client.take() {
            Some(client) => client,
            None => {
                let token = match config::spotify_access_token() {
                    Some(token) => token,
                    None => TokenManager::load().await?.get_valid_token().await?,
                };
                SpotifyClient::new(config::spotify_apiurl(), token)
            }
        };

        Ok(self.client.insert(client))
    }

    /// Drops the client and deletes the token cache. Returns whether a cache existed.
    pub async fn clear_token_cache(&mut self) -> Result<bool, String> {
        self.client = None;
        TokenManager::clear_cache().await
    }
}
