use crate::{
    error::RemoteError,
    spotify::SpotifyClient,
    types::{
        AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, CreatePlaylistRequest,
        GetUserPlaylistsResponse, Playlist,
    },
};

/// Spotify accepts at most this many items per add request.
const ADD_ITEMS_CHUNK: usize = 100;

/// How many of the user's playlists are searched by name.
const PLAYLIST_LOOKUP_LIMIT: u32 = 50;

impl SpotifyClient {
    /// `GET /me/playlists`
    pub async fn current_user_playlists(&self, limit: u32) -> Result<Vec<Playlist>, RemoteError> {
        let url = self.url("/me/playlists");
        let response = self
            .send("playlists", |http| {
                http.get(&url).query(&[("limit", limit.to_string())])
            })
            .await?;
        Ok(response.json::<GetUserPlaylistsResponse>().await?.items)
    }

    /// Finds a playlist by name, ignoring case, among the first 50 of the user.
    pub async fn find_playlist(&self, name: &str) -> Result<Option<Playlist>, RemoteError> {
        let playlists = self.current_user_playlists(PLAYLIST_LOOKUP_LIMIT).await?;
        Ok(playlists
            .into_iter()
            .find(|p| p.name.to_lowercase() == name.to_lowercase()))
    }

    /// `POST /users/{user_id}/playlists`
    pub async fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        description: &str,
        public: bool,
    ) -> Result<Playlist, RemoteError> {
        let url = self.url(&format!("/users/{}/playlists", user_id));
        let body = CreatePlaylistRequest {
            name: name.to_string(),
            description: description.to_string(),
            public,
        };

        let response = self
            .send("user", |http| http.post(&url).json(&body))
            .await?;
        Ok(response.json::<Playlist>().await?)
    }

    /// `POST /playlists/{playlist_id}/tracks`, in chunks of 100.
    ///
    /// Returns the snapshot id of the last chunk.
    pub async fn add_items(
        &self,
        playlist_id: &str,
        track_uris: &[String],
    ) -> Result<Option<String>, RemoteError> {
        let url = self.url(&format!("/playlists/{}/tracks", playlist_id));
        let mut snapshot = None;

        for chunk in track_uris.chunks(ADD_ITEMS_CHUNK) {
            let body = AddTrackToPlaylistRequest {
                uris: chunk.to_vec(),
            };
            let response = self
                .send(playlist_id, |http| http.post(&url).json(&body))
                .await?;
            snapshot = Some(response.json::<AddTrackToPlaylistResponse>().await?.snapshot_id);
        }

        Ok(snapshot)
    }
}
