use reqwest::header::CONTENT_LENGTH;

use crate::{
    error::RemoteError,
    spotify::SpotifyClient,
    types::{Device, DevicesResponse, User},
};

impl SpotifyClient {
    /// `GET /me`
    pub async fn current_user(&self) -> Result<User, RemoteError> {
        let url = self.url("/me");
        let response = self.send("current user", |http| http.get(&url)).await?;
        Ok(response.json::<User>().await?)
    }

    /// `GET /me/player/devices`
    pub async fn devices(&self) -> Result<Vec<Device>, RemoteError> {
        let url = self.url("/me/player/devices");
        let response = self.send("devices", |http| http.get(&url)).await?;
        Ok(response.json::<DevicesResponse>().await?.devices)
    }

    /// Id of the first device the account reports.
    pub async fn first_device_id(&self) -> Result<String, RemoteError> {
        self.devices()
            .await?
            .into_iter()
            .find_map(|device| device.id)
            .ok_or(RemoteError::NoActiveDevice)
    }

    /// `POST /me/player/queue`
    pub async fn add_to_queue(&self, track_uri: &str, device_id: &str) -> Result<(), RemoteError> {
        let url = self.url("/me/player/queue");
        self.send(track_uri, |http| {
            http.post(&url)
                .query(&[("uri", track_uri), ("device_id", device_id)])
                .header(CONTENT_LENGTH, 0)
        })
        .await?;
        Ok(())
    }

    /// `POST /me/player/next`
    pub async fn next_track(&self, device_id: &str) -> Result<(), RemoteError> {
        let url = self.url("/me/player/next");
        self.send("player", |http| {
            http.post(&url)
                .query(&[("device_id", device_id)])
                .header(CONTENT_LENGTH, 0)
        })
        .await?;
        Ok(())
    }

    /// `PUT /me/player/pause`
    pub async fn pause_playback(&self) -> Result<(), RemoteError> {
        let url = self.url("/me/player/pause");
        self.send("player", |http| http.put(&url).header(CONTENT_LENGTH, 0))
            .await?;
        Ok(())
    }

    /// `PUT /me/player/play`
    pub async fn start_playback(&self, device_id: &str) -> Result<(), RemoteError> {
        let url = self.url("/me/player/play");
        self.send("player", |http| {
            http.put(&url)
                .query(&[("device_id", device_id)])
                .header(CONTENT_LENGTH, 0)
        })
        .await?;
        Ok(())
    }
}

/// Playback control needs Premium; an account without a reported product passes.
pub fn require_premium(user: &User) -> Result<(), RemoteError> {
    match user.product.as_deref() {
        Some(product) if !product.is_empty() && !product.eq_ignore_ascii_case("premium") => {
            Err(RemoteError::PremiumRequired)
        }
        _ => Ok(()),
    }
}
