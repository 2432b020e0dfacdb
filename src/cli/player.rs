use std::path::PathBuf;

use crate::{
    cli::history::open_history,
    error,
    error::RemoteError,
    management::Session,
    spotify::{SpotifyClient, player},
    success, utils, warning,
};

/// Where a single-track command takes its track from.
pub enum TrackSource {
    /// A `spotify:track:` URI or an `open.spotify.com` link given directly.
    Uri(String),
    /// A 1-based row of the loaded history, after the optional search.
    Row {
        files: Vec<PathBuf>,
        search: Option<String>,
        row: usize,
    },
}

/// A track that passed the playable check, plus what to call it in messages.
pub(crate) struct ResolvedTrack {
    pub uri: String,
    pub label: String,
}

/// Resolves `source` to a playable track.
///
/// Returns `None` after telling the user why when the identifier is not
/// playable; no remote call has been made at that point.
pub(crate) async fn resolve_track(
    source: TrackSource,
    action: &str,
) -> Option<(Session, ResolvedTrack)> {
    let (session, raw, label) = match source {
        TrackSource::Uri(uri) => (Session::new(), uri.clone(), uri),
        TrackSource::Row { files, search, row } => {
            let session = open_history(files).await;
            let picked = {
                let view = session.history().search(search.as_deref().unwrap_or_default());
                match row.checked_sub(1).and_then(|idx| view.get(idx)) {
                    Some(entry) => (entry.track_id.clone(), entry.song.clone()),
                    None => {
                        warning!("{}: row {} does not exist ({} rows).", action, row, view.len());
                        return None;
                    }
                }
            };
            (session, picked.0, picked.1)
        }
    };

    match utils::playable_track_id(&raw) {
        Ok(uri) => Some((session, ResolvedTrack { uri, label })),
        Err(e) => {
            warning!("{}: Invalid track URI. {}", action, e);
            None
        }
    }
}

async fn client(session: &mut Session) -> &SpotifyClient {
    match session.client().await {
        Ok(client) => client,
        Err(e) => error!("Cannot reach Spotify: {}", e),
    }
}

/// Queues the track on the first device and skips to it.
pub async fn play(source: TrackSource) {
    let Some((mut session, track)) = resolve_track(source, "Playback").await else {
        return;
    };

    let client = client(&mut session).await;
    match play_track(client, &track.uri).await {
        Ok(()) => success!("Now Playing: {}", track.label),
        Err(e) => error!("Playback failed: {}", e),
    }
}

async fn play_track(client: &SpotifyClient, uri: &str) -> Result<(), RemoteError> {
    let user = client.current_user().await?;
    player::require_premium(&user)?;

    let device_id = client.first_device_id().await?;
    client.add_to_queue(uri, &device_id).await?;
    client.next_track(&device_id).await
}

/// Adds the track to the queue of the first device.
pub async fn queue(source: TrackSource) {
    let Some((mut session, track)) = resolve_track(source, "Queue").await else {
        return;
    };

    let client = client(&mut session).await;
    let result = match client.first_device_id().await {
        Ok(device_id) => client.add_to_queue(&track.uri, &device_id).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => success!("Track added to queue: {}", track.label),
        Err(e) => error!("Failed to queue track: {}", e),
    }
}

pub async fn pause() {
    let mut session = Session::new();
    match client(&mut session).await.pause_playback().await {
        Ok(()) => success!("Now Playing: Paused"),
        Err(e) => error!("Pause failed: {}", e),
    }
}

/// Resumes playback on the first device.
pub async fn resume() {
    let mut session = Session::new();
    let client = client(&mut session).await;

    let result = match client.first_device_id().await {
        Ok(device_id) => client.start_playback(&device_id).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => success!("Now Playing: Resumed"),
        Err(e) => error!("Resume failed: {}", e),
    }
}
