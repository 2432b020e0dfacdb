use std::path::PathBuf;

use crate::{
    cli::{
        history::{open_history, select_rows},
        player::{TrackSource, resolve_track},
    },
    config, error,
    error::RemoteError,
    history::PlaylistDraft,
    info,
    spotify::SpotifyClient,
    success,
    utils::RowSelection,
    warning,
};

const PLAYLIST_DESCRIPTION: &str = "Created from streaming history";
const HISTORY_PLAYLIST_DESCRIPTION: &str = "History playlist from the app";

/// Creates a playlist from the selected rows of the (searched) history.
///
/// Without `rows` every row of the view is selected. The playlist is named
/// after the date range of the playable rows and holds each track once.
pub async fn playlist(files: Vec<PathBuf>, search: Option<String>, rows: Option<RowSelection>) {
    let mut session = open_history(files).await;

    let draft = {
        let view = session.history().search(search.as_deref().unwrap_or_default());
        let selected = match &rows {
            Some(rows) => select_rows(&view, rows.rows()),
            None => view.clone(),
        };

        if selected.is_empty() {
            info!("No rows selected.");
            return;
        }

        match PlaylistDraft::from_selection(&selected) {
            Some(draft) => draft,
            None => {
                info!("No valid tracks selected.");
                return;
            }
        }
    };

    match draft.range.days() {
        Ok((start, end)) => info!(
            "Create playlist '{}' with {} tracks listened to over {} day(s)",
            draft.name,
            draft.track_ids.len(),
            (end - start).num_days() + 1
        ),
        Err(e) => {
            warning!("{}; naming playlist '{}'", e, draft.name);
            info!(
                "Create playlist '{}' with {} tracks",
                draft.name,
                draft.track_ids.len()
            );
        }
    }

    let client = match session.client().await {
        Ok(client) => client,
        Err(e) => error!("Cannot reach Spotify: {}", e),
    };

    match create_from_draft(client, &draft).await {
        Ok(()) => success!("Playlist '{}' created!", draft.name),
        Err(e) => error!("Playlist creation failed: {}", e),
    }
}

async fn create_from_draft(client: &SpotifyClient, draft: &PlaylistDraft) -> Result<(), RemoteError> {
    let user = client.current_user().await?;
    let playlist = client
        .create_playlist(&user.id, &draft.name, PLAYLIST_DESCRIPTION, true)
        .await?;
    client.add_items(&playlist.id, &draft.track_ids).await?;
    Ok(())
}

/// Adds one track to the history playlist, creating the playlist when missing.
pub async fn history_add(source: TrackSource) {
    let Some((mut session, track)) = resolve_track(source, "Playlist").await else {
        return;
    };

    let name = config::history_playlist_name();
    let client = match session.client().await {
        Ok(client) => client,
        Err(e) => error!("Cannot reach Spotify: {}", e),
    };

    match add_to_named_playlist(client, &name, &track.uri).await {
        Ok(()) => success!("Track added to '{}' playlist: {}", name, track.label),
        Err(e) => error!("Failed to add track to '{}' playlist: {}", name, e),
    }
}

async fn add_to_named_playlist(
    client: &SpotifyClient,
    name: &str,
    track_uri: &str,
) -> Result<(), RemoteError> {
    let playlist = match client.find_playlist(name).await? {
        Some(playlist) => playlist,
        None => {
            let user = client.current_user().await?;
            tracing::debug!(name, "history playlist missing, creating it");
            client
                .create_playlist(&user.id, name, HISTORY_PLAYLIST_DESCRIPTION, true)
                .await?
        }
    };

    client
        .add_items(&playlist.id, &[track_uri.to_string()])
        .await?;
    Ok(())
}
