use crate::{error, info, management::Session, success};

/// Deletes the cached Spotify token so the next remote action starts over.
pub async fn clear_cache() {
    let mut session = Session::new();
    match session.clear_token_cache().await {
        Ok(true) => success!("The Spotify token cache has been cleared."),
        Ok(false) => info!("No token cache was found."),
        Err(e) => error!("Failed to clear token cache: {}", e),
    }
}
