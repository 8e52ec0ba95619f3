use log::{info, warn};
use thiserror::Error;

use crate::clients::{
    AuthClient, LyricsClient, SpotifyClient,
    entities::LyricsResponse,
    errors::{Error, Result},
    http_client,
};
use crate::config::Config;
use crate::track_url::{self, TrackUrlError};

/// Request-level failures. The message is what the caller gets to see, the
/// cause stays in the source chain for logs.
#[derive(Error, Debug)]
pub enum LookupError {
    /// The song URL is not a track URL or has no id (400).
    #[error("Error: Invalid URL. Please provide a valid Spotify track URL.")]
    InvalidUrl(#[source] TrackUrlError),

    /// Either token exchange failed (401).
    #[error("Error: Failed to get access token")]
    AuthFailure(#[source] Error),

    /// Track metadata could not be fetched (404).
    #[error("Error: Failed to get track info")]
    NotFound(#[source] Error),
}

/// Runs the track URL → metadata + lyrics pipeline.
pub struct LyricsLookup {
    auth: AuthClient,
    spotify: SpotifyClient,
    lyrics: LyricsClient,
}

impl LyricsLookup {
    /// Builds the three clients around one shared HTTP client.
    pub fn new(config: &Config) -> Result<Self> {
        let http = http_client(config.request_timeout)?;
        Ok(LyricsLookup {
            auth: AuthClient::new(http.clone(), config),
            spotify: SpotifyClient::new(http.clone(), config),
            lyrics: LyricsClient::new(http, config),
        })
    }

    /// Resolves `song_url` into track info and, when available, lyrics.
    /// Stops at the first failing stage; a lyrics failure only drops the lyrics.
    pub async fn lookup(&self, song_url: &str) -> std::result::Result<LyricsResponse, LookupError> {
        let track_id = track_url::parse(song_url).map_err(|e| {
            warn!("Rejected song URL {song_url:?}: {e}");
            LookupError::InvalidUrl(e)
        })?;
        info!("Looking up track {track_id}");

        let access_token = self.auth.get_access_token().await.map_err(|e| {
            warn!("Failed to get access token: {e}");
            LookupError::AuthFailure(e)
        })?;

        let track_info = self
            .spotify
            .get_track_info(&access_token, &track_id)
            .await
            .map_err(|e| {
                warn!("Failed to get track info for {track_id}: {e}");
                LookupError::NotFound(e)
            })?;

        let lyrics_token = self.auth.get_lyrics_token().await.map_err(|e| {
            warn!("Failed to get lyrics token: {e}");
            LookupError::AuthFailure(e)
        })?;

        // Missing lyrics still make a valid response
        let lyrics = match self.lyrics.get_lyrics(&lyrics_token, &track_id).await {
            Ok(doc) => Some(doc),
            Err(e) => {
                warn!("No lyrics for track {track_id}: {e}");
                None
            }
        };

        Ok(LyricsResponse { track_info, lyrics })
    }
}
