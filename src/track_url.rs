//! Spotify track URL validation and id extraction.

use thiserror::Error;

use crate::clients::entities::TrackId;

/// Every accepted track URL starts with this prefix.
pub const TRACK_URL_PREFIX: &str = "https://open.spotify.com/track/";

const TRACK_SEPARATOR: &str = "/track/";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackUrlError {
    #[error("URL is not a Spotify track URL")]
    NotATrackUrl,

    #[error("URL does not contain a track id")]
    MissingId,
}

pub fn validate(url: &str) -> bool {
    url.starts_with(TRACK_URL_PREFIX)
}

/// Returns the path segment following `/track/`, without its query string.
pub fn extract_track_id(url: &str) -> Option<TrackId> {
    let rest = url.split(TRACK_SEPARATOR).nth(1)?;
    let id = rest.split('?').next().unwrap_or_default();
    Some(TrackId::new(id))
}

/// Single parse step used by the request pipeline. The id is opaque: it is
/// forwarded upstream as is, minus any trailing path or `#fragment`.
pub fn parse(url: &str) -> Result<TrackId, TrackUrlError> {
    if !validate(url) {
        return Err(TrackUrlError::NotATrackUrl);
    }
    let id = extract_track_id(url).ok_or(TrackUrlError::MissingId)?;
    let id = id.as_str().split(['/', '#']).next().unwrap_or_default();
    if id.is_empty() {
        return Err(TrackUrlError::MissingId);
    }
    Ok(TrackId::new(id))
}
