use std::fmt;

use serde::{Deserialize, Serialize};

/// Spotify track identifier as found in a track URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackId(String);

impl TrackId {
    pub fn new(id: impl Into<String>) -> Self {
        TrackId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Web API bearer token obtained through the refresh-token grant.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

/// Web player bearer token obtained from the `sp_dc` session cookie.
/// Only the lyrics endpoint accepts it.
#[derive(Clone, PartialEq, Eq)]
pub struct LyricsToken(String);

macro_rules! bearer_token {
    ($name:ident) => {
        impl $name {
            pub fn new(token: impl Into<String>) -> Self {
                $name(token.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        // Tokens end up in request logs through `{:?}`; keep them out.
        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}(***)", stringify!($name))
            }
        }
    };
}

bearer_token!(AccessToken);
bearer_token!(LyricsToken);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub name: String,
    pub external_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub name: String,
    pub external_url: String,
    pub image: AlbumImage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackInfo {
    pub name: String,
    pub external_url: String,
    pub preview_url: Option<String>,
    pub artists: Vec<Artist>,
    pub album: Album,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LyricLine {
    pub words: String,
    #[serde(rename = "start_time")]
    pub start_time_ms: u64,
    #[serde(rename = "end_time")]
    pub end_time_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LyricsDoc {
    /// True when every line carries its own timing (`LINE_SYNCED`).
    pub has_lipsync: bool,
    pub lines: Vec<LyricLine>,
}

/// Body of a successful `/lyrics` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LyricsResponse {
    pub track_info: TrackInfo,
    pub lyrics: Option<LyricsDoc>,
}
