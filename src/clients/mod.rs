use std::time::Duration;

use log::debug;
use reqwest::StatusCode;

use crate::clients::errors::{Error, Result};

/// Spotify token exchanges
pub mod auth;
/// Request-scoped value objects and bearer tokens
pub mod entities;
/// Error types and result aliases
pub mod errors;
/// Web player lyrics client
pub mod lyrics;
/// Spotify Web API metadata client
pub mod spotify;

pub use auth::AuthClient;
pub use lyrics::LyricsClient;
pub use spotify::SpotifyClient;

// The web player endpoints reject requests that do not look like a browser.
pub(crate) const WEB_PLAYER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/109.0.0.0 Safari/537.36";
pub(crate) const APP_PLATFORM: &str = "WebPlayer";

/// Builds the HTTP client shared by all upstream calls.
pub fn http_client(timeout: Duration) -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder().timeout(timeout).build()?)
}

// Anything but 200 counts as a failed call, the body is returned as text
pub(crate) async fn read_ok_body(
    response: reqwest::Response,
    endpoint: &'static str,
) -> Result<String> {
    let status = response.status();
    if status != StatusCode::OK {
        debug!("{endpoint} responded with {status}");
        return Err(Error::UnexpectedStatus {
            endpoint,
            status: status.as_u16(),
        });
    }
    Ok(response.text().await?)
}
