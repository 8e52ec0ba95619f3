use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use log::{info, warn};
use serde::Deserialize;
use serde_json::json;

use crate::clients::{entities::LyricsResponse, errors::Result};
use crate::lookup::{LookupError, LyricsLookup};
use crate::lrc;

#[derive(Deserialize, Debug)]
pub struct LyricsQuery {
    /// Spotify track URL, e.g. `https://open.spotify.com/track/<id>`
    pub song_url: Option<String>,
}

/// Error body sent to clients: `{"detail": "..."}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        ApiError {
            status,
            detail: detail.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl From<LookupError> for ApiError {
    fn from(err: LookupError) -> Self {
        let status = match err {
            LookupError::InvalidUrl(_) => StatusCode::BAD_REQUEST,
            LookupError::AuthFailure(_) => StatusCode::UNAUTHORIZED,
            LookupError::NotFound(_) => StatusCode::NOT_FOUND,
        };
        ApiError::new(status, err.to_string())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::new(
            StatusCode::BAD_REQUEST,
            format!("Error: Invalid query string. {}", rejection.body_text()),
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

type LyricsQueryResult = std::result::Result<Query<LyricsQuery>, QueryRejection>;

fn require_song_url(query: LyricsQueryResult) -> std::result::Result<String, ApiError> {
    let Query(query) = query?;
    query.song_url.ok_or_else(|| {
        ApiError::new(
            StatusCode::BAD_REQUEST,
            "Error: Missing song_url query parameter",
        )
    })
}

pub async fn get_lyrics(
    State(lookup): State<Arc<LyricsLookup>>,
    query: LyricsQueryResult,
) -> std::result::Result<Json<LyricsResponse>, ApiError> {
    let song_url = require_song_url(query)?;
    let response = lookup.lookup(&song_url).await?;
    Ok(Json(response))
}

pub async fn get_lyrics_lrc(
    State(lookup): State<Arc<LyricsLookup>>,
    query: LyricsQueryResult,
) -> std::result::Result<Response, ApiError> {
    let song_url = require_song_url(query)?;
    let LyricsResponse { track_info, lyrics } = lookup.lookup(&song_url).await?;
    let lyrics = lyrics.ok_or_else(|| {
        ApiError::new(
            StatusCode::NOT_FOUND,
            "Error: Lyrics not available for this track",
        )
    })?;

    let disposition = format!(
        "attachment; filename*=UTF-8''{}",
        urlencoding::encode(&lrc::file_name(&track_info))
    );
    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        lrc::render(&lyrics),
    )
        .into_response())
}

pub fn router(lookup: Arc<LyricsLookup>) -> Router {
    Router::new()
        .route("/lyrics", get(get_lyrics))
        .route("/lyrics/lrc", get(get_lyrics_lrc))
        .with_state(lookup)
}

// Bind and serve until Ctrl-C
pub async fn serve(addr: &str, lookup: LyricsLookup) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(Arc::new(lookup)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
    }
}
