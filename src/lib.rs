//! Spotlyrics - Spotify track metadata with synchronized lyrics
//!
//! This library resolves a Spotify track URL into track metadata and
//! line-synced lyrics, and serves the result over a small HTTP API.

/// Client modules for interacting with the Spotify APIs
pub mod clients;
/// Configuration loaded from the environment
pub mod config;
/// Track URL to metadata and lyrics pipeline
pub mod lookup;
/// LRC export
pub mod lrc;
/// HTTP API
pub mod server;
/// Track URL validation and id extraction
pub mod track_url;
