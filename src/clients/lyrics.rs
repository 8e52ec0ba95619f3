use log::debug;
use reqwest::header::USER_AGENT;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::clients::{
    APP_PLATFORM, WEB_PLAYER_USER_AGENT,
    entities::{LyricLine, LyricsDoc, LyricsToken, TrackId},
    errors::{Error, Result},
    read_ok_body,
};
use crate::config::Config;

const LYRICS_ENDPOINT: &str = "lyrics endpoint";
const LINE_SYNCED: &str = "LINE_SYNCED";

#[derive(Deserialize, Debug)]
struct ColorLyricsResponse {
    lyrics: ColorLyrics,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ColorLyrics {
    sync_type: String,
    lines: Vec<ColorLyricsLine>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ColorLyricsLine {
    words: String,
    #[serde(deserialize_with = "millis")]
    start_time_ms: u64,
    #[serde(deserialize_with = "millis")]
    end_time_ms: u64,
}

// Timestamps come as strings ("960"), older payloads use plain numbers
fn millis<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Millis {
        Number(u64),
        Text(String),
    }

    match Millis::deserialize(deserializer)? {
        Millis::Number(ms) => Ok(ms),
        Millis::Text(raw) => raw.trim().parse().map_err(serde::de::Error::custom),
    }
}

impl From<ColorLyrics> for LyricsDoc {
    fn from(lyrics: ColorLyrics) -> LyricsDoc {
        LyricsDoc {
            has_lipsync: lyrics.sync_type == LINE_SYNCED,
            lines: lyrics
                .lines
                .into_iter()
                .map(|line| LyricLine {
                    words: line.words,
                    start_time_ms: line.start_time_ms,
                    end_time_ms: line.end_time_ms,
                })
                .collect(),
        }
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

/// Reads a lyrics payload. A 200 can come back with nothing in it, which is
/// treated like any other failure.
fn parse_lyrics(body: &str) -> Result<LyricsDoc> {
    if body.trim().is_empty() {
        return Err(Error::EmptyBody(LYRICS_ENDPOINT));
    }
    let value: Value = serde_json::from_str(body)?;
    if is_falsy(&value) {
        return Err(Error::EmptyBody(LYRICS_ENDPOINT));
    }
    let response: ColorLyricsResponse = serde_json::from_value(value)?;
    Ok(LyricsDoc::from(response.lyrics))
}

pub struct LyricsClient {
    http: reqwest::Client,
    lyrics_base: String,
}

impl LyricsClient {
    pub fn new(http: reqwest::Client, config: &Config) -> Self {
        LyricsClient {
            http,
            lyrics_base: config.endpoints.lyrics.clone(),
        }
    }

    pub async fn get_lyrics(&self, token: &LyricsToken, track_id: &TrackId) -> Result<LyricsDoc> {
        let url = format!("{}/color-lyrics/v2/track/{track_id}", self.lyrics_base);
        debug!("Fetching lyrics from {url}");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("format", "json"),
                ("vocalRemoval", "false"),
                ("market", "from_token"),
            ])
            .bearer_auth(token.as_str())
            .header(USER_AGENT, WEB_PLAYER_USER_AGENT)
            .header("App-Platform", APP_PLATFORM)
            .send()
            .await?;

        let body = read_ok_body(response, LYRICS_ENDPOINT).await?;
        parse_lyrics(&body)
    }
}
