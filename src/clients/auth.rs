use base64::{Engine as _, engine::general_purpose};
use log::{debug, warn};
use reqwest::header::{AUTHORIZATION, COOKIE, USER_AGENT};
use serde::Deserialize;

use crate::clients::{
    APP_PLATFORM, WEB_PLAYER_USER_AGENT,
    entities::{AccessToken, LyricsToken},
    errors::Result,
    read_ok_body,
};
use crate::config::{Config, Credentials};

const TOKEN_ENDPOINT: &str = "token endpoint";
const SESSION_TOKEN_ENDPOINT: &str = "session token endpoint";

#[derive(Deserialize, Debug)]
struct RefreshTokenResponse {
    access_token: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct SessionTokenResponse {
    access_token: String,
    #[serde(default)]
    is_anonymous: bool,
}

/// Performs the two independent token exchanges. Nothing is cached: each
/// call hits the network.
pub struct AuthClient {
    http: reqwest::Client,
    credentials: Credentials,
    accounts_base: String,
    web_player_base: String,
}

impl AuthClient {
    pub fn new(http: reqwest::Client, config: &Config) -> Self {
        AuthClient {
            http,
            credentials: config.credentials.clone(),
            accounts_base: config.endpoints.accounts.clone(),
            web_player_base: config.endpoints.web_player.clone(),
        }
    }

    // Exchange the configured refresh token for a Web API access token
    pub async fn get_access_token(&self) -> Result<AccessToken> {
        let url = format!("{}/api/token", self.accounts_base);
        debug!("Requesting access token from {url}");
        let params = [
            ("grant_type", "refresh_token"),
            ("refresh_token", self.credentials.refresh_token.as_str()),
        ];

        let response = self
            .http
            .post(&url)
            .header(
                AUTHORIZATION,
                basic_auth_header(&self.credentials.client_id, &self.credentials.client_secret),
            )
            .form(&params)
            .send()
            .await?;

        let body = read_ok_body(response, TOKEN_ENDPOINT).await?;
        let token: RefreshTokenResponse = serde_json::from_str(&body)?;
        Ok(AccessToken::new(token.access_token))
    }

    // Exchange the sp_dc session cookie for a web player token
    pub async fn get_lyrics_token(&self) -> Result<LyricsToken> {
        let url = format!("{}/get_access_token", self.web_player_base);
        debug!("Requesting web player token from {url}");

        let response = self
            .http
            .get(&url)
            .query(&[("reason", "transport"), ("productType", "web_player")])
            .header(COOKIE, format!("sp_dc={}", self.credentials.sp_dc))
            .header(USER_AGENT, WEB_PLAYER_USER_AGENT)
            .header("App-Platform", APP_PLATFORM)
            .send()
            .await?;

        let body = read_ok_body(response, SESSION_TOKEN_ENDPOINT).await?;
        let token: SessionTokenResponse = serde_json::from_str(&body)?;
        if token.is_anonymous {
            warn!("Web player token is anonymous, the sp_dc cookie was probably rejected");
        }
        Ok(LyricsToken::new(token.access_token))
    }
}

fn basic_auth_header(client_id: &str, client_secret: &str) -> String {
    let encoded = general_purpose::STANDARD.encode(format!("{client_id}:{client_secret}"));
    format!("Basic {encoded}")
}
