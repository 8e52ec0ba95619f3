use std::time::Duration;

use log::debug;

use crate::clients::errors::{Error, Result};

const CLIENT_ID_VAR: &str = "SPOTIFY_CLIENT_ID";
const CLIENT_SECRET_VAR: &str = "SPOTIFY_CLIENT_SECRET";
const REFRESH_TOKEN_VAR: &str = "SPOTIFY_REFRESH_TOKEN";
const SP_DC_VAR: &str = "SPOTIFY_SP_DC";
const TIMEOUT_VAR: &str = "SPOTLYRICS_TIMEOUT_SECS";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Secrets needed for the two token exchanges.
#[derive(Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
    pub sp_dc: String,
}

/// Base URLs of the upstream services. Tests point these at a mock server.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub accounts: String,
    pub web_player: String,
    pub api: String,
    pub lyrics: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Endpoints {
            accounts: "https://accounts.spotify.com".into(),
            web_player: "https://open.spotify.com".into(),
            api: "https://api.spotify.com/v1".into(),
            lyrics: "https://spclient.wg.spotify.com".into(),
        }
    }
}

#[derive(Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub endpoints: Endpoints,
    /// Applied to every outbound request. There are no retries.
    pub request_timeout: Duration,
}

impl Config {
    pub fn new(credentials: Credentials) -> Self {
        Config {
            credentials,
            endpoints: Endpoints::default(),
            request_timeout: DEFAULT_TIMEOUT,
        }
    }

    // Build the config from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source. Every missing required
    /// key is reported in a single error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut required = |key: &'static str| match lookup(key).filter(|v| !v.trim().is_empty()) {
            Some(value) => value,
            None => {
                missing.push(key);
                String::new()
            }
        };

        let credentials = Credentials {
            client_id: required(CLIENT_ID_VAR),
            client_secret: required(CLIENT_SECRET_VAR),
            refresh_token: required(REFRESH_TOKEN_VAR),
            sp_dc: required(SP_DC_VAR),
        };

        if !missing.is_empty() {
            return Err(Error::ConfigurationError(format!(
                "missing required environment variables: {}",
                missing.join(", ")
            )));
        }

        let request_timeout = match lookup(TIMEOUT_VAR) {
            Some(raw) => Duration::from_secs(raw.trim().parse::<u64>().map_err(|e| {
                Error::ConfigurationError(format!("{TIMEOUT_VAR} must be a number of seconds: {e}"))
            })?),
            None => DEFAULT_TIMEOUT,
        };
        debug!("Outbound request timeout set to {request_timeout:?}");

        Ok(Config {
            credentials,
            endpoints: Endpoints::default(),
            request_timeout,
        })
    }
}
