use thiserror::Error;

/// Result alias used by every client in this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP transport error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("{endpoint} responded with unexpected status {status}")]
    UnexpectedStatus { endpoint: &'static str, status: u16 },

    #[error("{0} responded with an empty body")]
    EmptyBody(&'static str),

    #[error("Deserialization error: {0}")]
    DeserializationError(#[from] serde_json::Error),

    #[error("Failed to parse upstream payload, error: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
