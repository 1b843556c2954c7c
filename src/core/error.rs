use thiserror::Error;

/// Client-side input rejection. Raised before any request is sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Title is required")]
    EmptyTitle,

    #[error("Genre is required")]
    EmptyGenre,

    #[error("Year must be a whole number, got '{0}'")]
    InvalidYear(String),
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Request to {url} failed with status {status}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Invalid base URL '{0}'")]
    InvalidBaseUrl(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ClientError>;

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}
