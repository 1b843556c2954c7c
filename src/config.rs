use crate::core::{ClientError, Result};
use reqwest::Url;
use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/movies";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Connection settings for the movie collection endpoint
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Collection endpoint, e.g. `http://localhost:3000/movies`
    pub base_url: String,

    /// Per-request timeout handed to the HTTP client
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Self::default()
        }
    }

    /// Read `FILMSHELF_BASE_URL` and `FILMSHELF_TIMEOUT_SECS`, after loading
    /// a `.env` file if one is present. Unset variables fall back to defaults.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let base_url =
            env::var("FILMSHELF_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let timeout_secs = match env::var("FILMSHELF_TIMEOUT_SECS") {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|_| {
                ClientError::Config(format!(
                    "FILMSHELF_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                    raw
                ))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            base_url,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Set the collection endpoint
    pub fn base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    /// Set the request timeout
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Parse the base URL, stripping any trailing slash so that
    /// `<base>/<id>` joins cleanly.
    pub fn parsed_base_url(&self) -> Result<Url> {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        let url = Url::parse(trimmed)
            .map_err(|_| ClientError::InvalidBaseUrl(self.base_url.clone()))?;
        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::InvalidBaseUrl(self.base_url.clone()));
        }
        Ok(url)
    }
}
