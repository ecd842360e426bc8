use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{debug, warn};

use super::decode::{charset_from_content_type, decode_body, effective_charset};
use crate::config::Config;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),
    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: StatusCode },
}

/// A fetched and decoded listing page.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub html: String,
    /// Charset the server declared, after normalization.
    pub declared_charset: &'static str,
    /// Charset that actually decoded the body.
    pub decoded_as: &'static str,
}

/// Single-shot client for the best-posts listing.
#[derive(Debug, Clone)]
pub struct BoardFetcher {
    client: Client,
    url: String,
    user_agent: String,
}

impl BoardFetcher {
    /// Create a fetcher for `url`.
    ///
    /// Idle connections are not kept, so every fetch opens a fresh one.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        url: impl Into<String>,
        user_agent: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(0)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            client,
            url: url.into(),
            user_agent: user_agent.into(),
        })
    }

    /// Create a fetcher from application configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        Self::new(&config.board_url, &config.user_agent, config.fetch_timeout)
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the listing once. No retries.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, timeout, or a non-success status.
    pub async fn fetch(&self) -> Result<FetchedPage, FetchError> {
        debug!(url = %self.url, "Fetching best posts page");

        let response = self
            .client
            .get(&self.url)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(|source| self.transport_error(source))?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %self.url, %status, "Best posts page returned an error status");
            return Err(FetchError::Status {
                url: self.url.clone(),
                status,
            });
        }

        // Informational only: the body is decoded from its bytes below, never
        // with the declared charset.
        let declared = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(charset_from_content_type)
            .map(ToString::to_string);
        let declared_charset = effective_charset(declared.as_deref());

        let bytes = response
            .bytes()
            .await
            .map_err(|source| self.transport_error(source))?;

        let decoded = decode_body(&bytes);
        if decoded.had_replacements {
            warn!(url = %self.url, "Body was not valid UTF-8 or EUC-KR; replaced undecodable bytes");
        }
        debug!(
            bytes = bytes.len(),
            declared = declared_charset.name(),
            decoded_as = decoded.encoding.name(),
            "Decoded best posts page"
        );

        Ok(FetchedPage {
            html: decoded.text,
            declared_charset: declared_charset.name(),
            decoded_as: decoded.encoding.name(),
        })
    }

    fn transport_error(&self, source: reqwest::Error) -> FetchError {
        FetchError::Transport {
            url: self.url.clone(),
            source,
        }
    }
}
