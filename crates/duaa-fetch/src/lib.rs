//! Remote bytes for the pipeline: background images and fallback fonts
//!
//! [`HttpFetcher`] is the production [`Fetcher`]. It runs synchronously
//! inside a job worker, so every request carries a timeout and every body
//! a size cap.

use std::io::Read;
use std::time::Duration;

use reqwest::{blocking::Client, Url};

use duaa_core::{error::FetchError, traits::Fetcher};

/// Upper bound on one request, connect to last byte
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Largest body accepted from one response
pub const MAX_BODY_BYTES: u64 = 20 * 1024 * 1024;

/// Some image hosts refuse requests without a browser-like agent
pub const USER_AGENT: &str = concat!(
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) duaa/",
    env!("CARGO_PKG_VERSION")
);

/// Blocking HTTP(S) client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
    limit: u64,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, FetchError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Transport {
                url: String::new(),
                message: e.to_string(),
            })?;
        Ok(Self {
            client,
            timeout,
            limit: MAX_BODY_BYTES,
        })
    }

    /// Replace the body size cap
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }
}

/// Read at most `limit` bytes; one byte more means the body is too large
fn read_capped(body: impl Read, url: &str, limit: u64) -> Result<Vec<u8>, FetchError> {
    let mut bytes = Vec::new();
    body.take(limit.saturating_add(1))
        .read_to_end(&mut bytes)
        .map_err(|e| FetchError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        })?;
    if bytes.len() as u64 > limit {
        return Err(FetchError::TooLarge {
            url: url.to_string(),
            limit,
        });
    }
    Ok(bytes)
}

/// Accept only absolute http(s) URLs
pub fn parse_url(url: &str) -> Result<Url, FetchError> {
    let parsed = Url::parse(url.trim()).map_err(|_| FetchError::InvalidUrl(url.to_string()))?;
    match parsed.scheme() {
        "http" | "https" if parsed.host_str().is_some() => Ok(parsed),
        _ => Err(FetchError::InvalidUrl(url.to_string())),
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let parsed = parse_url(url)?;
        log::debug!("GET {}", parsed);

        let transport = |e: reqwest::Error| FetchError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        };

        let response = self.client.get(parsed).send().map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        if response.content_length().is_some_and(|len| len > self.limit) {
            return Err(FetchError::TooLarge {
                url: url.to_string(),
                limit: self.limit,
            });
        }

        let body = read_capped(response, url, self.limit)?;
        if body.is_empty() {
            return Err(FetchError::EmptyBody(url.to_string()));
        }

        log::debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }
}
