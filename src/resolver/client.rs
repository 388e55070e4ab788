//! HTTP client for vanity-import discovery
//!
//! This module provides a shared HTTP client with:
//! - Configurable timeout and User-Agent
//! - Page fetches that treat any non-200 status as "no page"
//!
//! Discovery is best-effort, so nothing here retries.

use crate::error::RedirectError;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Default timeout for discovery requests (15 seconds)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Default User-Agent header
const DEFAULT_USER_AGENT: &str = concat!("gopkg-outdated/", env!("CARGO_PKG_VERSION"));

/// HTTP client wrapper
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    timeout: Duration,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, RedirectError> {
        Self::with_config(DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }

    /// Create a new HTTP client with a custom timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self, RedirectError> {
        Self::with_config(timeout, DEFAULT_USER_AGENT)
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(timeout: Duration, user_agent: &str) -> Result<Self, RedirectError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| RedirectError::Client {
                message: e.to_string(),
            })?;

        Ok(Self { client, timeout })
    }

    /// Configured request timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// GET `url` and return its body when the status is 200 OK
    pub async fn get_page(&self, url: &str) -> Result<Option<String>, RedirectError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                RedirectError::Timeout {
                    url: url.to_string(),
                }
            } else {
                RedirectError::Request {
                    url: url.to_string(),
                    message: e.to_string(),
                }
            }
        })?;

        if response.status() != StatusCode::OK {
            return Ok(None);
        }

        let body = response.text().await.map_err(|e| RedirectError::Body {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        Ok(Some(body))
    }
}
