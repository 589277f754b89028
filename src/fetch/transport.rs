//! Transport seam for page fetches
//!
//! The coordinator speaks to the endpoint through this trait so tests can
//! script responses without a network. The production implementation wraps
//! reqwest with a bounded timeout: a hung request settles as a failure
//! instead of pinning the gallery's loading flag forever.

use crate::utils::error::FetchError;
use crate::utils::Result;
use async_trait::async_trait;
use std::time::Duration;
use url::Url;

/// Asynchronous GET transport
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch the body at `url`
    async fn get(&self, url: &Url) -> Result<String>;
}

/// HTTP transport backed by reqwest
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with the given per-request timeout
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &Url) -> Result<String> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| classify(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http(status.as_u16()).into());
        }

        let body = response.text().await.map_err(|e| classify(&e))?;
        Ok(body)
    }
}

fn classify(err: &reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Transport(err.to_string())
    }
}
