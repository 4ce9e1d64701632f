//! Bounded HTTP client for the upstream quote API.

use std::time::Duration;

use thiserror::Error;

use crate::config::UpstreamConfig;

/// Failure contacting the upstream quote API.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The deadline elapsed before the response completed.
    #[error("upstream deadline exceeded")]
    DeadlineExceeded,

    /// Any other transport-level failure.
    #[error("upstream request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Client for the external exchange-rate API.
///
/// Holds one reqwest client built at startup. One GET per call, no retries;
/// the single-attempt policy is deliberate.
#[derive(Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    url: String,
}

impl UpstreamClient {
    /// Build a client for the configured endpoint.
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("cambio/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            url: config.quote_url(),
        })
    }

    /// Fetch the latest quote payload, bounded by `deadline`.
    ///
    /// The deadline is attached to the request itself, so hitting it aborts
    /// the in-flight transfer rather than merely abandoning the wait. The
    /// response status is not inspected; whatever bytes come back are the
    /// normalizer's problem.
    pub async fn fetch_latest(&self, deadline: Duration) -> Result<Vec<u8>, UpstreamError> {
        let response = self
            .http
            .get(&self.url)
            .timeout(deadline)
            .send()
            .await
            .map_err(classify)?;

        let body = response.bytes().await.map_err(classify)?;
        Ok(body.to_vec())
    }

    /// Endpoint this client targets.
    pub fn url(&self) -> &str {
        &self.url
    }
}

fn classify(err: reqwest::Error) -> UpstreamError {
    if err.is_timeout() {
        UpstreamError::DeadlineExceeded
    } else {
        UpstreamError::Request(err)
    }
}
