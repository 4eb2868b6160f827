//! Bounded-time page retrieval.
//!
//! [`Fetcher`] is the seam the article task fetches through; [`HttpFetcher`]
//! is the real implementation over a pooled `reqwest::Client`. The wait bound
//! covers the whole exchange, headers and body alike.

use crate::error::FetchError;
use std::future::Future;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::{debug, instrument, warn};
use url::Url;

/// Retrieves the content of a URL within a time bound.
pub trait Fetcher: Send + Sync {
    fn get(
        &self,
        url: &str,
        wait: Duration,
    ) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// HTTP fetcher sharing one connection pool across all requests of a batch.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a fetcher with its own connection pool and a crate user agent.
    ///
    /// # Errors
    ///
    /// Fails only if the TLS backend cannot be initialised.
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

/// Parse `raw` and accept only http(s) URLs with a host.
pub fn parse_http_url(raw: &str) -> Result<Url, FetchError> {
    let invalid = |reason: String| FetchError::InvalidUrl {
        url: raw.to_string(),
        reason,
    };
    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme {other}"))),
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host".to_string()));
    }
    Ok(url)
}

impl Fetcher for HttpFetcher {
    #[instrument(level = "debug", skip(self), fields(timeout_ms = wait.as_millis() as u64))]
    async fn get(&self, url: &str, wait: Duration) -> Result<String, FetchError> {
        let parsed = parse_http_url(url)?;
        let t0 = Instant::now();

        let exchange = async {
            let response = self.client.get(parsed).send().await?.error_for_status()?;
            response.text().await
        };

        match timeout(wait, exchange).await {
            Ok(Ok(body)) => {
                debug!(
                    bytes = body.len(),
                    elapsed_ms = t0.elapsed().as_millis() as u64,
                    "Fetched page"
                );
                Ok(body)
            }
            Ok(Err(e)) => {
                let err = FetchError::from(e);
                warn!(error = %err, "Fetch failed");
                Err(err)
            }
            Err(_) => {
                warn!(elapsed_ms = t0.elapsed().as_millis() as u64, "Fetch timed out");
                Err(FetchError::Timeout)
            }
        }
    }
}
