//! Content fetcher: relay-first URL resolution with a direct fallback.
//!
//! Step ordering bounds worst-case latency to two round trips per record:
//! one relay attempt, one direct attempt, no retries. Relay misses and
//! upstream HTTP errors surface as distinct failure kinds so callers can
//! tell "the source server is broken" from "the relay is unreachable".

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use tracing::{debug, warn};

use linkbind_core::defaults;
use linkbind_core::{Error, FetchErrorKind, FetchedPayload, Result};

use crate::config::FetchConfig;

/// Resolves a URL to a binary payload.
///
/// The pipeline driver depends on this trait, not on HTTP; tests substitute
/// a scripted source.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetch `url`, trying the relay path first when `prefer_relay` is set.
    async fn fetch(&self, url: &str, prefer_relay: bool) -> Result<FetchedPayload>;
}

/// HTTP-backed [`ContentSource`].
pub struct ContentFetcher {
    client: Client,
    config: FetchConfig,
}

impl ContentFetcher {
    /// Create a fetcher with the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Internal(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    /// Create a fetcher from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(FetchConfig::from_env())
    }

    /// Relay endpoint URL for a target, with the target percent-encoded.
    fn relay_url(&self, base: &str, target: &str) -> String {
        format!(
            "{}{}?url={}",
            base.trim_end_matches('/'),
            defaults::RELAY_PROXY_PATH,
            urlencoding::encode(target)
        )
    }

    /// Obtain a response from the relay path or the direct path.
    ///
    /// A relay miss (transport failure or non-success status) falls through
    /// to the direct path; a transport failure on the direct path is final.
    async fn obtain_response(&self, url: &str, prefer_relay: bool) -> Result<Response> {
        if prefer_relay {
            if let Some(base) = &self.config.relay_base {
                let relay_url = self.relay_url(base, url);
                match self.client.get(&relay_url).send().await {
                    Ok(resp) if resp.status().is_success() => {
                        debug!(component = "fetcher", url, "relay hit");
                        return Ok(resp);
                    }
                    Ok(resp) => {
                        warn!(
                            component = "fetcher",
                            url,
                            status = resp.status().as_u16(),
                            "relay miss, falling back to direct fetch"
                        );
                    }
                    Err(e) => {
                        warn!(
                            component = "fetcher",
                            url,
                            error = %e,
                            "relay unreachable, falling back to direct fetch"
                        );
                    }
                }
            } else {
                debug!(
                    component = "fetcher",
                    url, "relay preferred but no relay base configured"
                );
            }
        }

        // No cookie store is configured, so direct fetches carry no credentials.
        self.client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::fetch(FetchErrorKind::Network, e.to_string()))
    }
}

#[async_trait]
impl ContentSource for ContentFetcher {
    async fn fetch(&self, url: &str, prefer_relay: bool) -> Result<FetchedPayload> {
        let response = self.obtain_response(url, prefer_relay).await?;

        let status = response.status();
        if !status.is_success() {
            let excerpt = body_excerpt(response).await;
            return Err(Error::fetch(
                FetchErrorKind::Http,
                format!("status {}: {excerpt}", status.as_u16()),
            ));
        }

        // Reject a known-oversize resource before reading its body.
        if let Some(declared) = response.content_length() {
            if declared > self.config.max_bytes {
                return Err(Error::fetch(
                    FetchErrorKind::TooLarge,
                    format!(
                        "declared {declared} bytes exceeds ceiling of {} bytes",
                        self.config.max_bytes
                    ),
                ));
            }
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::fetch(FetchErrorKind::Network, e.to_string()))?;

        let size = bytes.len() as u64;
        if size > self.config.max_bytes {
            return Err(Error::fetch(
                FetchErrorKind::TooLarge,
                format!(
                    "realized {size} bytes exceeds ceiling of {} bytes",
                    self.config.max_bytes
                ),
            ));
        }
        if size == 0 {
            return Err(Error::fetch(
                FetchErrorKind::Empty,
                format!("zero-byte body from {url}"),
            ));
        }

        debug!(
            component = "fetcher",
            url,
            payload_bytes = size,
            content_type = content_type.as_deref().unwrap_or("-"),
            "fetch complete"
        );

        Ok(FetchedPayload::new(bytes.to_vec(), content_type))
    }
}

/// Up to 200 characters of a response body, for error diagnostics.
async fn body_excerpt(response: Response) -> String {
    match response.text().await {
        Ok(text) => text
            .chars()
            .take(defaults::ERROR_BODY_EXCERPT_CHARS)
            .collect(),
        Err(_) => String::new(),
    }
}
