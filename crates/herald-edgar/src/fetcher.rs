//! Resilient HTTP fetcher
//!
//! GET with a bounded retry budget:
//!
//! - `200`: body returned immediately
//! - `429`: wait for the server's Retry-After (or the base delay) and retry;
//!   the network backoff step is not advanced
//! - any other status: terminal, no retry
//! - transport failure: wait `base_delay * n` for the n-th failure and retry
//!
//! Every attempt consumes one unit of the budget, and no wait happens after
//! the final attempt.

use crate::config::EdgarConfig;
use crate::error::FetchError;
use herald_domain::traits::HttpFetch;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, warn};

/// Outcome of a single HTTP attempt
enum Attempt {
    Body(String),
    RateLimited(Option<Duration>),
    Terminal(FetchError),
    Transient(FetchError),
}

/// HTTP GET with retry, backoff and rate-limit handling
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ResilientFetcher {
    client: reqwest::Client,
    max_retries: u32,
    base_delay: Duration,
}

impl ResilientFetcher {
    /// Build a fetcher from EDGAR configuration
    ///
    /// The configured contact string is sent as the User-Agent of every request.
    pub fn new(config: &EdgarConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self {
            client,
            max_retries: config.max_retries.max(1),
            base_delay: config.base_delay(),
        })
    }

    /// Override the retry budget and base delay
    pub fn with_policy(mut self, max_retries: u32, base_delay: Duration) -> Self {
        self.max_retries = max_retries.max(1);
        self.base_delay = base_delay;
        self
    }

    /// Total attempts per URL
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Base delay between attempts
    pub fn base_delay(&self) -> Duration {
        self.base_delay
    }

    async fn attempt(&self, url: &str) -> Attempt {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => return Attempt::Transient(FetchError::Network(e.to_string())),
        };

        match response.status() {
            StatusCode::OK => match response.bytes().await {
                Ok(bytes) => Attempt::Body(decode_lossy(&bytes)),
                Err(e) => Attempt::Transient(FetchError::Network(format!(
                    "Failed to read response body: {}",
                    e
                ))),
            },
            StatusCode::TOO_MANY_REQUESTS => {
                Attempt::RateLimited(parse_retry_after(response.headers()))
            }
            status => Attempt::Terminal(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            }),
        }
    }
}

impl HttpFetch for ResilientFetcher {
    type Error = FetchError;

    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let mut network_failures = 0u32;
        let mut last_error = None;

        for attempt in 1..=self.max_retries {
            let is_last = attempt == self.max_retries;

            match self.attempt(url).await {
                Attempt::Body(body) => {
                    debug!(url, attempt, bytes = body.len(), "Fetched");
                    return Ok(body);
                }
                Attempt::RateLimited(retry_after) => {
                    last_error = Some(FetchError::RateLimited { attempts: attempt });
                    if !is_last {
                        let wait = retry_after.unwrap_or(self.base_delay);
                        warn!("Rate limit hit. Waiting {:?} before retrying {}", wait, url);
                        tokio::time::sleep(wait).await;
                    }
                }
                Attempt::Terminal(e) => {
                    warn!("HTTP request failed for {}: {}", url, e);
                    return Err(e);
                }
                Attempt::Transient(e) => {
                    warn!("Request error for {} (attempt {}/{}): {}", url, attempt, self.max_retries, e);
                    network_failures += 1;
                    last_error = Some(e);
                    if !is_last {
                        tokio::time::sleep(self.base_delay * network_failures).await;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| FetchError::Network("Max retries exceeded".to_string())))
    }
}

/// Read a Retry-After header given in whole seconds
///
/// HTTP-date values and garbage yield `None`, so the caller falls back to
/// its base delay.
pub fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

/// Decode bytes as UTF-8, dropping invalid sequences instead of failing
///
/// # Examples
///
/// ```
/// use herald_edgar::decode_lossy;
///
/// assert_eq!(decode_lossy(b"caf\xff\xfee"), "cafe");
/// ```
pub fn decode_lossy(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_retry_after_seconds() {
        let mut headers = HeaderMap::new();
        headers.insert(RETRY_AFTER, HeaderValue::from_static(" 7 "));
        assert_eq!(parse_retry_after(&headers), Some(Duration::from_secs(7)));
    }

    #[test]
    fn test_retry_after_missing_or_unparseable() {
        let mut headers = HeaderMap::new();
        assert_eq!(parse_retry_after(&headers), None);

        headers.insert(
            RETRY_AFTER,
            HeaderValue::from_static("Wed, 21 Oct 2015 07:28:00 GMT"),
        );
        assert_eq!(parse_retry_after(&headers), None);

        headers.insert(RETRY_AFTER, HeaderValue::from_static("-3"));
        assert_eq!(parse_retry_after(&headers), None);
    }

    #[test]
    fn test_decode_lossy_keeps_valid_text() {
        assert_eq!(decode_lossy("naïve ☐ text".as_bytes()), "naïve ☐ text");
        assert_eq!(decode_lossy(b""), "");
    }

    #[test]
    fn test_decode_lossy_drops_invalid_sequences() {
        // Truncated multi-byte sequence in the middle and at the end
        assert_eq!(decode_lossy(b"a\xe2\x98b\xc3"), "ab");
    }

    #[test]
    fn test_with_policy_clamps_budget() {
        let fetcher = ResilientFetcher::new(&EdgarConfig::default())
            .unwrap()
            .with_policy(0, Duration::from_millis(5));
        assert_eq!(fetcher.max_retries(), 1);
        assert_eq!(fetcher.base_delay(), Duration::from_millis(5));
    }
}
