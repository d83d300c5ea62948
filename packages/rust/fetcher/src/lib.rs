//! HTTP retrieval for pages and their stylesheets.
//!
//! This crate provides:
//! - [`Fetcher`]: single-resource GET with a bounded exponential-backoff retry loop
//! - [`FetchPolicy`]: the fetcher's attempt/delay/timeout configuration
//! - [`aggregate_styles`]: inline `<style>` blocks plus a parallel fan-out over linked stylesheets

mod stylesheets;

use std::time::Duration;

use brandscope_shared::{
    AppConfig, BrandscopeError, FetchError, MAX_LINKED_STYLESHEETS, Result,
};
use reqwest::Client;
use tracing::{debug, instrument, warn};
use url::Url;

pub use stylesheets::{AggregatedStyles, StyleSources, aggregate_styles, collect_style_sources};

/// Maximum number of redirects to follow per request.
const MAX_REDIRECTS: usize = 5;

/// User-Agent string for all requests.
const USER_AGENT: &str = concat!("Brandscope/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// FetchPolicy
// ---------------------------------------------------------------------------

/// Attempt, delay, and timeout settings owned by a [`Fetcher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchPolicy {
    /// Total attempts for a retried fetch, including the first.
    pub max_attempts: u32,
    /// Delay before the second attempt. Doubles for every later attempt.
    pub initial_delay: Duration,
    /// Timeout for the primary page.
    pub page_timeout: Duration,
    /// Timeout for each linked stylesheet.
    pub stylesheet_timeout: Duration,
    /// Linked stylesheets fetched per page.
    pub max_stylesheets: usize,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for FetchPolicy {
    fn from(config: &AppConfig) -> Self {
        Self {
            max_attempts: config.fetch.max_attempts.max(1),
            initial_delay: Duration::from_millis(config.fetch.initial_delay_ms),
            page_timeout: Duration::from_millis(config.fetch.page_timeout_ms),
            stylesheet_timeout: Duration::from_millis(config.fetch.stylesheet_timeout_ms),
            max_stylesheets: config.fetch.max_stylesheets.min(MAX_LINKED_STYLESHEETS),
        }
    }
}

impl FetchPolicy {
    /// Delay awaited before `attempt` (1-based): zero for the first,
    /// `initial_delay × 2^(attempt-2)` afterwards.
    pub fn delay_before(&self, attempt: u32) -> Duration {
        if attempt < 2 {
            return Duration::ZERO;
        }
        let factor = 2u32.saturating_pow(attempt - 2);
        self.initial_delay.saturating_mul(factor)
    }
}

// ---------------------------------------------------------------------------
// Fetcher
// ---------------------------------------------------------------------------

/// HTTP GET client with a retry policy.
///
/// Cheap to clone: the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    policy: FetchPolicy,
}

impl Fetcher {
    /// Build a fetcher with the given policy.
    pub fn new(policy: FetchPolicy) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| BrandscopeError::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, policy })
    }

    pub fn policy(&self) -> &FetchPolicy {
        &self.policy
    }

    /// Fetch the primary page with the page timeout and full retry policy.
    pub async fn fetch_page(&self, url: &Url) -> std::result::Result<String, FetchError> {
        self.fetch(url, self.policy.page_timeout).await
    }

    /// Fetch `url`, retrying retryable failures up to `max_attempts`.
    ///
    /// Attempts run strictly one after another with an awaited backoff in
    /// between. A [`FetchError::NonRetryable`] is returned as soon as it is
    /// observed; otherwise the last error is returned once attempts run out.
    #[instrument(skip_all, fields(url = %url))]
    pub async fn fetch(
        &self,
        url: &Url,
        timeout: Duration,
    ) -> std::result::Result<String, FetchError> {
        let mut last_error: Option<FetchError> = None;

        for attempt in 1..=self.policy.max_attempts {
            if let Some(err) = &last_error {
                let delay = self.policy.delay_before(attempt);
                warn!(
                    attempt,
                    max_attempts = self.policy.max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "retrying fetch"
                );
                tokio::time::sleep(delay).await;
            }

            match self.fetch_once(url, timeout).await {
                Ok(body) => return Ok(body),
                Err(err) if !err.is_retryable() => {
                    warn!(error = %err, attempt, "non-retryable fetch failure");
                    return Err(err);
                }
                Err(err) => last_error = Some(err),
            }
        }

        Err(last_error.unwrap_or_else(|| FetchError::transport(url.as_str(), "no attempts made")))
    }

    /// A single GET with no retry.
    pub async fn fetch_once(
        &self,
        url: &Url,
        timeout: Duration,
    ) -> std::result::Result<String, FetchError> {
        debug!(%url, timeout_ms = timeout.as_millis() as u64, "GET");

        let response = self
            .client
            .get(url.as_str())
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| FetchError::transport(url.as_str(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::from_status(url.as_str(), status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::transport(url.as_str(), format!("body read failed: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fast_policy(max_attempts: u32) -> FetchPolicy {
        FetchPolicy {
            max_attempts,
            initial_delay: Duration::from_millis(20),
            page_timeout: Duration::from_secs(5),
            stylesheet_timeout: Duration::from_secs(2),
            max_stylesheets: 5,
        }
    }

    async fn request_count(server: &MockServer) -> usize {
        server.received_requests().await.map(|r| r.len()).unwrap_or(0)
    }

    #[test]
    fn backoff_doubles_from_initial_delay() {
        let policy = FetchPolicy {
            initial_delay: Duration::from_millis(1000),
            ..FetchPolicy::default()
        };
        assert_eq!(policy.delay_before(1), Duration::ZERO);
        assert_eq!(policy.delay_before(2), Duration::from_millis(1000));
        assert_eq!(policy.delay_before(3), Duration::from_millis(2000));
        assert_eq!(policy.delay_before(4), Duration::from_millis(4000));
    }

    #[test]
    fn default_policy_matches_config_defaults() {
        let policy = FetchPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.page_timeout, Duration::from_secs(10));
        assert_eq!(policy.stylesheet_timeout, Duration::from_secs(5));
        assert_eq!(policy.max_stylesheets, 5);
    }

    #[test]
    fn stylesheet_cap_is_clamped() {
        let mut config = AppConfig::default();
        config.fetch.max_stylesheets = 50;
        assert_eq!(FetchPolicy::from(&config).max_stylesheets, MAX_LINKED_STYLESHEETS);
    }

    #[tokio::test]
    async fn success_on_first_attempt() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&server)
            .await;

        let fetcher = Fetcher::new(fast_policy(3)).unwrap();
        let url = Url::parse(&server.uri()).unwrap();
        let body = fetcher.fetch_page(&url).await.unwrap();

        assert_eq!(body, "<html></html>");
        assert_eq!(request_count(&server).await, 1);
    }

    #[tokio::test]
    async fn unauthorized_is_not_retried() {
        for status in [401u16, 403] {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(status))
                .mount(&server)
                .await;

            let fetcher = Fetcher::new(fast_policy(3)).unwrap();
            let url = Url::parse(&server.uri()).unwrap();
            let err = fetcher.fetch_page(&url).await.unwrap_err();

            assert!(matches!(err, FetchError::NonRetryable { status: s, .. } if s == status));
            assert_eq!(request_count(&server).await, 1);
        }
    }

    #[tokio::test]
    async fn transient_failure_exhausts_attempts() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let fetcher = Fetcher::new(fast_policy(3)).unwrap();
        let url = Url::parse(&server.uri()).unwrap();

        let start = Instant::now();
        let err = fetcher.fetch_page(&url).await.unwrap_err();
        let elapsed = start.elapsed();

        assert!(err.is_retryable());
        assert!(err.to_string().contains("HTTP 503"));
        assert_eq!(request_count(&server).await, 3);
        // 20ms before attempt 2, 40ms before attempt 3.
        assert!(elapsed >= Duration::from_millis(60), "elapsed {elapsed:?}");
    }

    #[tokio::test]
    async fn recovers_after_transient_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .up_to_n_times(1)
            .with_priority(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .with_priority(2)
            .mount(&server)
            .await;

        let fetcher = Fetcher::new(fast_policy(3)).unwrap();
        let url = Url::parse(&server.uri()).unwrap();

        assert_eq!(fetcher.fetch_page(&url).await.unwrap(), "ok");
        assert_eq!(request_count(&server).await, 2);
    }

    #[tokio::test]
    async fn fetch_once_never_retries() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let fetcher = Fetcher::new(fast_policy(3)).unwrap();
        let url = Url::parse(&server.uri()).unwrap();
        let result = fetcher.fetch_once(&url, Duration::from_secs(1)).await;

        assert!(result.is_err());
        assert_eq!(request_count(&server).await, 1);
    }

    #[tokio::test]
    async fn slow_response_times_out_and_retries() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("late")
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let policy = FetchPolicy {
            page_timeout: Duration::from_millis(50),
            ..fast_policy(2)
        };
        let fetcher = Fetcher::new(policy).unwrap();
        let url = Url::parse(&server.uri()).unwrap();
        let err = fetcher.fetch_page(&url).await.unwrap_err();

        assert!(err.is_retryable());
        assert_eq!(request_count(&server).await, 2);
    }
}
