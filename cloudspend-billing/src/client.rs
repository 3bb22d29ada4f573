//! HTTP transport for the billing API.

use reqwest::{header, Client, Response};
use std::time::Duration;
use tracing::{debug, warn};

use crate::auth::BearerToken;
use crate::error::BillingError;
use crate::retry::RetryStrategy;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// HTTP client that presents the bearer token on every request and retries
/// transient failures with capped exponential backoff.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
    retry_strategy: RetryStrategy,
}

impl HttpClient {
    /// Creates a new HTTP client with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`BillingError::Http`] when the underlying client cannot be
    /// built (broken TLS configuration).
    pub fn new() -> Result<Self, BillingError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a new HTTP client with a custom timeout.
    ///
    /// # Errors
    ///
    /// Returns [`BillingError::Http`] when the underlying client cannot be
    /// built.
    pub fn with_timeout(timeout: Duration) -> Result<Self, BillingError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("cloudspend/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: client,
            retry_strategy: RetryStrategy::default(),
        })
    }

    /// Sets the retry strategy for this client.
    pub fn with_retry_strategy(mut self, strategy: RetryStrategy) -> Self {
        self.retry_strategy = strategy;
        self
    }

    /// Performs an authorized GET request against the billing API.
    ///
    /// # Errors
    ///
    /// Returns [`BillingError::Authorization`] on 401/403,
    /// [`BillingError::RateLimited`] when the retry budget is exhausted on
    /// 429, and [`BillingError::Http`] / [`BillingError::InvalidResponse`]
    /// for other failures.
    pub async fn get_with_auth(
        &self,
        url: &str,
        token: &BearerToken,
    ) -> Result<Response, BillingError> {
        let mut attempts = 0;
        let max_attempts = self.retry_strategy.max_attempts;

        loop {
            attempts += 1;
            debug!(url = %url, attempt = attempts, "Making GET request");

            let result = self
                .inner
                .get(url)
                .header(header::AUTHORIZATION, token.header_value())
                .send()
                .await;

            match result {
                Ok(response) => {
                    if response.status().is_success() {
                        return Ok(response);
                    }

                    if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        let retry_after = response
                            .headers()
                            .get(header::RETRY_AFTER)
                            .and_then(|v| v.to_str().ok())
                            .and_then(|v| v.parse().ok());

                        if attempts < max_attempts {
                            let wait_time =
                                retry_after.unwrap_or(self.retry_strategy.base_delay_secs);
                            warn!("Rate limited, waiting {} seconds before retry", wait_time);
                            tokio::time::sleep(Duration::from_secs(wait_time)).await;
                            continue;
                        }

                        return Err(BillingError::RateLimited { retry_after });
                    }

                    if response.status() == reqwest::StatusCode::UNAUTHORIZED
                        || response.status() == reqwest::StatusCode::FORBIDDEN
                    {
                        return Err(BillingError::Authorization(
                            "Billing API rejected the bearer token".to_string(),
                        ));
                    }

                    return Err(BillingError::InvalidResponse(format!(
                        "Unexpected status code: {}",
                        response.status()
                    )));
                }
                Err(e) => {
                    if attempts < max_attempts && self.retry_strategy.should_retry(&e) {
                        let delay = self.retry_strategy.delay_for_attempt(attempts);
                        warn!(
                            error = %e,
                            delay_secs = delay.as_secs(),
                            "Request failed, retrying"
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                    return Err(e.into());
                }
            }
        }
    }
}
