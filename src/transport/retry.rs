// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Tower retry layer with exponential backoff for the provider client.
//!
//! Pagination has no retry logic of its own: a failed page aborts the whole
//! scan. This layer sits below it in the transport, so a transient failure can
//! be retried transparently while an exhausted budget still surfaces as a
//! single failed page.

use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
    time::Duration,
};

use alloy_json_rpc::{RequestPacket, ResponsePacket, RpcError};
use alloy_transport::TransportError;
use tower::Layer;
use tracing::{debug, warn};

/// Default maximum delay between retries (30 seconds).
const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(30);
/// Default base delay for exponential backoff (100ms).
const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(100);

/// A Tower layer that retries transient RPC failures.
///
/// The delay before retry `n` (zero-based) is
///
/// ```text
/// delay = min(base_delay * 2^n, max_delay)
/// ```
///
/// The default configuration performs no retries.
///
/// # Example
///
/// ```rust
/// use transferscan::transport::RetryLayer;
/// use std::time::Duration;
///
/// let layer = RetryLayer::builder()
///     .max_retries(3)
///     .base_delay(Duration::from_millis(200))
///     .build();
/// assert_eq!(layer.config().max_retries, 3);
/// ```
#[derive(Clone, Debug, Default)]
pub struct RetryLayer {
    config: Arc<RetryConfig>,
}

/// Configuration for retry behavior.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryConfig {
    /// Maximum number of retries (not counting the initial request).
    pub max_retries: u32,
    /// Base delay for exponential backoff.
    pub base_delay: Duration,
    /// Upper bound for a single backoff delay.
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 0,
            base_delay: DEFAULT_BASE_DELAY,
            max_delay: DEFAULT_MAX_DELAY,
        }
    }
}

impl RetryConfig {
    /// Backoff before retry number `attempt` (zero-based).
    pub fn backoff(&self, attempt: u32) -> Duration {
        let multiplier = 2u128.saturating_pow(attempt);
        let delay_ms = self.base_delay.as_millis().saturating_mul(multiplier);
        let capped_ms = delay_ms.min(self.max_delay.as_millis());
        Duration::from_millis(capped_ms as u64)
    }
}

impl RetryLayer {
    /// Creates a layer that never retries.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a layer retrying up to `max_retries` times with default delays.
    pub fn with_max_retries(max_retries: u32) -> Self {
        Self::builder().max_retries(max_retries).build()
    }

    /// Creates a builder for customizing retry configuration.
    pub fn builder() -> RetryLayerBuilder {
        RetryLayerBuilder::default()
    }

    /// The active retry configuration.
    pub fn config(&self) -> &RetryConfig {
        &self.config
    }
}

impl<S> Layer<S> for RetryLayer {
    type Service = RetryService<S>;

    fn layer(&self, service: S) -> Self::Service {
        RetryService {
            service,
            config: self.config.clone(),
        }
    }
}

/// Builder for configuring a [`RetryLayer`].
#[derive(Clone, Debug, Default)]
pub struct RetryLayerBuilder {
    config: RetryConfig,
}

impl RetryLayerBuilder {
    /// Sets the maximum number of retries.
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.config.max_retries = max_retries;
        self
    }

    /// Sets the base delay for exponential backoff.
    pub fn base_delay(mut self, delay: Duration) -> Self {
        self.config.base_delay = delay;
        self
    }

    /// Sets the maximum delay between retries.
    pub fn max_delay(mut self, delay: Duration) -> Self {
        self.config.max_delay = delay;
        self
    }

    /// Builds the configured [`RetryLayer`].
    pub fn build(self) -> RetryLayer {
        RetryLayer {
            config: Arc::new(self.config),
        }
    }
}

/// A Tower service that retries transient failures of the inner transport.
#[derive(Clone, Debug)]
pub struct RetryService<S> {
    service: S,
    config: Arc<RetryConfig>,
}

impl<S> tower::Service<RequestPacket> for RetryService<S>
where
    S: tower::Service<RequestPacket, Response = ResponsePacket, Error = TransportError>
        + Clone
        + Send
        + 'static,
    S::Future: Send,
{
    type Response = ResponsePacket;
    type Error = TransportError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&mut self, request: RequestPacket) -> Self::Future {
        let service = self.service.clone();
        let config = self.config.clone();

        Box::pin(async move {
            let mut attempt = 0u32;
            loop {
                let mut inner = service.clone();

                let error = match inner.call(request.clone()).await {
                    Ok(response) => {
                        if attempt > 0 {
                            debug!(retries = attempt, "Provider request succeeded after retry");
                        }
                        return Ok(response);
                    }
                    Err(error) => error,
                };

                if !is_retryable(&error) || attempt >= config.max_retries {
                    if config.max_retries > 0 {
                        warn!(
                            error = %error,
                            attempts = attempt + 1,
                            "Giving up on provider request"
                        );
                    }
                    return Err(error);
                }

                let delay = config.backoff(attempt);
                warn!(
                    error = %error,
                    retry = attempt + 1,
                    max_retries = config.max_retries,
                    delay_ms = delay.as_millis() as u64,
                    "Transient provider error, backing off"
                );

                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        })
    }
}

/// Whether a failed request may succeed if sent again.
///
/// Rate limiting, temporarily unavailable backends and JSON-RPC error codes
/// flagged as retryable qualify. Malformed requests or responses never do.
pub(crate) fn is_retryable(error: &TransportError) -> bool {
    match error {
        RpcError::Transport(kind) => kind.is_retry_err(),
        RpcError::ErrorResp(payload) => payload.is_retry_err(),
        RpcError::NullResp => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_transport::TransportErrorKind;

    #[test]
    fn test_default_layer_does_not_retry() {
        let layer = RetryLayer::new();
        assert_eq!(layer.config().max_retries, 0);
        assert_eq!(layer.config().base_delay, DEFAULT_BASE_DELAY);
        assert_eq!(layer.config().max_delay, DEFAULT_MAX_DELAY);
    }

    #[test]
    fn test_builder() {
        let layer = RetryLayer::builder()
            .max_retries(5)
            .base_delay(Duration::from_millis(200))
            .max_delay(Duration::from_secs(60))
            .build();

        assert_eq!(
            *layer.config(),
            RetryConfig {
                max_retries: 5,
                base_delay: Duration::from_millis(200),
                max_delay: Duration::from_secs(60),
            }
        );
        assert_eq!(RetryLayer::with_max_retries(2).config().max_retries, 2);
    }

    #[test]
    fn test_backoff_doubles() {
        let config = RetryConfig {
            max_retries: 5,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(10),
        };

        assert_eq!(config.backoff(0), Duration::from_millis(100));
        assert_eq!(config.backoff(1), Duration::from_millis(200));
        assert_eq!(config.backoff(3), Duration::from_millis(800));
    }

    #[test]
    fn test_backoff_is_capped() {
        let config = RetryConfig {
            max_retries: 100,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(60),
        };

        assert_eq!(config.backoff(6), Duration::from_secs(60));
        // 2^200 saturates instead of overflowing
        assert_eq!(config.backoff(200), Duration::from_secs(60));
    }

    #[test]
    fn test_rate_limited_is_retryable() {
        let error = TransportErrorKind::http_error(429, "slow down".to_string());
        assert!(is_retryable(&error));
    }

    #[test]
    fn test_client_error_is_not_retryable() {
        let error = TransportErrorKind::http_error(400, "bad request".to_string());
        assert!(!is_retryable(&error));
    }
}
