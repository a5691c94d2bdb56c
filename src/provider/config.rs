// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Provider configuration options

use std::fmt;
use std::time::Duration;

use crate::config::ApiKey;

/// Configuration for creating the provider client
///
/// # Example
///
/// ```rust,ignore
/// use transferscan::provider::ProviderConfig;
///
/// let config = ProviderConfig::new("https://eth-mainnet.g.alchemy.com/v2/<key>")
///     .with_max_retries(3);
/// ```
///
/// Retries are off by default: a single failed round-trip fails the scan.
/// Enabling them never changes the all-or-nothing outcome, it only gives a
/// transient failure more chances before the scan is abandoned.
#[derive(Clone)]
pub struct ProviderConfig {
    /// RPC endpoint URL (may embed the credential, never logged)
    pub url: String,
    /// Retries for retryable transport errors (0 disables retrying)
    pub max_retries: u32,
    /// Base delay for exponential backoff between retries
    pub retry_base_delay: Duration,
    /// Whether to wrap requests in the tracing logging layer
    pub logging_enabled: bool,
}

impl ProviderConfig {
    /// Create a new provider configuration with the specified URL
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_retries: 0,
            retry_base_delay: Duration::from_millis(100),
            logging_enabled: true,
        }
    }

    /// Retry retryable transport failures up to `max_retries` times
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the base delay for retry backoff
    #[must_use]
    pub fn with_retry_base_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }

    /// Disable the request logging layer
    #[must_use]
    pub fn without_logging(mut self) -> Self {
        self.logging_enabled = false;
        self
    }

    /// Check if failed requests will be retried
    #[must_use]
    pub fn retries_enabled(&self) -> bool {
        self.max_retries > 0
    }

    /// Configuration preset for Alchemy
    #[must_use]
    pub fn alchemy(api_key: &ApiKey, network: &str) -> Self {
        Self::new(format!(
            "https://{network}.g.alchemy.com/v2/{}",
            api_key.expose()
        ))
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("url", &"<redacted>")
            .field("max_retries", &self.max_retries)
            .field("retry_base_delay", &self.retry_base_delay)
            .field("logging_enabled", &self.logging_enabled)
            .finish()
    }
}
