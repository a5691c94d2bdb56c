//! Configuration for transferscan operations
//!
//! This module holds the pipeline-level settings (request timeout and how
//! transaction links are rendered) and the provider credential type.
//!
//! # Example: Using defaults
//!
//! ```rust
//! use transferscan::TransferscanConfig;
//!
//! // 30s per request, Etherscan transaction links
//! let config = TransferscanConfig::default();
//! ```
//!
//! # Example: Custom configuration
//!
//! ```rust
//! use transferscan::{TransferscanConfigBuilder, TxLinkTemplate};
//! use std::time::Duration;
//!
//! let config = TransferscanConfigBuilder::new()
//!     .request_timeout(Duration::from_secs(10))
//!     .tx_link_template(TxLinkTemplate::new("https://sepolia.etherscan.io/tx/{hash}")?)
//!     .build();
//! # Ok::<(), transferscan::ConfigError>(())
//! ```

use std::fmt;
use std::time::Duration;

use alloy_chains::NamedChain;
use tracing::warn;

use crate::errors::ConfigError;

pub mod constants;

use constants::{DEFAULT_REQUEST_TIMEOUT, DEFAULT_TX_LINK_TEMPLATE, HASH_PLACEHOLDER};

/// Configuration for a pipeline run
///
/// Use [`TransferscanConfigBuilder`] for a fluent API to construct instances.
#[derive(Debug, Clone)]
pub struct TransferscanConfig {
    /// Upper bound for a single provider round-trip
    /// Default: 30 seconds (a hung request fails the run instead of blocking it)
    pub request_timeout: Duration,

    /// Template used to build each record's transaction link
    /// Default: Etherscan mainnet
    pub tx_link_template: TxLinkTemplate,
}

impl Default for TransferscanConfig {
    fn default() -> Self {
        Self {
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            tx_link_template: TxLinkTemplate::default(),
        }
    }
}

/// Builder for [`TransferscanConfig`]
///
/// # Example
///
/// ```rust
/// use transferscan::TransferscanConfigBuilder;
/// use alloy_chains::NamedChain;
/// use std::time::Duration;
///
/// let config = TransferscanConfigBuilder::new()
///     .request_timeout(Duration::from_secs(60))
///     .chain(NamedChain::Mainnet)
///     .build();
/// ```
#[derive(Debug, Default)]
pub struct TransferscanConfigBuilder {
    config: TransferscanConfig,
}

impl TransferscanConfigBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-request timeout
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    /// Set the transaction link template
    pub fn tx_link_template(mut self, template: TxLinkTemplate) -> Self {
        self.config.tx_link_template = template;
        self
    }

    /// Use the block explorer of `chain` for transaction links
    ///
    /// Chains without a known explorer keep the current template.
    pub fn chain(mut self, chain: NamedChain) -> Self {
        match TxLinkTemplate::for_chain(chain) {
            Some(template) => self.config.tx_link_template = template,
            None => warn!(
                chain = %chain,
                template = %self.config.tx_link_template,
                "No block explorer known for chain, keeping transaction link template"
            ),
        }
        self
    }

    /// Build the configuration
    pub fn build(self) -> TransferscanConfig {
        self.config
    }
}

/// Explorer URL template for transaction links
///
/// The template must contain a `{hash}` placeholder, which is replaced with
/// the raw transaction hash reported by the provider.
///
/// # Example
///
/// ```rust
/// use transferscan::TxLinkTemplate;
///
/// let template = TxLinkTemplate::default();
/// assert_eq!(template.render("0xabc"), "https://etherscan.io/tx/0xabc");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxLinkTemplate(String);

impl TxLinkTemplate {
    /// Create a template, checking it contains the `{hash}` placeholder
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the placeholder is missing.
    pub fn new(template: impl Into<String>) -> Result<Self, ConfigError> {
        let template = template.into();
        if !template.contains(HASH_PLACEHOLDER) {
            return Err(ConfigError::invalid(
                "tx_link_template",
                format!("template {template:?} has no {HASH_PLACEHOLDER} placeholder"),
            ));
        }
        Ok(Self(template))
    }

    /// Template pointing at the Etherscan-family explorer for `chain`, if any
    pub fn for_chain(chain: NamedChain) -> Option<Self> {
        let (_api, base) = chain.etherscan_urls()?;
        Some(Self(format!(
            "{}/tx/{HASH_PLACEHOLDER}",
            base.trim_end_matches('/')
        )))
    }

    /// Render the link for a transaction hash
    pub fn render(&self, hash: &str) -> String {
        self.0.replace(HASH_PLACEHOLDER, hash)
    }

    /// The raw template string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TxLinkTemplate {
    fn default() -> Self {
        Self(DEFAULT_TX_LINK_TEMPLATE.to_string())
    }
}

impl fmt::Display for TxLinkTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Provider API key
///
/// Passed explicitly to the client factory; nothing inside the pipeline reads
/// process-wide state. `Debug` never prints the key.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a credential, rejecting blank values
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for an empty or whitespace-only key.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(ConfigError::invalid("api_key", "credential is empty"));
        }
        Ok(Self(key))
    }

    /// Read the credential from the environment (after loading `.env`)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingCredential`] when the variable is unset
    /// or blank.
    pub fn from_env(variable: &str) -> Result<Self, ConfigError> {
        let missing = || ConfigError::MissingCredential {
            variable: variable.to_string(),
        };

        let value = dotenvy::var(variable).map_err(|_| missing())?;
        Self::new(value).map_err(|_| missing())
    }

    /// The secret value
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TransferscanConfig::default();
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.tx_link_template.as_str(), DEFAULT_TX_LINK_TEMPLATE);
    }

    #[test]
    fn test_builder_overrides() {
        let template = TxLinkTemplate::new("https://example.org/tx/{hash}").unwrap();
        let config = TransferscanConfigBuilder::new()
            .request_timeout(Duration::from_secs(5))
            .tx_link_template(template.clone())
            .build();

        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.tx_link_template, template);
    }

    #[test]
    fn test_template_requires_placeholder() {
        let err = TxLinkTemplate::new("https://etherscan.io/tx/").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_template_render() {
        let template = TxLinkTemplate::default();
        assert_eq!(
            template.render("0x5f2d4b"),
            "https://etherscan.io/tx/0x5f2d4b"
        );
    }

    #[test]
    fn test_template_for_mainnet() {
        let template = TxLinkTemplate::for_chain(NamedChain::Mainnet).unwrap();
        let link = template.render("0xabc");
        assert!(link.starts_with("https://"));
        assert!(link.ends_with("/tx/0xabc"));
    }

    #[test]
    fn test_api_key_debug_is_redacted() {
        let key = ApiKey::new("super-secret").unwrap();
        assert_eq!(format!("{key:?}"), "ApiKey(<redacted>)");
        assert_eq!(key.expose(), "super-secret");
    }

    #[test]
    fn test_api_key_rejects_blank() {
        assert!(ApiKey::new("").is_err());
        assert!(ApiKey::new("   ").is_err());
    }

    #[test]
    fn test_api_key_from_env_missing_fails_loudly() {
        let err = ApiKey::from_env("TRANSFERSCAN_TEST_UNSET_API_KEY").unwrap_err();
        match err {
            ConfigError::MissingCredential { variable } => {
                assert_eq!(variable, "TRANSFERSCAN_TEST_UNSET_API_KEY");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
