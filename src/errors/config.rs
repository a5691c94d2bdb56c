//! Error types for configuration and credential loading.

/// Errors raised while assembling configuration.
///
/// A missing credential is always an error; nothing in the crate falls back
/// to an anonymous endpoint.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The provider credential is not set.
    #[error("Provider credential missing: set {variable} (for example in a .env file)")]
    MissingCredential {
        /// Name of the variable that should hold the credential
        variable: String,
    },

    /// A required setting is missing.
    #[error("Missing configuration: {field}")]
    Missing {
        /// Name of the missing setting
        field: String,
    },

    /// A setting is present but cannot be used.
    #[error("Invalid configuration for {field}: {reason}")]
    Invalid {
        /// Name of the offending setting
        field: String,
        /// Why the value was rejected
        reason: String,
    },

    /// The provider endpoint URL does not parse.
    #[error("Invalid provider URL: {0}")]
    ProviderUrlInvalid(#[from] url::ParseError),

    /// The HTTP client for the provider could not be built.
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] alloy_transport_http::reqwest::Error),
}

impl ConfigError {
    /// Create a `Missing` error for a setting.
    pub fn missing(field: impl Into<String>) -> Self {
        ConfigError::Missing {
            field: field.into(),
        }
    }

    /// Create an `Invalid` error for a setting.
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
