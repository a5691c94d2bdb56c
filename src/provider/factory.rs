// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Client factory for the transfers provider

use alloy_rpc_client::{ClientBuilder, RpcClient};
use alloy_transport::utils::guess_local_url;
use alloy_transport_http::reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use alloy_transport_http::{reqwest, Http};
use tracing::debug;

use crate::errors::ConfigError;
use crate::transport::{LoggingLayer, RetryLayer};

use super::config::ProviderConfig;

/// Create an HTTP JSON-RPC client with the given configuration
///
/// The logging layer wraps the retry layer, so one logged call covers every
/// attempt made for a page.
///
/// # Examples
///
/// ```rust,ignore
/// use transferscan::provider::{create_http_client, ProviderConfig};
///
/// let client = create_http_client(
///     ProviderConfig::alchemy(&api_key, "eth-mainnet").with_max_retries(3)
/// )?;
/// ```
///
/// # Errors
///
/// Returns [`ConfigError::ProviderUrlInvalid`] if the URL cannot be parsed and
/// [`ConfigError::HttpClient`] if the HTTP client cannot be built.
pub fn create_http_client(config: ProviderConfig) -> Result<RpcClient, ConfigError> {
    let url: url::Url = config.url.parse()?;
    let is_local = guess_local_url(url.as_str());
    let transport = Http::with_client(json_http_client()?, url);

    let logging = if config.logging_enabled {
        LoggingLayer::new()
    } else {
        LoggingLayer::disabled()
    };

    let retry = RetryLayer::builder()
        .max_retries(config.max_retries)
        .base_delay(config.retry_base_delay)
        .build();

    debug!(
        max_retries = config.max_retries,
        logging = config.logging_enabled,
        "Creating provider client"
    );

    Ok(ClientBuilder::default()
        .layer(logging)
        .layer(retry)
        .transport(transport, is_local))
}

/// reqwest client that asks for JSON responses (`content-type` is set per
/// request by the transport).
fn json_http_client() -> Result<reqwest::Client, ConfigError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    reqwest::Client::builder()
        .default_headers(headers)
        .build()
        .map_err(ConfigError::HttpClient)
}
