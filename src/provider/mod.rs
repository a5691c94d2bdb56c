// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Asset transfer provider: wire types, the source trait and client creation
//!
//! The pagination client talks to the provider through the
//! [`AssetTransferSource`] trait. The production implementation is alloy's
//! [`RpcClient`] calling `alchemy_getAssetTransfers`; tests plug in scripted
//! in-memory sources.
//!
//! # Examples
//!
//! ```rust,ignore
//! use transferscan::config::ApiKey;
//! use transferscan::provider::{create_http_client, ProviderConfig};
//!
//! let key = ApiKey::from_env("ALCHEMY_API_KEY")?;
//! let client = create_http_client(ProviderConfig::alchemy(&key, "eth-mainnet"))?;
//! ```

use alloy_primitives::Address;
use alloy_rpc_client::RpcClient;
use alloy_transport::TransportError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::constants::{ASSET_TRANSFERS_METHOD, ERC20_CATEGORY, LATEST_BLOCK_TAG};

mod config;
mod factory;

pub use config::ProviderConfig;
pub use factory::create_http_client;

/// Filter object sent as the single JSON-RPC param of every page request
///
/// Every page of one scan carries the same filter; only `page_key` changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetTransfersParams {
    /// Hex-encoded starting block
    pub from_block: String,
    /// Upper bound, always `"latest"`
    pub to_block: String,
    /// Sender filter (the token contract)
    pub from_address: Address,
    /// Transfer categories, always `["erc20"]`
    pub category: Vec<String>,
    /// Ask the provider to include block timestamps
    pub with_metadata: bool,
    /// Drop zero-value transfers provider-side
    pub exclude_zero_value: bool,
    /// Continuation cursor, omitted on the first request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_key: Option<String>,
}

impl AssetTransfersParams {
    /// Filter for ERC-20 transfers sent by `from_address` since `from_block`
    pub fn erc20_from(from_address: Address, from_block: String) -> Self {
        Self {
            from_block,
            to_block: LATEST_BLOCK_TAG.to_string(),
            from_address,
            category: vec![ERC20_CATEGORY.to_string()],
            with_metadata: true,
            exclude_zero_value: true,
            page_key: None,
        }
    }

    /// Copy of this filter continuing from `page_key`
    pub fn with_page_key(&self, page_key: impl Into<String>) -> Self {
        Self {
            page_key: Some(page_key.into()),
            ..self.clone()
        }
    }
}

/// One provider response page (the JSON-RPC `result` object)
///
/// Entries are kept as raw JSON; the normalizer validates them against the
/// transfer schema.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPage {
    /// Raw transfer entries in provider order
    pub transfers: Vec<serde_json::Value>,
    /// Continuation cursor, absent on the last page
    #[serde(default)]
    pub page_key: Option<String>,
}

impl RawPage {
    /// Cursor for the next request, if more pages remain
    ///
    /// An empty cursor string is treated the same as a missing one.
    pub fn next_cursor(&self) -> Option<&str> {
        self.page_key.as_deref().filter(|key| !key.is_empty())
    }
}

/// A provider able to serve one page of asset transfers per call
#[async_trait]
pub trait AssetTransferSource: Send + Sync {
    /// Perform one round-trip for the given filter
    async fn get_asset_transfers(
        &self,
        params: &AssetTransfersParams,
    ) -> Result<RawPage, TransportError>;
}

#[async_trait]
impl AssetTransferSource for RpcClient {
    async fn get_asset_transfers(
        &self,
        params: &AssetTransfersParams,
    ) -> Result<RawPage, TransportError> {
        self.request(ASSET_TRANSFERS_METHOD, [params.clone()]).await
    }
}

#[async_trait]
impl<S: AssetTransferSource + ?Sized> AssetTransferSource for &S {
    async fn get_asset_transfers(
        &self,
        params: &AssetTransfersParams,
    ) -> Result<RawPage, TransportError> {
        (**self).get_asset_transfers(params).await
    }
}
