// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for transferscan integration tests
//!
//! Provides a scripted in-memory transfer source and builders for provider
//! payloads, so pagination and the pipeline can be tested without a network.

use std::collections::VecDeque;
use std::sync::Mutex;

use alloy_primitives::{address, Address};
use alloy_transport::{TransportError, TransportErrorKind};
use async_trait::async_trait;
use serde_json::{json, Value};
use transferscan::provider::{AssetTransferSource, AssetTransfersParams, RawPage};

/// Token contract used across tests (PAXG)
pub const CONTRACT: Address = address!("45804880de22913dafe09f4980848ece6ecbaf78");

/// Mock AssetTransferSource replaying a fixed script
///
/// Each call pops the next scripted response and records the params it was
/// called with. Calling past the end of the script fails the test.
///
/// # Example
///
/// ```rust,ignore
/// let source = MockTransferSource::new()
///     .with_page(page(vec![transfer_entry(1, 10.0)], Some("k1")))
///     .with_error(TransportErrorKind::http_error(502, "bad gateway".into()));
/// ```
#[allow(dead_code)]
#[derive(Default)]
pub struct MockTransferSource {
    script: Mutex<VecDeque<Result<RawPage, TransportError>>>,
    calls: Mutex<Vec<AssetTransfersParams>>,
}

#[allow(dead_code)]
impl MockTransferSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response
    pub fn with_page(self, page: RawPage) -> Self {
        self.script.lock().unwrap().push_back(Ok(page));
        self
    }

    /// Queue a failed response
    pub fn with_error(self, error: TransportError) -> Self {
        self.script.lock().unwrap().push_back(Err(error));
        self
    }

    /// Params of every call made so far, in order
    pub fn calls(&self) -> Vec<AssetTransfersParams> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl AssetTransferSource for MockTransferSource {
    async fn get_asset_transfers(
        &self,
        params: &AssetTransfersParams,
    ) -> Result<RawPage, TransportError> {
        self.calls.lock().unwrap().push(params.clone());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportErrorKind::custom_str("script exhausted")))
    }
}

/// Build a page with the given entries and cursor
#[allow(dead_code)]
pub fn page(transfers: Vec<Value>, page_key: Option<&str>) -> RawPage {
    RawPage {
        transfers,
        page_key: page_key.map(str::to_string),
    }
}

/// A well-formed provider transfer entry for [`CONTRACT`]
#[allow(dead_code)]
pub fn transfer_entry(block: u64, value: f64) -> Value {
    json!({
        "blockNum": format!("{block:#x}"),
        "uniqueId": format!("0x{block:064x}:log:0"),
        "hash": format!("0x{block:064x}"),
        "from": "0x45804880de22913dafe09f4980848ece6ecbaf78",
        "to": "0x3f5ce5fbfe3e9af3971dd833d26ba9b5c936f0be",
        "value": value,
        "erc721TokenId": null,
        "erc1155Metadata": null,
        "tokenId": null,
        "asset": "PAXG",
        "category": "erc20",
        "rawContract": {
            "value": "0x0de0b6b3a7640000",
            "address": "0x45804880de22913dafe09f4980848ece6ecbaf78",
            "decimal": "0x12"
        },
        "metadata": { "blockTimestamp": "2022-08-22T10:15:42.000Z" }
    })
}

/// JSON-RPC success envelope around a `result` object
#[allow(dead_code)]
pub fn rpc_result(id: &Value, transfers: Vec<Value>, page_key: Option<&str>) -> Value {
    let mut result = json!({ "transfers": transfers });
    if let Some(key) = page_key {
        result["pageKey"] = json!(key);
    }
    json!({ "jsonrpc": "2.0", "id": id, "result": result })
}
