// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for cursor pagination against the transfers provider.

use std::time::Duration;

use alloy_json_rpc::RpcError;
use alloy_transport::{TransportError, TransportErrorKind};

/// Errors that abort a pagination run.
///
/// Pagination is all-or-nothing: when any of these is returned, every page
/// fetched so far has already been dropped and the caller has to start over.
#[derive(Debug, thiserror::Error)]
pub enum PaginationError {
    /// A provider round-trip failed (transport error, non-success HTTP status,
    /// JSON-RPC error payload or an undecodable response).
    #[error("Provider request for page {page_index} failed{}", status_suffix(.status))]
    ProviderRequest {
        /// Zero-based index of the page being fetched
        page_index: usize,
        /// HTTP status reported by the transport, if any
        status: Option<u16>,
        /// The underlying transport error
        #[source]
        source: TransportError,
    },

    /// The provider did not answer within the configured request timeout.
    ///
    /// This is the timeout form of a failed provider request: it aborts the
    /// run the same way as [`PaginationError::ProviderRequest`], but carries
    /// no transport error or HTTP status.
    #[error("Provider request for page {page_index} timed out after {timeout:?}")]
    Timeout {
        /// Zero-based index of the page being fetched
        page_index: usize,
        /// The timeout that elapsed
        timeout: Duration,
    },
}

impl PaginationError {
    /// Create a `ProviderRequest` error, extracting the HTTP status from the
    /// transport error when there is one.
    pub fn provider_request(page_index: usize, source: TransportError) -> Self {
        PaginationError::ProviderRequest {
            page_index,
            status: http_status(&source),
            source,
        }
    }

    /// Zero-based index of the page whose request failed.
    pub fn page_index(&self) -> usize {
        match self {
            PaginationError::ProviderRequest { page_index, .. }
            | PaginationError::Timeout { page_index, .. } => *page_index,
        }
    }
}

fn http_status(error: &TransportError) -> Option<u16> {
    match error {
        RpcError::Transport(TransportErrorKind::HttpError(http)) => Some(http.status),
        _ => None,
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status
        .map(|code| format!(" with HTTP status {code}"))
        .unwrap_or_default()
}
