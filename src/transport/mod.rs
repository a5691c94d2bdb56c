// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Transport layer utilities for the provider client.
//!
//! Tower middleware applied to alloy's HTTP transport by
//! [`create_http_client`](crate::provider::create_http_client):
//!
//! - [`LoggingLayer`] records one tracing span per JSON-RPC call
//! - [`RetryLayer`] retries transient failures with exponential backoff
//!
//! ## Usage
//!
//! ```rust,ignore
//! use transferscan::transport::{LoggingLayer, RetryLayer};
//! use alloy_rpc_client::ClientBuilder;
//!
//! let client = ClientBuilder::default()
//!     .layer(LoggingLayer::new())
//!     .layer(RetryLayer::with_max_retries(3))
//!     .http(rpc_url);
//! ```

mod logging;
mod retry;

pub use logging::{LoggingLayer, LoggingService};
pub use retry::{RetryConfig, RetryLayer, RetryLayerBuilder, RetryService};
