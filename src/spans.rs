//! Span creation helpers for transferscan operations.
//!
//! Telemetry concerns are kept apart from pipeline logic: each instrumented
//! operation has a span helper here instead of an `#[instrument]` attribute.
//!
//! Usage pattern:
//! ```rust,ignore
//! async fn my_operation(&self, param: Type) -> Result<T> {
//!     async move {
//!         // Business logic here
//!     }
//!     .instrument(spans::my_operation(param_value))
//!     .await
//! }
//! ```

use alloy_primitives::Address;
use tracing::{Level, Span};

/// Create the root span for one pipeline run.
///
/// Parent: None (root span for this operation)
/// Children: fetch_page and normalize_page spans
#[inline]
pub(crate) fn run_pipeline(contract_address: Address, start_block: i64) -> Span {
    tracing::span!(
        Level::INFO,
        "transferscan.run_pipeline",
        contract_address = %contract_address,
        start_block = start_block,
    )
}

/// Create span for fetching one page from the provider.
///
/// Parent: run_pipeline span (or the caller's span when paginating directly)
/// Children: rpc_call span from the transport logging layer
#[inline]
pub(crate) fn fetch_page(page_index: usize, has_cursor: bool) -> Span {
    tracing::debug_span!(
        "transferscan.fetch_page",
        page_index = page_index,
        has_cursor = has_cursor,
    )
}

/// Create span for normalizing the entries of one page.
///
/// Parent: run_pipeline span
#[inline]
pub(crate) fn normalize_page(page_index: usize, entries: usize) -> Span {
    tracing::trace_span!(
        "transferscan.normalize_page",
        page_index = page_index,
        entries = entries,
    )
}
