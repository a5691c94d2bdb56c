// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Cursor pagination over the asset transfers provider
//!
//! A scan issues one request per page, following the provider's `pageKey`
//! cursor until a page arrives without one (or with an empty one). Pages are
//! produced lazily through [`TransferPaginator::pages`], so a consumer can
//! process each page before the next round-trip is made.
//!
//! Failures are all-or-nothing: the first failed round-trip ends the stream,
//! and [`TransferPaginator::fetch_all`] returns the error without any of the
//! pages fetched before it. Resuming is not supported; re-run the scan.
//!
//! # Examples
//!
//! ```rust,ignore
//! use transferscan::TransferPaginator;
//! use futures::TryStreamExt;
//! use std::time::Duration;
//!
//! let paginator = TransferPaginator::new(&client, contract, 15_390_084, Duration::from_secs(30))?;
//!
//! let mut pages = std::pin::pin!(paginator.pages());
//! while let Some(page) = pages.try_next().await? {
//!     println!("{} transfers", page.transfers.len());
//! }
//! ```

use std::time::Duration;

use alloy_primitives::Address;
use futures::{stream, Stream, TryStreamExt};
use tracing::{debug, warn, Instrument};

use crate::codec::encode_block;
use crate::errors::{CodecError, PaginationError};
use crate::provider::{AssetTransferSource, AssetTransfersParams, RawPage};
use crate::spans;

/// Position of the next request in a scan.
#[derive(Debug, Clone)]
struct PageCursor {
    page_index: usize,
    page_key: Option<String>,
}

/// Drives the page-by-page fetch loop for one contract
///
/// The request filter is fixed at construction; every page request reuses it
/// and only adds the continuation cursor.
#[derive(Debug)]
pub struct TransferPaginator<S> {
    source: S,
    params: AssetTransfersParams,
    request_timeout: Duration,
}

impl<S: AssetTransferSource> TransferPaginator<S> {
    /// Create a paginator for ERC-20 transfers sent by `contract_address`
    /// from `start_block` up to the latest block
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidBlock`] when `start_block <= 0`; no
    /// request is made in that case.
    pub fn new(
        source: S,
        contract_address: Address,
        start_block: i64,
        request_timeout: Duration,
    ) -> Result<Self, CodecError> {
        let from_block = encode_block(start_block)?;

        Ok(Self {
            source,
            params: AssetTransfersParams::erc20_from(contract_address, from_block),
            request_timeout,
        })
    }

    /// The filter sent with every request (without cursor)
    pub fn params(&self) -> &AssetTransfersParams {
        &self.params
    }

    /// Lazily fetch pages in order, one round-trip per item
    ///
    /// The stream ends after the first page without a cursor, or right after
    /// yielding the first error.
    pub fn pages(&self) -> impl Stream<Item = Result<RawPage, PaginationError>> + Send + '_ {
        let start = PageCursor {
            page_index: 0,
            page_key: None,
        };

        stream::try_unfold(Some(start), move |cursor| async move {
            let Some(cursor) = cursor else {
                return Ok(None);
            };

            let page = self
                .fetch_page(cursor.page_index, cursor.page_key.as_deref())
                .await?;

            let next = match page.next_cursor() {
                Some(key) => Some(PageCursor {
                    page_index: cursor.page_index + 1,
                    page_key: Some(key.to_string()),
                }),
                None => {
                    debug!(pages = cursor.page_index + 1, "Reached last page");
                    None
                }
            };

            Ok(Some((page, next)))
        })
    }

    /// Fetch every page, discarding all of them if any request fails
    pub async fn fetch_all(&self) -> Result<Vec<RawPage>, PaginationError> {
        self.pages().try_collect().await
    }

    async fn fetch_page(
        &self,
        page_index: usize,
        page_key: Option<&str>,
    ) -> Result<RawPage, PaginationError> {
        let params = match page_key {
            Some(key) => self.params.with_page_key(key),
            None => self.params.clone(),
        };

        async {
            let response =
                tokio::time::timeout(self.request_timeout, self.source.get_asset_transfers(&params))
                    .await
                    .map_err(|_| PaginationError::Timeout {
                        page_index,
                        timeout: self.request_timeout,
                    })?;

            let page = response.map_err(|e| {
                warn!(error = %e, "Provider request failed, abandoning scan");
                PaginationError::provider_request(page_index, e)
            })?;

            debug!(
                transfers = page.transfers.len(),
                has_next = page.next_cursor().is_some(),
                "Fetched page"
            );

            Ok(page)
        }
        .instrument(spans::fetch_page(page_index, page_key.is_some()))
        .await
    }
}
