// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end scan: paginate, normalize, aggregate
//!
//! Pages are normalized as they arrive, so raw pages never accumulate. The
//! run is still all-or-nothing: any pagination or normalization failure
//! discards the records collected so far.

use alloy_primitives::Address;
use futures::TryStreamExt;
use tracing::{info, warn, Instrument};

use crate::config::TransferscanConfig;
use crate::errors::TransferscanError;
use crate::normalize::{Normalizer, TransferRecord};
use crate::pagination::TransferPaginator;
use crate::provider::AssetTransferSource;
use crate::spans;
use crate::stats::{value_distribution, DistributionRow};

/// What to scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferQuery {
    /// Canonical token contract address, used as the sender filter
    pub contract_address: Address,
    /// First block to scan, must be positive
    pub start_block: i64,
}

impl TransferQuery {
    pub fn new(contract_address: Address, start_block: i64) -> Self {
        Self {
            contract_address,
            start_block,
        }
    }
}

/// Result of a successful run
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    /// Records in page-then-entry order
    pub records: Vec<TransferRecord>,
    /// Value distribution over `records`
    pub distribution: Vec<DistributionRow>,
    /// Number of provider round-trips
    pub pages_fetched: usize,
}

/// Run a full scan for `query` against `source`
///
/// # Errors
///
/// - [`TransferscanError::Codec`] for a non-positive start block (no request is made)
/// - [`TransferscanError::Pagination`] when a page request fails or times out
/// - [`TransferscanError::Normalization`] for the first malformed entry
///
/// # Examples
///
/// ```rust,ignore
/// use transferscan::{run_pipeline, TransferQuery, TransferscanConfig};
///
/// let query = TransferQuery::new(contract, 15_390_084);
/// let output = run_pipeline(&client, &query, &TransferscanConfig::default()).await?;
/// for row in &output.distribution {
///     println!("{} {} {} {}%", row.index, row.value, row.owner_count, row.percentage);
/// }
/// ```
pub async fn run_pipeline<S>(
    source: S,
    query: &TransferQuery,
    config: &TransferscanConfig,
) -> Result<PipelineOutput, TransferscanError>
where
    S: AssetTransferSource,
{
    async move {
        let paginator = TransferPaginator::new(
            source,
            query.contract_address,
            query.start_block,
            config.request_timeout,
        )?;
        let normalizer = Normalizer::new(config.tx_link_template.clone());

        let mut records = Vec::new();
        let mut pages_fetched = 0usize;

        let mut pages = std::pin::pin!(paginator.pages());
        while let Some(page) = pages.try_next().await? {
            records.extend(normalizer.normalize_page(pages_fetched, &page)?);
            pages_fetched += 1;
        }

        let mismatched = records
            .iter()
            .filter(|record| record.contract_address != query.contract_address)
            .count();
        if mismatched > 0 {
            warn!(
                mismatched,
                total = records.len(),
                "Provider returned transfers from a different contract"
            );
        }

        let distribution = value_distribution(&records);

        info!(
            pages_fetched,
            records = records.len(),
            buckets = distribution.len(),
            "Transfer scan complete"
        );

        Ok(PipelineOutput {
            records,
            distribution,
            pages_fetched,
        })
    }
    .instrument(spans::run_pipeline(query.contract_address, query.start_block))
    .await
}
