// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Flattening of raw provider entries into [`TransferRecord`]s
//!
//! Provider entries are nested JSON (`rawContract.address`,
//! `metadata.blockTimestamp`) with hex block numbers. Each entry is decoded
//! through a strict schema: unknown fields are ignored, but a missing or
//! mistyped required field rejects the entry. The first rejected entry aborts
//! normalization; nothing is silently dropped.
//!
//! Output order is page order, then entry order within each page.

use alloy_primitives::{Address, BlockNumber};
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::trace;

use crate::codec::decode_block;
use crate::config::TxLinkTemplate;
use crate::errors::NormalizationError;
use crate::provider::RawPage;
use crate::spans;

/// One flattened ERC-20 transfer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferRecord {
    /// Block timestamp, truncated to whole seconds
    pub timestamp: DateTime<Utc>,
    /// Decoded block number
    pub block_number: BlockNumber,
    pub from_address: Address,
    pub to_address: Address,
    /// Amount in the units reported by the provider (may be fractional)
    pub value: f64,
    /// Token symbol
    pub asset: String,
    /// Transfer category, `"erc20"` for every record of a scan
    pub category: String,
    /// Token contract that emitted the transfer
    pub contract_address: Address,
    /// Explorer link for the transaction
    pub transaction_link: String,
}

/// Wire shape of one provider transfer entry.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTransfer {
    block_num: String,
    hash: String,
    from: Address,
    to: Address,
    value: f64,
    asset: String,
    category: String,
    raw_contract: RawContract,
    metadata: RawMetadata,
}

#[derive(Debug, Deserialize)]
struct RawContract {
    address: Address,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMetadata {
    block_timestamp: DateTime<Utc>,
}

/// Converts raw pages into transfer records
///
/// # Examples
///
/// ```rust,ignore
/// use transferscan::Normalizer;
///
/// let pages = paginator.fetch_all().await?;
/// let records = Normalizer::default().normalize_pages(&pages)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    tx_link_template: TxLinkTemplate,
}

impl Normalizer {
    pub fn new(tx_link_template: TxLinkTemplate) -> Self {
        Self { tx_link_template }
    }

    /// Normalize every entry of one page
    ///
    /// `page_index` is only used to locate errors.
    pub fn normalize_page(
        &self,
        page_index: usize,
        page: &RawPage,
    ) -> Result<Vec<TransferRecord>, NormalizationError> {
        let _span = spans::normalize_page(page_index, page.transfers.len()).entered();

        let records = page
            .transfers
            .iter()
            .enumerate()
            .map(|(entry_index, entry)| self.normalize_entry(page_index, entry_index, entry))
            .collect::<Result<Vec<_>, _>>()?;

        trace!(records = records.len(), "Normalized page");
        Ok(records)
    }

    /// Normalize a sequence of pages, numbering them from zero
    pub fn normalize_pages<'a, I>(&self, pages: I) -> Result<Vec<TransferRecord>, NormalizationError>
    where
        I: IntoIterator<Item = &'a RawPage>,
    {
        let mut records = Vec::new();
        for (page_index, page) in pages.into_iter().enumerate() {
            records.extend(self.normalize_page(page_index, page)?);
        }
        Ok(records)
    }

    /// Normalize a single raw entry
    pub fn normalize_entry(
        &self,
        page_index: usize,
        entry_index: usize,
        entry: &Value,
    ) -> Result<TransferRecord, NormalizationError> {
        let raw = RawTransfer::deserialize(entry).map_err(|source| {
            NormalizationError::MalformedRecord {
                page_index,
                entry_index,
                source,
            }
        })?;

        let block_number = decode_block(&raw.block_num).map_err(|source| {
            NormalizationError::InvalidBlockNumber {
                page_index,
                entry_index,
                source,
            }
        })?;

        Ok(TransferRecord {
            timestamp: raw.metadata.block_timestamp.trunc_subsecs(0),
            block_number,
            from_address: raw.from,
            to_address: raw.to,
            value: raw.value,
            asset: raw.asset,
            category: raw.category,
            contract_address: raw.raw_contract.address,
            transaction_link: self.tx_link_template.render(&raw.hash),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CodecError;
    use alloy_primitives::address;
    use chrono::TimeZone;
    use serde_json::json;

    fn entry(block: &str, value: f64) -> Value {
        json!({
            "blockNum": block,
            "uniqueId": "0x5f2d-log-12",
            "hash": "0x5f2d4b8c1e",
            "from": "0xbd82cd2f7c2b8710a879580399cfbff61c5020b9",
            "to": "0x3f5ce5fbfe3e9af3971dd833d26ba9b5c936f0be",
            "value": value,
            "erc721TokenId": null,
            "asset": "PAXG",
            "category": "erc20",
            "rawContract": {
                "value": "0x0de0b6b3a7640000",
                "address": "0x45804880de22913dafe09f4980848ece6ecbaf78",
                "decimal": "0x12"
            },
            "metadata": { "blockTimestamp": "2022-08-22T10:15:42.123Z" }
        })
    }

    fn page(entries: Vec<Value>) -> RawPage {
        RawPage {
            transfers: entries,
            page_key: None,
        }
    }

    #[test]
    fn test_entry_is_flattened() {
        let record = Normalizer::default()
            .normalize_entry(0, 0, &entry("0xead584", 1.5))
            .unwrap();

        assert_eq!(
            record.timestamp,
            Utc.with_ymd_and_hms(2022, 8, 22, 10, 15, 42).unwrap()
        );
        assert_eq!(record.block_number, 15_390_084);
        assert_eq!(
            record.from_address,
            address!("bd82cd2f7c2b8710a879580399cfbff61c5020b9")
        );
        assert_eq!(
            record.to_address,
            address!("3f5ce5fbfe3e9af3971dd833d26ba9b5c936f0be")
        );
        assert_eq!(record.value, 1.5);
        assert_eq!(record.asset, "PAXG");
        assert_eq!(record.category, "erc20");
        assert_eq!(
            record.contract_address,
            address!("45804880de22913dafe09f4980848ece6ecbaf78")
        );
        assert_eq!(record.transaction_link, "https://etherscan.io/tx/0x5f2d4b8c1e");
    }

    #[test]
    fn test_custom_link_template() {
        let template = TxLinkTemplate::new("https://explorer.test/{hash}/details").unwrap();
        let record = Normalizer::new(template)
            .normalize_entry(0, 0, &entry("0x1", 1.0))
            .unwrap();

        assert_eq!(record.transaction_link, "https://explorer.test/0x5f2d4b8c1e/details");
    }

    #[test]
    fn test_missing_field_reports_position() {
        let mut bad = entry("0x1", 1.0);
        bad.as_object_mut().unwrap().remove("metadata");

        let pages = [
            page(vec![entry("0x1", 1.0)]),
            page(vec![entry("0x2", 2.0), bad]),
        ];

        let err = Normalizer::default().normalize_pages(&pages).unwrap_err();
        assert!(matches!(err, NormalizationError::MalformedRecord { .. }));
        assert_eq!(err.position(), (1, 1));
    }

    #[test]
    fn test_null_value_is_malformed() {
        let mut bad = entry("0x1", 1.0);
        bad["value"] = Value::Null;

        let err = Normalizer::default().normalize_entry(3, 7, &bad).unwrap_err();
        assert!(matches!(err, NormalizationError::MalformedRecord { .. }));
        assert_eq!(err.position(), (3, 7));
    }

    #[test]
    fn test_null_recipient_is_malformed() {
        let mut bad = entry("0x1", 1.0);
        bad["to"] = Value::Null;

        let err = Normalizer::default().normalize_entry(0, 0, &bad).unwrap_err();
        assert!(matches!(err, NormalizationError::MalformedRecord { .. }));
    }

    #[test]
    fn test_bad_block_hex() {
        let err = Normalizer::default()
            .normalize_entry(0, 2, &entry("0xzz", 1.0))
            .unwrap_err();

        match err {
            NormalizationError::InvalidBlockNumber {
                page_index,
                entry_index,
                source,
            } => {
                assert_eq!((page_index, entry_index), (0, 2));
                assert!(matches!(source, CodecError::MalformedHex { .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_order_is_page_then_entry() {
        let pages = [
            page(vec![entry("0x1", 1.0), entry("0x2", 2.0)]),
            page(vec![]),
            page(vec![entry("0x3", 3.0)]),
        ];

        let records = Normalizer::default().normalize_pages(&pages).unwrap();
        let blocks: Vec<_> = records.iter().map(|r| r.block_number).collect();
        assert_eq!(blocks, vec![1, 2, 3]);
    }
}
