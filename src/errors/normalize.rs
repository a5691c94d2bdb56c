// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for transfer normalization.

use super::CodecError;

/// Errors raised while flattening raw transfer entries.
///
/// The normalizer aborts on the first bad entry; both variants identify the
/// offending entry by its zero-based page and entry index.
#[derive(Debug, thiserror::Error)]
pub enum NormalizationError {
    /// The entry is missing a required field or a field has the wrong shape.
    #[error("Malformed transfer at page {page_index}, entry {entry_index}: {source}")]
    MalformedRecord {
        /// Zero-based page index
        page_index: usize,
        /// Zero-based entry index within the page
        entry_index: usize,
        /// Schema violation reported by the decoder
        #[source]
        source: serde_json::Error,
    },

    /// The entry's block number is not valid hex.
    #[error("Invalid block number at page {page_index}, entry {entry_index}")]
    InvalidBlockNumber {
        /// Zero-based page index
        page_index: usize,
        /// Zero-based entry index within the page
        entry_index: usize,
        /// The codec failure
        #[source]
        source: CodecError,
    },
}

impl NormalizationError {
    /// Zero-based `(page, entry)` position of the rejected entry.
    pub fn position(&self) -> (usize, usize) {
        match self {
            NormalizationError::MalformedRecord {
                page_index,
                entry_index,
                ..
            }
            | NormalizationError::InvalidBlockNumber {
                page_index,
                entry_index,
                ..
            } => (*page_index, *entry_index),
        }
    }
}
