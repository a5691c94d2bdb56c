// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for block number conversions.

/// Errors produced by the hex/decimal block codec.
///
/// # Examples
///
/// ```rust
/// use transferscan::{encode_block, CodecError};
///
/// assert!(matches!(encode_block(0), Err(CodecError::InvalidBlock { block: 0 })));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// The input is not a valid base-16 number.
    #[error("Malformed hex block number {input:?}: {reason}")]
    MalformedHex {
        /// The rejected input, as given
        input: String,
        /// Why the input was rejected
        reason: String,
    },

    /// Block numbers must be strictly positive to be used as a starting block.
    #[error("Invalid block {block}: starting block must be greater than 0")]
    InvalidBlock {
        /// The rejected block number
        block: i64,
    },
}

impl CodecError {
    /// Create a `MalformedHex` error for an input.
    pub fn malformed_hex(input: impl Into<String>, reason: impl Into<String>) -> Self {
        CodecError::MalformedHex {
            input: input.into(),
            reason: reason.into(),
        }
    }
}
