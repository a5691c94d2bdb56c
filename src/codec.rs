// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Hex/decimal block conversions and address canonicalization
//!
//! Providers exchange block numbers as `0x`-prefixed hex strings while the rest
//! of the crate works with [`BlockNumber`]. These helpers are pure and have no
//! state.
//!
//! # Examples
//!
//! ```rust
//! use transferscan::{decode_block, encode_block};
//!
//! let hex = encode_block(15_390_084)?;
//! assert_eq!(hex, "0xead584");
//! assert_eq!(decode_block(&hex)?, 15_390_084);
//! # Ok::<(), transferscan::CodecError>(())
//! ```

use std::str::FromStr;

use alloy_primitives::{Address, BlockNumber};

use crate::errors::CodecError;

/// Length of an address without its `0x` prefix.
const ADDRESS_HEX_LEN: usize = 40;

/// Decode a (optionally `0x`-prefixed) hex string into a block number.
///
/// # Errors
///
/// Returns [`CodecError::MalformedHex`] if the digits are empty, contain
/// non-hex characters, or overflow a `u64`.
///
/// # Examples
///
/// ```rust
/// use transferscan::decode_block;
///
/// assert_eq!(decode_block("0xeadb84").unwrap(), 15_391_620);
/// assert_eq!(decode_block("ff").unwrap(), 255);
/// assert!(decode_block("0xzz").is_err());
/// ```
pub fn decode_block(hex: &str) -> Result<BlockNumber, CodecError> {
    let digits = strip_hex_prefix(hex);

    // from_str_radix tolerates a leading '+', which is not hex
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(CodecError::malformed_hex(hex, "expected one or more hex digits"));
    }

    BlockNumber::from_str_radix(digits, 16)
        .map_err(|e| CodecError::malformed_hex(hex, e.to_string()))
}

/// Encode a starting block as a `0x`-prefixed lowercase hex string.
///
/// Zero and negative blocks are rejected: a scan always needs an explicit,
/// nonzero starting block.
///
/// # Errors
///
/// Returns [`CodecError::InvalidBlock`] when `block <= 0`.
///
/// # Examples
///
/// ```rust
/// use transferscan::encode_block;
///
/// assert_eq!(encode_block(255).unwrap(), "0xff");
/// assert!(encode_block(0).is_err());
/// assert!(encode_block(-1).is_err());
/// ```
pub fn encode_block(block: i64) -> Result<String, CodecError> {
    if block <= 0 {
        return Err(CodecError::InvalidBlock { block });
    }

    Ok(format!("{block:#x}"))
}

/// Canonicalize a contract or account address.
///
/// Accepts either 40 hex digits or a 42-character `0x`-prefixed string and
/// returns the parsed [`Address`], whose `{:#x}` form is the canonical
/// 42-character representation. Anything else yields `None`.
///
/// # Examples
///
/// ```rust
/// use transferscan::canonicalize_address;
///
/// let bare = canonicalize_address("bd82cd2f7c2b8710a879580399cfbff61c5020b9").unwrap();
/// let prefixed = canonicalize_address("0xbd82Cd2f7C2B8710A879580399CFbfF61c5020B9").unwrap();
/// assert_eq!(bare, prefixed);
/// assert_eq!(format!("{bare:#x}"), "0xbd82cd2f7c2b8710a879580399cfbff61c5020b9");
///
/// assert!(canonicalize_address("0x1234").is_none());
/// ```
pub fn canonicalize_address(input: &str) -> Option<Address> {
    let digits = input.strip_prefix("0x").unwrap_or(input);

    if digits.len() != ADDRESS_HEX_LEN || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    Address::from_str(digits).ok()
}

fn strip_hex_prefix(hex: &str) -> &str {
    hex.strip_prefix("0x")
        .or_else(|| hex.strip_prefix("0X"))
        .unwrap_or(hex)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use proptest::prelude::*;

    #[test]
    fn test_decode_block_with_and_without_prefix() {
        assert_eq!(decode_block("0xeadb84").unwrap(), 15_391_620);
        assert_eq!(decode_block("0XEADB84").unwrap(), 15_391_620);
        assert_eq!(decode_block("eadb84").unwrap(), 15_391_620);
        assert_eq!(decode_block("0x0").unwrap(), 0);
    }

    #[test]
    fn test_decode_block_rejects_malformed_hex() {
        for input in ["", "0x", "0xg1", "12 34", "-0x1", "0x1.5", "0x+1"] {
            let err = decode_block(input).unwrap_err();
            assert!(
                matches!(&err, CodecError::MalformedHex { input: i, .. } if i == input),
                "expected MalformedHex for {input:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_decode_block_rejects_overflow() {
        assert!(decode_block("0x10000000000000000").is_err());
        assert_eq!(decode_block("0xffffffffffffffff").unwrap(), u64::MAX);
    }

    #[test]
    fn test_encode_block() {
        assert_eq!(encode_block(1).unwrap(), "0x1");
        assert_eq!(encode_block(15_390_084).unwrap(), "0xead584");
        assert_eq!(encode_block(i64::MAX).unwrap(), "0x7fffffffffffffff");
    }

    #[test]
    fn test_encode_block_rejects_non_positive() {
        assert_eq!(encode_block(0), Err(CodecError::InvalidBlock { block: 0 }));
        assert_eq!(
            encode_block(-42),
            Err(CodecError::InvalidBlock { block: -42 })
        );
    }

    #[test]
    fn test_canonicalize_address_forms() {
        let expected = address!("bd82cd2f7c2b8710a879580399cfbff61c5020b9");

        assert_eq!(
            canonicalize_address("bd82cd2f7c2b8710a879580399cfbff61c5020b9"),
            Some(expected)
        );
        assert_eq!(
            canonicalize_address("0xbd82Cd2f7C2B8710A879580399CFbfF61c5020B9"),
            Some(expected)
        );
    }

    #[test]
    fn test_canonicalize_address_rejects_invalid() {
        assert_eq!(canonicalize_address(""), None);
        assert_eq!(canonicalize_address("0x"), None);
        // 41 digits
        assert_eq!(
            canonicalize_address("bd82cd2f7c2b8710a879580399cfbff61c5020b9a"),
            None
        );
        // right length, not hex
        assert_eq!(
            canonicalize_address("0xzz82cd2f7c2b8710a879580399cfbff61c5020b9"),
            None
        );
        // 42 characters but no 0x prefix
        assert_eq!(
            canonicalize_address("00bd82cd2f7c2b8710a879580399cfbff61c5020b9"),
            None
        );
    }

    proptest! {
        #[test]
        fn prop_block_round_trip(block in 1i64..=i64::MAX) {
            let encoded = encode_block(block).unwrap();
            prop_assert!(encoded.starts_with("0x"));
            prop_assert_eq!(decode_block(&encoded).unwrap(), block as u64);
        }

        #[test]
        fn prop_encode_rejects_non_positive(block in i64::MIN..=0i64) {
            prop_assert_eq!(encode_block(block), Err(CodecError::InvalidBlock { block }));
        }
    }
}
