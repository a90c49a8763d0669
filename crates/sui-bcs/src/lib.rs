//! # sui-bcs
//!
//! BCS (Binary Canonical Serialization) encoding/decoding for the Sui SDK.
//!
//! Serialization is done by the `bcs` crate through serde. Types in this
//! workspace derive or implement `Serialize`/`Deserialize`; address and digest
//! types pick their binary layout when the serializer is not human readable.
//!
//! ## BCS Encoding Rules
//!
//! - Fixed-width integers (`u8` .. `u128`): little-endian, no compression
//! - `bool`: one byte, `0` or `1`
//! - Sequences, byte vectors and strings: ULEB128 length, then elements
//! - Fixed arrays and tuples: elements only, no length
//! - `Option<T>`: `0`, or `1` followed by the value
//! - Enums: ULEB128 variant index, then the variant payload
//! - Structs: fields in declaration order, no names or padding
//!
//! Decoding is strict: short input, trailing bytes, non-canonical ULEB128,
//! out-of-range tags and containers nested deeper than
//! [`MAX_CONTAINER_DEPTH`] are all errors.

#![warn(missing_docs)]
#![warn(clippy::all)]

use bytes::{BufMut, BytesMut};

// Re-export bcs for direct use
pub use bcs::{Error as BcsError, MAX_CONTAINER_DEPTH, MAX_SEQUENCE_LENGTH};
pub use serde::{Deserialize, Serialize};

// Re-export primitives with BCS support
pub use sui_primitives::{ObjectDigest, ObjectRef, SuiAddress, TransactionDigest};

/// Encode a value to BCS bytes
pub fn to_bytes<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, BcsError> {
    bcs::to_bytes(value)
}

/// Decode BCS bytes to a value, rejecting trailing input
pub fn from_bytes<'a, T: Deserialize<'a>>(data: &'a [u8]) -> Result<T, BcsError> {
    bcs::from_bytes(data)
}

/// ULEB128 helpers for callers that work on raw buffers
pub mod utils {
    use super::*;

    /// Encode a value as ULEB128
    pub fn encode_uleb128(mut value: u64) -> Vec<u8> {
        let mut buf = BytesMut::with_capacity(10);
        while value >= 0x80 {
            buf.put_u8((value as u8 & 0x7f) | 0x80);
            value >>= 7;
        }
        buf.put_u8(value as u8);
        buf.to_vec()
    }

    /// Decode a canonical ULEB128 prefix that fits in u32.
    ///
    /// Returns the value and the number of bytes consumed.
    pub fn decode_uleb128(data: &[u8]) -> Result<(u32, usize), BcsError> {
        let mut value: u64 = 0;
        for (i, shift) in (0..32).step_by(7).enumerate() {
            let byte = *data.get(i).ok_or(BcsError::Eof)?;
            let digit = u64::from(byte & 0x7f);
            value |= digit << shift;
            if byte & 0x80 == 0 {
                if shift > 0 && digit == 0 {
                    return Err(BcsError::NonCanonicalUleb128Encoding);
                }
                let value = u32::try_from(value)
                    .map_err(|_| BcsError::IntegerOverflowDuringUleb128Decoding)?;
                return Ok((value, i + 1));
            }
        }
        Err(BcsError::IntegerOverflowDuringUleb128Decoding)
    }

    /// Wrap bytes as a BCS `vector<u8>`
    pub fn length_prefixed(bytes: &[u8]) -> Vec<u8> {
        let prefix = encode_uleb128(bytes.len() as u64);
        let mut buf = BytesMut::with_capacity(prefix.len() + bytes.len());
        buf.put_slice(&prefix);
        buf.put_slice(bytes);
        buf.to_vec()
    }
}
