//! Sui account address / object identifier (32 bytes)

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Address parsing error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// Invalid hex string
    #[error("invalid hex string: {0}")]
    InvalidHex(String),
    /// Invalid byte length
    #[error("invalid address length: expected 32 bytes, got {0}")]
    InvalidLength(usize),
    /// Hex body longer than 64 digits
    #[error("address hex too long: {0} digits, at most 64 allowed")]
    TooLong(usize),
    /// Nothing after the prefix
    #[error("empty address")]
    Empty,
}

/// 32-byte Sui address
///
/// Account addresses and object ids share this representation. The
/// canonical text form is `0x` followed by 64 lowercase hex digits.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct SuiAddress([u8; 32]);

/// Object identifiers are addresses
pub type ObjectID = SuiAddress;

impl SuiAddress {
    /// Size of address in bytes
    pub const LEN: usize = 32;

    /// Zero address (0x0000...0000)
    pub const ZERO: SuiAddress = SuiAddress([0u8; 32]);

    /// Create address from bytes
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        SuiAddress(bytes)
    }

    /// Create address from slice
    pub fn from_slice(slice: &[u8]) -> Result<Self, AddressError> {
        let bytes: [u8; 32] = slice
            .try_into()
            .map_err(|_| AddressError::InvalidLength(slice.len()))?;
        Ok(SuiAddress(bytes))
    }

    /// Parse address from hex, with or without `0x` prefix.
    ///
    /// Short forms such as `0x2` are left-padded with zeros.
    pub fn from_hex(s: &str) -> Result<Self, AddressError> {
        let body = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        if body.is_empty() {
            return Err(AddressError::Empty);
        }
        if body.len() > Self::LEN * 2 {
            return Err(AddressError::TooLong(body.len()));
        }
        let padded = format!("{:0>64}", body);
        let bytes = hex::decode(padded).map_err(|e| AddressError::InvalidHex(e.to_string()))?;
        Self::from_slice(&bytes)
    }

    /// Get as byte array
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Consume into the inner array
    pub fn into_bytes(self) -> [u8; 32] {
        self.0
    }

    /// Check if this is the zero address
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Canonical hex string: `0x` + 64 lowercase digits
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Hex string with leading zero bytes stripped (`0x2` for the framework)
    pub fn to_short_hex(&self) -> String {
        let full = hex::encode(self.0);
        let trimmed = full.trim_start_matches('0');
        if trimmed.is_empty() {
            "0x0".to_string()
        } else {
            format!("0x{}", trimmed)
        }
    }
}

impl fmt::Debug for SuiAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SuiAddress({})", self.to_hex())
    }
}

impl fmt::Display for SuiAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for SuiAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<[u8; 32]> for SuiAddress {
    fn from(bytes: [u8; 32]) -> Self {
        SuiAddress(bytes)
    }
}

impl AsRef<[u8]> for SuiAddress {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

// Text form in human-readable formats, 32 raw bytes with no length in BCS.
#[cfg(feature = "serde")]
mod serde_impl {
    use super::SuiAddress;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for SuiAddress {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.serialize_str(&self.to_hex())
            } else {
                self.0.serialize(serializer)
            }
        }
    }

    impl<'de> Deserialize<'de> for SuiAddress {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            if deserializer.is_human_readable() {
                let s = String::deserialize(deserializer)?;
                SuiAddress::from_hex(&s).map_err(de::Error::custom)
            } else {
                <[u8; 32]>::deserialize(deserializer).map(SuiAddress)
            }
        }
    }
}
