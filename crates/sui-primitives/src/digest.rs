//! 32-byte digests with base58 text form

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Digest parsing error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DigestError {
    /// Invalid base58 string
    #[error("invalid base58 string: {0}")]
    InvalidBase58(String),
    /// Invalid length
    #[error("invalid digest length: expected {expected} bytes, got {got}")]
    InvalidLength {
        /// Expected length
        expected: usize,
        /// Actual length
        got: usize,
    },
}

macro_rules! digest_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
        pub struct $name([u8; 32]);

        impl $name {
            /// Size in bytes
            pub const LEN: usize = 32;

            /// Create from bytes
            pub const fn from_bytes(bytes: [u8; 32]) -> Self {
                $name(bytes)
            }

            /// Create from slice
            pub fn from_slice(slice: &[u8]) -> Result<Self, DigestError> {
                let bytes: [u8; 32] = slice.try_into().map_err(|_| DigestError::InvalidLength {
                    expected: 32,
                    got: slice.len(),
                })?;
                Ok($name(bytes))
            }

            /// Parse from base58
            pub fn from_base58(s: &str) -> Result<Self, DigestError> {
                let bytes = bs58::decode(s)
                    .into_vec()
                    .map_err(|e| DigestError::InvalidBase58(e.to_string()))?;
                Self::from_slice(&bytes)
            }

            /// Encode as base58
            pub fn to_base58(&self) -> String {
                bs58::encode(self.0).into_string()
            }

            /// Get as bytes
            pub fn as_bytes(&self) -> &[u8; 32] {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.to_base58())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.to_base58())
            }
        }

        impl FromStr for $name {
            type Err = DigestError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_base58(s)
            }
        }

        impl From<[u8; 32]> for $name {
            fn from(bytes: [u8; 32]) -> Self {
                $name(bytes)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        // Base58 in human-readable formats, BCS `vector<u8>` otherwise.
        #[cfg(feature = "serde")]
        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                if serializer.is_human_readable() {
                    serializer.serialize_str(&self.to_base58())
                } else {
                    serializer.serialize_bytes(&self.0)
                }
            }
        }

        #[cfg(feature = "serde")]
        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                if deserializer.is_human_readable() {
                    let s = <String as serde::Deserialize>::deserialize(deserializer)?;
                    $name::from_base58(&s).map_err(serde::de::Error::custom)
                } else {
                    let bytes = <Vec<u8> as serde::Deserialize>::deserialize(deserializer)?;
                    $name::from_slice(&bytes).map_err(serde::de::Error::custom)
                }
            }
        }
    };
}

digest_type!(
    /// Digest of an object's contents at a given version
    ObjectDigest
);

digest_type!(
    /// Digest identifying a transaction
    TransactionDigest
);
