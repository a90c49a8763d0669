//! SDK error types

use std::time::Duration;

use sui_crypto::{CryptoError, SignatureScheme};
use sui_primitives::{ObjectID, TransactionDigest};
use thiserror::Error;

/// SDK error type
#[derive(Debug, Error)]
pub enum SdkError {
    /// Transport/network error
    #[error("Transport error: {0}")]
    Transport(String),

    /// RPC error from node
    #[error("RPC error: {code} - {message}")]
    Rpc {
        /// Error code
        code: i64,
        /// Error message
        message: String,
    },

    /// Invalid address format
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Invalid hex string
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    /// Invalid base64 string
    #[error("Invalid base64: {0}")]
    InvalidBase64(String),

    /// Invalid private key
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    /// Signing failed
    #[error("Signing failed: {0}")]
    SigningFailed(String),

    /// Scheme is reserved but not implemented
    #[error("Unsupported signature scheme: {0}")]
    UnsupportedScheme(SignatureScheme),

    /// Missing required field
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Argument failed validation
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Object input without version and digest at build time
    #[error("Input {index} references object {object_id} without a version and digest")]
    UnresolvedObject {
        /// Input index
        index: u16,
        /// Object id
        object_id: ObjectID,
    },

    /// Gas payment list is empty
    #[error("Gas payment must contain at least one coin")]
    EmptyGasPayment,

    /// Transaction has no commands (strict mode only)
    #[error("Transaction has no commands")]
    EmptyTransaction,

    /// Two different references for one object
    #[error("Conflicting references for object {0}")]
    ConflictingObject(ObjectID),

    /// Object does not exist on chain
    #[error("Object not found: {0}")]
    ObjectNotFound(ObjectID),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Transaction was not confirmed before the deadline
    #[error("Transaction {digest} not confirmed within {waited:?}")]
    Timeout {
        /// Transaction digest
        digest: TransactionDigest,
        /// How long we waited
        waited: Duration,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<hex::FromHexError> for SdkError {
    fn from(e: hex::FromHexError) -> Self {
        SdkError::InvalidHex(e.to_string())
    }
}

impl From<base64::DecodeError> for SdkError {
    fn from(e: base64::DecodeError) -> Self {
        SdkError::InvalidBase64(e.to_string())
    }
}

impl From<serde_json::Error> for SdkError {
    fn from(e: serde_json::Error) -> Self {
        SdkError::Serialization(e.to_string())
    }
}

impl From<sui_bcs::BcsError> for SdkError {
    fn from(e: sui_bcs::BcsError) -> Self {
        SdkError::Serialization(e.to_string())
    }
}

impl From<CryptoError> for SdkError {
    fn from(e: CryptoError) -> Self {
        match e {
            CryptoError::UnsupportedScheme(scheme) => SdkError::UnsupportedScheme(scheme),
            CryptoError::InvalidPrivateKey(msg) => SdkError::InvalidPrivateKey(msg),
            other => {
                let private_key_length = matches!(
                    other,
                    CryptoError::InvalidLength { what, .. } if what.contains("private key")
                );
                if private_key_length {
                    SdkError::InvalidPrivateKey(other.to_string())
                } else {
                    SdkError::InvalidArgument(other.to_string())
                }
            }
        }
    }
}

impl From<sui_primitives::PrimitiveError> for SdkError {
    fn from(e: sui_primitives::PrimitiveError) -> Self {
        SdkError::InvalidAddress(e.to_string())
    }
}

impl From<sui_primitives::AddressError> for SdkError {
    fn from(e: sui_primitives::AddressError) -> Self {
        SdkError::InvalidAddress(e.to_string())
    }
}

impl From<sui_types::TypesError> for SdkError {
    fn from(e: sui_types::TypesError) -> Self {
        SdkError::InvalidArgument(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crypto_error_mapping() {
        assert!(matches!(
            SdkError::from(CryptoError::UnsupportedScheme(SignatureScheme::Secp256r1)),
            SdkError::UnsupportedScheme(SignatureScheme::Secp256r1)
        ));
        assert!(matches!(
            SdkError::from(CryptoError::InvalidLength {
                what: "ed25519 private key",
                expected: 32,
                got: 2
            }),
            SdkError::InvalidPrivateKey(_)
        ));
        assert!(matches!(
            SdkError::from(CryptoError::InvalidSignature("bad".into())),
            SdkError::InvalidArgument(_)
        ));
    }

    #[test]
    fn test_unresolved_object_message_names_input() {
        let err = SdkError::UnresolvedObject {
            index: 3,
            object_id: ObjectID::from_hex("0x5").unwrap(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Input 3"));
        assert!(msg.contains("0x0000000000000000000000000000000000000000000000000000000000000005"));
    }
}
