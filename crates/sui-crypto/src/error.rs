//! Cryptographic errors

use thiserror::Error;

use crate::SignatureScheme;

/// Cryptographic operation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Invalid private key
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    /// Invalid public key
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    /// Invalid signature
    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    /// Wrong input length
    #[error("invalid {what} length: expected {expected} bytes, got {got}")]
    InvalidLength {
        /// What was being parsed
        what: &'static str,
        /// Expected length
        expected: usize,
        /// Actual length
        got: usize,
    },

    /// Scheme is known but has no implementation
    #[error("unsupported signature scheme: {0}")]
    UnsupportedScheme(SignatureScheme),

    /// Flag byte does not name a scheme
    #[error("unknown signature scheme flag: 0x{0:02x}")]
    UnknownSchemeFlag(u8),

    /// Key and signature belong to different schemes
    #[error("scheme mismatch: expected {expected}, got {got}")]
    SchemeMismatch {
        /// Scheme of the key
        expected: SignatureScheme,
        /// Scheme of the other operand
        got: SignatureScheme,
    },

    /// Malformed hex or base64 text
    #[error("invalid encoding: {0}")]
    InvalidEncoding(String),

    /// Unknown intent scope byte
    #[error("unknown intent scope: {0}")]
    UnknownIntentScope(u8),
}

impl From<hex::FromHexError> for CryptoError {
    fn from(e: hex::FromHexError) -> Self {
        CryptoError::InvalidEncoding(e.to_string())
    }
}

impl From<base64::DecodeError> for CryptoError {
    fn from(e: base64::DecodeError) -> Self {
        CryptoError::InvalidEncoding(e.to_string())
    }
}
