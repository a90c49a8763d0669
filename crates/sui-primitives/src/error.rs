//! Common error types for primitives

use thiserror::Error;
use crate::address::AddressError;
use crate::digest::DigestError;

/// Primitive operation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PrimitiveError {
    /// Address error
    #[error("address error: {0}")]
    Address(#[from] AddressError),

    /// Digest error
    #[error("digest error: {0}")]
    Digest(#[from] DigestError),
}
