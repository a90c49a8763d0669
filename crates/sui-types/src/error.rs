//! Type-level errors

use sui_bcs::BcsError;
use sui_primitives::PrimitiveError;
use thiserror::Error;

/// Error building or decoding transaction types
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TypesError {
    /// Malformed type tag string
    #[error("invalid type tag '{input}': {reason}")]
    InvalidTypeTag {
        /// Offending input
        input: String,
        /// What was wrong
        reason: String,
    },

    /// Not a Move identifier
    #[error("invalid identifier: '{0}'")]
    InvalidIdentifier(String),

    /// Move call target is not `package::module::function`
    #[error("invalid move call target '{0}': expected package::module::function")]
    InvalidMoveTarget(String),

    /// BCS failure
    #[error("bcs error: {0}")]
    Bcs(#[from] BcsError),

    /// Address or digest failure
    #[error(transparent)]
    Primitive(#[from] PrimitiveError),
}

impl From<sui_primitives::AddressError> for TypesError {
    fn from(e: sui_primitives::AddressError) -> Self {
        TypesError::Primitive(e.into())
    }
}
