//! # sui-primitives
//!
//! Primitive types for the Sui client SDK.
//!
//! This crate provides the fixed-size identifiers every other crate speaks:
//! addresses and object ids, base58 digests and object references.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod address;
mod digest;
mod error;
mod object_ref;

pub use address::{AddressError, ObjectID, SuiAddress};
pub use digest::{DigestError, ObjectDigest, TransactionDigest};
pub use error::PrimitiveError;
pub use object_ref::ObjectRef;

// Re-export primitive-types for Move's u256
pub use primitive_types::U256;

/// Object version number
pub type SequenceNumber = u64;

/// Epoch number
pub type EpochId = u64;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u256_basic() {
        let a = U256::from(100u64);
        let b = U256::from(200u64);
        assert_eq!(a + b, U256::from(300u64));
    }
}
