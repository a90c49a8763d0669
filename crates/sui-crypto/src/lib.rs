//! # sui-crypto
//!
//! Cryptographic primitives for the Sui SDK.
//!
//! - BLAKE2b-256 hashing
//! - Ed25519 and secp256k1 keys behind scheme-tagged enums
//! - Intent wrapping and signing digests
//! - Address derivation
//! - The `flag || signature || public_key` signature envelope

#![warn(missing_docs)]
#![warn(clippy::all)]

mod address;
pub mod ed25519;
mod envelope;
mod error;
mod hash;
pub mod intent;
mod keys;
mod scheme;
pub mod secp256k1;

pub use address::{derive_address, derive_address_from_bytes};
pub use envelope::SerializedSignature;
pub use error::CryptoError;
pub use hash::{blake2b256, blake2b256_concat, Blake2b256};
pub use intent::{
    hash_intent_message, message_with_intent, personal_message_with_intent, signing_digest,
    Intent, IntentScope,
};
pub use keys::{PrivateKey, PublicKey, Signature, SIGNATURE_LENGTH};
pub use scheme::SignatureScheme;
