//! Intent signing
//!
//! Every signed payload is prefixed with a 3-byte intent header
//! `[scope, version, app_id]` and the whole message is hashed with
//! BLAKE2b-256 before signing, so a signature for one purpose can never be
//! replayed as another.

use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::{blake2b256, CryptoError};

/// Intent version in use
pub const INTENT_VERSION_V0: u8 = 0;
/// Application id for Sui
pub const APP_ID_SUI: u8 = 0;

/// What a signed message is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum IntentScope {
    /// Transaction data
    TransactionData = 0,
    /// Transaction effects
    TransactionEffects = 1,
    /// Checkpoint summary
    CheckpointSummary = 2,
    /// Free-form personal message
    PersonalMessage = 3,
}

impl IntentScope {
    /// Parse a scope byte
    pub fn from_u8(value: u8) -> Result<Self, CryptoError> {
        match value {
            0 => Ok(IntentScope::TransactionData),
            1 => Ok(IntentScope::TransactionEffects),
            2 => Ok(IntentScope::CheckpointSummary),
            3 => Ok(IntentScope::PersonalMessage),
            other => Err(CryptoError::UnknownIntentScope(other)),
        }
    }
}

impl fmt::Display for IntentScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IntentScope::TransactionData => "TransactionData",
            IntentScope::TransactionEffects => "TransactionEffects",
            IntentScope::CheckpointSummary => "CheckpointSummary",
            IntentScope::PersonalMessage => "PersonalMessage",
        };
        f.write_str(name)
    }
}

/// Intent header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Intent {
    /// Scope
    pub scope: IntentScope,
    /// Version
    pub version: u8,
    /// Application id
    pub app_id: u8,
}

impl Intent {
    /// Header size in bytes
    pub const LEN: usize = 3;

    /// Version 0 Sui intent for `scope`
    pub const fn sui(scope: IntentScope) -> Self {
        Intent {
            scope,
            version: INTENT_VERSION_V0,
            app_id: APP_ID_SUI,
        }
    }

    /// Encode as `[scope, version, app_id]`
    pub fn to_bytes(&self) -> [u8; Self::LEN] {
        [self.scope as u8, self.version, self.app_id]
    }

    /// Parse the header at the front of `bytes`
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() < Self::LEN {
            return Err(CryptoError::InvalidLength {
                what: "intent",
                expected: Self::LEN,
                got: bytes.len(),
            });
        }
        Ok(Intent {
            scope: IntentScope::from_u8(bytes[0])?,
            version: bytes[1],
            app_id: bytes[2],
        })
    }
}

// Three bare bytes on the wire, no length prefix.
impl Serialize for Intent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_bytes().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Intent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bytes = <[u8; Intent::LEN]>::deserialize(deserializer)?;
        Intent::from_bytes(&bytes).map_err(de::Error::custom)
    }
}

/// Prefix `payload` with the intent header for `scope`
pub fn message_with_intent(scope: IntentScope, payload: &[u8]) -> Vec<u8> {
    let mut message = Vec::with_capacity(Intent::LEN + payload.len());
    message.extend_from_slice(&Intent::sui(scope).to_bytes());
    message.extend_from_slice(payload);
    message
}

/// Intent message for a personal message: the payload is BCS `vector<u8>`
pub fn personal_message_with_intent(message: &[u8]) -> Vec<u8> {
    message_with_intent(
        IntentScope::PersonalMessage,
        &sui_bcs::utils::length_prefixed(message),
    )
}

/// Split an intent message into its header and payload
pub fn split_intent_message(message: &[u8]) -> Result<(Intent, &[u8]), CryptoError> {
    let intent = Intent::from_bytes(message)?;
    Ok((intent, &message[Intent::LEN..]))
}

/// BLAKE2b-256 of an intent message; this is what gets signed
pub fn hash_intent_message(intent_message: &[u8]) -> [u8; 32] {
    blake2b256(intent_message)
}

/// Digest to sign for `payload` under `scope`
pub fn signing_digest(scope: IntentScope, payload: &[u8]) -> [u8; 32] {
    hash_intent_message(&message_with_intent(scope, payload))
}
