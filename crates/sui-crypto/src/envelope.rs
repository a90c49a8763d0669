//! Serialized signature envelope
//!
//! `flag || signature (64) || public_key (32)`, carried as base64 when sent
//! to a full node. For secp256k1 the key field is the x-coordinate.

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use sui_primitives::SuiAddress;

use crate::keys::SIGNATURE_LENGTH;
use crate::secp256k1::Secp256k1PublicKey;
use crate::{
    derive_address_from_bytes, CryptoError, PublicKey, Signature, SignatureScheme,
};

/// Envelope of a signature with its scheme flag and public key
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SerializedSignature {
    signature: Signature,
    public_key: [u8; 32],
}

impl SerializedSignature {
    /// Total envelope length
    pub const LEN: usize = 1 + SIGNATURE_LENGTH + 32;

    /// Pack a signature with the key that made it
    pub fn new(signature: Signature, public_key: &PublicKey) -> Result<Self, CryptoError> {
        if signature.scheme() != public_key.scheme() {
            return Err(CryptoError::SchemeMismatch {
                expected: public_key.scheme(),
                got: signature.scheme(),
            });
        }
        Ok(SerializedSignature {
            signature,
            public_key: public_key.to_sui_bytes(),
        })
    }

    /// Scheme from the flag byte
    pub fn scheme(&self) -> SignatureScheme {
        self.signature.scheme()
    }

    /// Inner signature
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// 32-byte public key field
    pub fn public_key_bytes(&self) -> &[u8; 32] {
        &self.public_key
    }

    /// Address of the signer
    pub fn signer(&self) -> Result<SuiAddress, CryptoError> {
        derive_address_from_bytes(self.scheme(), &self.public_key)
    }

    /// Encode as `flag || sig || pk`
    pub fn to_bytes(&self) -> [u8; Self::LEN] {
        let mut out = [0u8; Self::LEN];
        out[0] = self.scheme().flag();
        out[1..1 + SIGNATURE_LENGTH].copy_from_slice(self.signature.as_bytes());
        out[1 + SIGNATURE_LENGTH..].copy_from_slice(&self.public_key);
        out
    }

    /// Decode `flag || sig || pk`
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != Self::LEN {
            return Err(CryptoError::InvalidLength {
                what: "serialized signature",
                expected: Self::LEN,
                got: bytes.len(),
            });
        }
        let scheme = SignatureScheme::from_flag(bytes[0])?;
        let signature = Signature::from_bytes(scheme, &bytes[1..1 + SIGNATURE_LENGTH])?;
        let mut public_key = [0u8; 32];
        public_key.copy_from_slice(&bytes[1 + SIGNATURE_LENGTH..]);
        Ok(SerializedSignature {
            signature,
            public_key,
        })
    }

    /// Base64 text form
    pub fn to_base64(&self) -> String {
        BASE64.encode(self.to_bytes())
    }

    /// Parse the base64 text form
    pub fn from_base64(s: &str) -> Result<Self, CryptoError> {
        Self::from_bytes(&BASE64.decode(s.trim())?)
    }

    /// Verify the envelope over `message`.
    ///
    /// The secp256k1 key field drops the y parity, so both candidate points
    /// are tried.
    pub fn verify(&self, message: &[u8]) -> bool {
        match self.scheme() {
            SignatureScheme::Ed25519 => PublicKey::from_bytes(SignatureScheme::Ed25519, &self.public_key)
                .map(|pk| pk.verify(message, &self.signature))
                .unwrap_or(false),
            SignatureScheme::Secp256k1 => Secp256k1PublicKey::candidates_from_x(&self.public_key)
                .map(|keys| {
                    keys.into_iter().any(|key| {
                        PublicKey::Secp256k1(key).verify(message, &self.signature)
                    })
                })
                .unwrap_or(false),
            SignatureScheme::Secp256r1 => false,
        }
    }
}

impl fmt::Debug for SerializedSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SerializedSignature({})", self.to_base64())
    }
}

impl fmt::Display for SerializedSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base64())
    }
}

impl FromStr for SerializedSignature {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_base64(s)
    }
}
