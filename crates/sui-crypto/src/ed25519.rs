//! Ed25519 keys

use std::fmt;
use std::hash::{Hash, Hasher};

use ed25519_dalek::{Signature as DalekSignature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;
use zeroize::Zeroizing;

use crate::CryptoError;

/// Ed25519 private key length
pub const ED25519_PRIVATE_KEY_LENGTH: usize = 32;
/// Ed25519 public key length
pub const ED25519_PUBLIC_KEY_LENGTH: usize = 32;
/// Ed25519 signature length
pub const ED25519_SIGNATURE_LENGTH: usize = 64;

/// Ed25519 signing key (32-byte seed)
pub struct Ed25519PrivateKey(SigningKey);

impl Ed25519PrivateKey {
    /// Generate a key from the OS random source
    pub fn generate() -> Self {
        Ed25519PrivateKey(SigningKey::generate(&mut OsRng))
    }

    /// Create from a 32-byte seed
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != ED25519_PRIVATE_KEY_LENGTH {
            return Err(CryptoError::InvalidLength {
                what: "ed25519 private key",
                expected: ED25519_PRIVATE_KEY_LENGTH,
                got: bytes.len(),
            });
        }
        let mut seed = Zeroizing::new([0u8; ED25519_PRIVATE_KEY_LENGTH]);
        seed.copy_from_slice(bytes);
        Ok(Ed25519PrivateKey(SigningKey::from_bytes(&seed)))
    }

    /// The 32-byte seed
    pub fn to_bytes(&self) -> Zeroizing<[u8; ED25519_PRIVATE_KEY_LENGTH]> {
        Zeroizing::new(self.0.to_bytes())
    }

    /// Matching public key
    pub fn public_key(&self) -> Ed25519PublicKey {
        Ed25519PublicKey(self.0.verifying_key())
    }

    /// Sign `message` as-is (no prehash)
    pub fn sign(&self, message: &[u8]) -> [u8; ED25519_SIGNATURE_LENGTH] {
        self.0.sign(message).to_bytes()
    }
}

impl fmt::Debug for Ed25519PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Ed25519PrivateKey(..)")
    }
}

/// Ed25519 verifying key
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Ed25519PublicKey(VerifyingKey);

impl Ed25519PublicKey {
    /// Parse a 32-byte compressed Edwards point
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let bytes: &[u8; ED25519_PUBLIC_KEY_LENGTH] =
            bytes.try_into().map_err(|_| CryptoError::InvalidLength {
                what: "ed25519 public key",
                expected: ED25519_PUBLIC_KEY_LENGTH,
                got: bytes.len(),
            })?;
        VerifyingKey::from_bytes(bytes)
            .map(Ed25519PublicKey)
            .map_err(|e| CryptoError::InvalidPublicKey(e.to_string()))
    }

    /// Raw 32 bytes
    pub fn as_bytes(&self) -> &[u8; ED25519_PUBLIC_KEY_LENGTH] {
        self.0.as_bytes()
    }

    /// Verify a 64-byte signature over `message`. Malformed input is `false`.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        let Ok(signature) = DalekSignature::from_slice(signature) else {
            return false;
        };
        self.0.verify(message, &signature).is_ok()
    }
}

impl Hash for Ed25519PublicKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}

impl fmt::Debug for Ed25519PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ed25519PublicKey({})", hex::encode(self.as_bytes()))
    }
}
