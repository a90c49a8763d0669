//! ECDSA over secp256k1
//!
//! Signatures are RFC 6979 deterministic over SHA-256 of the message,
//! normalized to low-s and carried as 64-byte `r || s`.

use std::cmp::Ordering;
use std::fmt;

use k256::ecdsa::signature::{DigestSigner, DigestVerifier};
use k256::ecdsa::{Signature as K256Signature, SigningKey, VerifyingKey};
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::CryptoError;

/// Half of the secp256k1 curve order (n/2)
/// n/2 = 0x7FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF5D576E7357A4501DDFE92F46681B20A0
const SECP256K1_N_DIV_2: [u8; 32] = [
    0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D,
    0xDF, 0xE9, 0x2F, 0x46, 0x68, 0x1B, 0x20, 0xA0,
];

/// Full secp256k1 curve order (n)
/// n = 0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141
const SECP256K1_N: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
    0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B,
    0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36, 0x41, 0x41,
];

/// Private key length
pub const SECP256K1_PRIVATE_KEY_LENGTH: usize = 32;
/// Compressed SEC1 public key length
pub const SECP256K1_COMPRESSED_KEY_LENGTH: usize = 33;
/// Signature length (`r || s`)
pub const SECP256K1_SIGNATURE_LENGTH: usize = 64;

/// Compare two 32-byte arrays as big-endian integers
fn compare_bytes(a: &[u8; 32], b: &[u8; 32]) -> Ordering {
    for i in 0..32 {
        match a[i].cmp(&b[i]) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

/// True if the `s` half of `r || s` is at most n/2
pub fn is_low_s(signature: &[u8; SECP256K1_SIGNATURE_LENGTH]) -> bool {
    let mut s = [0u8; 32];
    s.copy_from_slice(&signature[32..]);
    compare_bytes(&s, &SECP256K1_N_DIV_2) != Ordering::Greater
}

/// secp256k1 signing key
pub struct Secp256k1PrivateKey(SigningKey);

impl Secp256k1PrivateKey {
    /// Generate a key from the OS random source
    pub fn generate() -> Self {
        Secp256k1PrivateKey(SigningKey::random(&mut OsRng))
    }

    /// Create from a 32-byte big-endian scalar in `[1, n-1]`
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != SECP256K1_PRIVATE_KEY_LENGTH {
            return Err(CryptoError::InvalidLength {
                what: "secp256k1 private key",
                expected: SECP256K1_PRIVATE_KEY_LENGTH,
                got: bytes.len(),
            });
        }
        let mut scalar = Zeroizing::new([0u8; 32]);
        scalar.copy_from_slice(bytes);

        if scalar.iter().all(|b| *b == 0) || compare_bytes(&scalar, &SECP256K1_N) != Ordering::Less
        {
            return Err(CryptoError::InvalidPrivateKey(
                "scalar out of range [1, n-1]".to_string(),
            ));
        }

        SigningKey::from_slice(scalar.as_slice())
            .map(Secp256k1PrivateKey)
            .map_err(|e| CryptoError::InvalidPrivateKey(e.to_string()))
    }

    /// The 32-byte scalar
    pub fn to_bytes(&self) -> Zeroizing<[u8; SECP256K1_PRIVATE_KEY_LENGTH]> {
        let mut out = Zeroizing::new([0u8; SECP256K1_PRIVATE_KEY_LENGTH]);
        out.copy_from_slice(&self.0.to_bytes());
        out
    }

    /// Matching public key
    pub fn public_key(&self) -> Secp256k1PublicKey {
        Secp256k1PublicKey(*self.0.verifying_key())
    }

    /// Sign SHA-256(`message`), returning a low-s `r || s`
    pub fn sign(&self, message: &[u8]) -> [u8; SECP256K1_SIGNATURE_LENGTH] {
        let signature: K256Signature = self.0.sign_digest(Sha256::new_with_prefix(message));
        let signature = signature.normalize_s().unwrap_or(signature);
        let mut out = [0u8; SECP256K1_SIGNATURE_LENGTH];
        out.copy_from_slice(&signature.to_bytes());
        out
    }
}

impl fmt::Debug for Secp256k1PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secp256k1PrivateKey(..)")
    }
}

/// secp256k1 verifying key, kept in compressed form
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Secp256k1PublicKey(VerifyingKey);

impl Secp256k1PublicKey {
    /// Parse a SEC1 key (33-byte compressed or 65-byte uncompressed)
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        VerifyingKey::from_sec1_bytes(bytes)
            .map(Secp256k1PublicKey)
            .map_err(|e| CryptoError::InvalidPublicKey(e.to_string()))
    }

    /// Rebuild a key from its 32-byte x-coordinate.
    ///
    /// Both parities share the x-coordinate; the even-y point (prefix 0x02)
    /// is tried first, then the odd one.
    pub fn from_x_coordinate(x: &[u8]) -> Result<Self, CryptoError> {
        Self::candidates_from_x(x)?
            .into_iter()
            .next()
            .ok_or_else(|| CryptoError::InvalidPublicKey("x is not on the curve".to_string()))
    }

    /// Every valid key with x-coordinate `x`, even parity first
    pub fn candidates_from_x(x: &[u8]) -> Result<Vec<Self>, CryptoError> {
        if x.len() != 32 {
            return Err(CryptoError::InvalidLength {
                what: "secp256k1 x-coordinate",
                expected: 32,
                got: x.len(),
            });
        }
        let mut sec1 = [0u8; SECP256K1_COMPRESSED_KEY_LENGTH];
        sec1[1..].copy_from_slice(x);
        let mut keys = Vec::with_capacity(2);
        for prefix in [0x02, 0x03] {
            sec1[0] = prefix;
            if let Ok(key) = Self::from_sec1_bytes(&sec1) {
                keys.push(key);
            }
        }
        Ok(keys)
    }

    /// 33-byte compressed SEC1 encoding
    pub fn to_compressed(&self) -> [u8; SECP256K1_COMPRESSED_KEY_LENGTH] {
        let point = self.0.to_encoded_point(true);
        let mut out = [0u8; SECP256K1_COMPRESSED_KEY_LENGTH];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// The x-coordinate, used as the 32-byte wire form
    pub fn x_coordinate(&self) -> [u8; 32] {
        let mut x = [0u8; 32];
        x.copy_from_slice(&self.to_compressed()[1..]);
        x
    }

    /// Verify `r || s` over SHA-256(`message`).
    ///
    /// High-s and malformed signatures are rejected.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        let Ok(bytes) = <&[u8; SECP256K1_SIGNATURE_LENGTH]>::try_from(signature) else {
            return false;
        };
        if !is_low_s(bytes) {
            return false;
        }
        let Ok(signature) = K256Signature::from_slice(bytes) else {
            return false;
        };
        self.0
            .verify_digest(Sha256::new_with_prefix(message), &signature)
            .is_ok()
    }
}

impl std::hash::Hash for Secp256k1PublicKey {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.to_compressed().hash(state);
    }
}

impl fmt::Debug for Secp256k1PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secp256k1PublicKey({})", hex::encode(self.to_compressed()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: [u8; 32] = [0x11; 32];

    // ==================== Key validation ====================

    #[test]
    fn test_public_key_from_known_scalar() {
        let key = Secp256k1PrivateKey::from_bytes(&KEY).unwrap();
        assert_eq!(
            hex::encode(key.public_key().to_compressed()),
            "034f355bdcb7cc0af728ef3cceb9615d90684bb5b2ca5f859ab0f0b704075871aa"
        );
    }

    #[test]
    fn test_scalar_one_is_generator() {
        let mut one = [0u8; 32];
        one[31] = 1;
        let key = Secp256k1PrivateKey::from_bytes(&one).unwrap();
        assert_eq!(
            hex::encode(key.public_key().to_compressed()),
            "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
        );
    }

    #[test]
    fn test_reject_zero_scalar() {
        assert!(matches!(
            Secp256k1PrivateKey::from_bytes(&[0u8; 32]),
            Err(CryptoError::InvalidPrivateKey(_))
        ));
    }

    #[test]
    fn test_reject_scalar_at_or_above_order() {
        assert!(Secp256k1PrivateKey::from_bytes(&SECP256K1_N).is_err());
        assert!(Secp256k1PrivateKey::from_bytes(&[0xFF; 32]).is_err());

        let mut n_minus_one = SECP256K1_N;
        n_minus_one[31] -= 1;
        assert!(Secp256k1PrivateKey::from_bytes(&n_minus_one).is_ok());
    }

    #[test]
    fn test_reject_wrong_length() {
        assert!(matches!(
            Secp256k1PrivateKey::from_bytes(&[1u8; 33]),
            Err(CryptoError::InvalidLength { got: 33, .. })
        ));
    }

    // ==================== Signing ====================

    #[test]
    fn test_sign_and_verify() {
        let key = Secp256k1PrivateKey::generate();
        let public = key.public_key();
        let sig = key.sign(b"test message");
        assert!(public.verify(b"test message", &sig));
        assert!(!public.verify(b"test messagf", &sig));
    }

    #[test]
    fn test_signing_is_deterministic() {
        let key = Secp256k1PrivateKey::from_bytes(&KEY).unwrap();
        assert_eq!(key.sign(b"hello"), key.sign(b"hello"));
        assert_ne!(key.sign(b"hello"), key.sign(b"hellp"));
    }

    #[test]
    fn test_low_s_enforcement() {
        for i in 0..10u8 {
            let key = Secp256k1PrivateKey::generate();
            let sig = key.sign(&[i; 8]);
            assert!(is_low_s(&sig), "All signatures must have low-s");
        }
    }

    #[test]
    fn test_reject_high_s_signature() {
        let key = Secp256k1PrivateKey::from_bytes(&KEY).unwrap();
        let public = key.public_key();
        let mut sig = key.sign(b"test");

        // s' = n - s is an equally valid signature, but high
        let mut borrow = 0u16;
        for i in (0..32).rev() {
            let diff = (SECP256K1_N[i] as u16)
                .wrapping_sub(sig[32 + i] as u16)
                .wrapping_sub(borrow);
            sig[32 + i] = diff as u8;
            borrow = if diff > 255 { 1 } else { 0 };
        }
        assert!(!is_low_s(&sig));
        assert!(!public.verify(b"test", &sig));
    }

    #[test]
    fn test_verify_malformed() {
        let key = Secp256k1PrivateKey::from_bytes(&KEY).unwrap();
        let public = key.public_key();
        assert!(!public.verify(b"test", &[0u8; 63]));
        assert!(!public.verify(b"test", &[0u8; 64]));
    }

    // ==================== Public key forms ====================

    #[test]
    fn test_from_x_coordinate_parities() {
        let key = Secp256k1PrivateKey::from_bytes(&KEY).unwrap().public_key();
        let x = key.x_coordinate();

        let candidates = Secp256k1PublicKey::candidates_from_x(&x).unwrap();
        assert_eq!(candidates.len(), 2);
        assert!(candidates.contains(&key));

        // Odd-y key: the even candidate is returned first
        let rebuilt = Secp256k1PublicKey::from_x_coordinate(&x).unwrap();
        assert_eq!(rebuilt.to_compressed()[0], 0x02);
        assert_eq!(rebuilt.x_coordinate(), x);
    }

    #[test]
    fn test_uncompressed_input_accepted() {
        let key = Secp256k1PrivateKey::from_bytes(&KEY).unwrap().public_key();
        let uncompressed = key.0.to_encoded_point(false);
        let parsed = Secp256k1PublicKey::from_sec1_bytes(uncompressed.as_bytes()).unwrap();
        assert_eq!(parsed, key);
    }

    #[test]
    fn test_private_key_roundtrip() {
        let key = Secp256k1PrivateKey::from_bytes(&KEY).unwrap();
        assert_eq!(*key.to_bytes(), KEY);
        assert_eq!(format!("{:?}", key), "Secp256k1PrivateKey(..)");
    }
}
