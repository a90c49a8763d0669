//! Scheme-tagged keys and signatures

use std::fmt;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use sui_primitives::SuiAddress;
use zeroize::Zeroizing;

use crate::ed25519::{Ed25519PrivateKey, Ed25519PublicKey};
use crate::intent::{personal_message_with_intent, signing_digest, IntentScope};
use crate::secp256k1::{Secp256k1PrivateKey, Secp256k1PublicKey};
use crate::{derive_address, hash_intent_message, CryptoError, SignatureScheme};

/// Length of every supported signature
pub const SIGNATURE_LENGTH: usize = 64;

fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

// ==================== Private key ====================

/// Private key of a supported scheme
pub enum PrivateKey {
    /// Ed25519 seed
    Ed25519(Ed25519PrivateKey),
    /// secp256k1 scalar
    Secp256k1(Secp256k1PrivateKey),
}

impl PrivateKey {
    /// Generate a fresh key
    pub fn generate(scheme: SignatureScheme) -> Result<Self, CryptoError> {
        match scheme {
            SignatureScheme::Ed25519 => Ok(PrivateKey::Ed25519(Ed25519PrivateKey::generate())),
            SignatureScheme::Secp256k1 => {
                Ok(PrivateKey::Secp256k1(Secp256k1PrivateKey::generate()))
            }
            SignatureScheme::Secp256r1 => Err(CryptoError::UnsupportedScheme(scheme)),
        }
    }

    /// Create from 32 raw bytes
    pub fn from_bytes(scheme: SignatureScheme, bytes: &[u8]) -> Result<Self, CryptoError> {
        match scheme {
            SignatureScheme::Ed25519 => Ed25519PrivateKey::from_bytes(bytes).map(PrivateKey::Ed25519),
            SignatureScheme::Secp256k1 => {
                Secp256k1PrivateKey::from_bytes(bytes).map(PrivateKey::Secp256k1)
            }
            SignatureScheme::Secp256r1 => Err(CryptoError::UnsupportedScheme(scheme)),
        }
    }

    /// Create from hex, with or without a `0x` prefix
    pub fn from_hex(scheme: SignatureScheme, s: &str) -> Result<Self, CryptoError> {
        let bytes = Zeroizing::new(hex::decode(strip_hex_prefix(s.trim()))?);
        Self::from_bytes(scheme, &bytes)
    }

    /// Create from standard base64
    pub fn from_base64(scheme: SignatureScheme, s: &str) -> Result<Self, CryptoError> {
        let bytes = Zeroizing::new(BASE64.decode(s.trim())?);
        Self::from_bytes(scheme, &bytes)
    }

    /// Scheme of this key
    pub fn scheme(&self) -> SignatureScheme {
        match self {
            PrivateKey::Ed25519(_) => SignatureScheme::Ed25519,
            PrivateKey::Secp256k1(_) => SignatureScheme::Secp256k1,
        }
    }

    /// Matching public key
    pub fn public_key(&self) -> PublicKey {
        match self {
            PrivateKey::Ed25519(k) => PublicKey::Ed25519(k.public_key()),
            PrivateKey::Secp256k1(k) => PublicKey::Secp256k1(k.public_key()),
        }
    }

    /// Raw 32 bytes
    pub fn to_bytes(&self) -> Zeroizing<[u8; 32]> {
        match self {
            PrivateKey::Ed25519(k) => k.to_bytes(),
            PrivateKey::Secp256k1(k) => k.to_bytes(),
        }
    }

    /// Lowercase hex with `0x` prefix
    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(format!("0x{}", hex::encode(&*self.to_bytes())))
    }

    /// Standard base64
    pub fn to_base64(&self) -> Zeroizing<String> {
        Zeroizing::new(BASE64.encode(&*self.to_bytes()))
    }

    /// Sign raw bytes with the scheme's native rule
    pub fn sign(&self, message: &[u8]) -> Signature {
        match self {
            PrivateKey::Ed25519(k) => Signature::new(SignatureScheme::Ed25519, k.sign(message)),
            PrivateKey::Secp256k1(k) => Signature::new(SignatureScheme::Secp256k1, k.sign(message)),
        }
    }

    /// Sign the intent digest of `payload` under `scope`
    pub fn sign_with_intent(&self, scope: IntentScope, payload: &[u8]) -> Signature {
        self.sign(&signing_digest(scope, payload))
    }

    /// Sign a personal message
    pub fn sign_personal_message(&self, message: &[u8]) -> Signature {
        self.sign(&hash_intent_message(&personal_message_with_intent(message)))
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrivateKey({}, ..)", self.scheme())
    }
}

// ==================== Public key ====================

/// Public key of a supported scheme
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum PublicKey {
    /// Ed25519 point
    Ed25519(Ed25519PublicKey),
    /// secp256k1 point
    Secp256k1(Secp256k1PublicKey),
}

impl PublicKey {
    /// Parse a public key.
    ///
    /// Ed25519 takes 32 bytes. secp256k1 takes 33 or 65 SEC1 bytes, or a bare
    /// 32-byte x-coordinate (decoded to the even-y point).
    pub fn from_bytes(scheme: SignatureScheme, bytes: &[u8]) -> Result<Self, CryptoError> {
        match scheme {
            SignatureScheme::Ed25519 => Ed25519PublicKey::from_bytes(bytes).map(PublicKey::Ed25519),
            SignatureScheme::Secp256k1 if bytes.len() == 32 => {
                Secp256k1PublicKey::from_x_coordinate(bytes).map(PublicKey::Secp256k1)
            }
            SignatureScheme::Secp256k1 => {
                Secp256k1PublicKey::from_sec1_bytes(bytes).map(PublicKey::Secp256k1)
            }
            SignatureScheme::Secp256r1 => Err(CryptoError::UnsupportedScheme(scheme)),
        }
    }

    /// Parse from hex
    pub fn from_hex(scheme: SignatureScheme, s: &str) -> Result<Self, CryptoError> {
        Self::from_bytes(scheme, &hex::decode(strip_hex_prefix(s.trim()))?)
    }

    /// Scheme of this key
    pub fn scheme(&self) -> SignatureScheme {
        match self {
            PublicKey::Ed25519(_) => SignatureScheme::Ed25519,
            PublicKey::Secp256k1(_) => SignatureScheme::Secp256k1,
        }
    }

    /// Native encoding: 32 bytes for Ed25519, 33 compressed bytes for secp256k1
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            PublicKey::Ed25519(k) => k.as_bytes().to_vec(),
            PublicKey::Secp256k1(k) => k.to_compressed().to_vec(),
        }
    }

    /// 32-byte form used in addresses and signature envelopes
    pub fn to_sui_bytes(&self) -> [u8; 32] {
        match self {
            PublicKey::Ed25519(k) => *k.as_bytes(),
            PublicKey::Secp256k1(k) => k.x_coordinate(),
        }
    }

    /// `flag || native bytes`, the form `sui keytool` prints
    pub fn to_sui_public_key_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(34);
        out.push(self.scheme().flag());
        out.extend_from_slice(&self.to_bytes());
        out
    }

    /// Base64 of [`to_sui_public_key_bytes`](Self::to_sui_public_key_bytes)
    pub fn to_sui_public_key(&self) -> String {
        BASE64.encode(self.to_sui_public_key_bytes())
    }

    /// Parse the base64 `flag || native bytes` form. The flag picks the scheme.
    pub fn from_sui_public_key(s: &str) -> Result<Self, CryptoError> {
        let bytes = BASE64.decode(s.trim())?;
        let (&flag, key) = bytes.split_first().ok_or(CryptoError::InvalidLength {
            what: "sui public key",
            expected: 33,
            got: 0,
        })?;
        Self::from_bytes(SignatureScheme::from_flag(flag)?, key)
    }

    /// Native encoding as `0x` hex
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.to_bytes()))
    }

    /// Native encoding as base64
    pub fn to_base64(&self) -> String {
        BASE64.encode(self.to_bytes())
    }

    /// Address owned by this key
    pub fn address(&self) -> SuiAddress {
        derive_address(self)
    }

    /// Verify `signature` over raw `message`.
    ///
    /// Returns `false` on a scheme mismatch instead of erroring.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        if signature.scheme() != self.scheme() {
            return false;
        }
        match self {
            PublicKey::Ed25519(k) => k.verify(message, signature.as_bytes()),
            PublicKey::Secp256k1(k) => k.verify(message, signature.as_bytes()),
        }
    }

    /// Verify a signature made with [`PrivateKey::sign_with_intent`]
    pub fn verify_with_intent(
        &self,
        scope: IntentScope,
        payload: &[u8],
        signature: &Signature,
    ) -> bool {
        self.verify(&signing_digest(scope, payload), signature)
    }

    /// Verify a signature made with [`PrivateKey::sign_personal_message`]
    pub fn verify_personal_message(&self, message: &[u8], signature: &Signature) -> bool {
        self.verify(
            &hash_intent_message(&personal_message_with_intent(message)),
            signature,
        )
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({}, {})", self.scheme(), self.to_hex())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// ==================== Signature ====================

/// 64-byte signature tagged with its scheme
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature {
    scheme: SignatureScheme,
    bytes: [u8; SIGNATURE_LENGTH],
}

impl Signature {
    /// Wrap raw signature bytes
    pub const fn new(scheme: SignatureScheme, bytes: [u8; SIGNATURE_LENGTH]) -> Self {
        Signature { scheme, bytes }
    }

    /// Parse raw signature bytes
    pub fn from_bytes(scheme: SignatureScheme, bytes: &[u8]) -> Result<Self, CryptoError> {
        let scheme = scheme.ensure_supported()?;
        let bytes: [u8; SIGNATURE_LENGTH] =
            bytes.try_into().map_err(|_| CryptoError::InvalidLength {
                what: "signature",
                expected: SIGNATURE_LENGTH,
                got: bytes.len(),
            })?;
        Ok(Signature { scheme, bytes })
    }

    /// Scheme that produced this signature
    pub fn scheme(&self) -> SignatureScheme {
        self.scheme
    }

    /// Raw bytes
    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LENGTH] {
        &self.bytes
    }

    /// `0x` hex
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.bytes))
    }

    /// Base64
    pub fn to_base64(&self) -> String {
        BASE64.encode(self.bytes)
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({}, {})", self.scheme, self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SEED_HEX: &str = "0x1111111111111111111111111111111111111111111111111111111111111111";

    // ==================== Construction ====================

    #[test]
    fn test_generate_each_supported_scheme() {
        for scheme in SignatureScheme::SUPPORTED {
            let key = PrivateKey::generate(scheme).unwrap();
            assert_eq!(key.scheme(), scheme);
            assert_eq!(key.public_key().scheme(), scheme);
        }
        assert!(matches!(
            PrivateKey::generate(SignatureScheme::Secp256r1),
            Err(CryptoError::UnsupportedScheme(SignatureScheme::Secp256r1))
        ));
    }

    #[test]
    fn test_from_hex_and_base64_agree() {
        let from_hex = PrivateKey::from_hex(SignatureScheme::Ed25519, SEED_HEX).unwrap();
        let from_b64 =
            PrivateKey::from_base64(SignatureScheme::Ed25519, &from_hex.to_base64()).unwrap();
        assert_eq!(from_hex.public_key(), from_b64.public_key());
        assert_eq!(from_hex.to_hex().as_str(), SEED_HEX);
    }

    #[test]
    fn test_from_hex_rejects_garbage() {
        assert!(matches!(
            PrivateKey::from_hex(SignatureScheme::Ed25519, "0xzz"),
            Err(CryptoError::InvalidEncoding(_))
        ));
    }

    #[test]
    fn test_private_key_debug_hides_material() {
        let key = PrivateKey::from_hex(SignatureScheme::Secp256k1, SEED_HEX).unwrap();
        let debug = format!("{:?}", key);
        assert_eq!(debug, "PrivateKey(secp256k1, ..)");
    }

    // ==================== Public keys ====================

    #[test]
    fn test_public_key_encodings() {
        let ed = PrivateKey::from_hex(SignatureScheme::Ed25519, SEED_HEX)
            .unwrap()
            .public_key();
        assert_eq!(ed.to_bytes().len(), 32);
        assert_eq!(ed.to_sui_bytes().to_vec(), ed.to_bytes());

        let k1 = PrivateKey::from_hex(SignatureScheme::Secp256k1, SEED_HEX)
            .unwrap()
            .public_key();
        assert_eq!(k1.to_bytes().len(), 33);
        assert_eq!(k1.to_sui_bytes(), k1.to_bytes()[1..]);
        assert_eq!(
            PublicKey::from_bytes(SignatureScheme::Secp256k1, &k1.to_bytes()).unwrap(),
            k1
        );
        assert_eq!(PublicKey::from_hex(SignatureScheme::Secp256k1, &k1.to_hex()).unwrap(), k1);
    }

    #[test]
    fn test_sui_public_key_cli_vectors() {
        // (raw base64, flagged base64) pairs reported by `sui keytool`
        let vectors = [
            (
                "UdGRWooy48vGTs0HBokIis5NK+DUjiWc9ENUlcfCCBE=",
                "AFHRkVqKMuPLxk7NBwaJCIrOTSvg1I4lnPRDVJXHwggR",
                "0xd77a6cd55073e98d4029b1b0b8bd8d88f45f343dad2732fc9a7965094e635c55",
            ),
            (
                "0PTAfQmNiabgbak9U/stWZzKc5nsRqokda2qnV2DTfg=",
                "AND0wH0JjYmm4G2pPVP7LVmcynOZ7EaqJHWtqp1dg034",
                "0x7e8fd489c3d3cd9cc7cbcc577dc5d6de831e654edd9997d95c412d013e6eea23",
            ),
            (
                "6L/l0uhGt//9cf6nLQ0+24Uv2qanX/R6tn7lWUJX1Xk=",
                "AOi/5dLoRrf//XH+py0NPtuFL9qmp1/0erZ+5VlCV9V5",
                "0x3a1b4410ebe9c3386a429c349ba7929aafab739c277f97f32622b971972a14a2",
            ),
        ];
        for (raw, sui, address) in vectors {
            let key =
                PublicKey::from_bytes(SignatureScheme::Ed25519, &BASE64.decode(raw).unwrap())
                    .unwrap();
            assert_eq!(key.to_base64(), raw);
            assert_eq!(key.to_sui_public_key(), sui);
            assert_eq!(key.address().to_hex(), address);
            assert_eq!(PublicKey::from_sui_public_key(sui).unwrap(), key);
        }
    }

    #[test]
    fn test_sui_public_key_secp256k1() {
        let k1 = PrivateKey::from_hex(SignatureScheme::Secp256k1, SEED_HEX)
            .unwrap()
            .public_key();
        let bytes = k1.to_sui_public_key_bytes();
        assert_eq!(bytes.len(), 34);
        assert_eq!(bytes[0], 0x01);
        assert_eq!(PublicKey::from_sui_public_key(&k1.to_sui_public_key()).unwrap(), k1);
    }

    #[test]
    fn test_sui_public_key_rejects_bad_input() {
        assert!(matches!(
            PublicKey::from_sui_public_key(""),
            Err(CryptoError::InvalidLength { got: 0, .. })
        ));
        // unknown flag 0x09
        assert!(matches!(
            PublicKey::from_sui_public_key(&BASE64.encode([9u8; 33])),
            Err(CryptoError::UnknownSchemeFlag(9))
        ));
        // reserved secp256r1 flag
        assert!(matches!(
            PublicKey::from_sui_public_key(&BASE64.encode([2u8; 34])),
            Err(CryptoError::UnsupportedScheme(SignatureScheme::Secp256r1))
        ));
    }

    // ==================== Signing ====================

    #[test]
    fn test_sign_verify_both_schemes() {
        for scheme in SignatureScheme::SUPPORTED {
            let key = PrivateKey::generate(scheme).unwrap();
            let public = key.public_key();
            let sig = key.sign(b"payload");
            assert_eq!(sig.scheme(), scheme);
            assert!(public.verify(b"payload", &sig));
            assert!(!public.verify(b"payloae", &sig));
        }
    }

    #[test]
    fn test_verify_scheme_mismatch_is_false() {
        let ed = PrivateKey::generate(SignatureScheme::Ed25519).unwrap();
        let sig = ed.sign(b"x");
        let forged = Signature::new(SignatureScheme::Secp256k1, *sig.as_bytes());
        assert!(!ed.public_key().verify(b"x", &forged));
    }

    #[test]
    fn test_intent_signature_known_vector() {
        let key = PrivateKey::from_hex(SignatureScheme::Ed25519, SEED_HEX).unwrap();
        let sig = key.sign_personal_message(b"hello");
        assert_eq!(
            hex::encode(sig.as_bytes()),
            "ed47e703df4bdf9e1c6d8fcc094342e02cff5b289d4e3ee817eb2a74d4d30b2a\
             c4f121845e01268849713bda49ccc4c20e8a0e5453c04069a470aba9db6f2e09"
        );
        assert!(key.public_key().verify_personal_message(b"hello", &sig));
    }

    #[test]
    fn test_intent_scope_binds_signature() {
        let key = PrivateKey::generate(SignatureScheme::Secp256k1).unwrap();
        let sig = key.sign_with_intent(IntentScope::TransactionData, b"tx");
        let public = key.public_key();
        assert!(public.verify_with_intent(IntentScope::TransactionData, b"tx", &sig));
        assert!(!public.verify_with_intent(IntentScope::PersonalMessage, b"tx", &sig));
    }

    #[test]
    fn test_signature_from_bytes() {
        assert!(Signature::from_bytes(SignatureScheme::Ed25519, &[0u8; 64]).is_ok());
        assert!(matches!(
            Signature::from_bytes(SignatureScheme::Ed25519, &[0u8; 65]),
            Err(CryptoError::InvalidLength { expected: 64, got: 65, .. })
        ));
        assert!(Signature::from_bytes(SignatureScheme::Secp256r1, &[0u8; 64]).is_err());
    }

    // ==================== Properties ====================

    proptest! {
        #[test]
        fn prop_signatures_verify_only_their_message(
            message in proptest::collection::vec(any::<u8>(), 0..256),
            flip in any::<usize>(),
        ) {
            let key = PrivateKey::from_hex(SignatureScheme::Ed25519, SEED_HEX).unwrap();
            let sig = key.sign(&message);
            prop_assert!(key.public_key().verify(&message, &sig));

            if !message.is_empty() {
                let mut tampered = message.clone();
                tampered[flip % message.len()] ^= 0x01;
                prop_assert!(!key.public_key().verify(&tampered, &sig));
            }
        }
    }
}
