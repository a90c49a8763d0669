//! Signature scheme identifiers

use std::fmt;
use std::str::FromStr;

use crate::CryptoError;

/// Signature scheme, identified on the wire by a one-byte flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureScheme {
    /// Ed25519 (flag 0x00)
    Ed25519,
    /// ECDSA over secp256k1 (flag 0x01)
    Secp256k1,
    /// ECDSA over secp256r1 (flag 0x02). Reserved, not implemented.
    Secp256r1,
}

impl SignatureScheme {
    /// Schemes this crate can sign and verify with
    pub const SUPPORTED: [SignatureScheme; 2] =
        [SignatureScheme::Ed25519, SignatureScheme::Secp256k1];

    /// Wire flag byte
    pub const fn flag(self) -> u8 {
        match self {
            SignatureScheme::Ed25519 => 0x00,
            SignatureScheme::Secp256k1 => 0x01,
            SignatureScheme::Secp256r1 => 0x02,
        }
    }

    /// Look up a scheme by its flag byte
    pub fn from_flag(flag: u8) -> Result<Self, CryptoError> {
        match flag {
            0x00 => Ok(SignatureScheme::Ed25519),
            0x01 => Ok(SignatureScheme::Secp256k1),
            0x02 => Ok(SignatureScheme::Secp256r1),
            other => Err(CryptoError::UnknownSchemeFlag(other)),
        }
    }

    /// Lowercase name
    pub const fn name(self) -> &'static str {
        match self {
            SignatureScheme::Ed25519 => "ed25519",
            SignatureScheme::Secp256k1 => "secp256k1",
            SignatureScheme::Secp256r1 => "secp256r1",
        }
    }

    /// True if keys of this scheme can be created here
    pub const fn is_supported(self) -> bool {
        !matches!(self, SignatureScheme::Secp256r1)
    }

    /// Fail with `UnsupportedScheme` for reserved schemes
    pub fn ensure_supported(self) -> Result<Self, CryptoError> {
        if self.is_supported() {
            Ok(self)
        } else {
            Err(CryptoError::UnsupportedScheme(self))
        }
    }
}

impl fmt::Display for SignatureScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SignatureScheme {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ed25519" => Ok(SignatureScheme::Ed25519),
            "secp256k1" => Ok(SignatureScheme::Secp256k1),
            "secp256r1" => Ok(SignatureScheme::Secp256r1),
            other => Err(CryptoError::InvalidEncoding(format!(
                "unknown signature scheme name: {}",
                other
            ))),
        }
    }
}
