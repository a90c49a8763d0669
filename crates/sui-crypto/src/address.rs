//! Address derivation
//!
//! Ed25519: `address = BLAKE2b-256(flag || public_key_32)`, which is what the
//! Sui CLI reports. Secp256k1: `address = BLAKE2b-256(x_coordinate || flag)`.

use sui_primitives::SuiAddress;

use crate::{blake2b256_concat, CryptoError, PublicKey, SignatureScheme};

/// Derive the address owned by `public_key`
pub fn derive_address(public_key: &PublicKey) -> SuiAddress {
    address_from_parts(public_key.scheme(), &public_key.to_sui_bytes())
}

/// Derive an address from a scheme and a 32-byte wire public key
pub fn derive_address_from_bytes(
    scheme: SignatureScheme,
    public_key: &[u8],
) -> Result<SuiAddress, CryptoError> {
    let scheme = scheme.ensure_supported()?;
    let key: [u8; 32] = public_key
        .try_into()
        .map_err(|_| CryptoError::InvalidLength {
            what: "public key",
            expected: 32,
            got: public_key.len(),
        })?;
    Ok(address_from_parts(scheme, &key))
}

fn address_from_parts(scheme: SignatureScheme, key: &[u8; 32]) -> SuiAddress {
    let flag = [scheme.flag()];
    let digest = match scheme {
        SignatureScheme::Ed25519 => blake2b256_concat(&[&flag, key.as_slice()]),
        // ensure_supported() keeps Secp256r1 out of here
        SignatureScheme::Secp256k1 | SignatureScheme::Secp256r1 => {
            blake2b256_concat(&[key.as_slice(), &flag])
        }
    };
    SuiAddress::from_bytes(digest)
}
