//! BLAKE2b-256 hashing

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};

/// BLAKE2b with a 32-byte output
pub type Blake2b256 = Blake2b<U32>;

/// Compute BLAKE2b-256 hash of data
pub fn blake2b256(data: &[u8]) -> [u8; 32] {
    Blake2b256::digest(data).into()
}

/// Hash several byte strings as if concatenated
pub fn blake2b256_concat(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blake2b256_empty() {
        assert_eq!(
            hex::encode(blake2b256(b"")),
            "0e5751c026e543b2e8ab2eb06099daa1d1e5df47778f7787faab45cdf12fe3a8"
        );
    }

    #[test]
    fn test_blake2b256_abc() {
        assert_eq!(
            hex::encode(blake2b256(b"abc")),
            "bddd813c634239723171ef3fee98579b94964e3bb1cb3e427262c8c068d52319"
        );
    }

    #[test]
    fn test_blake2b256_concat_matches_single_call() {
        assert_eq!(blake2b256_concat(&[b"a", b"", b"bc"]), blake2b256(b"abc"));
    }

    #[test]
    fn test_blake2b256_deterministic() {
        let data = [0xab; 137];
        assert_eq!(blake2b256(&data), blake2b256(&data));
        assert_ne!(blake2b256(&data), blake2b256(&data[1..]));
    }
}
