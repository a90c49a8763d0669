//! Object references

use crate::{ObjectDigest, ObjectID, PrimitiveError, SequenceNumber};

/// Fully resolved reference to an object at a specific version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectRef {
    /// Object id
    pub object_id: ObjectID,
    /// Object version
    pub version: SequenceNumber,
    /// Content digest at that version
    pub digest: ObjectDigest,
}

impl ObjectRef {
    /// Create a reference from its parts
    pub fn new(object_id: ObjectID, version: SequenceNumber, digest: ObjectDigest) -> Self {
        Self {
            object_id,
            version,
            digest,
        }
    }

    /// Parse a reference from its text forms (hex id, base58 digest)
    pub fn parse(object_id: &str, version: SequenceNumber, digest: &str) -> Result<Self, PrimitiveError> {
        Ok(Self {
            object_id: ObjectID::from_hex(object_id)?,
            version,
            digest: ObjectDigest::from_base58(digest)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_ref_parse() {
        let r = ObjectRef::parse(
            "0x5877400000000000000000000000000000000000000000000000000000000000",
            3619,
            "1thX6LZfHDZZGkq4tt1q2yRAPVfCTpX99XN4RHFsxM",
        )
        .unwrap();
        assert_eq!(r.version, 3619);
        assert_eq!(r.object_id.as_bytes()[0], 0x58);
        assert_eq!(r.digest.as_bytes()[31], 2);
    }

    #[test]
    fn test_object_ref_parse_bad_digest() {
        let result = ObjectRef::parse("0x1", 1, "not-base58!");
        assert!(matches!(result, Err(PrimitiveError::Digest(_))));
    }

    #[test]
    fn test_object_ref_parse_bad_id() {
        let result = ObjectRef::parse("0xqq", 1, "11111111111111111111111111111111");
        assert!(matches!(result, Err(PrimitiveError::Address(_))));
    }
}
