//! Move type tags
//!
//! Parsed from strings such as `vector<u8>` or
//! `0x2::coin::Coin<0x2::sui::SUI>`; generic parameters are split at
//! nesting depth zero.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, EnumAccess, Unexpected, VariantAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sui_primitives::SuiAddress;

use crate::identifier::validate_identifier;
use crate::TypesError;

/// Runtime type of a Move value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeTag {
    /// bool
    Bool,
    /// u8
    U8,
    /// u64
    U64,
    /// u128
    U128,
    /// address
    Address,
    /// signer
    Signer,
    /// vector<T>
    Vector(Box<TypeTag>),
    /// Struct type
    Struct(Box<StructTag>),
    /// u16
    U16,
    /// u32
    U32,
    /// u256
    U256,
}

/// Fully qualified struct type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StructTag {
    /// Defining package
    pub address: SuiAddress,
    /// Module name
    pub module: String,
    /// Struct name
    pub name: String,
    /// Generic type arguments
    pub type_params: Vec<TypeTag>,
}

impl TypeTag {
    /// `vector<inner>`
    pub fn vector(inner: TypeTag) -> Self {
        TypeTag::Vector(Box::new(inner))
    }

    /// Parse a type tag string
    pub fn parse(s: &str) -> Result<Self, TypesError> {
        parse_type_tag(s.trim()).map_err(|reason| TypesError::InvalidTypeTag {
            input: s.to_string(),
            reason,
        })
    }

    fn variant_index(&self) -> u32 {
        match self {
            TypeTag::Bool => 0,
            TypeTag::U8 => 1,
            TypeTag::U64 => 2,
            TypeTag::U128 => 3,
            TypeTag::Address => 4,
            TypeTag::Signer => 5,
            TypeTag::Vector(_) => 6,
            TypeTag::Struct(_) => 7,
            TypeTag::U16 => 8,
            TypeTag::U32 => 9,
            TypeTag::U256 => 10,
        }
    }

    fn variant_name(&self) -> &'static str {
        VARIANTS[self.variant_index() as usize]
    }
}

impl StructTag {
    /// Parse `address::module::Name<Params>`
    pub fn parse(s: &str) -> Result<Self, TypesError> {
        match TypeTag::parse(s)? {
            TypeTag::Struct(tag) => Ok(*tag),
            other => Err(TypesError::InvalidTypeTag {
                input: s.to_string(),
                reason: format!("expected a struct type, got {}", other),
            }),
        }
    }
}

fn parse_type_tag(s: &str) -> Result<TypeTag, String> {
    let tag = match s {
        "bool" => TypeTag::Bool,
        "u8" => TypeTag::U8,
        "u16" => TypeTag::U16,
        "u32" => TypeTag::U32,
        "u64" => TypeTag::U64,
        "u128" => TypeTag::U128,
        "u256" => TypeTag::U256,
        "address" => TypeTag::Address,
        "signer" => TypeTag::Signer,
        "" => return Err("empty type".to_string()),
        _ => {
            if let Some(inner) = s.strip_prefix("vector<") {
                let inner = inner
                    .strip_suffix('>')
                    .ok_or_else(|| "unterminated vector".to_string())?;
                let params = split_type_params(inner)?;
                if params.len() != 1 {
                    return Err(format!("vector takes one parameter, got {}", params.len()));
                }
                return Ok(TypeTag::vector(parse_type_tag(params[0])?));
            }
            TypeTag::Struct(Box::new(parse_struct_tag(s)?))
        }
    };
    Ok(tag)
}

fn parse_struct_tag(s: &str) -> Result<StructTag, String> {
    let (head, type_params) = match s.find('<') {
        Some(open) => {
            let params = s[open + 1..]
                .strip_suffix('>')
                .ok_or_else(|| "unbalanced '<'".to_string())?;
            let params = split_type_params(params)?
                .into_iter()
                .map(parse_type_tag)
                .collect::<Result<Vec<_>, _>>()?;
            if params.is_empty() {
                return Err("empty type parameter list".to_string());
            }
            (&s[..open], params)
        }
        None => (s, Vec::new()),
    };

    let parts: Vec<&str> = head.split("::").collect();
    let [address, module, name] = parts.as_slice() else {
        return Err("expected address::module::name".to_string());
    };
    let address = SuiAddress::from_hex(address.trim()).map_err(|e| e.to_string())?;
    let module = validate_identifier(module.trim()).map_err(|e| e.to_string())?;
    let name = validate_identifier(name.trim()).map_err(|e| e.to_string())?;

    Ok(StructTag {
        address,
        module,
        name,
        type_params,
    })
}

/// Split `A, B<C, D>, E` at depth-zero commas
fn split_type_params(s: &str) -> Result<Vec<&str>, String> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in s.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| "unbalanced '>'".to_string())?;
            }
            ',' if depth == 0 => {
                parts.push(s[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err("unbalanced '<'".to_string());
    }
    let last = s[start..].trim();
    if !last.is_empty() || !parts.is_empty() {
        parts.push(last);
    }
    if parts.iter().any(|p| p.is_empty()) {
        return Err("empty type parameter".to_string());
    }
    Ok(parts)
}

impl FromStr for TypeTag {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TypeTag::parse(s)
    }
}

impl FromStr for StructTag {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StructTag::parse(s)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Bool => f.write_str("bool"),
            TypeTag::U8 => f.write_str("u8"),
            TypeTag::U16 => f.write_str("u16"),
            TypeTag::U32 => f.write_str("u32"),
            TypeTag::U64 => f.write_str("u64"),
            TypeTag::U128 => f.write_str("u128"),
            TypeTag::U256 => f.write_str("u256"),
            TypeTag::Address => f.write_str("address"),
            TypeTag::Signer => f.write_str("signer"),
            TypeTag::Vector(inner) => write!(f, "vector<{}>", inner),
            TypeTag::Struct(tag) => write!(f, "{}", tag),
        }
    }
}

impl fmt::Display for StructTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}::{}", self.address.to_short_hex(), self.module, self.name)?;
        if let Some((first, rest)) = self.type_params.split_first() {
            write!(f, "<{}", first)?;
            for param in rest {
                write!(f, ", {}", param)?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}

// ==================== Serde ====================

// Wire tag order
const VARIANTS: &[&str] = &[
    "bool", "u8", "u64", "u128", "address", "signer", "vector", "struct", "u16", "u32", "u256",
];

// Human-readable formats get the type string, binary ones the BCS enum.
impl Serialize for TypeTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            return serializer.collect_str(self);
        }
        let index = self.variant_index();
        let name = self.variant_name();
        match self {
            TypeTag::Vector(inner) => {
                serializer.serialize_newtype_variant("TypeTag", index, name, inner)
            }
            TypeTag::Struct(tag) => serializer.serialize_newtype_variant("TypeTag", index, name, tag),
            _ => serializer.serialize_unit_variant("TypeTag", index, name),
        }
    }
}

impl<'de> Deserialize<'de> for TypeTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            return TypeTag::parse(&s).map_err(de::Error::custom);
        }
        deserializer.deserialize_enum("TypeTag", VARIANTS, TypeTagVisitor)
    }
}

struct TypeTagVisitor;

impl<'de> Visitor<'de> for TypeTagVisitor {
    type Value = TypeTag;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a Move type tag")
    }

    fn visit_enum<A: EnumAccess<'de>>(self, data: A) -> Result<TypeTag, A::Error> {
        let (index, variant) = data.variant::<u32>()?;
        match index {
            0 => variant.unit_variant().map(|_| TypeTag::Bool),
            1 => variant.unit_variant().map(|_| TypeTag::U8),
            2 => variant.unit_variant().map(|_| TypeTag::U64),
            3 => variant.unit_variant().map(|_| TypeTag::U128),
            4 => variant.unit_variant().map(|_| TypeTag::Address),
            5 => variant.unit_variant().map(|_| TypeTag::Signer),
            6 => variant.newtype_variant().map(TypeTag::Vector),
            7 => variant.newtype_variant().map(TypeTag::Struct),
            8 => variant.unit_variant().map(|_| TypeTag::U16),
            9 => variant.unit_variant().map(|_| TypeTag::U32),
            10 => variant.unit_variant().map(|_| TypeTag::U256),
            other => Err(de::Error::invalid_value(
                Unexpected::Unsigned(u64::from(other)),
                &"variant index 0 <= i < 11",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(s: &str) -> SuiAddress {
        SuiAddress::from_hex(s).unwrap()
    }

    // ==================== Parsing ====================

    #[test]
    fn test_parse_primitives() {
        assert_eq!(TypeTag::parse("u8").unwrap(), TypeTag::U8);
        assert_eq!(TypeTag::parse(" u256 ").unwrap(), TypeTag::U256);
        assert_eq!(TypeTag::parse("address").unwrap(), TypeTag::Address);
        assert_eq!(TypeTag::parse("signer").unwrap(), TypeTag::Signer);
    }

    #[test]
    fn test_parse_nested_vector() {
        assert_eq!(
            TypeTag::parse("vector<vector<u8>>").unwrap(),
            TypeTag::vector(TypeTag::vector(TypeTag::U8))
        );
    }

    #[test]
    fn test_parse_struct_with_generics() {
        let tag = TypeTag::parse("0x2::coin::Coin<0x2::sui::SUI>").unwrap();
        let TypeTag::Struct(coin) = tag else {
            panic!("Expected struct tag");
        };
        assert_eq!(coin.address, addr("0x2"));
        assert_eq!(coin.module, "coin");
        assert_eq!(coin.name, "Coin");
        assert_eq!(
            coin.type_params,
            vec![TypeTag::Struct(Box::new(StructTag {
                address: addr("0x2"),
                module: "sui".into(),
                name: "SUI".into(),
                type_params: vec![],
            }))]
        );
    }

    #[test]
    fn test_parse_splits_at_depth_zero() {
        let tag = StructTag::parse("0x1::pair::Pair<vector<u8>, 0x2::table::Table<u64, bool>>")
            .unwrap();
        assert_eq!(tag.type_params.len(), 2);
        assert_eq!(tag.type_params[0], TypeTag::vector(TypeTag::U8));
        let TypeTag::Struct(table) = &tag.type_params[1] else {
            panic!("Expected struct tag");
        };
        assert_eq!(table.type_params, vec![TypeTag::U64, TypeTag::Bool]);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in [
            "",
            "u7",
            "vector<u8",
            "vector<u8, u8>",
            "0x2::coin",
            "0x2::coin::Coin<",
            "0x2::coin::Coin<>",
            "0x2::coin::Coin<u8,>",
            "0x2::1coin::Coin",
            "0xzz::coin::Coin",
            "0x2::coin::Coin<u8>>",
        ] {
            assert!(
                matches!(TypeTag::parse(bad), Err(TypesError::InvalidTypeTag { .. })),
                "should reject {bad:?}"
            );
        }
    }

    #[test]
    fn test_display_roundtrip() {
        for s in [
            "u64",
            "vector<address>",
            "0x2::coin::Coin<0x2::sui::SUI>",
            "0x1::option::Option<vector<u8>>",
        ] {
            assert_eq!(TypeTag::parse(s).unwrap().to_string(), s);
        }
    }

    // ==================== BCS ====================

    #[test]
    fn test_bcs_tags() {
        let cases = [
            ("bool", 0u8),
            ("u8", 1),
            ("u64", 2),
            ("u128", 3),
            ("address", 4),
            ("signer", 5),
            ("u16", 8),
            ("u32", 9),
            ("u256", 10),
        ];
        for (s, tag) in cases {
            assert_eq!(sui_bcs::to_bytes(&TypeTag::parse(s).unwrap()).unwrap(), vec![tag], "{s}");
        }
        assert_eq!(sui_bcs::to_bytes(&TypeTag::vector(TypeTag::U8)).unwrap(), vec![6, 1]);
    }

    #[test]
    fn test_bcs_struct_layout() {
        let tag = TypeTag::parse("0x6::capy::Capy").unwrap();
        let mut expected = vec![7];
        expected.extend_from_slice(&[0u8; 31]);
        expected.push(6);
        expected.extend_from_slice(&[4, b'c', b'a', b'p', b'y', 4, b'C', b'a', b'p', b'y', 0]);
        let bytes = sui_bcs::to_bytes(&tag).unwrap();
        assert_eq!(bytes, expected);
        assert_eq!(sui_bcs::from_bytes::<TypeTag>(&bytes).unwrap(), tag);
    }

    #[test]
    fn test_bcs_unknown_tag() {
        assert!(matches!(
            sui_bcs::from_bytes::<TypeTag>(&[11]),
            Err(sui_bcs::BcsError::Custom(_))
        ));
    }

    #[test]
    fn test_bcs_nested_vectors_decode() {
        let mut bytes = vec![6u8; 20];
        bytes.push(1);
        let mut expected = TypeTag::U8;
        for _ in 0..20 {
            expected = TypeTag::vector(expected);
        }
        assert_eq!(sui_bcs::from_bytes::<TypeTag>(&bytes).unwrap(), expected);
    }

    #[test]
    fn test_bcs_deep_nesting_is_an_error() {
        // vector<vector<...<u8>...>> far past the container depth limit
        let mut bytes = vec![6u8; 200_000];
        bytes.push(1);
        assert!(matches!(
            sui_bcs::from_bytes::<TypeTag>(&bytes),
            Err(sui_bcs::BcsError::ExceededContainerDepthLimit(_))
        ));
    }

    #[test]
    fn test_json_uses_type_string() {
        let tag = TypeTag::parse("0x2::coin::Coin<0x2::sui::SUI>").unwrap();
        let json = serde_json::to_value(&tag).unwrap();
        assert_eq!(json, serde_json::json!("0x2::coin::Coin<0x2::sui::SUI>"));
        assert_eq!(serde_json::from_value::<TypeTag>(json).unwrap(), tag);
        assert!(serde_json::from_value::<TypeTag>(serde_json::json!("u7")).is_err());
    }
}
