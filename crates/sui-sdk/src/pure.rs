//! Pure input values
//!
//! A pure value is serialized to BCS as soon as it is added to a
//! transaction and remembered together with its Move type name.

use sui_bcs::utils::encode_uleb128;
use sui_bcs::BcsError;
use sui_primitives::{SuiAddress, U256};

/// A value that can be passed as a pure transaction input
pub trait PureValue {
    /// Move type name, e.g. `u64` or `vector<address>`
    fn move_type() -> String;

    /// BCS bytes of the value
    fn to_pure_bytes(&self) -> Result<Vec<u8>, BcsError>;
}

macro_rules! impl_pure_primitive {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl PureValue for $ty {
                fn move_type() -> String {
                    $name.to_string()
                }

                fn to_pure_bytes(&self) -> Result<Vec<u8>, BcsError> {
                    sui_bcs::to_bytes(self)
                }
            }
        )*
    };
}

impl_pure_primitive! {
    bool => "bool",
    u8 => "u8",
    u16 => "u16",
    u32 => "u32",
    u64 => "u64",
    u128 => "u128",
    SuiAddress => "address",
    String => "0x1::string::String",
}

// Little-endian, 32 bytes
impl PureValue for U256 {
    fn move_type() -> String {
        "u256".to_string()
    }

    fn to_pure_bytes(&self) -> Result<Vec<u8>, BcsError> {
        let mut le = [0u8; 32];
        self.to_little_endian(&mut le);
        Ok(le.to_vec())
    }
}

impl PureValue for &str {
    fn move_type() -> String {
        String::move_type()
    }

    fn to_pure_bytes(&self) -> Result<Vec<u8>, BcsError> {
        sui_bcs::to_bytes(self)
    }
}

impl<T: PureValue> PureValue for Vec<T> {
    fn move_type() -> String {
        format!("vector<{}>", T::move_type())
    }

    fn to_pure_bytes(&self) -> Result<Vec<u8>, BcsError> {
        let mut out = encode_uleb128(self.len() as u64);
        for item in self {
            out.extend_from_slice(&item.to_pure_bytes()?);
        }
        Ok(out)
    }
}

// Move's Option is a 0/1-element vector, which has the same bytes as a BCS option.
impl<T: PureValue> PureValue for Option<T> {
    fn move_type() -> String {
        format!("0x1::option::Option<{}>", T::move_type())
    }

    fn to_pure_bytes(&self) -> Result<Vec<u8>, BcsError> {
        match self {
            None => Ok(vec![0]),
            Some(value) => {
                let mut out = vec![1];
                out.extend_from_slice(&value.to_pure_bytes()?);
                Ok(out)
            }
        }
    }
}

/// Encode a value, returning its bytes and Move type name
pub fn encode_pure<T: PureValue>(value: &T) -> Result<(Vec<u8>, String), BcsError> {
    Ok((value.to_pure_bytes()?, T::move_type()))
}
