//! Command arguments

use std::fmt;

use serde::{Deserialize, Serialize};

/// Reference to a value available to a command
///
/// Variant order is the wire tag order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Argument {
    /// The gas coin
    GasCoin,
    /// Transaction input by index
    Input(u16),
    /// Single result of an earlier command
    Result(u16),
    /// One element of an earlier command's result tuple
    NestedResult(u16, u16),
}

impl Argument {
    /// Index of the input this refers to
    pub fn input_index(&self) -> Option<u16> {
        match self {
            Argument::Input(i) => Some(*i),
            _ => None,
        }
    }

    /// Index of the command whose result this refers to
    pub fn command_index(&self) -> Option<u16> {
        match self {
            Argument::Result(c) | Argument::NestedResult(c, _) => Some(*c),
            _ => None,
        }
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::GasCoin => f.write_str("GasCoin"),
            Argument::Input(i) => write!(f, "Input({})", i),
            Argument::Result(c) => write!(f, "Result({})", c),
            Argument::NestedResult(c, i) => write!(f, "NestedResult({}, {})", c, i),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sui_bcs::{from_bytes, to_bytes, BcsError};

    #[test]
    fn test_argument_tags() {
        let cases = [
            (Argument::GasCoin, vec![0]),
            (Argument::Input(3), vec![1, 3, 0]),
            (Argument::Result(1), vec![2, 1, 0]),
            (Argument::NestedResult(0, 1), vec![3, 0, 0, 1, 0]),
            (Argument::Input(0x0102), vec![1, 2, 1]),
        ];
        for (argument, expected) in cases {
            assert_eq!(to_bytes(&argument).unwrap(), expected, "{argument}");
        }
    }

    #[test]
    fn test_argument_decode() {
        assert_eq!(
            from_bytes::<Argument>(&[3, 0, 0, 1, 0]).unwrap(),
            Argument::NestedResult(0, 1)
        );
        assert!(matches!(from_bytes::<Argument>(&[4]), Err(BcsError::Custom(_))));
        assert_eq!(from_bytes::<Argument>(&[1, 3]), Err(BcsError::Eof));
    }

    #[test]
    fn test_json_form() {
        assert_eq!(serde_json::to_value(Argument::GasCoin).unwrap(), serde_json::json!("GasCoin"));
        assert_eq!(
            serde_json::to_value(Argument::NestedResult(2, 1)).unwrap(),
            serde_json::json!({"NestedResult": [2, 1]})
        );
    }

    #[test]
    fn test_indices() {
        assert_eq!(Argument::Input(2).input_index(), Some(2));
        assert_eq!(Argument::GasCoin.input_index(), None);
        assert_eq!(Argument::NestedResult(4, 0).command_index(), Some(4));
        assert_eq!(Argument::Input(4).command_index(), None);
    }
}
