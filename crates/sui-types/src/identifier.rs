//! Move identifiers

use crate::TypesError;

/// True for `[A-Za-z_][A-Za-z0-9_]*`
pub fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Return `s` as an owned identifier, or fail
pub fn validate_identifier(s: &str) -> Result<String, TypesError> {
    if is_valid_identifier(s) {
        Ok(s.to_string())
    } else {
        Err(TypesError::InvalidIdentifier(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifiers() {
        for ok in ["coin", "Coin", "_", "_private", "mint_2", "SUI"] {
            assert!(is_valid_identifier(ok), "{ok}");
        }
        for bad in ["", "2coin", "co-in", "coin!", "::", "co in", "é"] {
            assert!(!is_valid_identifier(bad), "{bad}");
        }
    }

    #[test]
    fn test_validate_identifier_error() {
        assert_eq!(
            validate_identifier("9x"),
            Err(TypesError::InvalidIdentifier("9x".into()))
        );
    }
}
