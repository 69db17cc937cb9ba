//! Component name validation.

use crate::context::error::{ContextError, ContextResult};

/// Maximum length of a component name.
pub const MAX_NAME_LEN: usize = 64;

/// Validate a layout or podlet name.
///
/// Names are 1 to 64 characters of lowercase ASCII letters, digits and
/// dashes, and may not start with a dash.
pub fn validate_name(name: &str) -> ContextResult<()> {
    let valid = !name.is_empty()
        && name.len() <= MAX_NAME_LEN
        && !name.starts_with('-')
        && name
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-');

    if valid {
        Ok(())
    } else {
        Err(ContextError::Validation(format!(
            "The value, \"{}\", for the required argument \"name\" is not defined or not valid",
            name
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        for name in ["layout", "home-page", "podlet2", "a", &"x".repeat(MAX_NAME_LEN)] {
            assert!(validate_name(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn test_invalid_names() {
        let too_long = "x".repeat(MAX_NAME_LEN + 1);
        for name in ["", "homePage", "home page", "-home", "home_page", "høme", too_long.as_str()] {
            assert!(
                matches!(validate_name(name), Err(ContextError::Validation(_))),
                "{name} should be rejected"
            );
        }
    }
}
