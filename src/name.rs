//! Cardholder name validation.
//!
//! A name is split on single spaces and each token must consist of ASCII
//! letters only. Digits, punctuation, accented letters and runs of spaces are
//! rejected.
//!
//! Two policies exist:
//!
//! - [`NamePolicy::EveryToken`] (default): every token must be valid.
//! - [`NamePolicy::LastToken`]: only the last token decides. This matches the
//!   behaviour of older integrations, which accept `"R2 Smith"`.
//!
//! # Example
//!
//! ```
//! use cardcheck::name::{validate_cardholder_name, validate_cardholder_name_with, NamePolicy};
//!
//! assert!(validate_cardholder_name("Robin Demeulenaere"));
//! assert!(!validate_cardholder_name("R@b1n Demeulenaere"));
//! assert!(validate_cardholder_name_with("R@b1n Demeulenaere", NamePolicy::LastToken));
//! ```

use crate::error::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static NAME_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z]+$").expect("name pattern is valid"));

/// How the tokens of a cardholder name are combined into one verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamePolicy {
    /// All space-separated tokens must be alphabetic.
    #[default]
    EveryToken,
    /// Only the last space-separated token must be alphabetic.
    LastToken,
}

/// Validates a cardholder name with [`NamePolicy::EveryToken`].
#[inline]
pub fn validate_cardholder_name(input: &str) -> bool {
    validate_cardholder_name_with(input, NamePolicy::default())
}

/// Validates a cardholder name with the given policy.
pub fn validate_cardholder_name_with(input: &str, policy: NamePolicy) -> bool {
    let mut tokens = input.split(' ');
    match policy {
        NamePolicy::EveryToken => tokens.all(is_name_token),
        // split always yields at least one item
        NamePolicy::LastToken => tokens.next_back().is_some_and(is_name_token),
    }
}

/// Like [`validate_cardholder_name_with`], returning an error on failure.
///
/// # Errors
///
/// [`ValidationError::InvalidNameCharacters`] if the name is rejected by
/// `policy`.
pub fn check_cardholder_name(input: &str, policy: NamePolicy) -> Result<(), ValidationError> {
    if validate_cardholder_name_with(input, policy) {
        Ok(())
    } else {
        Err(ValidationError::InvalidNameCharacters)
    }
}

#[inline]
fn is_name_token(token: &str) -> bool {
    NAME_TOKEN.is_match(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert!(validate_cardholder_name("Robin Demeulenaere"));
        assert!(validate_cardholder_name("Cher"));
        assert!(validate_cardholder_name("Mary Ann Smith"));
        assert!(validate_cardholder_name("ALL CAPS"));
    }

    #[test]
    fn test_digits_and_symbols_rejected() {
        assert!(!validate_cardholder_name("R@b1n Dem3ulenaere 12351gtest"));
        assert!(!validate_cardholder_name("John Smith3"));
        assert!(!validate_cardholder_name("O'Brien"));
        assert!(!validate_cardholder_name("Anne-Marie"));
    }

    #[test]
    fn test_non_ascii_letters_rejected() {
        assert!(!validate_cardholder_name("José"));
        assert!(!validate_cardholder_name("Zoë Smith"));
    }

    #[test]
    fn test_spacing() {
        // Empty tokens from doubled or surrounding spaces are not alphabetic.
        assert!(!validate_cardholder_name("Robin  Demeulenaere"));
        assert!(!validate_cardholder_name(" Robin"));
        assert!(!validate_cardholder_name("Robin "));
        assert!(!validate_cardholder_name("Robin\tDemeulenaere"));
    }

    #[test]
    fn test_empty_name() {
        assert!(!validate_cardholder_name(""));
        assert!(!validate_cardholder_name_with("", NamePolicy::LastToken));
        assert!(!validate_cardholder_name(" "));
    }

    #[test]
    fn test_last_token_policy_ignores_earlier_tokens() {
        // Deliberately lenient: only the final token is inspected.
        assert!(validate_cardholder_name_with("R@b1n Demeulenaere", NamePolicy::LastToken));
        assert!(validate_cardholder_name_with("  Robin", NamePolicy::LastToken));
        assert!(!validate_cardholder_name_with("Robin Dem3ulenaere", NamePolicy::LastToken));
        assert!(!validate_cardholder_name_with(
            "R@b1n Dem3ulenaere 12351gtest",
            NamePolicy::LastToken
        ));
    }

    #[test]
    fn test_policies_agree_on_clean_names() {
        for name in ["Robin Demeulenaere", "Cher", "A B C"] {
            assert_eq!(
                validate_cardholder_name_with(name, NamePolicy::EveryToken),
                validate_cardholder_name_with(name, NamePolicy::LastToken),
            );
        }
    }

    #[test]
    fn test_check_cardholder_name() {
        assert_eq!(check_cardholder_name("Robin", NamePolicy::EveryToken), Ok(()));
        assert_eq!(
            check_cardholder_name("R0bin", NamePolicy::EveryToken),
            Err(ValidationError::InvalidNameCharacters)
        );
    }

    #[test]
    fn test_policy_serde_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            policy: NamePolicy,
        }
        let w: Wrapper = toml::from_str("policy = \"last_token\"").unwrap();
        assert_eq!(w.policy, NamePolicy::LastToken);
    }
}
