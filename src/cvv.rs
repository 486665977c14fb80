//! CVV/CVC/CID validation.
//!
//! The required length depends on the card number:
//!
//! - American Express: 4 digits (printed on the front)
//! - All other cards, including unrecognized ones: 3 digits
//!
//! Only the American Express pattern is consulted to decide the length; the
//! card number is not otherwise validated here.
//!
//! # Example
//!
//! ```
//! use cardcheck::cvv::validate_cvv;
//!
//! assert!(validate_cvv("378282246310005", "1234"));
//! assert!(!validate_cvv("378282246310005", "123"));
//! assert!(validate_cvv("4242424242424242", "123"));
//! assert!(!validate_cvv("4242424242424242", "1234"));
//! ```

use crate::error::ValidationError;
use crate::format::strip_non_digits;
use crate::network::{classify_digits, is_american_express, CardNetwork};

/// Returns the CVV length required for a card number.
///
/// 4 when the cleaned number matches the American Express pattern, 3 for
/// anything else.
#[inline]
pub fn expected_cvv_length(card_input: &str) -> usize {
    expected_length_for_digits(&strip_non_digits(card_input))
}

fn expected_length_for_digits(digits: &str) -> usize {
    if is_american_express(digits) {
        CardNetwork::AmericanExpress.cvv_length()
    } else {
        CardNetwork::Unknown.cvv_length()
    }
}

/// Validates a CVV against the card number it belongs to.
///
/// Non-digit characters are stripped from both inputs first.
#[inline]
pub fn validate_cvv(card_input: &str, cvv_input: &str) -> bool {
    check_cvv(card_input, cvv_input).is_ok()
}

/// Like [`validate_cvv`], but reports the expected and actual lengths on
/// failure.
///
/// Returns the number of CVV digits on success.
///
/// # Errors
///
/// [`ValidationError::CvvLengthMismatch`] when the cleaned CVV does not have
/// the length the card requires. The error carries the card's network for
/// reporting; it is [`CardNetwork::Unknown`] for unsupported numbers.
pub fn check_cvv(card_input: &str, cvv_input: &str) -> Result<usize, ValidationError> {
    let digits = strip_non_digits(card_input);
    let expected = expected_length_for_digits(&digits);
    let actual = strip_non_digits(cvv_input).len();

    if actual == expected {
        Ok(actual)
    } else {
        Err(ValidationError::CvvLengthMismatch {
            network: classify_digits(&digits),
            expected,
            actual,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AMEX: &str = "378282246310005";
    const VISA: &str = "4242424242424242";
    const MASTERCARD: &str = "5555 5555 5555 4444";

    #[test]
    fn test_cvv_for_amex() {
        assert!(validate_cvv(AMEX, "1234"));
        assert!(!validate_cvv(AMEX, "123"));
        assert!(!validate_cvv(AMEX, "12345"));
    }

    #[test]
    fn test_cvv_for_formatted_amex() {
        assert!(validate_cvv("3782 822463 10005", "1234"));
        assert!(!validate_cvv("3782 822463 10005", "123"));
    }

    #[test]
    fn test_cvv_for_visa() {
        assert!(validate_cvv(VISA, "123"));
        assert!(!validate_cvv(VISA, "1234"));
        assert!(!validate_cvv(VISA, "12"));
    }

    #[test]
    fn test_cvv_for_mastercard() {
        assert!(validate_cvv(MASTERCARD, "123"));
        assert!(!validate_cvv(MASTERCARD, "1234"));
    }

    #[test]
    fn test_cvv_for_unrecognized_card() {
        // Anything that is not American Express needs 3 digits.
        assert!(validate_cvv("6011111111111117", "123"));
        assert!(validate_cvv("", "000"));
        assert!(!validate_cvv("", "1234"));
    }

    #[test]
    fn test_cvv_non_digits_are_stripped() {
        assert!(validate_cvv(VISA, " 1-2-3 "));
        assert!(validate_cvv(AMEX, "12 34"));
        assert!(!validate_cvv(VISA, "12a"));
        assert!(!validate_cvv(VISA, ""));
    }

    #[test]
    fn test_cvv_with_leading_zeros() {
        assert!(validate_cvv(VISA, "007"));
        assert!(validate_cvv(AMEX, "0001"));
    }

    #[test]
    fn test_check_cvv_reports_lengths() {
        assert_eq!(check_cvv(AMEX, "1234"), Ok(4));
        assert_eq!(
            check_cvv(AMEX, "123"),
            Err(ValidationError::CvvLengthMismatch {
                network: CardNetwork::AmericanExpress,
                expected: 4,
                actual: 3,
            })
        );
        assert_eq!(
            check_cvv(VISA, "1234"),
            Err(ValidationError::CvvLengthMismatch {
                network: CardNetwork::Visa,
                expected: 3,
                actual: 4,
            })
        );
        assert_eq!(
            check_cvv("6011111111111117", "12"),
            Err(ValidationError::CvvLengthMismatch {
                network: CardNetwork::Unknown,
                expected: 3,
                actual: 2,
            })
        );
    }

    #[test]
    fn test_expected_cvv_length() {
        assert_eq!(expected_cvv_length(AMEX), 4);
        assert_eq!(expected_cvv_length(VISA), 3);
        assert_eq!(expected_cvv_length("garbage"), 3);
    }
}
