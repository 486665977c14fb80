//! Digit extraction and card number formatting.
//!
//! Every engine operation works on cleaned input. This module holds the
//! shared helpers that produce it, plus display grouping per network:
//!
//! - **Visa/MasterCard** (16 digits): `XXXX XXXX XXXX XXXX`
//! - **American Express** (15 digits): `XXXX XXXXXX XXXXX`
//! - **Other**: groups of 4 with the remainder at the end
//!
//! # Example
//!
//! ```
//! use cardcheck::format::{format_card_number, strip_non_digits};
//!
//! assert_eq!(strip_non_digits("4242-4242 4242.4242"), "4242424242424242");
//! assert_eq!(format_card_number("378282246310005"), "3782 822463 10005");
//! ```

use crate::network::{classify_digits, CardNetwork};

/// Removes every character that is not an ASCII digit.
///
/// # Example
///
/// ```
/// use cardcheck::format::strip_non_digits;
///
/// assert_eq!(strip_non_digits("5555 5555 5555 4444"), "5555555555554444");
/// assert_eq!(strip_non_digits("abc"), "");
/// ```
pub fn strip_non_digits(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Removes whitespace. Other separators are kept.
pub fn strip_whitespace(input: &str) -> String {
    input.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Returns true if `input` is non-empty and made of ASCII digits only.
#[inline]
pub fn is_all_digits(input: &str) -> bool {
    !input.is_empty() && input.bytes().all(|b| b.is_ascii_digit())
}

/// Converts an ASCII digit string into digit values (0-9).
///
/// Non-digit characters are skipped.
pub fn to_digit_values(input: &str) -> Vec<u8> {
    input
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect()
}

/// Formats a card number with the grouping of its network, separated by spaces.
///
/// # Example
///
/// ```
/// use cardcheck::format::format_card_number;
///
/// assert_eq!(format_card_number("4242424242424242"), "4242 4242 4242 4242");
/// assert_eq!(format_card_number("3782-8224-6310-005"), "3782 822463 10005");
/// ```
pub fn format_card_number(input: &str) -> String {
    format_with_separator(input, " ")
}

/// Formats a card number with the grouping of its network and a custom separator.
pub fn format_with_separator(input: &str, separator: &str) -> String {
    let digits = strip_non_digits(input);
    if digits.is_empty() {
        return String::new();
    }

    let groups = grouping_for_network(classify_digits(&digits), digits.len());

    let mut result = String::with_capacity(digits.len() + groups.len() * separator.len());
    let mut pos = 0;
    for group_size in groups {
        if pos > 0 {
            result.push_str(separator);
        }
        let end = (pos + group_size).min(digits.len());
        result.push_str(&digits[pos..end]);
        pos = end;
    }

    result
}

/// Returns the digit grouping for a network and length.
///
/// The groups always add up to `length`.
fn grouping_for_network(network: CardNetwork, length: usize) -> Vec<usize> {
    match network {
        CardNetwork::AmericanExpress => vec![4, 6, 5],
        _ => {
            let mut groups = vec![4; length / 4];
            if length % 4 > 0 {
                groups.push(length % 4);
            }
            groups
        }
    }
}
