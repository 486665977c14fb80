//! Luhn checksum validation.
//!
//! The Luhn algorithm (also known as the "modulus 10" algorithm) is a checksum
//! formula used to validate card numbers and other identification numbers.
//!
//! [`validate_checksum`] and [`check_checksum`] accept raw user input; the
//! digit-slice functions ([`validate`], [`compute_checksum`],
//! [`generate_check_digit`]) work on values 0-9.

use crate::error::{Field, ValidationError};
use crate::format::{is_all_digits, strip_whitespace, to_digit_values};

/// Lookup table for doubled digits: double the value, subtract 9 if >= 10.
/// Index is the digit (0-9), value is the transformed result.
const DOUBLE_TABLE: [u8; 10] = [0, 2, 4, 6, 8, 1, 3, 5, 7, 9];

/// Validates raw card number input with the Luhn algorithm.
///
/// Whitespace is ignored. Any other non-digit character, or input without any
/// digits, makes the check fail.
///
/// # Example
///
/// ```
/// use cardcheck::luhn::validate_checksum;
///
/// assert!(validate_checksum("4242424242424242"));
/// assert!(validate_checksum("5555 5555 5555 4444"));
/// assert!(!validate_checksum("4242424242424243"));
/// assert!(!validate_checksum("4242-4242-4242-4242"));
/// assert!(!validate_checksum(""));
/// ```
#[inline]
pub fn validate_checksum(input: &str) -> bool {
    check_checksum(input).is_ok()
}

/// Like [`validate_checksum`], but reports why the input was rejected.
///
/// # Errors
///
/// - [`ValidationError::InvalidFormat`] if the input contains anything other
///   than digits and whitespace, or no digits at all.
/// - [`ValidationError::ChecksumFailed`] if the Luhn sum is not a multiple of 10.
pub fn check_checksum(input: &str) -> Result<(), ValidationError> {
    let compact = strip_whitespace(input);
    if !is_all_digits(&compact) {
        return Err(ValidationError::InvalidFormat(Field::CardNumber));
    }

    if validate(&to_digit_values(&compact)) {
        Ok(())
    } else {
        Err(ValidationError::ChecksumFailed)
    }
}

/// Validates a sequence of digits using the Luhn algorithm.
///
/// An empty slice is invalid.
///
/// # Example
///
/// ```
/// use cardcheck::luhn::validate;
///
/// let digits = [4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2];
/// assert!(validate(&digits));
///
/// let invalid = [4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 3];
/// assert!(!validate(&invalid));
/// ```
#[inline]
pub fn validate(digits: &[u8]) -> bool {
    if digits.is_empty() {
        return false;
    }

    compute_checksum(digits) == 0
}

/// Computes the Luhn sum modulo 10 for a sequence of digits.
///
/// Digits are processed right to left; every second digit starting with the
/// second from the right is doubled. The sum is reduced as it accumulates, so
/// input of any length is safe.
#[inline]
pub fn compute_checksum(digits: &[u8]) -> u32 {
    luhn_sum(digits, 1)
}

/// Computes the check digit that makes `digits` followed by it pass Luhn.
///
/// # Example
///
/// ```
/// use cardcheck::luhn::generate_check_digit;
///
/// let partial = [4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4];
/// assert_eq!(generate_check_digit(&partial), 2);
/// ```
#[inline]
pub fn generate_check_digit(digits: &[u8]) -> u8 {
    // Every digit moves one position left once the check digit is appended,
    // so the doubling parity flips.
    let sum = luhn_sum(digits, 0);
    ((10 - sum) % 10) as u8
}

/// Right-to-left Luhn sum modulo 10, doubling positions with `i % 2 == doubled`.
fn luhn_sum(digits: &[u8], doubled: usize) -> u32 {
    digits.iter().rev().enumerate().fold(0, |acc, (i, &digit)| {
        let value = if i % 2 == doubled {
            DOUBLE_TABLE[digit as usize]
        } else {
            digit
        };
        (acc + u32::from(value)) % 10
    })
}
