//! Fuzz target for Luhn algorithm.
//!
//! Tests that luhn functions never panic and maintain invariants.

#![no_main]

use cardcheck::{format, luhn};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Clamp values to valid digit range
    let digits: Vec<u8> = data.iter().map(|&b| b % 10).collect();

    if digits.is_empty() {
        assert!(!luhn::validate(&digits), "empty input must fail");
        return;
    }

    // String and slice entry points agree
    let text: String = digits.iter().map(|&d| char::from(b'0' + d)).collect();
    assert_eq!(luhn::validate_checksum(&text), luhn::validate(&digits));
    assert_eq!(format::to_digit_values(&text), digits);

    // Adding the check digit makes any prefix valid
    if digits.len() <= 18 {
        let check = luhn::generate_check_digit(&digits);
        assert!(check <= 9, "Check digit should be 0-9");

        let mut with_check = digits.clone();
        with_check.push(check);
        assert!(luhn::validate(&with_check), "Adding check digit should make valid");
    }

    // Arbitrary text never panics
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = luhn::check_checksum(s);
    }
});
