//! Fuzz target for CVV validation.
//!
//! Tests that CVV validation never panics and only accepts the length the
//! card requires.

#![no_main]

use arbitrary::Arbitrary;
use cardcheck::{cvv, format};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    card: String,
    cvv: String,
}

fuzz_target!(|input: Input| {
    let expected = cvv::expected_cvv_length(&input.card);
    assert!(expected == 3 || expected == 4);

    let accepted = cvv::validate_cvv(&input.card, &input.cvv);
    let digits = format::strip_non_digits(&input.cvv);
    assert_eq!(accepted, digits.len() == expected);
});
