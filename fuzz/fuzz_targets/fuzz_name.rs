//! Fuzz target for cardholder name validation.

#![no_main]

use cardcheck::name::{validate_cardholder_name_with, NamePolicy};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let every = validate_cardholder_name_with(data, NamePolicy::EveryToken);
    let last = validate_cardholder_name_with(data, NamePolicy::LastToken);

    if every {
        assert!(last, "every-token acceptance implies last-token acceptance");
        assert!(data.bytes().all(|b| b.is_ascii_alphabetic() || b == b' '));
    }
});
