//! Fuzz target for full card validation.
//!
//! Tests that the validator never panics and that acceptance implies every
//! single-field check passes.

#![no_main]

use arbitrary::Arbitrary;
use cardcheck::{
    classify_network, validate_cardholder_name, validate_checksum, validate_cvv, CardDetails,
    FixedClock, Validator,
};
use chrono::{Duration, NaiveDate};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    owner: String,
    number: String,
    issue_date: String,
    cvc: String,
    days_after_2000: u16,
}

fuzz_target!(|input: Input| {
    let Some(now) = NaiveDate::from_ymd_opt(2000, 1, 1)
        .and_then(|d| d.checked_add_signed(Duration::days(i64::from(input.days_after_2000))))
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    else {
        return;
    };

    let validator = Validator::new().with_clock(FixedClock(now));
    let details = CardDetails::new(input.owner, input.number, input.issue_date, input.cvc);

    if let Ok(network) = validator.validate(&details) {
        assert!(network.is_known());
        assert_eq!(classify_network(&details.credit_card_number), network);
        assert!(validate_checksum(&details.credit_card_number));
        assert!(validate_cvv(&details.credit_card_number, &details.cvc));
        assert!(validate_cardholder_name(&details.card_owner));
    }
});
