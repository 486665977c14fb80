//! Fuzz target for expiry date parsing.
//!
//! Tests that expiry parsing never panics on arbitrary input.

#![no_main]

use cardcheck::expiry;
use chrono::NaiveDate;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let Some(now) = NaiveDate::from_ymd_opt(2021, 6, 1).and_then(|d| d.and_hms_opt(12, 0, 0))
    else {
        return;
    };

    if let Ok(date) = expiry::parse_expiry(data) {
        // Parsed dates round-trip through their display form
        assert_eq!(date.to_string(), data);
        assert!((1..=12).contains(&date.month()));
        assert!((2000..=2099).contains(&date.year()));
        let _ = date.months_until_expiry(now);
    }

    for window in [0, 1, 3, u32::MAX] {
        let _ = expiry::check_expiry_at(data, now, window);
    }
});
