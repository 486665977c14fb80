//! Basic card validation example.
//!
//! Run with: `cargo run --example basic`

use cardcheck::{
    classify_network, cvv, expiry, format, mask, validate_cardholder_name, validate_checksum,
    CardDetails, ValidationError, Validator,
};

fn main() {
    println!("=== Basic Card Validation ===\n");

    // Example 1: Classify and check card numbers
    let test_cards = [
        ("4242 4242 4242 4242", "Visa"),
        ("5555 5555 5555 4444", "Mastercard"),
        ("378282246310005", "Amex"),
        ("6011111111111117", "Discover (unsupported)"),
        ("4242424242424243", "Visa (bad checksum)"),
    ];

    println!("Network and checksum:");
    for (number, description) in test_cards {
        println!(
            "  {:<22} {:<24} network={:<16} luhn={}",
            format::format_card_number(number),
            description,
            classify_network(number).display_name(),
            if validate_checksum(number) { "PASS" } else { "FAIL" }
        );
    }
    println!();

    // Example 2: CVV length depends on the card
    println!("CVV checks:");
    for (card, code) in [
        ("378282246310005", "1234"),
        ("378282246310005", "123"),
        ("4242424242424242", "123"),
    ] {
        match cvv::check_cvv(card, code) {
            Ok(len) => println!("  {} / {}: valid ({} digits)", mask::mask_number(card), code, len),
            Err(e) => println!("  {} / {}: {}", mask::mask_number(card), code, e),
        }
    }
    println!();

    // Example 3: Expiry dates against the system clock
    println!("Expiry checks:");
    for date in ["12/2020", "13/2025", "11/209"] {
        println!(
            "  {}: {}",
            date,
            if expiry::validate_expiry(date) { "valid" } else { "invalid" }
        );
    }
    println!();

    // Example 4: Cardholder names
    println!("Name checks:");
    for name in ["Robin Demeulenaere", "R@b1n Dem3ulenaere"] {
        println!("  {:?}: {}", name, validate_cardholder_name(name));
    }
    println!();

    // Example 5: Full validation with error handling
    println!("Full validation:");
    let validator = Validator::new();
    let details = CardDetails::new("Robin Demeulenaere", "4242 4242 4242 4242", "01/2020", "123");
    println!("  Input: {:?}", details);

    match validator.validate(&details) {
        Ok(network) => println!("  Accepted: {}", network),
        Err(ValidationError::ExpiryOutOfRange) => {
            println!("  Rejected: the card is expired or expires too far in the future")
        }
        Err(e) => println!("  Rejected ({}): {}", e.field(), e),
    }
}
