//! # cardcheck
//!
//! Payment card input validation for Rust.
//!
//! ## Features
//!
//! - Network classification (Mastercard, Visa, American Express)
//! - Luhn checksum validation
//! - CVV length validation
//! - Expiry date validation against a configurable window
//! - Cardholder name validation
//! - Card number masking for logs
//! - Multiple interfaces: library, CLI, REST API
//!
//! ## Quick Start
//!
//! ```rust
//! use cardcheck::{classify_network, validate_checksum, validate_cvv, CardNetwork};
//!
//! assert_eq!(classify_network("4242 4242 4242 4242"), CardNetwork::Visa);
//! assert_eq!(classify_network("6011111111111117"), CardNetwork::Unknown);
//!
//! assert!(validate_checksum("4242 4242 4242 4242"));
//! assert!(!validate_checksum("4242 4242 4242 4243"));
//!
//! assert!(validate_cvv("378282246310005", "1234"));
//! assert!(!validate_cvv("4242424242424242", "1234"));
//! ```
//!
//! ## Full Validation
//!
//! ```rust
//! use cardcheck::{CardDetails, CardNetwork, Field, ValidationError, Validator};
//! use cardcheck::expiry::FixedClock;
//! use chrono::NaiveDate;
//!
//! let now = NaiveDate::from_ymd_opt(2021, 6, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let validator = Validator::new().with_clock(FixedClock(now));
//!
//! let details = CardDetails::new("Robin Demeulenaere", "3782 822463 10005", "11/2022", "1234");
//! assert_eq!(validator.validate(&details), Ok(CardNetwork::AmericanExpress));
//!
//! let details = CardDetails::new("", "3782 822463 10005", "11/2022", "1234");
//! assert_eq!(
//!     validator.validate(&details),
//!     Err(ValidationError::MissingField(Field::CardOwner))
//! );
//! ```
//!
//! ## Supported Networks
//!
//! | Network | Prefix | Length | CVV |
//! |---------|--------|--------|-----|
//! | Mastercard | 51-55, 2221-2720 | 16 | 3 |
//! | Visa | 4 | 13, 16 | 3 |
//! | American Express | 34, 37 | 15 | 4 |
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `cli` | Command-line tool |
//! | `server` | REST API with Swagger UI |
//!
//! ## Security
//!
//! - [`CardDetails`] is zeroized on drop
//! - `Debug` output and log events show masked numbers only
//! - No unsafe code (`#![deny(unsafe_code)]`)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod config;
pub mod cvv;
pub mod error;
pub mod expiry;
pub mod format;
pub mod luhn;
pub mod mask;
pub mod name;
pub mod network;
pub mod validate;

// Re-export main types at crate root
pub use config::{Config, ConfigError, ServerConfig, ValidatorConfig};
pub use error::{Field, ValidationError};
pub use expiry::{Clock, ExpiryDate, FixedClock, SystemClock};
pub use name::NamePolicy;
pub use network::{classify_network, CardNetwork, NetworkPattern, NETWORK_PATTERNS};
pub use validate::{CardDetails, Validator};

// Re-export the single-field checks
pub use cvv::validate_cvv;
pub use expiry::validate_expiry;
pub use luhn::validate_checksum;
pub use name::validate_cardholder_name;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const VISA_16: &str = "4242424242424242";
    const VISA_13: &str = "4222222222222";
    const MASTERCARD: &str = "5555555555554444";
    const MASTERCARD_2: &str = "2223003122003222";
    const AMEX: &str = "378282246310005";
    const AMEX_2: &str = "371449635398431";
    const DISCOVER: &str = "6011111111111117";

    fn fixed_validator() -> Validator<FixedClock> {
        let now = NaiveDate::from_ymd_opt(2021, 6, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        Validator::new().with_clock(FixedClock(now))
    }

    #[test]
    fn test_supported_networks() {
        assert_eq!(classify_network(VISA_16), CardNetwork::Visa);
        assert_eq!(classify_network(VISA_13), CardNetwork::Visa);
        assert_eq!(classify_network(MASTERCARD), CardNetwork::MasterCard);
        assert_eq!(classify_network(MASTERCARD_2), CardNetwork::MasterCard);
        assert_eq!(classify_network(AMEX), CardNetwork::AmericanExpress);
        assert_eq!(classify_network(AMEX_2), CardNetwork::AmericanExpress);
    }

    #[test]
    fn test_other_networks_are_unknown() {
        // Valid Luhn, but not a supported network.
        assert!(validate_checksum(DISCOVER));
        assert_eq!(classify_network(DISCOVER), CardNetwork::Unknown);
        assert_eq!(
            fixed_validator().validate_fields("Robin", DISCOVER, "11/2022", "123"),
            Err(ValidationError::UnrecognizedNetwork)
        );
    }

    #[test]
    fn test_checks_are_independent() {
        // A bad checksum does not affect classification or CVV length.
        let bad = "4242424242424241";
        assert!(!validate_checksum(bad));
        assert_eq!(classify_network(bad), CardNetwork::Visa);
        assert!(validate_cvv(bad, "123"));
    }

    #[test]
    fn test_full_validation_every_network() {
        let validator = fixed_validator();
        for (number, cvc, network) in [
            (VISA_16, "123", CardNetwork::Visa),
            (MASTERCARD, "123", CardNetwork::MasterCard),
            (AMEX, "1234", CardNetwork::AmericanExpress),
        ] {
            let details = CardDetails::new("Robin Demeulenaere", number, "11/2022", cvc);
            assert_eq!(validator.validate(&details), Ok(network));
        }
    }

    #[test]
    fn test_config_flows_into_validator() {
        let config = Config::from_toml_str("[validator]\nname_policy = \"last_token\"\n").unwrap();
        let validator = Validator::with_config(config.validator).with_clock(FixedClock(
            NaiveDate::from_ymd_opt(2021, 6, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        ));

        assert_eq!(
            validator.validate_fields("R2 Smith", VISA_16, "11/2022", "123"),
            Ok(CardNetwork::Visa)
        );
        assert_eq!(
            fixed_validator().validate_fields("R2 Smith", VISA_16, "11/2022", "123"),
            Err(ValidationError::InvalidNameCharacters)
        );
    }

    #[test]
    fn test_debug_is_safe() {
        let details = CardDetails::new("Robin", VISA_16, "11/2022", "123");
        let debug = format!("{:?}", details);

        assert!(!debug.contains(VISA_16));
        assert!(debug.contains("4242"));
        assert!(!debug.contains("123\""));
    }

    #[test]
    fn test_error_reports_field() {
        let err = fixed_validator()
            .validate_fields("Robin", VISA_16, "13/2022", "123")
            .unwrap_err();
        assert_eq!(err, ValidationError::InvalidFormat(Field::IssueDate));
        assert_eq!(err.field(), Field::IssueDate);
    }
}
