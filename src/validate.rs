//! Validation of a complete set of card details.
//!
//! [`Validator`] runs every check in a fixed order and stops at the first
//! failure:
//!
//! 1. cardholder name present and well-formed
//! 2. CVC present
//! 3. card number present, of a supported network, passing Luhn
//! 4. CVC length matching the network
//! 5. expiry date present and inside the acceptance window
//!
//! On success the classified [`CardNetwork`] is returned.
//!
//! # Example
//!
//! ```
//! use cardcheck::{CardDetails, CardNetwork, Validator, ValidationError};
//! use cardcheck::expiry::FixedClock;
//! use chrono::NaiveDate;
//!
//! let now = NaiveDate::from_ymd_opt(2021, 6, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let validator = Validator::new().with_clock(FixedClock(now));
//!
//! let details = CardDetails::new("Robin Demeulenaere", "4242 4242 4242 4242", "11/2022", "123");
//! assert_eq!(validator.validate(&details), Ok(CardNetwork::Visa));
//!
//! let details = CardDetails::new("Robin Demeulenaere", "4242 4242 4242 4243", "11/2022", "123");
//! assert_eq!(validator.validate(&details), Err(ValidationError::ChecksumFailed));
//! ```

use std::fmt;

use serde::Deserialize;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::config::ValidatorConfig;
use crate::cvv::check_cvv;
use crate::error::{Field, ValidationError};
use crate::expiry::{check_expiry, Clock, SystemClock};
use crate::luhn::check_checksum;
use crate::mask::{mask_cvv, mask_number};
use crate::name::check_cardholder_name;
use crate::network::{classify_network, CardNetwork};

/// Raw card input as submitted by a client.
///
/// The card number and CVC are wiped from memory when the value is dropped,
/// and `Debug` output masks them.
///
/// Field names deserialize from `cardOwner`, `creditCardNumber`, `issueDate`
/// and `CVC`. Missing fields become empty strings, which the validator reports
/// as [`ValidationError::MissingField`].
#[derive(Clone, Default, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase")]
pub struct CardDetails {
    /// Cardholder name as printed on the card.
    #[serde(default)]
    pub card_owner: String,
    /// Card number, optionally separated by spaces.
    #[serde(default)]
    pub credit_card_number: String,
    /// Expiry date, `MM/YYYY`.
    #[serde(default)]
    pub issue_date: String,
    /// Card verification code.
    #[serde(default, rename = "CVC", alias = "cvc")]
    pub cvc: String,
}

impl CardDetails {
    /// Creates card details from the four input fields.
    pub fn new(
        card_owner: impl Into<String>,
        credit_card_number: impl Into<String>,
        issue_date: impl Into<String>,
        cvc: impl Into<String>,
    ) -> Self {
        Self {
            card_owner: card_owner.into(),
            credit_card_number: credit_card_number.into(),
            issue_date: issue_date.into(),
            cvc: cvc.into(),
        }
    }
}

impl fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardDetails")
            .field("card_owner", &self.card_owner)
            .field("credit_card_number", &mask_number(&self.credit_card_number))
            .field("issue_date", &self.issue_date)
            .field("cvc", &mask_cvv(&self.cvc))
            .finish()
    }
}

/// Runs all card checks in order against a clock.
///
/// The validator holds no mutable state; share it freely between threads.
#[derive(Debug, Clone)]
pub struct Validator<C = SystemClock> {
    config: ValidatorConfig,
    clock: C,
}

impl Validator<SystemClock> {
    /// Creates a validator with default settings reading the system clock.
    pub fn new() -> Self {
        Self::with_config(ValidatorConfig::default())
    }

    /// Creates a validator with the given settings reading the system clock.
    pub fn with_config(config: ValidatorConfig) -> Self {
        Self {
            config,
            clock: SystemClock,
        }
    }
}

impl Default for Validator<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Validator<C> {
    /// Replaces the clock used for expiry checks.
    pub fn with_clock<D: Clock>(self, clock: D) -> Validator<D> {
        Validator {
            config: self.config,
            clock,
        }
    }

    /// Returns the active settings.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validates a complete set of card details.
    ///
    /// # Errors
    ///
    /// The first failing check, see the module documentation for the order.
    pub fn validate(&self, details: &CardDetails) -> Result<CardNetwork, ValidationError> {
        self.validate_fields(
            &details.card_owner,
            &details.credit_card_number,
            &details.issue_date,
            &details.cvc,
        )
    }

    /// Validates the four fields without building a [`CardDetails`].
    ///
    /// # Errors
    ///
    /// As [`Validator::validate`].
    pub fn validate_fields(
        &self,
        card_owner: &str,
        card_number: &str,
        issue_date: &str,
        cvc: &str,
    ) -> Result<CardNetwork, ValidationError> {
        let result = self.run_checks(card_owner, card_number, issue_date, cvc);

        match &result {
            Ok(network) => tracing::debug!(
                card = %mask_number(card_number),
                %network,
                "card accepted"
            ),
            Err(err) => tracing::debug!(
                card = %mask_number(card_number),
                field = %err.field(),
                error = %err,
                "card rejected"
            ),
        }

        result
    }

    fn run_checks(
        &self,
        card_owner: &str,
        card_number: &str,
        issue_date: &str,
        cvc: &str,
    ) -> Result<CardNetwork, ValidationError> {
        require(card_owner, Field::CardOwner)?;
        check_cardholder_name(card_owner, self.config.name_policy)?;

        require(cvc, Field::Cvc)?;

        require(card_number, Field::CardNumber)?;
        let network = classify_network(card_number);
        if !network.is_known() {
            return Err(ValidationError::UnrecognizedNetwork);
        }
        tracing::trace!(card = %mask_number(card_number), %network, "network classified");

        check_checksum(card_number)?;
        check_cvv(card_number, cvc)?;

        require(issue_date, Field::IssueDate)?;
        let expiry = check_expiry(issue_date, &self.clock, self.config.expiry_window_years)?;
        tracing::trace!(%expiry, "expiry accepted");

        Ok(network)
    }
}

/// Fails with [`ValidationError::MissingField`] if `value` is empty or only
/// whitespace.
fn require(value: &str, field: Field) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(())
    }
}
