//! Error types for payment card validation.
//!
//! The boolean predicates in [`crate::luhn`], [`crate::cvv`], [`crate::expiry`]
//! and [`crate::name`] never fail. Their `check_*` counterparts and the
//! [`Validator`](crate::Validator) report *why* an input was rejected using
//! [`ValidationError`]. Turning these into user-facing messages is left to the
//! caller (see the `cardcheck-server` binary).

use crate::CardNetwork;
use std::fmt;
use thiserror::Error;

/// The input field a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Cardholder name.
    CardOwner,
    /// Card number (PAN).
    CardNumber,
    /// Expiry date, `MM/YYYY`.
    IssueDate,
    /// Card verification code.
    Cvc,
}

impl Field {
    /// Returns the field name as used in request parameters.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CardOwner => "cardOwner",
            Self::CardNumber => "creditCardNumber",
            Self::IssueDate => "issueDate",
            Self::Cvc => "CVC",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reasons a payment card input can be rejected.
///
/// Each variant corresponds to exactly one check, so callers can map variants
/// one-to-one onto responses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field was empty or contained only whitespace.
    #[error("{0} must be filled in")]
    MissingField(Field),

    /// The field does not have the expected shape (non-digits where digits are
    /// required, or a date that does not split into `MM/YYYY`).
    #[error("{0} has an invalid format")]
    InvalidFormat(Field),

    /// The card number does not match any supported network pattern.
    #[error("card number does not belong to a supported network")]
    UnrecognizedNetwork,

    /// The Luhn checksum of the card number failed.
    #[error("card number failed the Luhn checksum")]
    ChecksumFailed,

    /// The CVV does not have the length required by the card's network.
    #[error("{network} cards require a {expected} digit CVV, got {actual}")]
    CvvLengthMismatch {
        /// The network the card number was classified as for CVV purposes.
        network: CardNetwork,
        /// Required number of digits.
        expected: usize,
        /// Number of digits supplied.
        actual: usize,
    },

    /// The expiry date is already past or too far in the future.
    #[error("expiry date is outside the accepted window")]
    ExpiryOutOfRange,

    /// The cardholder name contains characters other than ASCII letters.
    #[error("cardholder name may only contain letters separated by single spaces")]
    InvalidNameCharacters,
}

impl ValidationError {
    /// Returns the field this error concerns.
    pub const fn field(&self) -> Field {
        match self {
            Self::MissingField(field) | Self::InvalidFormat(field) => *field,
            Self::UnrecognizedNetwork | Self::ChecksumFailed => Field::CardNumber,
            Self::CvvLengthMismatch { .. } => Field::Cvc,
            Self::ExpiryOutOfRange => Field::IssueDate,
            Self::InvalidNameCharacters => Field::CardOwner,
        }
    }
}
