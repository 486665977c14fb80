//! Card network classification using BIN/IIN patterns.
//!
//! The leading digits of a card number (the BIN, Bank Identification Number)
//! together with its length identify the issuing network. Each supported
//! network is described by a [`NetworkPattern`]: a network tag and a regular
//! expression that must match the *entire* digit string.
//!
//! | Network | Prefix | Length | CVV |
//! |---------|--------|--------|-----|
//! | MasterCard | 51-55, 2221-2720 | 16 | 3 |
//! | Visa | 4 | 13, 16 | 3 |
//! | American Express | 34, 37 | 15 | 4 |
//!
//! The pattern table is a `static` array and the compiled expressions are built
//! once on first use, so classification is safe to call from any number of
//! threads without locking.

use crate::format::strip_non_digits;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported card networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CardNetwork {
    /// No supported network pattern matched.
    #[default]
    Unknown,
    /// MasterCard - Prefix 51-55, 2221-2720, length 16
    MasterCard,
    /// Visa - Prefix 4, lengths 13, 16
    Visa,
    /// American Express - Prefix 34, 37, length 15
    AmericanExpress,
}

impl CardNetwork {
    /// Returns the identifier of the network, e.g. `"AmericanExpress"`.
    ///
    /// This is also the `Display` form and the value returned by the HTTP
    /// endpoint on success.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::MasterCard => "MasterCard",
            Self::Visa => "Visa",
            Self::AmericanExpress => "AmericanExpress",
        }
    }

    /// Returns a human-readable name, e.g. `"American Express"`.
    #[inline]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::MasterCard => "Mastercard",
            Self::Visa => "Visa",
            Self::AmericanExpress => "American Express",
        }
    }

    /// Returns the CVV length the network requires.
    ///
    /// American Express prints a 4 digit code on the front; every other card
    /// (including unrecognized ones) uses 3 digits.
    #[inline]
    pub const fn cvv_length(&self) -> usize {
        match self {
            Self::AmericanExpress => 4,
            _ => 3,
        }
    }

    /// Returns true for every network except [`CardNetwork::Unknown`].
    #[inline]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for CardNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A network tag paired with the expression its card numbers must match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkPattern {
    network: CardNetwork,
    pattern: &'static str,
}

impl NetworkPattern {
    /// The network this pattern identifies.
    #[inline]
    pub const fn network(&self) -> CardNetwork {
        self.network
    }

    /// The regular expression source.
    #[inline]
    pub const fn pattern(&self) -> &'static str {
        self.pattern
    }

    /// Returns true if `digits` as a whole matches this pattern.
    ///
    /// `digits` is expected to be already stripped of separators.
    pub fn is_match(&self, digits: &str) -> bool {
        COMPILED_PATTERNS
            .iter()
            .find(|(network, _)| *network == self.network)
            .is_some_and(|(_, regex)| regex.is_match(digits))
    }

    /// Looks up the pattern for `network`.
    ///
    /// Returns `None` for [`CardNetwork::Unknown`].
    pub fn for_network(network: CardNetwork) -> Option<&'static NetworkPattern> {
        NETWORK_PATTERNS.iter().find(|p| p.network == network)
    }
}

/// Network patterns in priority order. Classification returns the first match.
pub static NETWORK_PATTERNS: [NetworkPattern; 3] = [
    NetworkPattern {
        network: CardNetwork::MasterCard,
        pattern: r"^5[1-5][0-9]{14}$|^2(?:2(?:2[1-9]|[3-9][0-9])|[3-6][0-9][0-9]|7(?:[01][0-9]|20))[0-9]{12}$",
    },
    NetworkPattern {
        network: CardNetwork::Visa,
        pattern: r"^4[0-9]{12}(?:[0-9]{3})?$",
    },
    NetworkPattern {
        network: CardNetwork::AmericanExpress,
        pattern: r"^3[47][0-9]{13}$",
    },
];

static COMPILED_PATTERNS: Lazy<Vec<(CardNetwork, Regex)>> = Lazy::new(|| {
    NETWORK_PATTERNS
        .iter()
        .map(|p| {
            let regex = Regex::new(p.pattern).expect("network patterns are valid expressions");
            (p.network, regex)
        })
        .collect()
});

/// Classifies a card number into its network.
///
/// All non-digit characters are removed first, so formatted input such as
/// `"4242 4242 4242 4242"` is accepted.
///
/// # Example
///
/// ```
/// use cardcheck::network::classify_network;
/// use cardcheck::CardNetwork;
///
/// assert_eq!(classify_network("5555 5555 5555 4444"), CardNetwork::MasterCard);
/// assert_eq!(classify_network("4242-4242-4242-4242"), CardNetwork::Visa);
/// assert_eq!(classify_network("3782 822463 10005"), CardNetwork::AmericanExpress);
/// assert_eq!(classify_network("6011111111111117"), CardNetwork::Unknown);
/// ```
pub fn classify_network(input: &str) -> CardNetwork {
    classify_digits(&strip_non_digits(input))
}

/// Classifies an already stripped digit string.
pub fn classify_digits(digits: &str) -> CardNetwork {
    NETWORK_PATTERNS
        .iter()
        .find(|p| p.is_match(digits))
        .map_or(CardNetwork::Unknown, NetworkPattern::network)
}

/// Returns true if the card number is an American Express number.
///
/// Only the American Express pattern is consulted; this is what decides the
/// CVV length.
#[inline]
pub fn is_american_express(digits: &str) -> bool {
    NetworkPattern::for_network(CardNetwork::AmericanExpress).is_some_and(|p| p.is_match(digits))
}
