//! Card expiry date validation.
//!
//! Dates are given as `MM/YYYY` with a two digit month (`01`-`12`) and a four
//! digit year starting with `20`. A card is valid up to and including the last
//! second of its expiry month; the nominal expiry instant is the last day of
//! the month at 23:59:59.
//!
//! A date is accepted when that instant lies strictly between *now* and
//! *now + 3 years*.
//!
//! "Now" is supplied by a [`Clock`]. [`validate_expiry`] reads the system clock;
//! [`validate_expiry_at`] and [`check_expiry`] take the instant or clock
//! explicitly so results are reproducible.
//!
//! # Example
//!
//! ```
//! use cardcheck::expiry::{validate_expiry_at, parse_expiry};
//! use chrono::NaiveDate;
//!
//! let now = NaiveDate::from_ymd_opt(2021, 6, 1)
//!     .unwrap()
//!     .and_hms_opt(12, 0, 0)
//!     .unwrap();
//!
//! assert!(validate_expiry_at("11/2022", now));
//! assert!(!validate_expiry_at("11/2019", now));
//! assert!(!validate_expiry_at("13/2022", now));
//!
//! let expiry = parse_expiry("02/2024").unwrap();
//! assert_eq!(expiry.to_string(), "02/2024");
//! ```

use crate::error::{Field, ValidationError};
use chrono::{Datelike, Local, Months, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Default length of the acceptance window, in years.
pub const DEFAULT_WINDOW_YEARS: u32 = 3;

static MONTH_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(0[1-9]|1[0-2])$").expect("month pattern is valid"));

static YEAR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^20[0-9]{2}$").expect("year pattern is valid"));

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// Returns the current local date and time.
    fn now(&self) -> NaiveDateTime;
}

/// Reads the local system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock frozen at one instant. Used in tests and for replaying decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}

/// A parsed expiry month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExpiryDate {
    // Field order gives chronological ordering.
    year: u16,
    month: u8,
}

impl ExpiryDate {
    /// Creates a new expiry date.
    ///
    /// Returns `None` unless the month is 1-12 and the year is 2000-2099.
    pub fn new(month: u8, year: u16) -> Option<Self> {
        if !(1..=12).contains(&month) || !(2000..=2099).contains(&year) {
            return None;
        }
        Some(Self { year, month })
    }

    /// Returns the month (1-12).
    #[inline]
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Returns the four-digit year.
    #[inline]
    pub const fn year(&self) -> u16 {
        self.year
    }

    /// Returns the last day of the expiry month at 23:59:59.
    pub fn expires_at(&self) -> Option<NaiveDateTime> {
        last_day_of_month(self.year, self.month)?.and_hms_opt(23, 59, 59)
    }

    /// Returns true if the card has expired at `now`.
    pub fn is_expired_at(&self, now: NaiveDateTime) -> bool {
        self.expires_at().map_or(true, |expiry| expiry <= now)
    }

    /// Returns true if the expiry instant is strictly after `now` and strictly
    /// before `now` plus `window_years`.
    pub fn is_within_window(&self, now: NaiveDateTime, window_years: u32) -> bool {
        let Some(expiry) = self.expires_at() else {
            return false;
        };
        let Some(limit) = window_years
            .checked_mul(12)
            .and_then(|months| now.checked_add_months(Months::new(months)))
        else {
            return false;
        };

        expiry > now && expiry < limit
    }

    /// Returns the number of whole calendar months from `now` until the expiry
    /// month, or 0 if that month has passed.
    pub fn months_until_expiry(&self, now: NaiveDateTime) -> u32 {
        let expiry_months = u32::from(self.year) * 12 + u32::from(self.month);
        let current_months = u32::try_from(now.year()).unwrap_or(0) * 12 + now.month();
        expiry_months.saturating_sub(current_months)
    }
}

impl fmt::Display for ExpiryDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:04}", self.month, self.year)
    }
}

/// Returns the number of days in a month, accounting for leap years.
///
/// Returns `None` for a month outside 1-12.
pub fn days_in_month(year: u16, month: u8) -> Option<u32> {
    last_day_of_month(year, month).map(|date| date.day())
}

fn last_day_of_month(year: u16, month: u8) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year.into(), month.into(), 1)?
        .checked_add_months(Months::new(1))?
        .pred_opt()
}

/// Parses an `MM/YYYY` expiry date without checking it against the clock.
///
/// # Errors
///
/// [`ValidationError::InvalidFormat`] unless the input splits on `/` into
/// exactly a two digit month `01`-`12` and a year `20YY`.
pub fn parse_expiry(input: &str) -> Result<ExpiryDate, ValidationError> {
    let invalid = || ValidationError::InvalidFormat(Field::IssueDate);

    let parts: Vec<&str> = input.split('/').collect();
    let [month, year] = parts.as_slice() else {
        return Err(invalid());
    };

    if !MONTH_PATTERN.is_match(month) || !YEAR_PATTERN.is_match(year) {
        return Err(invalid());
    }

    let month: u8 = month.parse().map_err(|_| invalid())?;
    let year: u16 = year.parse().map_err(|_| invalid())?;

    ExpiryDate::new(month, year).ok_or_else(invalid)
}

/// Parses an expiry date and checks it against the acceptance window.
///
/// # Errors
///
/// - [`ValidationError::InvalidFormat`] if the input cannot be parsed.
/// - [`ValidationError::ExpiryOutOfRange`] if the card is expired at `now`
///   or expires too far in the future.
pub fn check_expiry_at(
    input: &str,
    now: NaiveDateTime,
    window_years: u32,
) -> Result<ExpiryDate, ValidationError> {
    let expiry = parse_expiry(input)?;

    if expiry.is_within_window(now, window_years) {
        Ok(expiry)
    } else {
        Err(ValidationError::ExpiryOutOfRange)
    }
}

/// Like [`check_expiry_at`], reading the current time from `clock`.
pub fn check_expiry<C: Clock + ?Sized>(
    input: &str,
    clock: &C,
    window_years: u32,
) -> Result<ExpiryDate, ValidationError> {
    check_expiry_at(input, clock.now(), window_years)
}

/// Validates an expiry date against the system clock with the default
/// three-year window.
#[inline]
pub fn validate_expiry(input: &str) -> bool {
    validate_expiry_at(input, SystemClock.now())
}

/// Validates an expiry date against `now` with the default three-year window.
#[inline]
pub fn validate_expiry_at(input: &str, now: NaiveDateTime) -> bool {
    check_expiry_at(input, now, DEFAULT_WINDOW_YEARS).is_ok()
}
