//! # Money Module
//!
//! Provides the `Money` type for beer prices.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  As a float:    12.34 is stored as 12.339999999999999857891452...      │
//! │  As cents:      1234, exactly                                           │
//! │                                                                         │
//! │  Prices cross the API boundary as decimal TEXT ("12.34") and live in   │
//! │  the store and in memory as integer cents. No float ever touches them. │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use brewery_core::money::Money;
//!
//! let price: Money = "12.5".parse().unwrap();
//! assert_eq!(price.cents(), 1250);
//! assert_eq!(price.to_string(), "12.50");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// Serialized as decimal text with exactly two fraction digits, so the JSON
/// form of `Money::from_cents(1250)` is `"12.50"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// ## Example
    /// ```rust
    /// use brewery_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(12, 34).cents(), 1234);
    /// ```
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

// =============================================================================
// Decimal Text Parsing
// =============================================================================

/// Parses decimal text such as `"12"`, `"12.5"` or `"12.50"`.
///
/// ## Rules
/// ```text
/// "12.50"   → 1250      "-3.10"  → -310  (sign is kept, validation rejects it)
/// "12.5"    → 1250      "12."    → error (dangling point)
/// "12"      → 1200      "12.345" → error (sub-cent precision)
/// ".5"      → error     "1e3"    → error (not plain decimal)
/// ```
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text.is_empty() {
            return Err(ValidationError::required("price"));
        }

        let (negative, unsigned) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };

        let (major_text, minor_text) = match unsigned.split_once('.') {
            Some((major, minor)) => (major, Some(minor)),
            None => (unsigned, None),
        };

        if major_text.is_empty() || !major_text.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::invalid_format(
                "price",
                "must be a plain decimal number",
            ));
        }

        let minor = match minor_text {
            None => 0,
            Some(digits) => {
                if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
                    return Err(ValidationError::invalid_format(
                        "price",
                        "must be a plain decimal number",
                    ));
                }
                if digits.len() > 2 {
                    return Err(ValidationError::invalid_format(
                        "price",
                        "must have at most two decimal places",
                    ));
                }
                let value: i64 = digits.parse().map_err(|_| {
                    ValidationError::invalid_format("price", "must be a plain decimal number")
                })?;
                if digits.len() == 1 {
                    value * 10
                } else {
                    value
                }
            }
        };

        let out_of_range =
            || ValidationError::invalid_format("price", "is too large to represent");
        let major: i64 = major_text.parse().map_err(|_| out_of_range())?;
        let cents = major
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor))
            .ok_or_else(out_of_range)?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

impl TryFrom<String> for Money {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Money> for String {
    fn from(money: Money) -> Self {
        money.to_string()
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain decimal text with two fraction digits and no currency symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
