//! Amount type for handling non-negative monetary values.
//!
//! This module provides the `Amount` type which wraps `Decimal` and handles parsing values that
//! may or may not include a dollar sign and commas. Amounts are always non-negative: whether a
//! transaction adds to or subtracts from the balance is decided by its `TransactionKind`.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

/// Represents a quantity of money, in currency units.
///
/// Two amounts are equal when their values are numerically equal, so `50` and `50.00` compare
/// equal.
///
/// # Examples
///
/// ```
/// # use expense_tracker::model::Amount;
/// # use std::str::FromStr;
/// let a = Amount::from_str("$1,950.00").unwrap();
/// let b = Amount::from_str("1950").unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.to_string(), "$1,950.00");
/// ```
///
/// Negative values are refused, as are values with more significant digits than a stored JSON
/// number keeps:
/// ```
/// # use expense_tracker::model::Amount;
/// # use std::str::FromStr;
/// assert!(Amount::from_str("-50").is_err());
/// assert!(Amount::from_str("1234567890.123456789").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(Decimal);

/// The most significant digits an amount may carry. Any decimal this precise survives being
/// stored as a JSON number and read back.
pub const MAX_SIGNIFICANT_DIGITS: u32 = 15;

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    /// Creates a new `Amount`, refusing negative values and values with more than
    /// `MAX_SIGNIFICANT_DIGITS` significant digits.
    pub fn new(value: Decimal) -> Result<Self, AmountError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(AmountError::Negative(value.to_string()));
        }
        if significant_digits(value) > MAX_SIGNIFICANT_DIGITS {
            return Err(AmountError::TooPrecise(value.to_string()));
        }
        // Folds `-0` into `0`.
        Ok(Self(value.abs()))
    }

    /// Returns the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// The absolute difference between two amounts. Always representable as an `Amount`.
    pub fn abs_diff(self, other: Amount) -> Amount {
        Amount((self.0 - other.0).abs())
    }

    /// Formats the amount with thousands separators and two decimal places, prefixed with
    /// `symbol`, e.g. `$1,950.00`.
    pub fn display_with(&self, symbol: &str) -> String {
        let rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let fixed = format!("{rounded:.2}");
        let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
        format!("{symbol}{}.{cents}", group_thousands(whole))
    }
}

/// Counts the digits of `value` once trailing zeros are dropped, so `1200.50` has five.
fn significant_digits(value: Decimal) -> u32 {
    let mantissa = value.normalize().mantissa().unsigned_abs();
    mantissa.checked_ilog10().map_or(0, |log| log + 1)
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// An error that can occur when parsing or constructing an `Amount`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AmountError {
    #[error("an amount is required")]
    Empty,
    #[error("'{0}' is not a valid amount: {1}")]
    Invalid(String, String),
    #[error("amounts cannot be negative, got {0}")]
    Negative(String),
    #[error("{0} is not a finite number")]
    NotFinite(f64),
    #[error("{0} is too large or too precise, amounts keep at most 15 significant digits")]
    TooPrecise(String),
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(AmountError::Empty);
        }

        // Strip an optional leading dollar sign and thousands separators.
        let without_dollar = trimmed.strip_prefix('$').unwrap_or(trimmed);
        let without_commas = without_dollar.replace(',', "");

        let value = Decimal::from_str(&without_commas)
            .map_err(|e| AmountError::Invalid(trimmed.to_string(), e.to_string()))?;
        Amount::new(value)
    }
}

impl TryFrom<f64> for Amount {
    type Error = AmountError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            return Err(AmountError::NotFinite(value));
        }
        // The shortest round-trip representation of the float keeps `12.34` as `12.34` rather
        // than its exact binary expansion. Digits past what a float holds are noise.
        let text = value.to_string();
        let parsed = Decimal::from_str(&text)
            .map_err(|e| AmountError::Invalid(text.clone(), e.to_string()))?;
        let rounded = parsed
            .round_sf(MAX_SIGNIFICANT_DIGITS)
            .ok_or_else(|| AmountError::TooPrecise(text))?;
        Amount::new(rounded)
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_with("$"))
    }
}

impl Add for Amount {
    type Output = Amount;

    /// Saturates at `Decimal::MAX` rather than overflowing.
    fn add(self, rhs: Self) -> Self::Output {
        Amount(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Stored lists keep amounts as plain JSON numbers. Parsing the decimal text gives the
        // nearest float, which reads back as the same decimal for any amount `new` accepts.
        let text = self.0.to_string();
        match f64::from_str(&text) {
            Ok(f) if f.is_finite() => serializer.serialize_f64(f),
            _ => Err(serde::ser::Error::custom(format!(
                "amount {text} cannot be represented as a number"
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(AmountVisitor)
    }
}

struct AmountVisitor;

impl Visitor<'_> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative number or a numeric string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Amount::new(Decimal::from(v)).map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Amount::new(Decimal::from(v)).map_err(E::custom)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Amount::try_from(v).map_err(E::custom)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Amount::from_str(v).map_err(E::custom)
    }
}
