//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) so that group totals are exact
//! sums of their items. Provides safe arithmetic operations and parsing of the
//! decimal strings the backend sends.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use crate::display::currency::CurrencyFormat;

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Largest magnitude a single backend record may carry (100 billion units)
    pub const RECORD_LIMIT: Money = Money(10_000_000_000_000);

    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use carteira_cli::models::Money;
    /// let amount = Money::from_cents(1050); // 10,50 MTn
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole units and cents
    pub const fn from_units_cents(units: i64, cents: i64) -> Self {
        Self(units * 100 + cents)
    }

    /// Create a Money amount from a float, rounding half away from zero to cents
    ///
    /// Returns `None` for NaN and infinities.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let cents = (value * 100.0).round();
        if cents.abs() >= i64::MAX as f64 {
            return None;
        }
        Some(Self(cents as i64))
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Get the amount as a float, for ratios and chart values
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Plain decimal rendering with a dot and two places ("1234.50")
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.units().abs(), self.cents_part())
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Whether the amount is too large to come from a single record
    pub const fn exceeds_record_limit(&self) -> bool {
        self.0.unsigned_abs() > Self::RECORD_LIMIT.0.unsigned_abs()
    }

    /// Add, clamping at the bounds of the representation
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Parse a money amount from a decimal string
    ///
    /// Accepts "1500", "1500.5", "1500,50", "-3.20" and "12.345,67". The last
    /// `.` or `,` is the decimal separator; earlier ones are digit grouping.
    /// A third decimal digit rounds half away from zero.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let original = s;
        let s = s.trim();
        let invalid = || MoneyParseError::InvalidFormat(original.to_string());

        let (negative, s) = match s.strip_prefix('-') {
            Some(stripped) => (true, stripped.trim_start()),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };

        let (int_part, frac_part) = match s.rfind(|c| c == '.' || c == ',') {
            Some(pos) => (&s[..pos], &s[pos + 1..]),
            None => (s, ""),
        };

        let int_digits: String = int_part
            .chars()
            .filter(|c| !matches!(c, '.' | ',' | ' ' | '\u{a0}'))
            .collect();

        if int_digits.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }
        if !int_digits.chars().all(|c| c.is_ascii_digit())
            || !frac_part.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        let units: i64 = if int_digits.is_empty() {
            0
        } else {
            int_digits.parse().map_err(|_| invalid())?
        };

        let digits: Vec<i64> = frac_part
            .chars()
            .filter_map(|c| c.to_digit(10).map(i64::from))
            .collect();
        let mut cents =
            digits.first().copied().unwrap_or(0) * 10 + digits.get(1).copied().unwrap_or(0);
        if digits.get(2).copied().unwrap_or(0) >= 5 {
            cents += 1;
        }

        let total = units
            .checked_mul(100)
            .and_then(|u| u.checked_add(cents))
            .ok_or_else(invalid)?;

        Ok(Self(if negative { -total } else { total }))
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&CurrencyFormat::default().format_money(*self))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_string() {
        assert_eq!(Money::from_cents(123450).to_decimal_string(), "1234.50");
        assert_eq!(Money::from_cents(-5).to_decimal_string(), "-0.05");
        assert_eq!(Money::zero().to_decimal_string(), "0.00");
    }

    #[test]
    fn test_from_cents() {
        let m = Money::from_cents(1050);
        assert_eq!(m.cents(), 1050);
        assert_eq!(m.units(), 10);
        assert_eq!(m.cents_part(), 50);
        assert_eq!(Money::from_units_cents(10, 50), m);
    }

    #[test]
    fn test_from_f64() {
        assert_eq!(Money::from_f64(150.0).unwrap().cents(), 15000);
        assert_eq!(Money::from_f64(0.1 + 0.2).unwrap().cents(), 30);
        assert_eq!(Money::from_f64(-2.005).unwrap().cents(), -200);
        assert_eq!(Money::from_f64(10.125).unwrap().cents(), 1013);
        assert!(Money::from_f64(f64::NAN).is_none());
        assert!(Money::from_f64(f64::INFINITY).is_none());
    }

    #[test]
    fn test_display_uses_metical() {
        assert_eq!(Money::from_cents(1050).to_string(), "10,50\u{a0}MTn");
        assert_eq!(Money::zero().to_string(), "0,00\u{a0}MTn");
    }

    #[test]
    fn test_record_limit() {
        assert!(!Money::RECORD_LIMIT.exceeds_record_limit());
        assert!(!(-Money::RECORD_LIMIT).exceeds_record_limit());
        assert!(Money::from_cents(10_000_000_000_001).exceeds_record_limit());
        assert!(Money::from_cents(i64::MIN).exceeds_record_limit());
    }

    #[test]
    fn test_saturating_add() {
        let big = Money::from_cents(i64::MAX - 1);
        assert_eq!(big.saturating_add(Money::from_cents(5)).cents(), i64::MAX);
        assert_eq!(
            Money::from_cents(100).saturating_add(Money::from_cents(-30)),
            Money::from_cents(70)
        );
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((b - a).cents(), -500);
        assert_eq!((-a).cents(), -1000);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("10,50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("-10.50").unwrap().cents(), -1050);
        assert_eq!(Money::parse("10").unwrap().cents(), 1000);
        assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
        assert_eq!(Money::parse("0.05").unwrap().cents(), 5);
        assert_eq!(Money::parse(".5").unwrap().cents(), 50);
        assert_eq!(Money::parse("12.345,67").unwrap().cents(), 1_234_567);
        assert_eq!(Money::parse("1500.005").unwrap().cents(), 150_001);
        assert_eq!(Money::parse("1500.004").unwrap().cents(), 150_000);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Money::parse("").is_err());
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("12a.00").is_err());
        assert!(Money::parse("-").is_err());
        assert!(Money::parse(".").is_err());
    }

    #[test]
    fn test_sum() {
        let amounts = vec![
            Money::from_cents(100),
            Money::from_cents(200),
            Money::from_cents(300),
        ];
        let by_ref: Money = amounts.iter().sum();
        let total: Money = amounts.into_iter().sum();
        assert_eq!(total.cents(), 600);
        assert_eq!(by_ref, total);
    }

    #[test]
    fn test_serialization() {
        let m = Money::from_cents(1050);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "1050");

        let deserialized: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, deserialized);
    }
}
