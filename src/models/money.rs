//! Money type for representing expense amounts
//!
//! Internally stores amounts in cents (i64) so that sums over thousands of
//! expenses never drift; rounding to two decimals happens only on parse and
//! when dividing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Largest amount accepted from user input or imports (one billion units)
    pub const MAX: Money = Money(100_000_000_000);

    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use budgetmate::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// assert_eq!(amount.to_string(), "10.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole units (no cents)
    pub const fn from_units(units: i64) -> Self {
        Self(units * 100)
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
        Self(self.0.saturating_abs())
    }

    /// Whether the magnitude is within [`Money::MAX`]
    pub const fn in_range(&self) -> bool {
        self.0.unsigned_abs() <= Self::MAX.0.unsigned_abs()
    }

    /// Multiply by a whole count (e.g. a daily budget times days in a month)
    ///
    /// Saturates instead of overflowing.
    pub const fn times(&self, count: i64) -> Self {
        Self(self.0.saturating_mul(count))
    }

    /// Divide by a whole count, rounding half away from zero to the nearest cent
    ///
    /// Division by zero yields zero.
    pub fn div_round(&self, divisor: i64) -> Self {
        if divisor == 0 {
            return Self::zero();
        }
        Self::from_wide(div_round_i128(i128::from(self.0), i128::from(divisor)))
    }

    /// Scale by `numerator / denominator`, rounding once at the end
    ///
    /// Used for projections (`sum * days_in_month / days_elapsed`) so the
    /// intermediate average is never rounded on its own.
    pub fn scale(&self, numerator: i64, denominator: i64) -> Self {
        if denominator == 0 {
            return Self::zero();
        }
        Self::from_wide(div_round_i128(
            i128::from(self.0) * i128::from(numerator),
            i128::from(denominator),
        ))
    }

    fn from_wide(cents: i128) -> Self {
        Self(cents.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64)
    }

    /// Amount as a floating-point number of units, for chart sinks
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Parse a money amount from a string
    ///
    /// Accepts "10.50", "10,50", "-3.2", "€10.50", "$10" and "10". Digits
    /// beyond the second decimal are rounded half-up. Amounts larger than
    /// [`Money::MAX`] are rejected.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let invalid = || MoneyParseError::InvalidFormat(s.trim().to_string());
        let trimmed = s.trim();

        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };

        let rest = rest
            .strip_prefix('€')
            .or_else(|| rest.strip_prefix('$'))
            .unwrap_or(rest)
            .trim();

        // A single comma is treated as the decimal separator
        let normalized = rest.replacen(',', ".", 1);
        let (whole, fraction) = match normalized.split_once('.') {
            Some((w, f)) => (w, f),
            None => (normalized.as_str(), ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if !all_digits(whole) || !all_digits(fraction) {
            return Err(invalid());
        }

        let units: i64 = if whole.is_empty() {
            0
        } else {
            whole
                .parse()
                .map_err(|_| MoneyParseError::OutOfRange(trimmed.to_string()))?
        };

        let mut digits = fraction.chars().map(|c| c as i64 - '0' as i64);
        let tenths = digits.next().unwrap_or(0);
        let hundredths = digits.next().unwrap_or(0);
        let round_up = digits.next().is_some_and(|d| d >= 5);

        let cents = units
            .checked_mul(100)
            .and_then(|c| c.checked_add(tenths * 10 + hundredths + i64::from(round_up)))
            .ok_or_else(|| MoneyParseError::OutOfRange(trimmed.to_string()))?;

        let amount = Self(if negative { -cents } else { cents });
        if !amount.in_range() {
            return Err(MoneyParseError::OutOfRange(trimmed.to_string()));
        }
        Ok(amount)
    }

    /// Format with a currency symbol appended, e.g. "10.50 €"
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        format!("{} {}", self, symbol)
    }
}

fn div_round_i128(value: i128, divisor: i128) -> i128 {
    let quotient = value / divisor;
    let remainder = value % divisor;
    if remainder.abs() * 2 >= divisor.abs() {
        if (value < 0) != (divisor < 0) {
            quotient - 1
        } else {
            quotient + 1
        }
    } else {
        quotient
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = if self.is_negative() {
            format!("-{}.{:02}", self.units().abs(), self.cents_part())
        } else {
            format!("{}.{:02}", self.units(), self.cents_part())
        };
        f.pad(&text)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    OutOfRange(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid amount: '{}'", s),
            MoneyParseError::OutOfRange(s) => {
                write!(f, "Amount '{}' exceeds the limit of {}", s, Money::MAX)
            }
        }
    }
}

impl std::error::Error for MoneyParseError {}

/// `serialize_with` helpers that write amounts as decimal units (`10.5`)
/// instead of stored cents, for report and chart output
pub mod decimal {
    use serde::Serializer;

    use super::Money;

    pub fn serialize<S: Serializer>(money: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(money.as_f64())
    }

    pub mod option {
        use serde::Serializer;

        use super::Money;

        pub fn serialize<S: Serializer>(
            money: &Option<Money>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match money {
                Some(m) => serializer.serialize_some(&m.as_f64()),
                None => serializer.serialize_none(),
            }
        }
    }

    pub mod seq {
        use serde::Serializer;

        use super::Money;

        pub fn serialize<S: Serializer>(
            values: &[Money],
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            serializer.collect_seq(values.iter().map(Money::as_f64))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let m = Money::from_cents(1050);
        assert_eq!(m.cents(), 1050);
        assert_eq!(m.units(), 10);
        assert_eq!(m.cents_part(), 50);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1050).to_string(), "10.50");
        assert_eq!(Money::from_cents(0).to_string(), "0.00");
        assert_eq!(Money::from_cents(-1050).to_string(), "-10.50");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(format!("{:>8}", Money::from_cents(5)), "    0.05");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("10,50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("€10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("-10.50").unwrap().cents(), -1050);
        assert_eq!(Money::parse("10").unwrap().cents(), 1000);
        assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
        assert_eq!(Money::parse(".5").unwrap().cents(), 50);
        assert_eq!(Money::parse("0.055").unwrap().cents(), 6);
        assert_eq!(Money::parse("0.054").unwrap().cents(), 5);
    }

    #[test]
    fn test_parse_rejects_non_finite() {
        assert!(Money::parse("NaN").is_err());
        assert!(Money::parse("inf").is_err());
        assert!(Money::parse("").is_err());
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("1.2.3").is_err());
    }

    #[test]
    fn test_parse_rejects_huge_amounts() {
        assert_eq!(Money::parse("1000000000").unwrap(), Money::MAX);
        assert!(matches!(
            Money::parse("1000000000.01"),
            Err(MoneyParseError::OutOfRange(_))
        ));
        assert!(matches!(
            Money::parse("90000000000000000"),
            Err(MoneyParseError::OutOfRange(_))
        ));
        assert!(Money::parse("-99999999999999999999").is_err());
    }

    #[test]
    fn test_arithmetic_saturates() {
        let big = Money::from_cents(i64::MAX - 1);
        assert_eq!((big + big).cents(), i64::MAX);
        assert_eq!([big, big, big].iter().sum::<Money>().cents(), i64::MAX);
        assert_eq!(big.times(31).cents(), i64::MAX);
        assert_eq!(big.scale(31, 15).cents(), i64::MAX);
        assert_eq!((-big - big).cents(), i64::MIN);
    }

    #[test]
    fn test_times_and_division() {
        let daily = Money::from_units(12);
        assert_eq!(daily.times(31), Money::from_units(372));
        assert_eq!(Money::from_cents(1000).div_round(3).cents(), 333);
        assert_eq!(Money::from_cents(200).div_round(3).cents(), 67);
        assert_eq!(Money::from_cents(100).div_round(0), Money::zero());
    }

    #[test]
    fn test_scale_rounds_once() {
        // 35.00 over 15 days projected to 31 days = 72.333..
        let projected = Money::from_units(35).scale(31, 15);
        assert_eq!(projected.cents(), 7233);
    }

    #[test]
    fn test_sum() {
        let amounts = vec![
            Money::from_cents(10),
            Money::from_cents(20),
            Money::from_cents(30),
        ];
        let total: Money = amounts.iter().sum();
        assert_eq!(total.cents(), 60);
    }

    #[test]
    fn test_serialization() {
        let m = Money::from_cents(1050);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "1050");

        let deserialized: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, deserialized);
    }

    #[test]
    fn test_decimal_serialization() {
        #[derive(Serialize)]
        struct Row {
            #[serde(serialize_with = "decimal::serialize")]
            total: Money,
            #[serde(serialize_with = "decimal::option::serialize")]
            limit: Option<Money>,
            #[serde(serialize_with = "decimal::seq::serialize")]
            values: Vec<Money>,
        }

        let row = Row {
            total: Money::from_cents(1050),
            limit: None,
            values: vec![Money::from_units(3), Money::from_cents(-25)],
        };
        assert_eq!(
            serde_json::to_string(&row).unwrap(),
            r#"{"total":10.5,"limit":null,"values":[3.0,-0.25]}"#
        );
    }
}
