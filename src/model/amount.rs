//! Amount type for revenue figures.
//!
//! Revenue sheets are hand-edited, so cells may carry thousands separators or a currency sign.
//! `Amount` wraps `Decimal` so that sums over many cells are exact.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

/// A revenue figure.
///
/// Equality and ordering are numeric, so `300` and `300.00` are the same amount.
///
/// # Examples
///
/// ```
/// # use team_revenue::model::Amount;
/// # use std::str::FromStr;
/// let a = Amount::from_str("1,250.50").unwrap();
/// let b = Amount::from_str("$1250.5").unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.to_string(), "1,250.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Returns the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn abs(&self) -> Amount {
        Amount(self.0.abs())
    }

    /// Adds `rhs`, returning `None` if the result is out of range.
    pub fn checked_add(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_add(rhs.0).map(Amount)
    }
}

/// An error that can occur when parsing a cell into an `Amount`.
pub struct AmountError {
    input: String,
    source: rust_decimal::Error,
}

impl Debug for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "AmountError({:?}, {:?})", self.input, self.source)
    }
}

impl Display for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a number: {}", self.input, self.source)
    }
}

impl std::error::Error for AmountError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    /// Parses `1250`, `1,250.50`, `$1,250.50` and `-$20`. A blank cell is zero.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(Amount::ZERO);
        }

        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let (prefixed, unsigned) = match unsigned.strip_prefix('$') {
            Some(rest) => (true, rest),
            None => (negative, unsigned),
        };
        let digits = unsigned.replace(',', "");

        // A sign is only allowed in front of the currency symbol.
        if prefixed && digits.starts_with(|c: char| c == '-' || c == '+') {
            return Err(AmountError {
                input: s.to_string(),
                source: rust_decimal::Error::ErrorString("unexpected sign".to_string()),
            });
        }

        let value = Decimal::from_str(&digits).map_err(|source| AmountError {
            input: s.to_string(),
            source,
        })?;
        Ok(Amount(if negative { -value } else { value }))
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let sign = if self.0.is_sign_negative() && !self.0.is_zero() {
            "-"
        } else {
            ""
        };
        let abs = self.0.abs().to_f64().unwrap_or_default();
        write!(f, "{sign}{}", format_num::format_num!(",.2", abs))
    }
}

/// Panics on overflow, like `Decimal`. A loaded `RevenueTable` is checked so that summing any of
/// its columns stays in range.
impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Self) -> Self::Output {
        Amount(self.0 + rhs.0)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Plain decimal text, no separators, so that nothing is lost to floating point.
        serializer.serialize_str(&self.0.normalize().to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Amount::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::new(value)
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Amount::new(Decimal::from(value))
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_plain() {
        let amount = Amount::from_str("1250").unwrap();
        assert_eq!(amount.value(), dec("1250"));
    }

    #[test]
    fn test_parse_with_commas() {
        let amount = Amount::from_str("1,234,567.89").unwrap();
        assert_eq!(amount.value(), dec("1234567.89"));
    }

    #[test]
    fn test_parse_with_dollar_sign() {
        let amount = Amount::from_str("$50.00").unwrap();
        assert_eq!(amount.value(), dec("50"));
    }

    #[test]
    fn test_parse_negative_with_dollar_sign() {
        let amount = Amount::from_str("-$1,000").unwrap();
        assert_eq!(amount.value(), dec("-1000"));
    }

    #[test]
    fn test_parse_double_negative() {
        assert!(Amount::from_str("--5").is_err());
        assert!(Amount::from_str("-$-5").is_err());
        assert!(Amount::from_str("$-5").is_err());
        assert!(Amount::from_str("-+5").is_err());
    }

    #[test]
    fn test_parse_leading_plus() {
        assert_eq!(Amount::from_str("+5").unwrap(), Amount::from(5));
    }

    #[test]
    fn test_checked_add() {
        let max = Amount::new(Decimal::MAX);
        assert_eq!(max.checked_add(Amount::from(1)), None);
        assert_eq!(
            Amount::from(2).checked_add(Amount::from(3)),
            Some(Amount::from(5))
        );
        assert_eq!(Amount::from(-7).abs(), Amount::from(7));
    }

    #[test]
    fn test_parse_blank_is_zero() {
        assert!(Amount::from_str("").unwrap().is_zero());
        assert!(Amount::from_str("   ").unwrap().is_zero());
    }

    #[test]
    fn test_parse_garbage() {
        let err = Amount::from_str("n/a").unwrap_err();
        assert!(err.to_string().contains("'n/a' is not a number"));
    }

    #[test]
    fn test_equality_is_numeric() {
        assert_eq!(Amount::from_str("300").unwrap(), Amount::from(300));
        assert_eq!(Amount::from_str("300.00").unwrap(), Amount::from(300));
    }

    #[test]
    fn test_display() {
        assert_eq!(Amount::from(0).to_string(), "0.00");
        assert_eq!(Amount::from(1500).to_string(), "1,500.00");
        assert_eq!(Amount::from(-1500).to_string(), "-1,500.00");
    }

    #[test]
    fn test_sum() {
        let amounts = vec![Amount::from(100), Amount::from(250), Amount::from(-50)];
        let total: Amount = amounts.iter().sum();
        assert_eq!(total, Amount::from(300));
        let empty: Vec<Amount> = Vec::new();
        assert_eq!(empty.into_iter().sum::<Amount>(), Amount::ZERO);
    }

    #[test]
    fn test_serialize() {
        let amount = Amount::from_str("1,250.50").unwrap();
        let json = serde_json::to_string(&amount).unwrap();
        assert_eq!(json, "\"1250.5\"");
    }

    #[test]
    fn test_deserialize() {
        let amount: Amount = serde_json::from_str("\"1,250.50\"").unwrap();
        assert_eq!(amount.value(), dec("1250.5"));
    }
}
