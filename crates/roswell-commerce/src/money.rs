//! Price type for product amounts.
//!
//! The storefront runs in a single currency, so a price is just a decimal
//! amount. Amounts use `rust_decimal` to avoid the floating-point drift that
//! plagues monetary sums, but travel over the wire as plain JSON numbers
//! because that is how the hosted table stores them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Symbol shown in front of every amount.
pub const CURRENCY_SYMBOL: &str = "$";

/// A non-currency-tagged decimal amount.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    /// Create a price from a decimal amount.
    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole number of units.
    ///
    /// ```
    /// use roswell_commerce::money::Price;
    /// let price = Price::from_units(89999);
    /// assert_eq!(price.display(), "$89.999");
    /// ```
    pub fn from_units(units: i64) -> Self {
        Self(Decimal::from(units))
    }

    /// A zero amount.
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Get the underlying decimal.
    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    /// Add another price, returning None on overflow.
    pub fn checked_add(&self, other: &Price) -> Option<Price> {
        self.0.checked_add(other.0).map(Price)
    }

    /// Multiply by a quantity, returning None on overflow.
    pub fn checked_mul(&self, quantity: i64) -> Option<Price> {
        self.0.checked_mul(Decimal::from(quantity)).map(Price)
    }

    /// Sum an iterator of prices, returning None on overflow.
    pub fn try_sum<'a>(mut iter: impl Iterator<Item = &'a Price>) -> Option<Price> {
        iter.try_fold(Price::zero(), |acc, p| acc.checked_add(p))
    }

    /// Format as the storefront shows it (e.g., "$89.999", "$1.234,5").
    ///
    /// Thousands are grouped with `.` and decimals use `,`, at most two
    /// fraction digits, trailing zeros dropped.
    pub fn display(&self) -> String {
        format!("{}{}", CURRENCY_SYMBOL, self.display_amount())
    }

    /// Format without the symbol (e.g., "89.999").
    pub fn display_amount(&self) -> String {
        let rounded = self.0.round_dp(2).normalize();
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        let plain = rounded.abs().to_string();
        let (int_part, frac_part) = match plain.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (plain.as_str(), None),
        };

        let mut out = format!("{}{}", sign, group_thousands(int_part));
        if let Some(frac) = frac_part {
            out.push(',');
            out.push_str(frac);
        }
        out
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl FromStr for Price {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim()).map(Price)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(Price::from_units(89999).display(), "$89.999");
        assert_eq!(Price::from_units(1_000_000).display(), "$1.000.000");
        assert_eq!(Price::from_units(350).display(), "$350");
        assert_eq!(Price::zero().display(), "$0");
    }

    #[test]
    fn test_display_decimals() {
        let price: Price = "1234.50".parse().unwrap();
        assert_eq!(price.display(), "$1.234,5");

        let price: Price = "10.999".parse().unwrap();
        assert_eq!(price.display_amount(), "11");
    }

    #[test]
    fn test_checked_arithmetic() {
        let price = Price::from_units(100);
        assert_eq!(price.checked_mul(3), Some(Price::from_units(300)));
        assert_eq!(
            price.checked_add(&Price::from_units(50)),
            Some(Price::from_units(150))
        );
        assert_eq!(Price::new(Decimal::MAX).checked_mul(2), None);
    }

    #[test]
    fn test_try_sum() {
        let prices = [Price::from_units(200), Price::from_units(150)];
        assert_eq!(Price::try_sum(prices.iter()), Some(Price::from_units(350)));
    }

    #[test]
    fn test_sign_checks() {
        assert!(Price::from_units(-1).is_negative());
        assert!(!Price::zero().is_negative());
        assert!(!Price::zero().is_positive());
        assert!(Price::from_units(1).is_positive());
    }

    #[test]
    fn test_json_number_round_trip() {
        let price: Price = serde_json::from_str("89999").unwrap();
        assert_eq!(price, Price::from_units(89999));

        let json = serde_json::to_string(&Price::from_units(34999)).unwrap();
        assert_eq!(json, "34999.0");
    }
}
