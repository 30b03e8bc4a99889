//! Type-safe price representation using decimal arithmetic.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// A price with currency information.
///
/// Amounts are held as [`Decimal`] in the currency's major unit (rupees,
/// not paise), so arithmetic stays exact.
///
/// ## Examples
///
/// ```
/// use boutique_core::{CurrencyCode, Price};
///
/// let price = Price::from_major_units(3499, CurrencyCode::INR);
/// assert_eq!(price.display(), "₹3,499");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's major unit (e.g., rupees, not paise).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price from a whole number of major currency units.
    #[must_use]
    pub fn from_major_units(units: i64, currency_code: CurrencyCode) -> Self {
        Self {
            amount: Decimal::from(units),
            currency_code,
        }
    }

    /// Format for display with the currency symbol and locale grouping.
    ///
    /// INR groups the last three digits, then pairs (`₹1,23,456`); other
    /// currencies group by thousands. A fractional part is shown with two
    /// decimal places, whole amounts without any.
    #[must_use]
    pub fn display(&self) -> String {
        let whole = self.amount.trunc();
        let fraction = (self.amount - whole).abs();
        let digits = whole.abs().normalize().to_string();
        let grouped = match self.currency_code {
            CurrencyCode::INR => group_integer(&digits, 3, 2),
            _ => group_integer(&digits, 3, 3),
        };
        let sign = if self.amount.is_sign_negative() { "-" } else { "" };
        let symbol = self.currency_code.symbol();
        if fraction.is_zero() {
            format!("{sign}{symbol}{grouped}")
        } else {
            let cents = (fraction * Decimal::from(100)).round().to_u32().unwrap_or(0);
            format!("{sign}{symbol}{grouped}.{cents:02}")
        }
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    INR,
    USD,
    EUR,
    GBP,
}

impl CurrencyCode {
    /// The currency's display symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::INR => "₹",
            Self::USD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }
}

/// Group an unsigned digit string from the right: a tail group of
/// `tail_len`, then repeated groups of `group_len`.
fn group_integer(digits: &str, tail_len: usize, group_len: usize) -> String {
    if digits.len() <= tail_len {
        return digits.to_owned();
    }
    let (head, tail) = digits.split_at(digits.len() - tail_len);
    let mut groups = vec![tail.to_owned()];
    let mut rest = head;
    while rest.len() > group_len {
        let (h, t) = rest.split_at(rest.len() - group_len);
        groups.push(t.to_owned());
        rest = h;
    }
    groups.push(rest.to_owned());
    groups.reverse();
    groups.join(",")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn inr(units: i64) -> Price {
        Price::from_major_units(units, CurrencyCode::INR)
    }

    #[test]
    fn test_display_small_amounts_ungrouped() {
        assert_eq!(inr(0).display(), "₹0");
        assert_eq!(inr(999).display(), "₹999");
    }

    #[test]
    fn test_display_indian_grouping() {
        assert_eq!(inr(3499).display(), "₹3,499");
        assert_eq!(inr(12999).display(), "₹12,999");
        assert_eq!(inr(123_456).display(), "₹1,23,456");
        assert_eq!(inr(1_234_567).display(), "₹12,34,567");
        assert_eq!(inr(10_000_000).display(), "₹1,00,00,000");
    }

    #[test]
    fn test_display_western_grouping() {
        let price = Price::from_major_units(1_234_567, CurrencyCode::USD);
        assert_eq!(price.display(), "$1,234,567");
    }

    #[test]
    fn test_display_fractional_amount() {
        let price = Price::new(Decimal::new(349_950, 2), CurrencyCode::INR);
        assert_eq!(price.display(), "₹3,499.50");
    }

    #[test]
    fn test_display_whole_amount_with_scale() {
        // 3499.00 must not print trailing zeros
        let price = Price::new(Decimal::new(349_900, 2), CurrencyCode::INR);
        assert_eq!(price.display(), "₹3,499");
    }

    #[test]
    fn test_serde_roundtrip() {
        let price = inr(4999);
        let json = serde_json::to_string(&price).unwrap();
        let parsed: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, price);
    }
}
