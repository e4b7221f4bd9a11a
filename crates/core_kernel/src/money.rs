//! Money types with precise decimal arithmetic
//!
//! Amounts are kept at full precision. Rounding to the currency's minor unit
//! is a display concern and always uses round-half-up (midpoint away from
//! zero), never banker's rounding.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Currency codes following ISO 4217
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    INR,
    USD,
    EUR,
    GBP,
    JPY,
    AUD,
    CAD,
    SGD,
    AED,
}

impl Currency {
    /// Returns the number of decimal places for this currency
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Returns the currency symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::INR => "₹",
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::GBP => "£",
            Currency::JPY => "¥",
            Currency::AUD => "A$",
            Currency::CAD => "C$",
            Currency::SGD => "S$",
            Currency::AED => "AED",
        }
    }

    /// Returns the prefix used on printed documents.
    ///
    /// Standard PDF fonts lack the rupee glyph, so INR prints as `Rs.`.
    pub fn document_symbol(&self) -> &'static str {
        match self {
            Currency::INR => "Rs.",
            other => other.symbol(),
        }
    }

    /// Returns the ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::INR => "INR",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
            Currency::AUD => "AUD",
            Currency::CAD => "CAD",
            Currency::SGD => "SGD",
            Currency::AED => "AED",
        }
    }

    /// Returns the digit grouping convention for this currency
    pub fn grouping(&self) -> DigitGrouping {
        match self {
            Currency::INR => DigitGrouping::Indian,
            _ => DigitGrouping::Western,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INR" => Ok(Currency::INR),
            "USD" => Ok(Currency::USD),
            "EUR" => Ok(Currency::EUR),
            "GBP" => Ok(Currency::GBP),
            "JPY" => Ok(Currency::JPY),
            "AUD" => Ok(Currency::AUD),
            "CAD" => Ok(Currency::CAD),
            "SGD" => Ok(Currency::SGD),
            "AED" => Ok(Currency::AED),
            _ => Err(MoneyError::UnknownCurrency(s.to_string())),
        }
    }
}

/// Thousands separator convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DigitGrouping {
    /// Last three digits, then groups of two (12,34,567)
    Indian,
    /// Groups of three (1,234,567)
    Western,
}

/// Errors raised while reading money values
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),
}

/// Rounds to `dp` decimal places, with midpoints rounded away from zero
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats a value rounded half-up to `dp` places with digit separators.
///
/// ```
/// use core_kernel::{format_grouped, DigitGrouping};
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_grouped(dec!(1234567), 2, DigitGrouping::Indian), "12,34,567.00");
/// assert_eq!(format_grouped(dec!(1234567), 2, DigitGrouping::Western), "1,234,567.00");
/// ```
pub fn format_grouped(value: Decimal, dp: u32, grouping: DigitGrouping) -> String {
    let rounded = round_half_up(value, dp);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.*}", dp as usize, rounded.abs());

    let (integer, fraction) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut out = String::with_capacity(text.len() + text.len() / 2 + 1);
    if negative {
        out.push('-');
    }
    out.push_str(&group_digits(integer, grouping));
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

fn group_digits(digits: &str, grouping: DigitGrouping) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let step = match grouping {
        DigitGrouping::Indian => 2,
        DigitGrouping::Western => 3,
    };

    let mut groups = Vec::with_capacity(head.len() / step + 2);
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(step);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    groups.push(tail);
    groups.join(",")
}

/// A monetary amount with associated currency
///
/// The amount is stored at full precision so that sums of many line items do
/// not accumulate rounding drift; use [`Money::round_to_currency`] for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Rounds half-up to the currency's minor unit
    pub fn round_to_currency(&self) -> Self {
        Self {
            amount: round_half_up(self.amount, self.currency.decimal_places()),
            currency: self.currency,
        }
    }

    /// Formats with the currency symbol and digit grouping, e.g. `₹12,34,567.00`
    pub fn to_grouped_string(&self) -> String {
        self.grouped_with_prefix(self.currency.symbol(), "")
    }

    /// Formats for printed documents, e.g. `Rs. 1,416.00`
    pub fn to_document_string(&self) -> String {
        self.grouped_with_prefix(self.currency.document_symbol(), " ")
    }

    fn grouped_with_prefix(&self, prefix: &str, separator: &str) -> String {
        let rounded = self.round_to_currency().amount;
        let body = format_grouped(
            rounded.abs(),
            self.currency.decimal_places(),
            self.currency.grouping(),
        );
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
        format!("{sign}{prefix}{separator}{body}")
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dp = self.currency.decimal_places();
        write!(
            f,
            "{} {:.dp$}",
            self.currency.symbol(),
            round_half_up(self.amount, dp),
            dp = dp as usize
        )
    }
}

/// A percentage rate as printed next to a tax label, e.g. `9%`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rate {
    percent: Decimal,
}

impl Rate {
    pub fn from_percentage(percent: Decimal) -> Self {
        Self { percent }
    }

    pub fn as_percentage(&self) -> Decimal {
        self.percent
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent.round_dp(4).normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_keeps_full_precision() {
        let m = Money::new(dec!(100.123456789), Currency::INR);
        assert_eq!(m.amount(), dec!(100.123456789));
        assert_eq!(m.round_to_currency().amount(), dec!(100.12));
    }

    #[test]
    fn test_round_half_up_not_bankers() {
        assert_eq!(round_half_up(dec!(2.345), 2), dec!(2.35));
        assert_eq!(round_half_up(dec!(2.335), 2), dec!(2.34));
        assert_eq!(round_half_up(dec!(-2.345), 2), dec!(-2.35));
    }

    #[test]
    fn test_indian_grouping() {
        assert_eq!(format_grouped(dec!(0), 2, DigitGrouping::Indian), "0.00");
        assert_eq!(format_grouped(dec!(999), 2, DigitGrouping::Indian), "999.00");
        assert_eq!(format_grouped(dec!(1000), 2, DigitGrouping::Indian), "1,000.00");
        assert_eq!(format_grouped(dec!(100000), 2, DigitGrouping::Indian), "1,00,000.00");
        assert_eq!(format_grouped(dec!(123456789.005), 2, DigitGrouping::Indian), "12,34,56,789.01");
    }

    #[test]
    fn test_western_grouping() {
        assert_eq!(format_grouped(dec!(1234567.891), 2, DigitGrouping::Western), "1,234,567.89");
        assert_eq!(format_grouped(dec!(-1234), 0, DigitGrouping::Western), "-1,234");
    }

    #[test]
    fn test_grouped_money_strings() {
        let m = Money::new(dec!(1416), Currency::INR);
        assert_eq!(m.to_grouped_string(), "₹1,416.00");
        assert_eq!(m.to_document_string(), "Rs. 1,416.00");
        assert_eq!(
            Money::new(dec!(-1416), Currency::INR).to_grouped_string(),
            "-₹1,416.00"
        );
        assert_eq!(Money::new(dec!(-0.001), Currency::INR).to_grouped_string(), "₹0.00");
    }

    #[test]
    fn test_rate_display() {
        assert_eq!(Rate::from_percentage(dec!(18) * dec!(0.5)).to_string(), "9%");
        assert_eq!(Rate::from_percentage(dec!(2.50)).to_string(), "2.5%");
    }
}
