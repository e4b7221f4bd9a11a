//! Amount-in-words rendering using the Indian numbering system
//!
//! Amounts are grouped as crore (10,000,000), lakh (100,000), thousand and
//! a remainder below one thousand, most significant first:
//!
//! ```text
//! 12,34,567.50  ->  TWELVE LAKH THIRTY FOUR THOUSAND FIVE HUNDRED AND
//!                   SIXTY SEVEN POINT FIFTY ONLY
//! ```
//!
//! Words are produced in one canonical form; casing is applied once over the
//! finished string, suffix included.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::warn;

use core_kernel::round_half_up;

use crate::error::InvoiceError;

const ONES: [&str; 20] = [
    "", "ONE", "TWO", "THREE", "FOUR", "FIVE", "SIX", "SEVEN", "EIGHT", "NINE", "TEN",
    "ELEVEN", "TWELVE", "THIRTEEN", "FOURTEEN", "FIFTEEN", "SIXTEEN", "SEVENTEEN",
    "EIGHTEEN", "NINETEEN",
];

const TENS: [&str; 10] = [
    "", "", "TWENTY", "THIRTY", "FORTY", "FIFTY", "SIXTY", "SEVENTY", "EIGHTY", "NINETY",
];

const ZERO: &str = "ZERO";
const POINT: &str = "POINT";
const HUNDRED: &str = "HUNDRED";
const AND: &str = "AND";

const CRORE: u128 = 10_000_000;
const LAKH: u128 = 100_000;
const THOUSAND: u128 = 1_000;

/// Output casing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Casing {
    /// ONE HUNDRED ONLY
    #[default]
    Upper,
    /// One Hundred Only
    Title,
}

/// Presentation choices for the words string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordsStyle {
    pub casing: Casing,
    /// Insert "AND" between a hundreds part and a non-zero remainder
    pub conjunction: bool,
    /// Closing words appended to every result, e.g. "ONLY"
    pub suffix: String,
}

impl WordsStyle {
    /// Style printed on generated documents: `ONE HUNDRED AND TEN ONLY`
    pub fn document() -> Self {
        Self {
            casing: Casing::Upper,
            conjunction: true,
            suffix: "ONLY".to_string(),
        }
    }

    /// Style used on screen: `One Hundred Ten Rupees Only`
    pub fn rupees() -> Self {
        Self {
            casing: Casing::Title,
            conjunction: false,
            suffix: "Rupees Only".to_string(),
        }
    }

    pub fn with_casing(mut self, casing: Casing) -> Self {
        self.casing = casing;
        self
    }

    pub fn with_conjunction(mut self, conjunction: bool) -> Self {
        self.conjunction = conjunction;
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }
}

impl Default for WordsStyle {
    fn default() -> Self {
        Self::document()
    }
}

/// Converts non-negative amounts to words
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AmountToWordsFormatter {
    style: WordsStyle,
}

impl AmountToWordsFormatter {
    pub fn new(style: WordsStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &WordsStyle {
        &self.style
    }

    /// Renders `amount` in words.
    ///
    /// The amount is rounded half-up to two decimal places first. A non-zero
    /// fraction is read as a two-digit number after "POINT" (0.50 is
    /// "POINT FIFTY", 0.05 is "POINT FIVE").
    ///
    /// # Errors
    ///
    /// Returns [`InvoiceError::NegativeAmount`] for amounts below zero.
    pub fn to_words(&self, amount: Decimal) -> Result<String, InvoiceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            warn!(%amount, "Rejected negative amount for words conversion");
            return Err(InvoiceError::NegativeAmount(amount));
        }

        let rounded = round_half_up(amount, 2);
        let integer_part = rounded.trunc();
        let integer = integer_part
            .to_u128()
            .ok_or_else(|| InvoiceError::validation(format!("Amount out of range: {amount}")))?;
        let fraction = ((rounded - integer_part) * dec!(100))
            .trunc()
            .to_u128()
            .unwrap_or(0);

        let mut words: Vec<&str> = Vec::new();

        if integer == 0 {
            words.push(ZERO);
        } else {
            self.integer_words(integer, &mut words);
        }

        if fraction > 0 {
            words.push(POINT);
            below_hundred(fraction, &mut words);
        }

        let suffix = self.style.suffix.trim();
        if !suffix.is_empty() {
            words.push(suffix);
        }

        Ok(self.apply_casing(&words.join(" ")))
    }

    /// Crore, lakh, thousand, remainder. Crore counts above 999 are
    /// themselves grouped, so 10^10 reads "ONE THOUSAND CRORE".
    fn integer_words(&self, n: u128, out: &mut Vec<&str>) {
        let crore = n / CRORE;
        let lakh = (n % CRORE) / LAKH;
        let thousand = (n % LAKH) / THOUSAND;
        let rest = n % THOUSAND;

        if crore > 0 {
            self.integer_words(crore, out);
            out.push("CRORE");
        }
        if lakh > 0 {
            self.hundreds(lakh, out);
            out.push("LAKH");
        }
        if thousand > 0 {
            self.hundreds(thousand, out);
            out.push("THOUSAND");
        }
        self.hundreds(rest, out);
    }

    /// 0..=999; zero contributes nothing
    fn hundreds(&self, n: u128, out: &mut Vec<&str>) {
        let hundred = n / 100;
        let rest = n % 100;

        if hundred > 0 {
            out.push(ONES[hundred as usize]);
            out.push(HUNDRED);
            if rest > 0 && self.style.conjunction {
                out.push(AND);
            }
        }
        below_hundred(rest, out);
    }

    fn apply_casing(&self, text: &str) -> String {
        match self.style.casing {
            Casing::Upper => text.to_uppercase(),
            Casing::Title => text
                .split(' ')
                .map(title_case)
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

fn below_hundred(n: u128, out: &mut Vec<&str>) {
    match n {
        0 => {}
        1..=19 => out.push(ONES[n as usize]),
        _ => {
            out.push(TENS[(n / 10) as usize]);
            if n % 10 > 0 {
                out.push(ONES[(n % 10) as usize]);
            }
        }
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(amount: Decimal) -> String {
        AmountToWordsFormatter::default().to_words(amount).unwrap()
    }

    #[test]
    fn test_zero() {
        assert_eq!(document(dec!(0)), "ZERO ONLY");
    }

    #[test]
    fn test_hundred_has_no_trailing_conjunction() {
        assert_eq!(document(dec!(100)), "ONE HUNDRED ONLY");
        assert_eq!(document(dec!(110)), "ONE HUNDRED AND TEN ONLY");
    }

    #[test]
    fn test_lakh_grouping() {
        assert_eq!(
            document(dec!(1234567)),
            "TWELVE LAKH THIRTY FOUR THOUSAND FIVE HUNDRED AND SIXTY SEVEN ONLY"
        );
        assert_eq!(document(dec!(100000)), "ONE LAKH ONLY");
    }

    #[test]
    fn test_title_case_rupees() {
        let formatter = AmountToWordsFormatter::new(WordsStyle::rupees());
        assert_eq!(
            formatter.to_words(dec!(1416)).unwrap(),
            "One Thousand Four Hundred Sixteen Rupees Only"
        );
    }

    #[test]
    fn test_negative_rejected() {
        let result = AmountToWordsFormatter::default().to_words(dec!(-1));
        assert!(matches!(result, Err(InvoiceError::NegativeAmount(_))));
    }

    #[test]
    fn test_negative_zero_is_zero() {
        assert_eq!(document(Decimal::new(0, 2) * dec!(-1)), "ZERO ONLY");
    }
}
