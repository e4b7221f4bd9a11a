//! Custom Test Assertions
//!
//! Assertion helpers for invoice figures that give more meaningful failure
//! messages than a bare `assert_eq!`.

use rust_decimal::Decimal;

use core_kernel::{round_half_up, Currency, Money};
use domain_invoice::{Invoice, InvoiceTotals};

/// Asserts that two Money values are approximately equal within a tolerance
///
/// # Panics
///
/// Panics if the currencies don't match or the amounts differ by more than tolerance
pub fn assert_money_approx_eq(actual: &Money, expected: &Money, tolerance: Decimal) {
    assert_eq!(
        actual.currency(),
        expected.currency(),
        "Currency mismatch: actual={}, expected={}",
        actual.currency(),
        expected.currency()
    );
    assert_decimal_approx_eq(actual.amount(), expected.amount(), tolerance);
}

pub fn assert_decimal_approx_eq(actual: Decimal, expected: Decimal, tolerance: Decimal) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "Amounts differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual,
        expected,
        diff,
        tolerance
    );
}

/// Asserts the arithmetic identities every set of totals must satisfy:
/// the components add up to the tax, and subtotal plus tax is the grand total
pub fn assert_totals_consistent(totals: &InvoiceTotals, rate_percent: Decimal) {
    assert_eq!(
        totals.grand_total,
        totals.subtotal + totals.tax_component_a + totals.tax_component_b,
        "grand total is not subtotal plus tax: {totals:?}"
    );
    assert_eq!(
        totals.total_tax(),
        totals.subtotal * rate_percent / Decimal::ONE_HUNDRED,
        "tax components do not add up to {rate_percent}% of the subtotal: {totals:?}"
    );
}

/// Asserts a displayed total matches the exact total rounded half-up
pub fn assert_displayed_total(invoice: &Invoice, expected: Decimal) {
    let shown = invoice.totals().rounded(invoice.currency).grand_total;
    assert_eq!(
        shown,
        round_half_up(expected, invoice.currency.decimal_places()),
        "displayed grand total of {} is {}, expected {}",
        invoice.invoice_number,
        shown,
        expected
    );
}

/// Asserts an amount-in-words string is trimmed, single-spaced and ends with `suffix`
pub fn assert_words_well_formed(words: &str, suffix: &str) {
    assert_eq!(words.trim(), words, "words have leading or trailing space: {words:?}");
    assert!(!words.contains("  "), "words contain a double space: {words:?}");
    assert!(words.ends_with(suffix), "words {words:?} do not end with {suffix:?}");
}

/// Asserts a formatted amount uses Indian digit grouping for INR
pub fn assert_indian_grouping(money: &Money, expected: &str) {
    assert_eq!(money.currency(), Currency::INR, "Indian grouping applies to INR only");
    assert_eq!(money.to_grouped_string(), expected);
}

/// Asserts that a result is Ok and returns the value
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
    ($result:expr, $msg:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("{}: {:?}", $msg, e),
        }
    };
}

/// Asserts that an error matches a specific variant
#[macro_export]
macro_rules! assert_err_variant {
    ($result:expr, $pattern:pat) => {
        match $result {
            Ok(value) => panic!("Expected Err matching {}, got Ok({:?})", stringify!($pattern), value),
            Err(ref e) => {
                assert!(
                    matches!(e, $pattern),
                    "Error {:?} does not match pattern {}",
                    e,
                    stringify!($pattern)
                );
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_assert_money_approx_eq_passes() {
        let m1 = Money::new(dec!(100.001), Currency::INR);
        let m2 = Money::new(dec!(100.002), Currency::INR);
        assert_money_approx_eq(&m1, &m2, dec!(0.01));
    }

    #[test]
    #[should_panic(expected = "Currency mismatch")]
    fn test_assert_money_approx_eq_currency_mismatch() {
        let m1 = Money::new(dec!(100.00), Currency::USD);
        let m2 = Money::new(dec!(100.00), Currency::INR);
        assert_money_approx_eq(&m1, &m2, dec!(0.01));
    }

    #[test]
    fn test_consistent_totals_pass() {
        let totals = InvoiceTotals {
            subtotal: dec!(1200),
            tax_component_a: dec!(108),
            tax_component_b: dec!(108),
            grand_total: dec!(1416),
        };
        assert_totals_consistent(&totals, dec!(18));
    }

    #[test]
    #[should_panic(expected = "grand total is not subtotal plus tax")]
    fn test_inconsistent_totals_fail() {
        let totals = InvoiceTotals {
            subtotal: dec!(1200),
            tax_component_a: dec!(108),
            tax_component_b: dec!(108),
            grand_total: dec!(1417),
        };
        assert_totals_consistent(&totals, dec!(18));
    }

    #[test]
    #[should_panic(expected = "double space")]
    fn test_words_with_double_space_fail() {
        assert_words_well_formed("ONE  HUNDRED ONLY", "ONLY");
    }
}
