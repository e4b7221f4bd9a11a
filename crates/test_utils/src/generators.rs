//! Property-Based Test Generators
//!
//! Proptest strategies for line items, rates and amounts. Generated values
//! stay inside the ranges a real invoice would use.

use proptest::prelude::*;
use rust_decimal::Decimal;

use core_kernel::{Currency, Money};
use domain_invoice::LineItem;

/// Strategy for generating supported Currency values
pub fn currency_strategy() -> impl Strategy<Value = Currency> {
    prop_oneof![
        Just(Currency::INR),
        Just(Currency::USD),
        Just(Currency::EUR),
        Just(Currency::GBP),
        Just(Currency::JPY),
        Just(Currency::AUD),
        Just(Currency::CAD),
        Just(Currency::SGD),
        Just(Currency::AED),
    ]
}

/// Non-negative prices with up to two decimal places, below one crore
pub fn unit_price_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000_000i64).prop_map(|paise| Decimal::new(paise, 2))
}

/// Quantities from 1 to 999
pub fn quantity_strategy() -> impl Strategy<Value = u32> {
    1u32..1000u32
}

/// Common GST slabs plus arbitrary rates with two decimals up to 100%
pub fn tax_rate_strategy() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        Just(Decimal::ZERO),
        Just(Decimal::new(5, 0)),
        Just(Decimal::new(12, 0)),
        Just(Decimal::new(18, 0)),
        Just(Decimal::new(28, 0)),
        (0i64..=10_000i64).prop_map(|bp| Decimal::new(bp, 2)),
    ]
}

/// Non-negative amounts with up to four decimal places, below 10^13
pub fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000_000_000_000i64).prop_map(|n| Decimal::new(n, 4))
}

/// A valid line item
pub fn line_item_strategy() -> impl Strategy<Value = LineItem> {
    ("[A-Za-z ]{0,24}", quantity_strategy(), unit_price_strategy()).prop_map(
        |(description, quantity, unit_price)| {
            LineItem::new(description, unit_price).with_quantity(quantity)
        },
    )
}

/// Up to `max` valid line items
pub fn line_items_strategy(max: usize) -> impl Strategy<Value = Vec<LineItem>> {
    prop::collection::vec(line_item_strategy(), 0..=max)
}

/// INR money with a non-negative amount
pub fn inr_money_strategy() -> impl Strategy<Value = Money> {
    unit_price_strategy().prop_map(|amount| Money::new(amount, Currency::INR))
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn unit_prices_have_two_decimals(price in unit_price_strategy()) {
            prop_assert!(price >= Decimal::ZERO);
            prop_assert!(price.scale() <= 2);
        }

        #[test]
        fn tax_rates_are_percentages(rate in tax_rate_strategy()) {
            prop_assert!(rate >= Decimal::ZERO);
            prop_assert!(rate <= Decimal::ONE_HUNDRED);
        }

        #[test]
        fn line_item_lists_respect_max(items in line_items_strategy(10)) {
            prop_assert!(items.len() <= 10);
            prop_assert!(items.iter().all(|item| item.quantity >= 1));
        }
    }
}
