//! Invoice line items
//!
//! A line item is one billable row. Its monetary figures are derived on
//! demand from quantity, unit price and tax rate; nothing derived is stored.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::LineItemId;

/// Description shown when a row was left blank
pub const DEFAULT_DESCRIPTION: &str = "Service Item";

/// HSN/SAC code shown when a row has none
pub const DEFAULT_HSN_CODE: &str = "998361";

/// A line item on an invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Item ID
    #[serde(default)]
    pub id: LineItemId,
    /// Description (may be empty)
    #[serde(default)]
    pub description: String,
    /// HSN/SAC classification code, display only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hsn_code: Option<String>,
    /// Quantity
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    /// Unit price
    pub unit_price: Decimal,
    /// Tax rate in percent (18 means 18%)
    #[serde(default)]
    pub tax_rate_percent: Decimal,
}

fn default_quantity() -> u32 {
    1
}

impl LineItem {
    /// Creates a new line item with quantity 1 and no tax
    pub fn new(description: impl Into<String>, unit_price: Decimal) -> Self {
        Self {
            id: LineItemId::new(),
            description: description.into(),
            hsn_code: None,
            quantity: default_quantity(),
            unit_price,
            tax_rate_percent: Decimal::ZERO,
        }
    }

    /// Sets the quantity
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Sets the HSN/SAC code
    pub fn with_hsn_code(mut self, code: impl Into<String>) -> Self {
        self.hsn_code = Some(code.into());
        self
    }

    /// Sets the tax rate in percent
    pub fn with_tax_rate(mut self, rate_percent: Decimal) -> Self {
        self.tax_rate_percent = rate_percent;
        self
    }

    /// quantity × unit price, unrounded
    pub fn line_amount(&self) -> Decimal {
        Decimal::from(self.quantity) * self.unit_price
    }

    /// Tax on the line at the item's own rate, unrounded
    pub fn line_tax(&self) -> Decimal {
        self.line_amount() * self.tax_rate_percent / dec!(100)
    }

    /// Line amount plus line tax
    pub fn line_total(&self) -> Decimal {
        self.line_amount() + self.line_tax()
    }

    /// Description as printed
    pub fn display_description(&self) -> &str {
        if self.description.trim().is_empty() {
            DEFAULT_DESCRIPTION
        } else {
            &self.description
        }
    }

    /// HSN/SAC code as printed
    pub fn display_hsn_code(&self) -> &str {
        match self.hsn_code.as_deref() {
            Some(code) if !code.trim().is_empty() => code,
            _ => DEFAULT_HSN_CODE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_figures() {
        let item = LineItem::new("Consulting", dec!(1200))
            .with_quantity(2)
            .with_tax_rate(dec!(18));

        assert_eq!(item.line_amount(), dec!(2400));
        assert_eq!(item.line_tax(), dec!(432));
        assert_eq!(item.line_total(), dec!(2832));
    }

    #[test]
    fn test_display_fallbacks() {
        let item = LineItem::new("  ", dec!(10));
        assert_eq!(item.display_description(), DEFAULT_DESCRIPTION);
        assert_eq!(item.display_hsn_code(), DEFAULT_HSN_CODE);

        let item = item.with_hsn_code("9983");
        assert_eq!(item.display_hsn_code(), "9983");
    }

    #[test]
    fn test_deserialize_defaults() {
        let json = format!(r#"{{"id":"{}","unit_price":"250"}}"#, LineItemId::new().as_uuid());
        let item: LineItem = serde_json::from_str(&json).unwrap();
        assert_eq!(item.quantity, 1);
        assert_eq!(item.tax_rate_percent, Decimal::ZERO);
        assert!(item.description.is_empty());
    }
}
