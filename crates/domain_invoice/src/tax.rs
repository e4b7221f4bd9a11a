//! Tax computation
//!
//! One effective tax rate is applied to the invoice subtotal and split into
//! two named components (CGST/SGST by default). All arithmetic runs at full
//! decimal precision:
//!
//! - the subtotal is the exact sum of `quantity × unit_price`
//! - tax components are derived from that sum, never from per-line rounded tax
//! - rounding to the currency's minor unit happens only when a figure is
//!   displayed, via [`InvoiceTotals::rounded`] or [`LineTax::rounded`]
//!
//! Rounding per line and then summing drifts by a paisa or more across many
//! rows; aggregate-then-round does not.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::{round_half_up, Currency, LineItemId, Money};

use crate::error::InvoiceError;
use crate::line_item::LineItem;

/// How one effective rate is divided into two reported components
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxSplit {
    /// Label of the first component, e.g. "CGST"
    pub component_a_label: String,
    /// Label of the second component, e.g. "SGST"
    pub component_b_label: String,
    /// Share of the tax assigned to the first component, in [0, 1]
    component_a_share: Decimal,
}

impl TaxSplit {
    /// Creates a split with the given labels and first-component share
    pub fn new(
        component_a_label: impl Into<String>,
        component_b_label: impl Into<String>,
        component_a_share: Decimal,
    ) -> Result<Self, InvoiceError> {
        if component_a_share < Decimal::ZERO || component_a_share > Decimal::ONE {
            return Err(InvoiceError::InvalidSplit(component_a_share));
        }
        Ok(Self {
            component_a_label: component_a_label.into(),
            component_b_label: component_b_label.into(),
            component_a_share,
        })
    }

    /// Even CGST/SGST split used for intra-state Indian supplies
    pub fn cgst_sgst() -> Self {
        Self {
            component_a_label: "CGST".to_string(),
            component_b_label: "SGST".to_string(),
            component_a_share: dec!(0.5),
        }
    }

    /// Single-component jurisdiction; the second component is always zero
    pub fn single(label: impl Into<String>) -> Self {
        Self {
            component_a_label: label.into(),
            component_b_label: String::new(),
            component_a_share: Decimal::ONE,
        }
    }

    /// Share of the first component
    pub fn component_a_share(&self) -> Decimal {
        self.component_a_share
    }

    /// Share of the second component
    pub fn component_b_share(&self) -> Decimal {
        Decimal::ONE - self.component_a_share
    }

    /// True when the second component is never populated
    pub fn is_single(&self) -> bool {
        self.component_a_share == Decimal::ONE
    }

    fn split(&self, tax: Decimal) -> (Decimal, Decimal) {
        let a = tax * self.component_a_share;
        (a, tax - a)
    }
}

impl Default for TaxSplit {
    fn default() -> Self {
        Self::cgst_sgst()
    }
}

/// Tax on a single amount, split into its two components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineTax {
    pub component_a: Decimal,
    pub component_b: Decimal,
}

impl LineTax {
    /// Sum of both components
    pub fn total(&self) -> Decimal {
        self.component_a + self.component_b
    }

    /// Both components rounded half-up to the currency's minor unit
    pub fn rounded(&self, currency: Currency) -> Self {
        let dp = currency.decimal_places();
        Self {
            component_a: round_half_up(self.component_a, dp),
            component_b: round_half_up(self.component_b, dp),
        }
    }
}

/// Aggregate figures for a whole invoice
///
/// Always a pure function of the item list and the rate; recomputed in full
/// whenever either changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    pub subtotal: Decimal,
    pub tax_component_a: Decimal,
    pub tax_component_b: Decimal,
    pub grand_total: Decimal,
}

/// [`InvoiceTotals`] expressed as [`Money`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoneyTotals {
    pub subtotal: Money,
    pub tax_component_a: Money,
    pub tax_component_b: Money,
    pub grand_total: Money,
}

impl InvoiceTotals {
    /// All-zero totals
    pub fn zero() -> Self {
        Self::default()
    }

    /// Sum of both tax components
    pub fn total_tax(&self) -> Decimal {
        self.tax_component_a + self.tax_component_b
    }

    /// Every figure rounded half-up for display.
    ///
    /// Each field is rounded independently, so the rounded grand total can
    /// differ by one minor unit from the sum of the rounded parts.
    pub fn rounded(&self, currency: Currency) -> Self {
        let dp = currency.decimal_places();
        Self {
            subtotal: round_half_up(self.subtotal, dp),
            tax_component_a: round_half_up(self.tax_component_a, dp),
            tax_component_b: round_half_up(self.tax_component_b, dp),
            grand_total: round_half_up(self.grand_total, dp),
        }
    }

    /// Full-precision figures tagged with a currency
    pub fn to_money(&self, currency: Currency) -> MoneyTotals {
        MoneyTotals {
            subtotal: Money::new(self.subtotal, currency),
            tax_component_a: Money::new(self.tax_component_a, currency),
            tax_component_b: Money::new(self.tax_component_b, currency),
            grand_total: Money::new(self.grand_total, currency),
        }
    }
}

/// One row of the document's item table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineBreakdown {
    pub item_id: LineItemId,
    pub description: String,
    pub hsn_code: String,
    pub rate_percent: Decimal,
    pub unit_price: Decimal,
    pub amount: Decimal,
    pub tax: LineTax,
    pub total: Decimal,
}

/// Computes split taxes and invoice totals
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaxCalculator {
    split: TaxSplit,
}

impl TaxCalculator {
    /// Creates a calculator using the given split
    pub fn new(split: TaxSplit) -> Self {
        Self { split }
    }

    /// The split this calculator applies
    pub fn split(&self) -> &TaxSplit {
        &self.split
    }

    /// Splits `amount × rate / 100` into the two components.
    ///
    /// With the default even split both components equal
    /// `amount × rate / 200`. No rounding is applied.
    pub fn compute_line_tax(&self, amount: Decimal, rate_percent: Decimal) -> LineTax {
        let tax = amount * rate_percent / dec!(100);
        let (component_a, component_b) = self.split.split(tax);
        LineTax {
            component_a,
            component_b,
        }
    }

    /// Computes invoice totals from the items and one uniform rate.
    ///
    /// Item-level rates are ignored here; the invoice rate applies to the
    /// summed subtotal. An empty list yields all zeros.
    pub fn compute_invoice_totals(&self, items: &[LineItem], rate_percent: Decimal) -> InvoiceTotals {
        let subtotal: Decimal = items.iter().map(LineItem::line_amount).sum();
        let tax = self.compute_line_tax(subtotal, rate_percent);

        let totals = InvoiceTotals {
            subtotal,
            tax_component_a: tax.component_a,
            tax_component_b: tax.component_b,
            grand_total: subtotal + tax.total(),
        };

        debug!(
            item_count = items.len(),
            rate = %rate_percent,
            subtotal = %totals.subtotal,
            grand_total = %totals.grand_total,
            "Computed invoice totals"
        );

        totals
    }

    /// Per-row figures at the uniform invoice rate, unrounded
    pub fn line_breakdown(&self, items: &[LineItem], rate_percent: Decimal) -> Vec<LineBreakdown> {
        items
            .iter()
            .map(|item| {
                let amount = item.line_amount();
                let tax = self.compute_line_tax(amount, rate_percent);
                LineBreakdown {
                    item_id: item.id,
                    description: item.display_description().to_string(),
                    hsn_code: item.display_hsn_code().to_string(),
                    rate_percent,
                    unit_price: item.unit_price,
                    amount,
                    tax,
                    total: amount + tax.total(),
                }
            })
            .collect()
    }
}
