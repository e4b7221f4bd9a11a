//! Invoice documents
//!
//! An invoice owns its line items exclusively. Every change to the items or
//! the tax rate recomputes the stored totals from scratch, so a persisted
//! document always carries totals consistent with its items.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use core_kernel::{round_half_up, Currency, InvoiceId, LineItemId};

use crate::error::InvoiceError;
use crate::line_item::LineItem;
use crate::parties::{BankDetails, ClientDetails, CompanyDetails};
use crate::tax::{InvoiceTotals, LineBreakdown, TaxCalculator};
use crate::words::AmountToWordsFormatter;

/// Items allowed on one invoice unless configured otherwise
pub const DEFAULT_MAX_ITEMS: usize = 10;

/// GST rate applied to new invoices
pub const DEFAULT_TAX_RATE_PERCENT: Decimal = dec!(18);

/// Days between invoice date and due date for new invoices
pub const DEFAULT_DUE_DAYS: i64 = 15;

pub const DEFAULT_PAYMENT_TERMS: &str = "Payment due within 30 days of invoice date.";

pub const DEFAULT_NOTES: &str = "Thank you for your business!";

pub const DEFAULT_COUNTRY_OF_SUPPLY: &str = "India";

/// Intra-state supply, taxed as CGST plus SGST
pub const DEFAULT_PLACE_OF_SUPPLY: &str = "Local";

/// Invoice status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceStatus {
    /// Issued and awaiting payment
    #[default]
    Pending,
    /// Fully paid
    Paid,
    /// Past due date without payment
    Overdue,
}

impl InvoiceStatus {
    /// Returns true if moving to `next` is allowed
    pub fn can_transition_to(&self, next: InvoiceStatus) -> bool {
        use InvoiceStatus::*;
        matches!(
            (self, next),
            (Pending, Paid) | (Pending, Overdue) | (Overdue, Paid) | (Paid, Pending)
        )
    }
}

/// An invoice document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// Unique identifier
    #[serde(default)]
    pub id: InvoiceId,
    /// Invoice number (human-readable)
    pub invoice_number: String,
    /// Invoice date
    pub invoice_date: NaiveDate,
    /// Due date
    pub due_date: NaiveDate,
    /// Currency
    #[serde(default)]
    pub currency: Currency,
    /// Issuing company
    pub company: CompanyDetails,
    /// Billed client
    pub client: ClientDetails,
    /// Payment details
    #[serde(default)]
    pub bank: Option<BankDetails>,
    #[serde(default)]
    items: Vec<LineItem>,
    #[serde(default = "default_tax_rate")]
    tax_rate_percent: Decimal,
    /// Computed totals, persisted with the items
    #[serde(default)]
    totals: InvoiceTotals,
    /// Status
    #[serde(default)]
    pub status: InvoiceStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub payment_terms: Option<String>,
    #[serde(default)]
    pub terms_and_conditions: Option<String>,
    #[serde(default)]
    pub country_of_supply: Option<String>,
    #[serde(default)]
    pub place_of_supply: Option<String>,
    /// Print a UPI payment QR code on the document
    #[serde(default)]
    pub show_payment_qr: bool,
    /// Created timestamp
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
    #[serde(skip)]
    calculator: TaxCalculator,
    #[serde(skip, default = "default_max_items")]
    max_items: usize,
}

fn default_max_items() -> usize {
    DEFAULT_MAX_ITEMS
}

fn default_tax_rate() -> Decimal {
    DEFAULT_TAX_RATE_PERCENT
}

impl Invoice {
    /// Creates an empty invoice
    ///
    /// # Arguments
    ///
    /// * `invoice_number` - Human-readable number, see [`crate::numbering`]
    /// * `invoice_date` - Issue date; the due date defaults to 15 days later
    /// * `currency` - Invoice currency
    pub fn new(invoice_number: impl Into<String>, invoice_date: NaiveDate, currency: Currency) -> Self {
        let now = Utc::now();

        Self {
            id: InvoiceId::new(),
            invoice_number: invoice_number.into(),
            invoice_date,
            due_date: invoice_date + Duration::days(DEFAULT_DUE_DAYS),
            currency,
            company: CompanyDetails::default(),
            client: ClientDetails::default(),
            bank: None,
            items: Vec::new(),
            tax_rate_percent: DEFAULT_TAX_RATE_PERCENT,
            totals: InvoiceTotals::zero(),
            status: InvoiceStatus::Pending,
            notes: Some(DEFAULT_NOTES.to_string()),
            payment_terms: Some(DEFAULT_PAYMENT_TERMS.to_string()),
            terms_and_conditions: None,
            country_of_supply: Some(DEFAULT_COUNTRY_OF_SUPPLY.to_string()),
            place_of_supply: Some(DEFAULT_PLACE_OF_SUPPLY.to_string()),
            show_payment_qr: true,
            created_at: now,
            updated_at: now,
            calculator: TaxCalculator::default(),
            max_items: DEFAULT_MAX_ITEMS,
        }
    }

    /// Uses a different tax calculator and recomputes totals
    pub fn with_calculator(mut self, calculator: TaxCalculator) -> Self {
        self.calculator = calculator;
        self.recalculate_totals();
        self
    }

    /// Changes the item limit
    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = max_items;
        self
    }

    pub fn with_company(mut self, company: CompanyDetails) -> Self {
        self.company = company;
        self
    }

    pub fn with_client(mut self, client: ClientDetails) -> Self {
        self.client = client;
        self
    }

    pub fn with_bank(mut self, bank: BankDetails) -> Self {
        self.bank = Some(bank);
        self
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = due_date;
        self
    }

    /// Line items in display order
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// The uniform tax rate applied to the subtotal
    pub fn tax_rate_percent(&self) -> Decimal {
        self.tax_rate_percent
    }

    /// Stored totals at full precision
    pub fn totals(&self) -> &InvoiceTotals {
        &self.totals
    }

    /// The calculator used for recomputation
    pub fn calculator(&self) -> &TaxCalculator {
        &self.calculator
    }

    /// The configured item limit
    pub fn max_items(&self) -> usize {
        self.max_items
    }

    /// Adds an item and recomputes totals
    pub fn add_item(&mut self, item: LineItem) -> Result<LineItemId, InvoiceError> {
        if self.items.len() >= self.max_items {
            return Err(InvoiceError::TooManyItems { max: self.max_items });
        }
        let id = item.id;
        self.items.push(item);
        self.touch();
        Ok(id)
    }

    /// Edits an item in place and recomputes totals
    pub fn update_item<F>(&mut self, id: LineItemId, edit: F) -> Result<(), InvoiceError>
    where
        F: FnOnce(&mut LineItem),
    {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| InvoiceError::LineItemNotFound(id.to_string()))?;
        edit(item);
        self.touch();
        Ok(())
    }

    /// Removes an item and recomputes totals
    pub fn remove_item(&mut self, id: LineItemId) -> Result<LineItem, InvoiceError> {
        let index = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| InvoiceError::LineItemNotFound(id.to_string()))?;
        let removed = self.items.remove(index);
        self.touch();
        Ok(removed)
    }

    /// Replaces all items and recomputes totals
    pub fn set_items(&mut self, items: Vec<LineItem>) -> Result<(), InvoiceError> {
        if items.len() > self.max_items {
            return Err(InvoiceError::TooManyItems { max: self.max_items });
        }
        self.items = items;
        self.touch();
        Ok(())
    }

    /// Changes the tax rate and recomputes totals
    pub fn set_tax_rate(&mut self, rate_percent: Decimal) {
        self.tax_rate_percent = rate_percent;
        self.touch();
    }

    /// Recomputes totals from the items.
    ///
    /// Call after loading a stored document to discard stale totals.
    pub fn recalculate_totals(&mut self) {
        let totals = self
            .calculator
            .compute_invoice_totals(&self.items, self.tax_rate_percent);

        if totals != self.totals {
            debug!(
                invoice = %self.invoice_number,
                old_total = %self.totals.grand_total,
                new_total = %totals.grand_total,
                "Invoice totals changed"
            );
        }
        self.totals = totals;
    }

    /// Per-row table figures at the invoice rate
    pub fn line_breakdown(&self) -> Vec<LineBreakdown> {
        self.calculator.line_breakdown(&self.items, self.tax_rate_percent)
    }

    /// Grand total rounded half-up to the currency's minor unit
    pub fn payable_amount(&self) -> Decimal {
        round_half_up(self.totals.grand_total, self.currency.decimal_places())
    }

    /// The payable amount in words
    pub fn amount_in_words(&self, formatter: &AmountToWordsFormatter) -> Result<String, InvoiceError> {
        formatter.to_words(self.payable_amount())
    }

    /// Returns true if payment is late as of `today`
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        today > self.due_date && self.status != InvoiceStatus::Paid
    }

    /// Marks a pending invoice overdue once its due date has passed.
    ///
    /// Returns true when the status changed.
    pub fn refresh_status(&mut self, today: NaiveDate) -> bool {
        if self.status == InvoiceStatus::Pending && self.is_overdue(today) {
            self.status = InvoiceStatus::Overdue;
            self.updated_at = Utc::now();
            info!(invoice = %self.invoice_number, due_date = %self.due_date, "Invoice is overdue");
            return true;
        }
        false
    }

    /// Records full payment
    pub fn mark_paid(&mut self) -> Result<(), InvoiceError> {
        self.transition(InvoiceStatus::Paid)
    }

    /// Moves a paid invoice back to pending
    pub fn reopen(&mut self) -> Result<(), InvoiceError> {
        self.transition(InvoiceStatus::Pending)
    }

    fn transition(&mut self, next: InvoiceStatus) -> Result<(), InvoiceError> {
        if !self.status.can_transition_to(next) {
            return Err(InvoiceError::InvalidStatusTransition {
                from: self.status,
                to: next,
            });
        }
        info!(invoice = %self.invoice_number, from = ?self.status, to = ?next, "Invoice status changed");
        self.status = next;
        self.updated_at = Utc::now();
        Ok(())
    }

    fn touch(&mut self) {
        self.recalculate_totals();
        self.updated_at = Utc::now();
    }
}
