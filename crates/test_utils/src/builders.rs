//! Test Data Builders
//!
//! Builder patterns for constructing invoices in tests. Tests specify only
//! the relevant fields and take defaults for everything else.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::Currency;
use domain_invoice::{BankDetails, ClientDetails, CompanyDetails, Invoice, LineItem, TaxCalculator};

use crate::fixtures::{DateFixtures, PartyFixtures};

/// Builder for line items
pub struct LineItemBuilder {
    description: String,
    hsn_code: Option<String>,
    quantity: u32,
    unit_price: Decimal,
    tax_rate_percent: Decimal,
}

impl Default for LineItemBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LineItemBuilder {
    /// One unit at 100, HSN 998311, 18%
    pub fn new() -> Self {
        Self {
            description: "Professional services".to_string(),
            hsn_code: Some("998311".to_string()),
            quantity: 1,
            unit_price: dec!(100),
            tax_rate_percent: dec!(18),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Leaves the HSN/SAC code empty
    pub fn without_hsn_code(mut self) -> Self {
        self.hsn_code = None;
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_unit_price(mut self, unit_price: Decimal) -> Self {
        self.unit_price = unit_price;
        self
    }

    pub fn with_tax_rate(mut self, rate_percent: Decimal) -> Self {
        self.tax_rate_percent = rate_percent;
        self
    }

    pub fn build(self) -> LineItem {
        let item = LineItem::new(self.description, self.unit_price)
            .with_quantity(self.quantity)
            .with_tax_rate(self.tax_rate_percent);
        match self.hsn_code {
            Some(code) => item.with_hsn_code(code),
            None => item,
        }
    }
}

/// Builder for invoice documents
pub struct InvoiceBuilder {
    invoice_number: String,
    invoice_date: NaiveDate,
    due_date: Option<NaiveDate>,
    currency: Currency,
    company: CompanyDetails,
    client: ClientDetails,
    bank: Option<BankDetails>,
    items: Vec<LineItem>,
    tax_rate_percent: Decimal,
    calculator: TaxCalculator,
    max_items: Option<usize>,
}

impl Default for InvoiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl InvoiceBuilder {
    /// An INR invoice from the fixture company to the fixture client, no items
    pub fn new() -> Self {
        Self {
            invoice_number: "INV-20250314-0001".to_string(),
            invoice_date: DateFixtures::invoice_date(),
            due_date: None,
            currency: Currency::INR,
            company: PartyFixtures::company(),
            client: PartyFixtures::client(),
            bank: Some(PartyFixtures::bank()),
            items: Vec::new(),
            tax_rate_percent: dec!(18),
            calculator: TaxCalculator::default(),
            max_items: None,
        }
    }

    pub fn with_invoice_number(mut self, number: impl Into<String>) -> Self {
        self.invoice_number = number.into();
        self
    }

    pub fn with_invoice_date(mut self, date: NaiveDate) -> Self {
        self.invoice_date = date;
        self
    }

    pub fn with_due_date(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
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

    pub fn without_bank(mut self) -> Self {
        self.bank = None;
        self
    }

    pub fn with_item(mut self, item: LineItem) -> Self {
        self.items.push(item);
        self
    }

    /// Adds `quantity × unit_price` with default description and HSN code
    pub fn with_priced_item(self, quantity: u32, unit_price: Decimal) -> Self {
        self.with_item(
            LineItemBuilder::new()
                .with_quantity(quantity)
                .with_unit_price(unit_price)
                .build(),
        )
    }

    pub fn with_tax_rate(mut self, rate_percent: Decimal) -> Self {
        self.tax_rate_percent = rate_percent;
        self
    }

    pub fn with_calculator(mut self, calculator: TaxCalculator) -> Self {
        self.calculator = calculator;
        self
    }

    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = Some(max_items);
        self
    }

    /// Builds the invoice.
    ///
    /// # Panics
    ///
    /// Panics if more items were added than the item limit allows.
    pub fn build(self) -> Invoice {
        let mut invoice = Invoice::new(self.invoice_number, self.invoice_date, self.currency)
            .with_calculator(self.calculator)
            .with_company(self.company)
            .with_client(self.client);
        if let Some(max_items) = self.max_items {
            invoice = invoice.with_max_items(max_items);
        }
        if let Some(due_date) = self.due_date {
            invoice = invoice.with_due_date(due_date);
        }
        if let Some(bank) = self.bank {
            invoice = invoice.with_bank(bank);
        }

        invoice.set_tax_rate(self.tax_rate_percent);
        invoice
            .set_items(self.items)
            .expect("builder items exceed the invoice item limit");
        invoice
    }
}
