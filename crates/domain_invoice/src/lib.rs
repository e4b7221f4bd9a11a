//! Invoice Domain
//!
//! This crate holds the business logic behind generated invoices: the
//! figures on the document and the words printed under the total.
//!
//! # Tax computation
//!
//! A single effective rate applies to the invoice subtotal and is reported
//! as two components. The default split is the Indian intra-state
//! convention:
//!
//! - **CGST**: half of the tax, collected for the central government
//! - **SGST**: the other half, collected for the state
//!
//! The split share is configurable, and a single-component split covers
//! jurisdictions with one tax line. Sums run at full precision; figures are
//! rounded half-up only for display.
//!
//! # Amount in words
//!
//! Grand totals are spelled out using Indian grouping (crore, lakh,
//! thousand), e.g. `TWELVE LAKH THIRTY FOUR THOUSAND FIVE HUNDRED AND SIXTY
//! SEVEN ONLY`.
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use core_kernel::Currency;
//! use domain_invoice::{AmountToWordsFormatter, Invoice, LineItem};
//! use rust_decimal_macros::dec;
//!
//! let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
//! let mut invoice = Invoice::new("INV-20250314-0001", date, Currency::INR);
//! invoice.add_item(LineItem::new("Website design", dec!(1200))).unwrap();
//!
//! assert_eq!(invoice.totals().grand_total, dec!(1416));
//! assert_eq!(
//!     invoice.amount_in_words(&AmountToWordsFormatter::default()).unwrap(),
//!     "ONE THOUSAND FOUR HUNDRED AND SIXTEEN ONLY"
//! );
//! ```

pub mod line_item;
pub mod tax;
pub mod words;
pub mod invoice;
pub mod parties;
pub mod numbering;
pub mod payment_link;
pub mod validation;
pub mod error;

pub use line_item::LineItem;
pub use tax::{InvoiceTotals, LineBreakdown, LineTax, MoneyTotals, TaxCalculator, TaxSplit};
pub use words::{AmountToWordsFormatter, Casing, WordsStyle};
pub use invoice::{Invoice, InvoiceStatus};
pub use parties::{BankDetails, ClientDetails, CompanyDetails};
pub use numbering::{InvoiceNumber, InvoiceNumberGenerator};
pub use payment_link::UpiPaymentLink;
pub use validation::{InvoiceValidator, ValidationPolicy, ValidationResult};
pub use error::InvoiceError;
