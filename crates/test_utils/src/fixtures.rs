//! Pre-built Test Fixtures
//!
//! Ready-to-use invoice data. Fixed values are predictable for assertions;
//! the `random_*` helpers use `fake` where the exact text does not matter.

use chrono::NaiveDate;
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::SafeEmail;
use fake::Fake;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{Currency, Money};
use domain_invoice::{BankDetails, ClientDetails, CompanyDetails, LineItem};

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// The single-item scenario's grand total
    pub fn inr_1416() -> Money {
        Money::new(dec!(1416), Currency::INR)
    }

    /// An amount that exercises lakh grouping
    pub fn inr_12_lakh() -> Money {
        Money::new(dec!(1234567.89), Currency::INR)
    }

    pub fn usd_100() -> Money {
        Money::new(dec!(100.00), Currency::USD)
    }

    /// Creates a JPY amount (zero decimal places)
    pub fn jpy_10000() -> Money {
        Money::new(dec!(10000), Currency::JPY)
    }
}

/// Fixture for dates
pub struct DateFixtures;

impl DateFixtures {
    pub fn invoice_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    /// Fifteen days after [`DateFixtures::invoice_date`]
    pub fn due_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 29).unwrap()
    }

    pub fn after_due_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()
    }
}

/// Fixture for parties and payment details
pub struct PartyFixtures;

impl PartyFixtures {
    pub fn company() -> CompanyDetails {
        CompanyDetails::new("Acme Studio")
            .with_email("billing@acme.in")
            .with_tax_id("29AAACA1234A1Z5")
    }

    pub fn client() -> ClientDetails {
        ClientDetails::new("Globex Retail").with_email("accounts@globex.in")
    }

    pub fn bank() -> BankDetails {
        BankDetails {
            account_name: "Acme Studio".to_string(),
            account_number: "1234567890".to_string(),
            bank_name: "State Bank".to_string(),
            ifsc_code: "SBIN0001234".to_string(),
            upi_id: Some("acme@upi".to_string()),
        }
    }

    /// A company with a generated name and email
    pub fn random_company() -> CompanyDetails {
        let name: String = CompanyName().fake();
        let email: String = SafeEmail().fake();
        CompanyDetails::new(name).with_email(email)
    }

    /// A client with a generated name and email
    pub fn random_client() -> ClientDetails {
        let name: String = CompanyName().fake();
        let email: String = SafeEmail().fake();
        ClientDetails::new(name).with_email(email)
    }
}

/// Fixture for line items
pub struct ItemFixtures;

impl ItemFixtures {
    /// One unit at 1200, the canonical 18% example
    pub fn design_work() -> LineItem {
        LineItem::new("Website design", dec!(1200)).with_hsn_code("998391")
    }

    /// Two units at 500
    pub fn consulting() -> LineItem {
        LineItem::new("Consulting", dec!(500))
            .with_quantity(2)
            .with_hsn_code("998311")
    }

    /// One unit at 250
    pub fn hosting() -> LineItem {
        LineItem::new("Hosting", dec!(250)).with_hsn_code("998315")
    }

    /// A credit line with a negative price
    pub fn refund(amount: Decimal) -> LineItem {
        LineItem::new("Refund", -amount).with_hsn_code("998311")
    }
}
