//! Plain-text rendering of invoice figures
//!
//! Each view implements `Display` and writes straight into the formatter,
//! so write errors propagate instead of being dropped.

use std::fmt;

use rust_decimal::Decimal;

use core_kernel::{Currency, Money, Rate};
use domain_invoice::{AmountToWordsFormatter, Invoice, TaxSplit, UpiPaymentLink};

const RULE: &str = "------------------------------------------------------------------------";

/// Printed in place of the words line when the total cannot be spelled out
pub const WORDS_UNAVAILABLE: &str = "(not available for negative totals)";

fn amount(value: Decimal, currency: Currency) -> String {
    Money::new(value, currency).to_document_string()
}

/// Component rate as printed next to its label, e.g. "9%"
fn component_rate(rate_percent: Decimal, share: Decimal) -> Rate {
    Rate::from_percentage(rate_percent * share)
}

fn write_contact(f: &mut fmt::Formatter<'_>, address: &str, extra: [&Option<String>; 2]) -> fmt::Result {
    if !address.trim().is_empty() {
        writeln!(f, "      {}", address.trim())?;
    }
    for line in extra.into_iter().flatten() {
        writeln!(f, "      {line}")?;
    }
    Ok(())
}

/// Subtotal, tax components and grand total, one per line
pub struct TotalsView<'a>(pub &'a Invoice);

impl fmt::Display for TotalsView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let invoice = self.0;
        let totals = invoice.totals();
        let currency = invoice.currency;
        let split: &TaxSplit = invoice.calculator().split();
        let rate = invoice.tax_rate_percent();

        writeln!(f, "{:<20}{:>20}", "Subtotal", amount(totals.subtotal, currency))?;
        writeln!(
            f,
            "{:<20}{:>20}",
            format!("{} ({})", split.component_a_label, component_rate(rate, split.component_a_share())),
            amount(totals.tax_component_a, currency)
        )?;
        if !split.is_single() {
            writeln!(
                f,
                "{:<20}{:>20}",
                format!("{} ({})", split.component_b_label, component_rate(rate, split.component_b_share())),
                amount(totals.tax_component_b, currency)
            )?;
        }
        writeln!(f, "{:<20}{:>20}", "Grand Total", amount(totals.grand_total, currency))
    }
}

/// The full document as plain text
pub struct PreviewView<'a> {
    invoice: &'a Invoice,
    words: Option<String>,
}

impl<'a> PreviewView<'a> {
    /// Spells out the grand total up front; negative totals get no words line
    pub fn new(invoice: &'a Invoice, formatter: &AmountToWordsFormatter) -> Self {
        Self {
            invoice,
            words: invoice.amount_in_words(formatter).ok(),
        }
    }

    fn write_header(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let invoice = self.invoice;
        writeln!(f, "TAX INVOICE")?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "Invoice No: {}", invoice.invoice_number)?;
        writeln!(f, "Date:       {}", invoice.invoice_date.format("%d %b %Y"))?;
        writeln!(f, "Due Date:   {}", invoice.due_date.format("%d %b %Y"))?;
        writeln!(f, "Status:     {:?}", invoice.status)?;
        if let Some(country) = &invoice.country_of_supply {
            writeln!(f, "Country of Supply: {country}")?;
        }
        if let Some(place) = &invoice.place_of_supply {
            writeln!(f, "Place of Supply:   {place}")?;
        }
        writeln!(f, "{RULE}")?;

        let company = &invoice.company;
        writeln!(f, "From: {}", company.name)?;
        write_contact(f, &company.address, [&company.email, &company.phone])?;
        if let Some(tax_id) = &company.tax_id {
            writeln!(f, "      GSTIN: {tax_id}")?;
        }

        let client = &invoice.client;
        writeln!(f, "To:   {}", client.name)?;
        write_contact(f, &client.address, [&client.email, &client.phone])?;
        if let Some(tax_id) = &client.tax_id {
            writeln!(f, "      GSTIN: {tax_id}")?;
        }
        writeln!(f, "{RULE}")
    }

    fn write_lines(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let invoice = self.invoice;
        let currency = invoice.currency;
        let split = invoice.calculator().split();

        writeln!(
            f,
            "{:<3} {:<24} {:<8} {:>4} {:>14} {:>14}",
            "#", "Description", "HSN/SAC", "Qty", "Rate", "Amount"
        )?;
        for (index, (row, item)) in invoice.line_breakdown().iter().zip(invoice.items()).enumerate() {
            writeln!(
                f,
                "{:<3} {:<24} {:<8} {:>4} {:>14} {:>14}",
                index + 1,
                row.description,
                row.hsn_code,
                item.quantity,
                amount(row.unit_price, currency),
                amount(row.amount, currency),
            )?;
            let tax = row.tax.rounded(currency);
            if split.is_single() {
                writeln!(f, "    {} {}", split.component_a_label, amount(tax.component_a, currency))?;
            } else {
                writeln!(
                    f,
                    "    {} {}  {} {}",
                    split.component_a_label,
                    amount(tax.component_a, currency),
                    split.component_b_label,
                    amount(tax.component_b, currency),
                )?;
            }
        }
        writeln!(f, "{RULE}")
    }

    fn write_payment(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let invoice = self.invoice;
        let Some(bank) = &invoice.bank else {
            return Ok(());
        };

        writeln!(f, "{RULE}")?;
        writeln!(f, "Bank Details")?;
        writeln!(f, "  Account Name: {}", bank.account_name)?;
        writeln!(f, "  Account No:   {}", bank.account_number)?;
        writeln!(f, "  Bank:         {}", bank.bank_name)?;
        writeln!(f, "  IFSC:         {}", bank.ifsc_code)?;
        if let Some(upi) = &bank.upi_id {
            writeln!(f, "  UPI:          {upi}")?;
        }
        if invoice.show_payment_qr {
            if let Ok(link) = UpiPaymentLink::for_invoice(invoice) {
                writeln!(f, "  Pay via UPI:  {link}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for PreviewView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let invoice = self.invoice;
        self.write_header(f)?;
        self.write_lines(f)?;

        write!(f, "{}", TotalsView(invoice))?;
        writeln!(
            f,
            "Amount in words: {}",
            self.words.as_deref().unwrap_or(WORDS_UNAVAILABLE)
        )?;

        self.write_payment(f)?;

        for (title, text) in [
            ("Payment Terms", &invoice.payment_terms),
            ("Terms & Conditions", &invoice.terms_and_conditions),
            ("Notes", &invoice.notes),
        ] {
            if let Some(text) = text {
                writeln!(f, "{title}: {text}")?;
            }
        }
        Ok(())
    }
}

pub fn render_totals(invoice: &Invoice) -> String {
    TotalsView(invoice).to_string()
}

pub fn render_preview(invoice: &Invoice, formatter: &AmountToWordsFormatter) -> String {
    PreviewView::new(invoice, formatter).to_string()
}
