//! UPI payment links
//!
//! Builds the `upi://pay` deep link encoded into the payment QR code printed
//! on invoices. UPI settles in rupees only.

use rust_decimal::Decimal;

use core_kernel::{round_half_up, Currency};

use crate::error::InvoiceError;
use crate::invoice::Invoice;

/// Builder for `upi://pay` URIs
pub struct UpiPaymentLink;

impl UpiPaymentLink {
    /// Link paying the invoice's grand total to the configured UPI id
    ///
    /// # Errors
    ///
    /// * [`InvoiceError::MissingPaymentDetails`] when no UPI id is set
    /// * [`InvoiceError::Validation`] for non-INR invoices or malformed ids
    pub fn for_invoice(invoice: &Invoice) -> Result<String, InvoiceError> {
        if invoice.currency != Currency::INR {
            return Err(InvoiceError::validation(format!(
                "UPI payments require INR, invoice is in {}",
                invoice.currency
            )));
        }

        let upi_id = invoice
            .bank
            .as_ref()
            .and_then(|bank| bank.upi_id.as_deref())
            .ok_or_else(|| InvoiceError::MissingPaymentDetails("UPI id".to_string()))?;

        Self::build(
            upi_id,
            &invoice.company.name,
            invoice.totals().grand_total,
            &invoice.invoice_number,
        )
    }

    /// Assembles the link from its parts
    pub fn build(
        upi_id: &str,
        payee_name: &str,
        amount: Decimal,
        invoice_number: &str,
    ) -> Result<String, InvoiceError> {
        let upi_id = upi_id.trim();
        if upi_id.is_empty() || !upi_id.contains('@') || upi_id.contains(char::is_whitespace) {
            return Err(InvoiceError::validation(format!("Invalid UPI id: {upi_id}")));
        }
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(InvoiceError::NegativeAmount(amount));
        }

        let note = format!("Invoice-{invoice_number}");
        Ok(format!(
            "upi://pay?pa={}&pn={}&am={:.2}&cu=INR&tn={}",
            upi_id,
            urlencoding::encode(payee_name),
            round_half_up(amount, 2),
            urlencoding::encode(&note),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_build_encodes_name() {
        let link = UpiPaymentLink::build("acme@upi", "Acme & Sons", dec!(1416), "INV-20250314-0001").unwrap();
        assert_eq!(
            link,
            "upi://pay?pa=acme@upi&pn=Acme%20%26%20Sons&am=1416.00&cu=INR&tn=Invoice-INV-20250314-0001"
        );
    }

    #[test]
    fn test_rejects_malformed_upi_id() {
        assert!(UpiPaymentLink::build("acme", "Acme", dec!(1), "INV-1").is_err());
        assert!(UpiPaymentLink::build("ac me@upi", "Acme", dec!(1), "INV-1").is_err());
    }

    #[test]
    fn test_amount_rounds_half_up() {
        let link = UpiPaymentLink::build("acme@upi", "Acme", dec!(10.005), "INV-1").unwrap();
        assert!(link.contains("&am=10.01&"));
    }
}
