//! Invoice documents on disk
//!
//! Documents are pretty-printed JSON. Stored totals are never trusted: a
//! loaded invoice gets the configured calculator and item limit, which
//! recomputes its totals. A document without `currency` or
//! `tax_rate_percent` takes the configured currency and default tax rate.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use domain_invoice::Invoice;

use crate::config::CliConfig;

/// Reads a document and recomputes its totals with the configured settings
pub fn load_invoice(path: &Path, config: &CliConfig) -> Result<Invoice> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read invoice document {}", path.display()))?;
    let invoice = parse_invoice(&raw, config)
        .with_context(|| format!("failed to parse invoice document {}", path.display()))?;

    debug!(
        path = %path.display(),
        invoice = %invoice.invoice_number,
        items = invoice.items().len(),
        "Loaded invoice document"
    );
    Ok(invoice)
}

/// Parses a JSON document and applies the configured settings
pub fn parse_invoice(raw: &str, config: &CliConfig) -> Result<Invoice> {
    let value: serde_json::Value = serde_json::from_str(raw).context("invalid invoice JSON")?;
    let has_currency = value.get("currency").is_some();
    let has_tax_rate = value.get("tax_rate_percent").is_some();

    let invoice: Invoice = serde_json::from_value(value).context("invalid invoice document")?;
    let mut invoice = invoice
        .with_calculator(config.tax_calculator()?)
        .with_max_items(config.max_items);

    if !has_currency {
        invoice.currency = config.currency()?;
    }
    if !has_tax_rate {
        debug!(
            invoice = %invoice.invoice_number,
            rate = %config.default_tax_rate,
            "Document has no tax rate, using configured default"
        );
        invoice.set_tax_rate(config.default_tax_rate);
    }
    Ok(invoice)
}

/// Writes a document, totals included
pub fn save_invoice(path: &Path, invoice: &Invoice) -> Result<()> {
    let json = serde_json::to_string_pretty(invoice).context("failed to serialize invoice")?;
    fs::write(path, json + "\n")
        .with_context(|| format!("failed to write invoice document {}", path.display()))?;

    info!(
        path = %path.display(),
        invoice = %invoice.invoice_number,
        grand_total = %invoice.totals().grand_total,
        "Saved invoice document"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    const DOCUMENT: &str = r#"{
        "invoice_number": "INV-20250314-0001",
        "invoice_date": "2025-03-14",
        "due_date": "2025-03-29",
        "company": { "name": "Acme Studio" },
        "client": { "name": "Globex Retail" },
        "items": [ { "description": "Design", "quantity": 1, "unit_price": "1200" } ]
    }"#;

    #[test]
    fn test_parse_recomputes_totals() {
        let invoice = parse_invoice(DOCUMENT, &CliConfig::default()).unwrap();
        assert_eq!(invoice.totals().grand_total, dec!(1416));
        assert_eq!(invoice.max_items(), 10);
    }

    #[test]
    fn test_parse_uses_configured_split() {
        let config = CliConfig {
            split_ratio: dec!(1),
            ..CliConfig::default()
        };
        let invoice = parse_invoice(DOCUMENT, &config).unwrap();
        assert_eq!(invoice.totals().tax_component_a, dec!(216));
        assert_eq!(invoice.totals().tax_component_b, dec!(0));
    }

    #[test]
    fn test_missing_tax_rate_uses_configured_default() {
        let config = CliConfig {
            default_tax_rate: dec!(5),
            ..CliConfig::default()
        };
        let invoice = parse_invoice(DOCUMENT, &config).unwrap();
        assert_eq!(invoice.tax_rate_percent(), dec!(5));
        assert_eq!(invoice.totals().tax_component_a, dec!(30));
        assert_eq!(invoice.totals().grand_total, dec!(1260));
    }

    #[test]
    fn test_document_tax_rate_wins_over_default() {
        let raw = DOCUMENT.replacen("{", r#"{ "tax_rate_percent": "12","#, 1);
        let config = CliConfig {
            default_tax_rate: dec!(5),
            ..CliConfig::default()
        };
        let invoice = parse_invoice(&raw, &config).unwrap();
        assert_eq!(invoice.totals().grand_total, dec!(1344));
    }

    #[test]
    fn test_missing_currency_uses_configured_currency() {
        let config = CliConfig {
            currency: "usd".to_string(),
            ..CliConfig::default()
        };
        let invoice = parse_invoice(DOCUMENT, &config).unwrap();
        assert_eq!(invoice.currency, Currency::USD);

        let raw = DOCUMENT.replacen("{", r#"{ "currency": "INR","#, 1);
        let invoice = parse_invoice(&raw, &config).unwrap();
        assert_eq!(invoice.currency, Currency::INR);
    }

    #[test]
    fn test_unknown_configured_currency_fails() {
        let config = CliConfig {
            currency: "XYZ".to_string(),
            ..CliConfig::default()
        };
        assert!(parse_invoice(DOCUMENT, &config).is_err());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_invoice("{ not json", &CliConfig::default()).is_err());
    }
}
