//! Document workflow tests for interface_cli

use rust_decimal_macros::dec;
use tempfile::TempDir;

use domain_invoice::{AmountToWordsFormatter, InvoiceValidator, UpiPaymentLink};
use interface_cli::{document, render, CliConfig};

const STALE_DOCUMENT: &str = r#"{
    "invoice_number": "INV-20250314-0003",
    "invoice_date": "2025-03-14",
    "due_date": "2025-03-29",
    "company": { "name": "Acme Studio", "email": "", "address": "12 MG Road, Bengaluru" },
    "client": { "name": "Globex Retail", "tax_id": "29ABCDE1234F1Z5" },
    "bank": {
        "account_name": "Acme Studio",
        "account_number": "1234567890",
        "bank_name": "State Bank",
        "ifsc_code": "SBIN0001234",
        "upi_id": "acme@upi"
    },
    "items": [
        { "description": "Consulting", "hsn_code": "998311", "quantity": 2, "unit_price": "500" },
        { "description": "", "quantity": 1, "unit_price": "250" }
    ],
    "tax_rate_percent": "0",
    "totals": { "subtotal": "9", "tax_component_a": "9", "tax_component_b": "9", "grand_total": "27" }
}"#;

fn write_document(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("invoice.json");
    std::fs::write(&path, STALE_DOCUMENT).unwrap();
    path
}

mod recompute_tests {
    use super::*;

    #[test]
    fn test_recompute_rewrites_stale_totals() {
        let dir = TempDir::new().unwrap();
        let path = write_document(&dir);
        let config = CliConfig::default();

        let invoice = document::load_invoice(&path, &config).unwrap();
        assert_eq!(invoice.totals().grand_total, dec!(1250));

        let out = dir.path().join("fresh.json");
        document::save_invoice(&out, &invoice).unwrap();

        let reloaded: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(reloaded["totals"]["subtotal"].as_str().unwrap().parse::<rust_decimal::Decimal>().unwrap(), dec!(1250));
        assert_eq!(reloaded["company"]["email"], serde_json::Value::Null);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.json");
        let err = document::load_invoice(&missing, &CliConfig::default()).unwrap_err();
        assert!(format!("{err:#}").contains("nope.json"));
    }
}

mod output_tests {
    use super::*;

    #[test]
    fn test_preview_of_loaded_document() {
        let dir = TempDir::new().unwrap();
        let invoice = document::load_invoice(&write_document(&dir), &CliConfig::default()).unwrap();

        let text = render::render_preview(&invoice, &AmountToWordsFormatter::default());
        assert!(text.contains("12 MG Road, Bengaluru"));
        assert!(text.contains("GSTIN: 29ABCDE1234F1Z5"));
        assert!(text.contains("Service Item"));
        assert!(text.contains("CGST (0%)"));
        assert!(text.contains("Rs. 1,250.00"));
        assert!(text.contains("ONE THOUSAND TWO HUNDRED AND FIFTY ONLY"));
        assert!(text.contains("UPI:          acme@upi"));
    }

    #[test]
    fn test_validation_warns_about_missing_hsn() {
        let dir = TempDir::new().unwrap();
        let config = CliConfig::default();
        let invoice = document::load_invoice(&write_document(&dir), &config).unwrap();

        let result = InvoiceValidator::validate(&invoice, &config.validation_policy());
        assert!(result.is_valid, "{:?}", result.errors);
        assert_eq!(result.warnings.len(), 2);
    }

    #[test]
    fn test_payment_link_uses_recomputed_total() {
        let dir = TempDir::new().unwrap();
        let invoice = document::load_invoice(&write_document(&dir), &CliConfig::default()).unwrap();

        let link = UpiPaymentLink::for_invoice(&invoice).unwrap();
        assert!(link.contains("&am=1250.00&"));
    }
}
