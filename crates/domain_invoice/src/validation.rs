//! Invoice validation rules
//!
//! Tax arithmetic assumes non-negative inputs and never checks them itself.
//! Validation runs before totals are trusted for a document.
//!
//! # Rules
//!
//! ## Errors
//! - Invoice number, company name and client name are required
//! - At least one item, at most `max_items` items
//! - Item quantity must be at least 1
//! - Unit prices must not be negative, unless credit lines are allowed
//! - Tax rates must not be negative
//! - Email and PAN fields, when present, must be well formed
//!
//! ## Warnings
//! - Due date before the invoice date
//! - Blank item descriptions (printed as "Service Item")
//! - Items without an HSN/SAC code

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;
use validator::{Validate, ValidationErrors};

use crate::error::InvoiceError;
use crate::invoice::{Invoice, DEFAULT_MAX_ITEMS};
use crate::line_item::LineItem;

/// What the validator accepts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationPolicy {
    /// Accept negative unit prices (credit-note style lines)
    pub allow_negative_lines: bool,
    /// Maximum number of items per invoice
    pub max_items: usize,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            allow_negative_lines: false,
            max_items: DEFAULT_MAX_ITEMS,
        }
    }
}

/// Result of invoice validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether the invoice is valid
    pub is_valid: bool,
    /// List of validation errors
    pub errors: Vec<String>,
    /// List of validation warnings (non-fatal issues)
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Creates a successful validation result
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an error to the result
    pub fn add_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
        self.is_valid = false;
    }

    /// Adds a warning to the result
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Merges another validation result into this one
    pub fn merge(&mut self, other: ValidationResult) {
        if !other.is_valid {
            self.is_valid = false;
        }
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}

/// Validator for invoice documents
///
/// # Examples
///
/// ```rust,ignore
/// use domain_invoice::validation::{InvoiceValidator, ValidationPolicy};
///
/// let result = InvoiceValidator::validate(&invoice, &ValidationPolicy::default());
/// if !result.is_valid {
///     for error in result.errors {
///         println!("Validation error: {}", error);
///     }
/// }
/// ```
pub struct InvoiceValidator;

impl InvoiceValidator {
    /// Validates the whole document
    pub fn validate(invoice: &Invoice, policy: &ValidationPolicy) -> ValidationResult {
        let mut result = ValidationResult::ok();

        if invoice.invoice_number.trim().is_empty() {
            result.add_error("invoice number is required");
        }

        collect_field_errors(&mut result, "company", invoice.company.validate());
        collect_field_errors(&mut result, "client", invoice.client.validate());

        if invoice.due_date < invoice.invoice_date {
            result.add_warning(format!(
                "due date {} is before invoice date {}",
                invoice.due_date, invoice.invoice_date
            ));
        }

        if invoice.tax_rate_percent() < Decimal::ZERO {
            result.add_error(format!("tax rate cannot be negative: {}", invoice.tax_rate_percent()));
        }

        let items = invoice.items();
        if items.is_empty() {
            result.add_error("invoice must have at least one item");
        }
        if items.len() > policy.max_items {
            result.add_error(format!(
                "invoice has {} items, the maximum is {}",
                items.len(),
                policy.max_items
            ));
        }

        for (index, item) in items.iter().enumerate() {
            result.merge(Self::validate_item(index + 1, item, policy));
        }

        if !result.is_valid {
            warn!(
                invoice = %invoice.invoice_number,
                errors = result.errors.len(),
                "Invoice failed validation"
            );
        }

        result
    }

    /// Validates one row; `row` is 1-based for messages
    pub fn validate_item(row: usize, item: &LineItem, policy: &ValidationPolicy) -> ValidationResult {
        let mut result = ValidationResult::ok();

        if item.quantity == 0 {
            result.add_error(format!("item {row}: quantity must be at least 1"));
        }
        if item.unit_price < Decimal::ZERO && !policy.allow_negative_lines {
            result.add_error(format!("item {row}: unit price cannot be negative: {}", item.unit_price));
        }
        if item.tax_rate_percent < Decimal::ZERO {
            result.add_error(format!("item {row}: tax rate cannot be negative: {}", item.tax_rate_percent));
        }
        if item.description.trim().is_empty() {
            result.add_warning(format!("item {row}: no description, printed as \"{}\"", item.display_description()));
        }
        if item.hsn_code.as_deref().map_or(true, |code| code.trim().is_empty()) {
            result.add_warning(format!("item {row}: no HSN/SAC code, printed as {}", item.display_hsn_code()));
        }

        result
    }

    /// Fails with [`InvoiceError::Validation`] listing every error
    pub fn ensure_valid(invoice: &Invoice, policy: &ValidationPolicy) -> Result<ValidationResult, InvoiceError> {
        let result = Self::validate(invoice, policy);
        if result.is_valid {
            Ok(result)
        } else {
            Err(InvoiceError::Validation(result.errors.join("; ")))
        }
    }
}

/// Checks calculation inputs for one line before computing with it
pub fn validate_line_inputs(item: &LineItem, policy: &ValidationPolicy) -> Result<(), InvoiceError> {
    let result = InvoiceValidator::validate_item(1, item, policy);
    if result.is_valid {
        Ok(())
    } else {
        Err(InvoiceError::Validation(result.errors.join("; ")))
    }
}

fn collect_field_errors(result: &mut ValidationResult, scope: &str, outcome: Result<(), ValidationErrors>) {
    let Err(errors) = outcome else {
        return;
    };

    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |error| match &error.message {
                Some(message) => message.to_string(),
                None => format!("{scope} {field} is invalid ({})", error.code),
            })
        })
        .collect();
    messages.sort();

    for message in messages {
        result.add_error(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_negative_price_depends_on_policy() {
        let item = LineItem::new("Refund", dec!(-100)).with_hsn_code("9983");

        assert!(validate_line_inputs(&item, &ValidationPolicy::default()).is_err());

        let lenient = ValidationPolicy {
            allow_negative_lines: true,
            ..ValidationPolicy::default()
        };
        assert!(validate_line_inputs(&item, &lenient).is_ok());
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let item = LineItem::new("Widget", dec!(10)).with_quantity(0);
        let result = InvoiceValidator::validate_item(3, &item, &ValidationPolicy::default());
        assert!(!result.is_valid);
        assert!(result.errors[0].starts_with("item 3:"));
    }

    #[test]
    fn test_blank_description_is_only_a_warning() {
        let item = LineItem::new("", dec!(10)).with_hsn_code("9983");
        let result = InvoiceValidator::validate_item(1, &item, &ValidationPolicy::default());
        assert!(result.is_valid);
        assert_eq!(result.warnings.len(), 1);
    }
}
