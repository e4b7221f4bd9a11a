//! Invoice domain errors

use rust_decimal::Decimal;
use thiserror::Error;

use crate::invoice::InvoiceStatus;

/// Errors that can occur in the invoice domain
#[derive(Debug, Error)]
pub enum InvoiceError {
    /// Input failed a validation rule
    #[error("Validation error: {0}")]
    Validation(String),

    /// Amount cannot be rendered in words
    #[error("Negative amount cannot be converted to words: {0}")]
    NegativeAmount(Decimal),

    /// Tax split share outside [0, 1]
    #[error("Invalid tax split share: {0} (expected a value between 0 and 1)")]
    InvalidSplit(Decimal),

    /// Item limit reached
    #[error("An invoice can hold at most {max} items")]
    TooManyItems { max: usize },

    /// Line item not found
    #[error("Line item not found: {0}")]
    LineItemNotFound(String),

    /// Status change not allowed
    #[error("Invalid status transition from {from:?} to {to:?}")]
    InvalidStatusTransition {
        from: InvoiceStatus,
        to: InvoiceStatus,
    },

    /// Required payment details are missing
    #[error("Missing payment details: {0}")]
    MissingPaymentDetails(String),
}

impl InvoiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        InvoiceError::Validation(message.into())
    }
}
