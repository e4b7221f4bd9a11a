//! Core Kernel - Foundational types for the invoice system
//!
//! This crate provides the building blocks shared by the invoice domain and
//! the command line interface:
//! - Money types with precise decimal arithmetic and half-up display rounding
//! - Digit grouping for Indian (lakh/crore) and Western amount formatting
//! - Strongly-typed identifiers

pub mod money;
pub mod identifiers;

pub use money::{
    Money, Currency, MoneyError, Rate, DigitGrouping,
    round_half_up, format_grouped,
};
pub use identifiers::{InvoiceId, LineItemId};
