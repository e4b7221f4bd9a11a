//! Test Utilities Crate
//!
//! Shared test infrastructure, fixtures, and helpers for the invoice test
//! suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built test data for parties, items and amounts
//! - `builders`: Builder patterns for invoices and line items
//! - `assertions`: Custom assertion helpers for invoice figures
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
