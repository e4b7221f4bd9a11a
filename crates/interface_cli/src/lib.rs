//! Invoice command-line interface
//!
//! Library half of the `invoice-cli` binary.
//!
//! # Architecture
//!
//! - **config**: `INVOICE_*` environment settings and the domain objects built from them
//! - **document**: JSON invoice documents on disk
//! - **render**: plain-text totals and previews
//! - **error**: configuration errors

pub mod config;
pub mod document;
pub mod render;
pub mod error;

pub use config::CliConfig;
pub use error::CliError;
