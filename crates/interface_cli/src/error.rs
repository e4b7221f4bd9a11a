//! CLI error handling

use thiserror::Error;

use domain_invoice::InvoiceError;

/// Errors raised while turning configuration into domain settings
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid setting {key}: {reason}")]
    InvalidSetting { key: &'static str, reason: String },

    #[error(transparent)]
    Invoice(#[from] InvoiceError),
}

impl CliError {
    pub fn invalid_setting(key: &'static str, reason: impl ToString) -> Self {
        Self::InvalidSetting {
            key,
            reason: reason.to_string(),
        }
    }
}
