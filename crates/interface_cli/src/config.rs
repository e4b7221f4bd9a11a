//! CLI configuration
//!
//! Settings come from `INVOICE_*` environment variables (a `.env` file is
//! loaded first by the binary). Every key is optional.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use core_kernel::Currency;
use domain_invoice::{Casing, TaxCalculator, TaxSplit, ValidationPolicy, WordsStyle};
use domain_invoice::invoice::{DEFAULT_MAX_ITEMS, DEFAULT_TAX_RATE_PERCENT};

use crate::error::CliError;

const ENV_PREFIX: &str = "INVOICE";

/// CLI configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Log level used when `RUST_LOG` is unset
    pub log_level: String,
    /// Currency for documents that name none and for `words` amounts
    pub currency: String,
    /// Tax rate in percent for documents that carry none
    pub default_tax_rate: Decimal,
    /// Share of tax reported as the first component
    pub split_ratio: Decimal,
    /// Casing of amount-in-words output
    pub words_casing: Casing,
    /// Insert "AND" after hundreds
    pub words_conjunction: bool,
    /// Closing words after the amount
    pub words_suffix: String,
    /// Item limit per invoice
    pub max_items: usize,
    /// Accept negative unit prices
    pub allow_negative_lines: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            currency: "INR".to_string(),
            default_tax_rate: DEFAULT_TAX_RATE_PERCENT,
            split_ratio: dec!(0.5),
            words_casing: Casing::Upper,
            words_conjunction: true,
            words_suffix: "ONLY".to_string(),
            max_items: DEFAULT_MAX_ITEMS,
            allow_negative_lines: false,
        }
    }
}

impl CliConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, CliError> {
        Self::from_environment(config::Environment::with_prefix(ENV_PREFIX))
    }

    fn from_environment(environment: config::Environment) -> Result<Self, CliError> {
        let config = config::Config::builder()
            .add_source(environment)
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    /// Parsed currency
    pub fn currency(&self) -> Result<Currency, CliError> {
        Currency::from_str(&self.currency).map_err(|e| CliError::invalid_setting("currency", e))
    }

    /// CGST/SGST calculator with the configured split share
    pub fn tax_calculator(&self) -> Result<TaxCalculator, CliError> {
        let split = TaxSplit::new("CGST", "SGST", self.split_ratio)
            .map_err(|e| CliError::invalid_setting("split_ratio", e))?;
        Ok(TaxCalculator::new(split))
    }

    pub fn words_style(&self) -> WordsStyle {
        WordsStyle::document()
            .with_casing(self.words_casing)
            .with_conjunction(self.words_conjunction)
            .with_suffix(self.words_suffix.clone())
    }

    pub fn validation_policy(&self) -> ValidationPolicy {
        ValidationPolicy {
            allow_negative_lines: self.allow_negative_lines,
            max_items: self.max_items,
        }
    }

    /// Fails on settings that parse but make no sense
    pub fn validate(&self) -> Result<(), CliError> {
        self.currency()?;
        self.tax_calculator()?;
        if self.default_tax_rate < Decimal::ZERO {
            return Err(CliError::invalid_setting(
                "default_tax_rate",
                format!("cannot be negative: {}", self.default_tax_rate),
            ));
        }
        if self.max_items == 0 {
            return Err(CliError::invalid_setting("max_items", "must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = CliConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.currency().unwrap(), Currency::INR);
        assert_eq!(config.tax_calculator().unwrap(), TaxCalculator::default());
        assert_eq!(config.words_style(), WordsStyle::document());
    }

    #[test]
    fn test_out_of_range_split_rejected() {
        let config = CliConfig {
            split_ratio: dec!(1.5),
            ..CliConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(CliError::InvalidSetting { key: "split_ratio", .. })
        ));
    }

    #[test]
    fn test_unknown_currency_rejected() {
        let config = CliConfig {
            currency: "XYZ".to_string(),
            ..CliConfig::default()
        };
        assert!(config.currency().is_err());
    }

    #[test]
    fn test_policy_mirrors_settings() {
        let config = CliConfig {
            max_items: 3,
            allow_negative_lines: true,
            ..CliConfig::default()
        };
        let policy = config.validation_policy();
        assert_eq!(policy.max_items, 3);
        assert!(policy.allow_negative_lines);
    }

    fn environment(vars: &[(&str, &str)]) -> config::Environment {
        let source: config::Map<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        config::Environment::with_prefix(ENV_PREFIX).source(Some(source))
    }

    #[test]
    fn test_environment_overrides_defaults() {
        let config = CliConfig::from_environment(environment(&[
            ("INVOICE_CURRENCY", "usd"),
            ("INVOICE_DEFAULT_TAX_RATE", "5"),
            ("INVOICE_SPLIT_RATIO", "1"),
            ("INVOICE_WORDS_CASING", "title"),
            ("INVOICE_WORDS_CONJUNCTION", "false"),
            ("INVOICE_WORDS_SUFFIX", "Rupees Only"),
            ("INVOICE_MAX_ITEMS", "3"),
            ("INVOICE_ALLOW_NEGATIVE_LINES", "true"),
            ("OTHER_MAX_ITEMS", "99"),
        ]))
        .unwrap();

        assert_eq!(config.currency().unwrap(), Currency::USD);
        assert_eq!(config.default_tax_rate, dec!(5));
        assert_eq!(config.split_ratio, dec!(1));
        assert_eq!(config.words_casing, Casing::Title);
        assert!(!config.words_conjunction);
        assert_eq!(config.words_suffix, "Rupees Only");
        assert_eq!(config.max_items, 3);
        assert!(config.allow_negative_lines);
        assert_eq!(config.log_level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_environment_gives_defaults() {
        let config = CliConfig::from_environment(environment(&[])).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_unparseable_value_is_a_config_error() {
        let result = CliConfig::from_environment(environment(&[("INVOICE_MAX_ITEMS", "many")]));
        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
