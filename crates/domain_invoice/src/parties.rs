//! Seller, buyer and bank details printed on an invoice
//!
//! Forms submit blank fields as empty strings; optional fields treat those
//! as absent so format checks only run on values that were actually entered.

use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

/// The issuing company
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CompanyDetails {
    #[validate(length(min = 1, message = "company name is required"))]
    pub name: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(email(message = "company email is not a valid address"))]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: String,
    /// GSTIN or other tax registration number
    #[serde(default, deserialize_with = "empty_as_none")]
    pub tax_id: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(length(equal = 10, message = "PAN must be 10 characters"))]
    pub pan: Option<String>,
    /// Logo as a data URL
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

impl CompanyDetails {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_tax_id(mut self, tax_id: impl Into<String>) -> Self {
        self.tax_id = Some(tax_id.into());
        self
    }
}

/// The billed client
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ClientDetails {
    #[validate(length(min = 1, message = "client name is required"))]
    pub name: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(email(message = "client email is not a valid address"))]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub tax_id: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(length(equal = 10, message = "PAN must be 10 characters"))]
    pub pan: Option<String>,
}

impl ClientDetails {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Where the client should pay
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankDetails {
    pub account_name: String,
    pub account_number: String,
    pub bank_name: String,
    pub ifsc_code: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub upi_id: Option<String>,
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_strings_become_none() {
        let json = r#"{"name":"Acme","email":"","phone":"  ","address":"","tax_id":"","pan":""}"#;
        let company: CompanyDetails = serde_json::from_str(json).unwrap();
        assert_eq!(company.email, None);
        assert_eq!(company.phone, None);
        assert!(company.validate().is_ok());
    }

    #[test]
    fn test_invalid_email_fails_validation() {
        let client = ClientDetails::new("Globex").with_email("not-an-email");
        assert!(client.validate().is_err());
    }

    #[test]
    fn test_missing_name_fails_validation() {
        let company = CompanyDetails::default();
        let errors = company.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }
}
