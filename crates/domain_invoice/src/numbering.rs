//! Sequential invoice numbers
//!
//! Numbers look like `INV-20250314-0007`: a prefix, the issue date, and a
//! per-day sequence. The sequence continues from the most recent number when
//! it was issued the same day and restarts at 1 otherwise.

use std::fmt;

use chrono::NaiveDate;
use tracing::debug;

/// Date layout used in the middle segment
const DATE_FORMAT: &str = "%Y%m%d";

/// A parsed invoice number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceNumber {
    pub prefix: String,
    pub date_part: String,
    pub sequence: u32,
}

impl InvoiceNumber {
    /// Parses `<prefix>-<date>-<sequence>`.
    ///
    /// The last two hyphen-separated segments are read as the date and the
    /// sequence, so prefixes may contain hyphens themselves.
    pub fn parse(value: &str) -> Option<Self> {
        let (rest, sequence) = value.trim().rsplit_once('-')?;
        let sequence = sequence.parse::<u32>().ok()?;
        let (prefix, date_part) = rest.rsplit_once('-').unwrap_or(("", rest));

        Some(Self {
            prefix: prefix.to_string(),
            date_part: date_part.to_string(),
            sequence,
        })
    }
}

impl fmt::Display for InvoiceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.prefix.is_empty() {
            write!(f, "{}-{:04}", self.date_part, self.sequence)
        } else {
            write!(f, "{}-{}-{:04}", self.prefix, self.date_part, self.sequence)
        }
    }
}

/// Issues the next number in a prefix's sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceNumberGenerator {
    prefix: String,
}

impl InvoiceNumberGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the number following `last` for an invoice issued `today`
    pub fn next(&self, last: Option<&str>, today: NaiveDate) -> String {
        let date_part = today.format(DATE_FORMAT).to_string();

        let sequence = last
            .and_then(InvoiceNumber::parse)
            .filter(|previous| previous.date_part == date_part)
            .map(|previous| previous.sequence.saturating_add(1))
            .unwrap_or(1);

        let number = InvoiceNumber {
            prefix: self.prefix.clone(),
            date_part,
            sequence,
        };
        debug!(last = ?last, next = %number, "Issued invoice number");
        number.to_string()
    }
}

impl Default for InvoiceNumberGenerator {
    fn default() -> Self {
        Self::new("INV")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_first_number_of_the_day() {
        let generator = InvoiceNumberGenerator::default();
        assert_eq!(generator.next(None, day(2025, 3, 14)), "INV-20250314-0001");
    }

    #[test]
    fn test_same_day_increments() {
        let generator = InvoiceNumberGenerator::default();
        assert_eq!(
            generator.next(Some("INV-20250314-0007"), day(2025, 3, 14)),
            "INV-20250314-0008"
        );
    }

    #[test]
    fn test_new_day_restarts() {
        let generator = InvoiceNumberGenerator::default();
        assert_eq!(
            generator.next(Some("INV-20250313-0042"), day(2025, 3, 14)),
            "INV-20250314-0001"
        );
    }

    #[test]
    fn test_unparseable_last_number_restarts() {
        let generator = InvoiceNumberGenerator::default();
        assert_eq!(generator.next(Some("INV-1718000000000x"), day(2025, 3, 14)), "INV-20250314-0001");
        assert_eq!(generator.next(Some("garbage"), day(2025, 3, 14)), "INV-20250314-0001");
    }

    #[test]
    fn test_parse_hyphenated_prefix() {
        let parsed = InvoiceNumber::parse("ACME-IN-20250314-0012").unwrap();
        assert_eq!(parsed.prefix, "ACME-IN");
        assert_eq!(parsed.date_part, "20250314");
        assert_eq!(parsed.sequence, 12);
        assert_eq!(parsed.to_string(), "ACME-IN-20250314-0012");
    }
}
