//! Unit tests for the Money module
//!
//! Tests cover money creation, currency parsing, half-up rounding and
//! grouped formatting.

use core_kernel::{format_grouped, round_half_up, Currency, DigitGrouping, Money, MoneyError, Rate};
use rust_decimal_macros::dec;

mod creation {
    use super::*;

    #[test]
    fn test_new_creates_money_with_correct_amount() {
        let m = Money::new(dec!(100.50), Currency::INR);
        assert_eq!(m.amount(), dec!(100.50));
        assert_eq!(m.currency(), Currency::INR);
    }

    #[test]
    fn test_new_does_not_round() {
        let m = Money::new(dec!(0.333333333333), Currency::INR);
        assert_eq!(m.amount(), dec!(0.333333333333));
    }

    #[test]
    fn test_equality_includes_currency() {
        assert_ne!(
            Money::new(dec!(100), Currency::INR),
            Money::new(dec!(100), Currency::USD)
        );
    }

    #[test]
    fn test_default_currency_is_inr() {
        assert_eq!(Currency::default(), Currency::INR);
    }
}

mod currency {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("inr".parse::<Currency>().unwrap(), Currency::INR);
        assert_eq!(" Usd ".parse::<Currency>().unwrap(), Currency::USD);
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            "XYZ".parse::<Currency>(),
            Err(MoneyError::UnknownCurrency("XYZ".to_string()))
        );
    }

    #[test]
    fn test_document_symbol() {
        assert_eq!(Currency::INR.document_symbol(), "Rs.");
        assert_eq!(Currency::USD.document_symbol(), "$");
    }

    #[test]
    fn test_serde_uses_codes() {
        let json = serde_json::to_string(&Currency::INR).unwrap();
        assert_eq!(json, "\"INR\"");
    }
}

mod rounding {
    use super::*;

    #[test]
    fn test_round_to_currency_is_half_up() {
        assert_eq!(Money::new(dec!(10.125), Currency::INR).round_to_currency().amount(), dec!(10.13));
        assert_eq!(Money::new(dec!(10.115), Currency::INR).round_to_currency().amount(), dec!(10.12));
        assert_eq!(Money::new(dec!(10.5), Currency::JPY).round_to_currency().amount(), dec!(11));
    }

    #[test]
    fn test_round_half_up_helper() {
        assert_eq!(round_half_up(dec!(0.005), 2), dec!(0.01));
        assert_eq!(round_half_up(dec!(0.0049), 2), dec!(0.00));
    }

    #[test]
    fn test_jpy_document_string_has_no_fraction() {
        let m = Money::new(dec!(10000.5), Currency::JPY);
        assert_eq!(m.to_document_string(), "¥ 10,001");
    }

    #[test]
    fn test_display_rounds() {
        let m = Money::new(dec!(1415.995), Currency::INR);
        assert_eq!(m.to_string(), "₹ 1416.00");
    }
}

mod formatting {
    use super::*;

    #[test]
    fn test_indian_grouping_of_lakh_and_crore() {
        assert_eq!(format_grouped(dec!(1234567), 2, DigitGrouping::Indian), "12,34,567.00");
        assert_eq!(format_grouped(dec!(10000000), 2, DigitGrouping::Indian), "1,00,00,000.00");
    }

    #[test]
    fn test_usd_uses_western_grouping() {
        let m = Money::new(dec!(1234567.5), Currency::USD);
        assert_eq!(m.to_grouped_string(), "$1,234,567.50");
    }

    #[test]
    fn test_small_negative_that_rounds_to_zero_has_no_sign() {
        let m = Money::new(dec!(-0.001), Currency::INR);
        assert_eq!(m.to_grouped_string(), "₹0.00");
    }
}

mod rate {
    use super::*;

    #[test]
    fn test_keeps_percentage() {
        assert_eq!(Rate::from_percentage(dec!(18)).as_percentage(), dec!(18));
    }

    #[test]
    fn test_display_trims_trailing_zeros() {
        assert_eq!(Rate::from_percentage(dec!(9.000)).to_string(), "9%");
    }

    #[test]
    fn test_display_fractional_percentage() {
        assert_eq!(Rate::from_percentage(dec!(2.5)).to_string(), "2.5%");
    }
}
