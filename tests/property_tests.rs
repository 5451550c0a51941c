/// Property-based tests using proptest
/// Tests invariants that must hold for any workbook cell input
use bigdecimal::BigDecimal;
use calamine::Data;
use proptest::prelude::*;
use sb_importer::normalize::{clean_amount, clean_text, extract_digits};
use std::str::FromStr;

// Property: text cleaning should never panic and its output is canonical
proptest! {
    #[test]
    fn clean_text_never_panics(s in "\\PC*") {
        let _ = clean_text(&Data::String(s));
    }

    #[test]
    fn clean_text_output_is_trimmed_and_nonempty(s in "\\PC*") {
        if let Some(out) = clean_text(&Data::String(s)) {
            prop_assert!(!out.is_empty());
            prop_assert!(out == out.trim());
            prop_assert!(out != "NaN");
        }
    }

    #[test]
    fn clean_text_idempotent_over_own_output(s in "\\PC*") {
        if let Some(out) = clean_text(&Data::String(s)) {
            prop_assert_eq!(clean_text(&Data::String(out.clone())), Some(out));
        }
    }
}

// Property: amount cleaning is total over arbitrary text and floats
proptest! {
    #[test]
    fn clean_amount_never_panics_on_text(s in "\\PC*") {
        let _ = clean_amount(&Data::String(s));
    }

    #[test]
    fn clean_amount_never_panics_on_floats(f in proptest::num::f64::ANY) {
        let _ = clean_amount(&Data::Float(f));
    }

    #[test]
    fn clean_amount_parses_plain_decimals(int_part in 0u64..1_000_000u64, frac in 0u8..100u8) {
        let text = format!("{}.{:02}", int_part, frac);
        let expected = BigDecimal::from_str(&text).unwrap();
        prop_assert_eq!(clean_amount(&Data::String(text)), expected);
    }
}

// Property: digit extraction keeps digits only, in original order
proptest! {
    #[test]
    fn extract_digits_never_empty(s in "\\PC*") {
        let out = extract_digits(Some(&s));
        prop_assert!(!out.is_empty());
        prop_assert!(out.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn extract_digits_preserves_order(digits in "[0-9]{1,12}") {
        let formatted = format!("AC-{}-XY", digits);
        prop_assert_eq!(extract_digits(Some(&formatted)), digits);
    }

    #[test]
    fn extract_digits_matches_manual_filter(s in "\\PC*") {
        let manual: String = s.chars().filter(|c| c.is_ascii_digit()).collect();
        let out = extract_digits(Some(&s));
        if manual.is_empty() {
            prop_assert_eq!(out, "000000");
        } else {
            prop_assert_eq!(out, manual);
        }
    }
}
