//! Cell-cleaning helpers for untrusted workbook input.
//!
//! Spreadsheet cells arrive heterogeneously typed: numbers stored as text,
//! missing cells, stray whitespace, pandas-style "NaN" markers. Every function
//! here is total; parse failures degrade to a well-defined absence value
//! instead of panicking.

use bigdecimal::{BigDecimal, Zero};
use calamine::Data;
use std::str::FromStr;

/// Sentinel returned by [`extract_digits`] when no digits are available.
pub const DIGIT_SENTINEL: &str = "000000";

/// Trimmed string form of a cell, or `None` for empty, blank or "NaN" cells.
///
/// The "NaN" token match is case-sensitive; float NaN cells render as the same
/// token and are absent as well. Never returns an empty string.
pub fn clean_text(cell: &Data) -> Option<String> {
    if matches!(cell, Data::Empty | Data::Error(_)) {
        return None;
    }

    let text = cell.to_string();
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == "NaN" {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Exact decimal value of a cell, degrading to zero on any parse failure.
pub fn clean_amount(cell: &Data) -> BigDecimal {
    match cell {
        Data::Int(i) => BigDecimal::from(*i),
        Data::Float(f) => {
            // NaN renders as the "NaN" token and fails the parse below
            BigDecimal::from_str(&f.to_string()).unwrap_or_else(|_| BigDecimal::zero())
        }
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() || trimmed == "NaN" {
                BigDecimal::zero()
            } else {
                BigDecimal::from_str(trimmed).unwrap_or_else(|_| BigDecimal::zero())
            }
        }
        _ => BigDecimal::zero(),
    }
}

/// ASCII decimal digits of an identifier in original order.
///
/// Returns [`DIGIT_SENTINEL`] when the identifier is absent or digit-free.
pub fn extract_digits(identifier: Option<&str>) -> String {
    let digits: String = identifier
        .unwrap_or("")
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();

    if digits.is_empty() {
        DIGIT_SENTINEL.to_string()
    } else {
        digits
    }
}
