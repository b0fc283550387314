//! Regex patterns for receipt field extraction.
//!
//! Each heuristic the extractors rely on is a named pattern here so it can be
//! unit-tested in isolation and swapped without touching extractor control
//! flow.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Everything a normalized line is NOT allowed to keep: anything outside
    // word characters, digits, currency symbols, and basic punctuation.
    pub static ref DISALLOWED_CHARS: Regex = Regex::new(
        r"[^\w₹€$.,:/\- ]+"
    ).unwrap();

    // Indian GST identification number, 15 characters, case-sensitive.
    pub static ref GSTIN: Regex = Regex::new(
        r"\b\d{2}[A-Z]{5}\d{4}[A-Z]\wZ\w\b"
    ).unwrap();

    // Bare 10-digit phone number.
    pub static ref PHONE: Regex = Regex::new(
        r"\b\d{10}\b"
    ).unwrap();

    // Labeled invoice/bill number; the trailing token is the value.
    pub static ref INVOICE_NUMBER: Regex = Regex::new(
        r"(?i)(invoice|bill)\s*(no|number)?\s*[:\-]?\s*([A-Z0-9\-]+)"
    ).unwrap();

    // Numeric date (12/05/2024, 1-5-24) or day + month name + year
    // (12 May 2024). Kept as one alternation so leftmost-match semantics
    // across the two forms are preserved.
    pub static ref DATE: Regex = Regex::new(
        r"\b\d{1,2}[/-]\d{1,2}[/-]\d{2,4}\b|\b\d{1,2}\s+[A-Za-z]{3,}\s+\d{4}\b"
    ).unwrap();

    // A maximal run of digits.
    pub static ref DIGIT_RUN: Regex = Regex::new(
        r"\d+"
    ).unwrap();

    // Any digit at all.
    pub static ref ANY_DIGIT: Regex = Regex::new(
        r"\d"
    ).unwrap();

    // Monetary amount on a summary line: optional rupee sign, 2-7 digits.
    pub static ref AMOUNT: Regex = Regex::new(
        r"₹?\s*(\d{2,7})"
    ).unwrap();

    // Tax figure on a CGST/SGST line: optional rupee sign, any digit run.
    pub static ref TAX_FIGURE: Regex = Regex::new(
        r"₹?\s*(\d+)"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gstin_matches_valid_identifier() {
        assert_eq!(
            GSTIN.find("GSTIN: 29ABCDE1234F1Z5").map(|m| m.as_str()),
            Some("29ABCDE1234F1Z5")
        );
    }

    #[test]
    fn test_gstin_is_case_sensitive() {
        assert!(GSTIN.find("29abcde1234f1z5").is_none());
    }

    #[test]
    fn test_gstin_requires_z_in_fourteenth_position() {
        assert!(GSTIN.find("29ABCDE1234F1X5").is_none());
    }

    #[test]
    fn test_phone_requires_exactly_ten_digits() {
        assert_eq!(
            PHONE.find("Ph: 9876543210").map(|m| m.as_str()),
            Some("9876543210")
        );
        assert!(PHONE.find("12345").is_none());
        assert!(PHONE.find("123456789012").is_none());
    }

    #[test]
    fn test_invoice_number_variants() {
        let caps = INVOICE_NUMBER.captures("Invoice No: INV-2024-001").unwrap();
        assert_eq!(&caps[3], "INV-2024-001");

        let caps = INVOICE_NUMBER.captures("bill number 42").unwrap();
        assert_eq!(&caps[3], "42");

        let caps = INVOICE_NUMBER.captures("BILL- B-17").unwrap();
        assert_eq!(&caps[3], "B-17");
    }

    #[test]
    fn test_date_numeric_and_textual() {
        assert_eq!(
            DATE.find("Date: 12/05/2024").map(|m| m.as_str()),
            Some("12/05/2024")
        );
        assert_eq!(DATE.find("1-5-24").map(|m| m.as_str()), Some("1-5-24"));
        assert_eq!(
            DATE.find("on 12 May 2024 at noon").map(|m| m.as_str()),
            Some("12 May 2024")
        );
    }

    #[test]
    fn test_date_prefers_leftmost_form() {
        // A textual date earlier in the line wins over a later numeric one.
        assert_eq!(
            DATE.find("5 March 2024 ref 12/05/2024").map(|m| m.as_str()),
            Some("5 March 2024")
        );
    }

    #[test]
    fn test_amount_needs_two_digits() {
        assert_eq!(AMOUNT.captures("Total ₹ 198").map(|c| c[1].to_string()), Some("198".to_string()));
        assert!(AMOUNT.captures("row 5").is_none());
    }

    #[test]
    fn test_amount_caps_at_seven_digits() {
        assert_eq!(
            AMOUNT.captures("₹123456789").map(|c| c[1].to_string()),
            Some("1234567".to_string())
        );
    }
}
