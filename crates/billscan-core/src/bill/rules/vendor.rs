//! Vendor extraction from the header lines of a receipt.

use crate::models::bill::VendorInfo;

use super::FieldExtractor;
use super::patterns::{ANY_DIGIT, GSTIN, PHONE};

/// Lines containing any of these are never vendor name candidates.
const NAME_STOP_KEYWORDS: [&str; 4] = ["gst", "invoice", "sale receipt", "date"];

/// Vendor field extractor.
///
/// Scans a window of header lines. GSTIN and phone keep the LAST match found
/// within the window while the name keeps the FIRST plausible line:
/// identifiers tend to repeat lower in the header, the name is almost always
/// the first printable line.
pub struct VendorExtractor {
    header_window: usize,
    name_window: usize,
}

impl VendorExtractor {
    /// Create a vendor extractor with default window sizes.
    pub fn new() -> Self {
        Self {
            header_window: 12,
            name_window: 3,
        }
    }

    /// Set how many leading lines are scanned for identifiers.
    pub fn with_header_window(mut self, lines: usize) -> Self {
        self.header_window = lines;
        self
    }

    /// Set how many leading lines are considered as name candidates.
    pub fn with_name_window(mut self, lines: usize) -> Self {
        self.name_window = lines;
        self
    }

    fn is_name_candidate(&self, line: &str) -> bool {
        if ANY_DIGIT.is_match(line) || line.chars().count() <= 5 {
            return false;
        }
        let lowered = line.to_lowercase();
        !NAME_STOP_KEYWORDS.iter().any(|k| lowered.contains(k))
    }
}

impl Default for VendorExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for VendorExtractor {
    type Output = VendorInfo;

    fn extract(&self, lines: &[String]) -> VendorInfo {
        let mut name = None;
        let mut gstin = None;
        let mut phone = None;

        for (i, line) in lines.iter().take(self.header_window).enumerate() {
            if let Some(m) = GSTIN.find(line) {
                gstin = Some(m.as_str().to_string());
            }

            if let Some(m) = PHONE.find(line) {
                phone = Some(m.as_str().to_string());
            }

            if name.is_none() && i < self.name_window && self.is_name_candidate(line) {
                name = Some(line.clone());
            }
        }

        VendorInfo { name, gstin, phone }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_extracts_all_vendor_fields() {
        let vendor = VendorExtractor::new().extract(&lines(&[
            "ABC Store",
            "GSTIN: 29ABCDE1234F1Z5",
            "Ph: 9876543210",
        ]));

        assert_eq!(vendor.name.as_deref(), Some("ABC Store"));
        assert_eq!(vendor.gstin.as_deref(), Some("29ABCDE1234F1Z5"));
        assert_eq!(vendor.phone.as_deref(), Some("9876543210"));
    }

    #[test]
    fn test_gstin_last_match_in_window_wins() {
        let vendor = VendorExtractor::new().extract(&lines(&[
            "GSTIN: 29ABCDE1234F1Z5",
            "Duplicate: 07FGHIJ5678K2Z9",
        ]));
        assert_eq!(vendor.gstin.as_deref(), Some("07FGHIJ5678K2Z9"));
    }

    #[test]
    fn test_phone_last_match_in_window_wins() {
        let vendor = VendorExtractor::new().extract(&lines(&[
            "Ph: 9876543210",
            "Alt: 9123456780",
        ]));
        assert_eq!(vendor.phone.as_deref(), Some("9123456780"));
    }

    #[test]
    fn test_name_first_match_wins() {
        let vendor = VendorExtractor::new().extract(&lines(&[
            "Sharma Traders",
            "Main Road Branch",
        ]));
        assert_eq!(vendor.name.as_deref(), Some("Sharma Traders"));
    }

    #[test]
    fn test_identifiers_outside_window_are_ignored() {
        let mut raw: Vec<String> = (0..12).map(|i| format!("filler line {i}")).collect();
        raw.push("GSTIN: 29ABCDE1234F1Z5".to_string());

        let vendor = VendorExtractor::new().extract(&raw);
        assert_eq!(vendor.gstin, None);
    }

    #[test]
    fn test_name_rejects_digits_keywords_and_short_lines() {
        // Digits disqualify, keywords disqualify, and so does length <= 5;
        // the name window only covers the first three lines.
        let vendor = VendorExtractor::new().extract(&lines(&[
            "Shop 24",
            "Sale Receipt",
            "Ace",
            "Acceptable Name Shop",
        ]));
        assert_eq!(vendor.name, None);
    }

    #[test]
    fn test_empty_lines_yield_empty_vendor() {
        let vendor = VendorExtractor::new().extract(&[]);
        assert_eq!(vendor, VendorInfo::default());
    }
}
