//! Invoice number and date extraction.

use crate::models::bill::InvoiceInfo;

use super::FieldExtractor;
use super::patterns::{DATE, INVOICE_NUMBER};

/// Invoice metadata extractor.
///
/// One top-to-bottom pass over all lines; the first match wins for each field
/// independently. The date is kept exactly as it appeared in the text rather
/// than being parsed into a calendar type, so the output preserves the
/// source spelling.
pub struct InvoiceExtractor;

impl InvoiceExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for InvoiceExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for InvoiceExtractor {
    type Output = InvoiceInfo;

    fn extract(&self, lines: &[String]) -> InvoiceInfo {
        let mut number = None;
        let mut date = None;

        for line in lines {
            if number.is_none() {
                if let Some(caps) = INVOICE_NUMBER.captures(line) {
                    number = caps.get(3).map(|m| m.as_str().to_string());
                }
            }

            if date.is_none() {
                if let Some(m) = DATE.find(line) {
                    date = Some(m.as_str().to_string());
                }
            }
        }

        InvoiceInfo { number, date }
    }
}
