//! Monetary totals extraction.

use crate::models::bill::AmountsSummary;

use super::FieldExtractor;
use super::patterns::{AMOUNT, TAX_FIGURE};

/// A line containing any of these may carry the grand total.
const GRAND_TOTAL_KEYWORDS: [&str; 3] = ["total", "cash", "amount payable"];

/// Totals extractor.
///
/// Scan directions differ per field and are deliberate: the subtotal keeps
/// the last match top-to-bottom, CGST/SGST figures accumulate across all
/// matches, and the grand total is resolved bottom-to-top. Receipts print
/// the payable total near the bottom, so a "Total" higher up is more likely
/// a column header or a subtotal.
pub struct AmountExtractor {
    currency: String,
}

impl AmountExtractor {
    pub fn new() -> Self {
        Self {
            currency: "INR".to_string(),
        }
    }

    /// Set the currency tag stamped on results. This relabels only; no
    /// detection is performed.
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = AmountsSummary;

    fn extract(&self, lines: &[String]) -> AmountsSummary {
        let mut subtotal = None;
        for line in lines {
            if line.to_lowercase().contains("sub") {
                if let Some(caps) = AMOUNT.captures(line) {
                    if let Ok(v) = caps[1].parse::<i64>() {
                        subtotal = Some(v);
                    }
                }
            }
        }

        let mut tax: i64 = 0;
        for line in lines {
            let lowered = line.to_lowercase();
            if lowered.contains("cgst") || lowered.contains("sgst") {
                if let Some(caps) = TAX_FIGURE.captures(line) {
                    if let Ok(v) = caps[1].parse::<i64>() {
                        tax += v;
                    }
                }
            }
        }

        let mut grand_total = None;
        for line in lines.iter().rev() {
            let lowered = line.to_lowercase();
            if GRAND_TOTAL_KEYWORDS.iter().any(|k| lowered.contains(k)) {
                if let Some(caps) = AMOUNT.captures(line) {
                    if let Ok(v) = caps[1].parse::<i64>() {
                        grand_total = Some(v);
                        break;
                    }
                }
            }
        }

        // No explicit CGST/SGST figure: derive the tax from the two totals.
        if tax == 0 {
            if let (Some(s), Some(g)) = (subtotal, grand_total) {
                tax = g - s;
            }
        }

        AmountsSummary {
            subtotal,
            tax: (tax != 0).then_some(tax),
            grand_total,
            currency: self.currency.clone(),
        }
    }
}
