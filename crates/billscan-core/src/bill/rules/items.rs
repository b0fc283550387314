//! Line item extraction with arithmetic validation.
//!
//! OCR text has no column structure, so item rows are recovered by a
//! three-pass filter: structural keyword exclusion, a minimum-number-count
//! gate, and an arithmetic consistency check on the trailing numbers. Only
//! lines surviving all three are emitted as items.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use tracing::debug;

use crate::models::bill::{DocumentType, ItemNumber, LineItem};
use crate::models::config::TrailingOrder;

use super::patterns::DIGIT_RUN;

/// Structural lines (totals, taxes, headers) are never item rows.
const STOP_KEYWORDS: [&str; 11] = [
    "subtotal", "total", "cgst", "sgst", "tax", "cash", "amount", "invoice", "date", "gst",
    "table",
];

/// Minimum digit runs for an item row: unit price, quantity, total.
const MIN_NUMBERS: usize = 3;

/// Line item extractor.
pub struct ItemExtractor {
    tolerance: Decimal,
    order: TrailingOrder,
}

impl ItemExtractor {
    /// Create an item extractor with the default tolerance (1.0) and the
    /// conventional `price qty total` column order.
    pub fn new() -> Self {
        Self {
            tolerance: Decimal::ONE,
            order: TrailingOrder::default(),
        }
    }

    /// Set the allowed |unit_price * quantity - total| deviation.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Decimal::from_f64(tolerance).unwrap_or(Decimal::ONE);
        self
    }

    /// Set how the trailing numbers of a line are interpreted.
    pub fn with_trailing_order(mut self, order: TrailingOrder) -> Self {
        self.order = order;
        self
    }

    /// Extract item rows from normalized lines.
    ///
    /// `doc_type` is threaded through as a specialization hook for per-type
    /// item patterns; the current heuristic is identical for all document
    /// types.
    pub fn extract(&self, lines: &[String], doc_type: DocumentType) -> Vec<LineItem> {
        let items: Vec<LineItem> = lines
            .iter()
            .filter_map(|line| self.parse_item_line(line))
            .collect();

        debug!(
            "extracted {} line items from {} document",
            items.len(),
            doc_type
        );

        items
    }

    fn parse_item_line(&self, line: &str) -> Option<LineItem> {
        let lowered = line.to_lowercase();
        if STOP_KEYWORDS.iter().any(|k| lowered.contains(k)) {
            return None;
        }

        // Drop the currency symbol, collapse multiplication markers, and
        // strip thousands-separator commas before pulling numbers out.
        let clean = line
            .replace('₹', "")
            .replace('X', " ")
            .replace('x', " ")
            .replace(',', "");

        let numbers: Vec<&str> = DIGIT_RUN.find_iter(&clean).map(|m| m.as_str()).collect();
        if numbers.len() < MIN_NUMBERS {
            return None;
        }

        let n = numbers.len();
        let total = Decimal::from_str(numbers[n - 1]).ok()?;
        let second = Decimal::from_str(numbers[n - 2]).ok()?;
        let third = Decimal::from_str(numbers[n - 3]).ok()?;

        let (unit_price, quantity) = match self.order {
            TrailingOrder::PriceQtyTotal => (third, second),
            TrailingOrder::QtyPriceTotal => (second, third),
        };

        let name = DIGIT_RUN.replace_all(&clean, "").trim().to_string();
        if name.chars().count() < 3 {
            return None;
        }

        let product = unit_price.checked_mul(quantity)?;
        if (product - total).abs() > self.tolerance {
            return None;
        }

        Some(LineItem {
            name,
            unit_price: ItemNumber::new(unit_price),
            quantity: ItemNumber::new(quantity),
            total: ItemNumber::new(total),
        })
    }
}

impl Default for ItemExtractor {
    fn default() -> Self {
        Self::new()
    }
}
