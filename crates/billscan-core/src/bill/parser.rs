//! Heuristic bill parser sequencing normalization, classification, and the
//! four field extractors.

use std::time::Instant;

use tracing::{debug, info};

use crate::models::bill::StructuredBill;
use crate::models::config::{ExtractionConfig, TrailingOrder};

use super::classifier::classify_document;
use super::normalize::normalize_lines;
use super::rules::{
    AmountExtractor, FieldExtractor, InvoiceExtractor, ItemExtractor, VendorExtractor,
};

/// Result of one parse call.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// The parsed bill.
    pub bill: StructuredBill,
    /// The raw input text, echoed for callers that surface both.
    pub raw_text: String,
    /// Notes on fields that could not be extracted.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Trait for bill parsing.
///
/// Parsing never fails on input quality: empty or garbage text yields a bill
/// with empty fields. "Could not find X" is a first-class outcome, reported
/// through warnings rather than errors.
pub trait BillParser {
    /// Parse a bill from raw OCR text.
    fn parse(&self, text: &str) -> ExtractionResult;
}

/// Heuristic parser over normalized lines.
pub struct HeuristicBillParser {
    vendor: VendorExtractor,
    invoice: InvoiceExtractor,
    items: ItemExtractor,
    amounts: AmountExtractor,
}

impl HeuristicBillParser {
    /// Create a parser with default settings.
    pub fn new() -> Self {
        Self::with_config(&ExtractionConfig::default())
    }

    /// Create a parser from an extraction configuration.
    pub fn with_config(config: &ExtractionConfig) -> Self {
        Self {
            vendor: VendorExtractor::new()
                .with_header_window(config.header_window)
                .with_name_window(config.name_window),
            invoice: InvoiceExtractor::new(),
            items: ItemExtractor::new()
                .with_tolerance(config.arithmetic_tolerance)
                .with_trailing_order(config.trailing_order),
            amounts: AmountExtractor::new().with_currency(config.currency.clone()),
        }
    }

    /// Set the item arithmetic tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.items = self.items.with_tolerance(tolerance);
        self
    }

    /// Set the trailing-number interpretation order for item lines.
    pub fn with_trailing_order(mut self, order: TrailingOrder) -> Self {
        self.items = self.items.with_trailing_order(order);
        self
    }
}

impl Default for HeuristicBillParser {
    fn default() -> Self {
        Self::new()
    }
}

impl BillParser for HeuristicBillParser {
    fn parse(&self, text: &str) -> ExtractionResult {
        let start = Instant::now();

        info!("parsing bill from {} characters of text", text.len());

        let lines = normalize_lines(text);
        let joined = lines.join(" ");

        let document_type = classify_document(&joined);
        debug!("classified document as {}", document_type);

        let vendor = self.vendor.extract(&lines);
        let invoice = self.invoice.extract(&lines);
        let items = self.items.extract(&lines, document_type);
        let amounts = self.amounts.extract(&lines);

        let bill = StructuredBill {
            document_type,
            vendor,
            invoice,
            items,
            amounts,
        };

        let warnings = bill.field_gaps();

        ExtractionResult {
            bill,
            raw_text: text.to_string(),
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::models::bill::{DocumentType, ItemNumber};

    use super::*;

    const RECEIPT: &str = "\
ABC Store
GSTIN: 29ABCDE1234F1Z5
Ph: 9876543210
Invoice No: INV-2024-001
Date: 12/05/2024
Coffee 50 2 100
Sandwich 80 1 80
Subtotal 180
CGST 9
SGST 9
Total 198";

    #[test]
    fn test_parse_full_receipt() {
        let result = HeuristicBillParser::new().parse(RECEIPT);
        let bill = &result.bill;

        // The GSTIN and "Invoice No" keywords classify this as a tax invoice.
        assert_eq!(bill.document_type, DocumentType::TaxInvoice);

        assert_eq!(bill.vendor.name.as_deref(), Some("ABC Store"));
        assert_eq!(bill.vendor.gstin.as_deref(), Some("29ABCDE1234F1Z5"));
        assert_eq!(bill.vendor.phone.as_deref(), Some("9876543210"));

        assert_eq!(bill.invoice.number.as_deref(), Some("INV-2024-001"));
        assert_eq!(bill.invoice.date.as_deref(), Some("12/05/2024"));

        assert_eq!(bill.items.len(), 2);
        assert_eq!(bill.items[0].name, "Coffee");
        assert_eq!(bill.items[0].unit_price, ItemNumber::from(50));
        assert_eq!(bill.items[0].quantity, ItemNumber::from(2));
        assert_eq!(bill.items[0].total, ItemNumber::from(100));
        assert_eq!(bill.items[1].name, "Sandwich");
        assert_eq!(bill.items[1].total, ItemNumber::from(80));

        assert_eq!(bill.amounts.subtotal, Some(180));
        assert_eq!(bill.amounts.tax, Some(18));
        assert_eq!(bill.amounts.grand_total, Some(198));
        assert_eq!(bill.amounts.currency, "INR");

        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_parse_wire_shape() {
        let result = HeuristicBillParser::new().parse(RECEIPT);
        let value = serde_json::to_value(&result.bill).unwrap();

        assert_eq!(value["document_type"], json!("tax_invoice"));
        assert_eq!(value["vendor"]["name"], json!("ABC Store"));
        // Whole item numbers serialize as JSON integers, not floats.
        assert_eq!(value["items"][0]["unit_price"], json!(50));
        assert_eq!(value["amounts"]["subtotal"], json!(180));
    }

    #[test]
    fn test_empty_input_yields_empty_bill() {
        let result = HeuristicBillParser::new().parse("");
        assert_eq!(result.bill, StructuredBill::empty());
        assert!(!result.warnings.is_empty());
    }

    #[test]
    fn test_whitespace_only_input() {
        let result = HeuristicBillParser::new().parse("  \n\t\n   ");
        assert_eq!(result.bill, StructuredBill::empty());
    }

    #[test]
    fn test_garbage_input_never_fails() {
        let result = HeuristicBillParser::new().parse("@@@@\n12\n!!!???\n\u{0}\u{1}");
        assert_eq!(result.bill.items.len(), 0);
        assert_eq!(result.bill.document_type, DocumentType::Receipt);
    }

    #[test]
    fn test_fuel_receipt_classification_end_to_end() {
        let result = HeuristicBillParser::new().parse("HP Petrol Pump\nDiesel 90 2 180\nTotal 180");
        assert_eq!(result.bill.document_type, DocumentType::FuelReceipt);
        assert_eq!(result.bill.items.len(), 1);
    }

    #[test]
    fn test_warnings_report_missing_fields() {
        let result = HeuristicBillParser::new().parse("Some Store Name\nTotal 50");
        assert!(result.warnings.iter().any(|w| w.contains("GSTIN")));
        assert!(result.warnings.iter().any(|w| w.contains("no line items")));
        assert!(!result.warnings.iter().any(|w| w.contains("grand total")));
    }

    #[test]
    fn test_config_tolerance_is_honored() {
        let config = ExtractionConfig {
            arithmetic_tolerance: 50.0,
            ..Default::default()
        };
        let result = HeuristicBillParser::with_config(&config).parse("Coffee 50 2 130");
        assert_eq!(result.bill.items.len(), 1);
    }

    #[test]
    fn test_raw_text_is_echoed() {
        let result = HeuristicBillParser::new().parse(RECEIPT);
        assert_eq!(result.raw_text, RECEIPT);
    }
}
