//! Document type classification from keyword presence.

use crate::models::bill::DocumentType;

const FUEL_KEYWORDS: [&str; 3] = ["petrol", "fuel", "diesel"];
const TAX_INVOICE_KEYWORDS: [&str; 2] = ["gst", "invoice no"];
const RESTAURANT_KEYWORDS: [&str; 3] = ["food", "hotel", "restaurant"];

/// Classify a document from its joined normalized text.
///
/// Keyword sets are tested in fixed priority order: fuel beats tax invoice
/// beats restaurant; anything else is a plain receipt. Never fails.
pub fn classify_document(text: &str) -> DocumentType {
    let lowered = text.to_lowercase();

    if FUEL_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        return DocumentType::FuelReceipt;
    }

    if TAX_INVOICE_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        return DocumentType::TaxInvoice;
    }

    if RESTAURANT_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        return DocumentType::Restaurant;
    }

    DocumentType::Receipt
}
