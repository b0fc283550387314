//! Structured bill data model.
//!
//! The wire shape keeps optional fields as explicit `null` values rather than
//! omitting them: consumers of the JSON output rely on every key being
//! present, with "could not extract" encoded as `null` or an empty array.

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Result;

/// Coarse document category derived from keyword presence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// Petrol/fuel station receipt.
    FuelReceipt,
    /// GST tax invoice.
    TaxInvoice,
    /// Restaurant or hotel bill.
    Restaurant,
    /// Generic retail receipt.
    #[default]
    Receipt,
}

impl DocumentType {
    /// Wire name of the document type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FuelReceipt => "fuel_receipt",
            Self::TaxInvoice => "tax_invoice",
            Self::Restaurant => "restaurant",
            Self::Receipt => "receipt",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vendor details recovered from the header lines of a receipt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VendorInfo {
    /// Vendor display name.
    #[serde(default)]
    pub name: Option<String>,

    /// 15-character Indian GST identification number.
    #[serde(default)]
    pub gstin: Option<String>,

    /// Bare 10-digit phone number.
    #[serde(default)]
    pub phone: Option<String>,
}

/// Invoice metadata: number and date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceInfo {
    /// Invoice/bill number token.
    #[serde(default)]
    pub number: Option<String>,

    /// Date exactly as it appeared in the source text (e.g. "12/05/2024").
    #[serde(default)]
    pub date: Option<String>,
}

/// Numeric line-item field.
///
/// Serializes as a JSON integer when the value has no fractional part and as
/// a JSON float otherwise, matching the output contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ItemNumber(Decimal);

impl ItemNumber {
    pub fn new(value: Decimal) -> Self {
        Self(value.normalize())
    }

    /// The underlying decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Whether the value has no fractional part.
    pub fn is_whole(&self) -> bool {
        self.0.fract().is_zero()
    }
}

impl From<Decimal> for ItemNumber {
    fn from(value: Decimal) -> Self {
        Self::new(value)
    }
}

impl From<i64> for ItemNumber {
    fn from(value: i64) -> Self {
        Self::new(Decimal::from(value))
    }
}

impl fmt::Display for ItemNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Serialize for ItemNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if self.is_whole() {
            if let Some(v) = self.0.to_i64() {
                return serializer.serialize_i64(v);
            }
        }
        serializer.serialize_f64(self.0.to_f64().unwrap_or_default())
    }
}

impl<'de> Deserialize<'de> for ItemNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        use rust_decimal::prelude::FromPrimitive;

        let raw = f64::deserialize(deserializer)?;
        Decimal::from_f64(raw)
            .map(ItemNumber::new)
            .ok_or_else(|| serde::de::Error::custom(format!("value out of range: {raw}")))
    }
}

/// A single purchased item row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Item description with numeric runs removed.
    pub name: String,

    /// Price per unit.
    pub unit_price: ItemNumber,

    /// Quantity purchased.
    pub quantity: ItemNumber,

    /// Row total. Within the configured tolerance of unit_price * quantity.
    pub total: ItemNumber,
}

/// Monetary totals recovered from the summary lines of a receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmountsSummary {
    /// Pre-tax subtotal.
    #[serde(default)]
    pub subtotal: Option<i64>,

    /// Total tax, either read from CGST/SGST lines or derived.
    #[serde(default)]
    pub tax: Option<i64>,

    /// Grand total payable.
    #[serde(default)]
    pub grand_total: Option<i64>,

    /// Currency tag (default: INR). No detection is performed.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "INR".to_string()
}

impl Default for AmountsSummary {
    fn default() -> Self {
        Self {
            subtotal: None,
            tax: None,
            grand_total: None,
            currency: default_currency(),
        }
    }
}

/// The root aggregate produced by one parse call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredBill {
    /// Coarse document category.
    #[serde(default)]
    pub document_type: DocumentType,

    /// Vendor details.
    #[serde(default)]
    pub vendor: VendorInfo,

    /// Invoice metadata.
    #[serde(default)]
    pub invoice: InvoiceInfo,

    /// Purchased items in source order.
    #[serde(default)]
    pub items: Vec<LineItem>,

    /// Monetary totals.
    #[serde(default)]
    pub amounts: AmountsSummary,
}

impl StructuredBill {
    /// A bill with every field empty, as produced for blank input.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a bill from its JSON wire form.
    ///
    /// Used by the structured-payload passthrough path, where an upstream
    /// engine already produced the final shape and extraction is bypassed.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to the JSON wire form.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// List human-readable notes for fields that could not be extracted.
    ///
    /// These are observations, not errors: a missing field is an expected
    /// outcome of best-effort extraction from noisy text.
    pub fn field_gaps(&self) -> Vec<String> {
        let mut gaps = Vec::new();

        if self.vendor.name.is_none() {
            gaps.push("vendor name not found".to_string());
        }
        if self.vendor.gstin.is_none() {
            gaps.push("GSTIN not found".to_string());
        }
        if self.invoice.number.is_none() {
            gaps.push("invoice number not found".to_string());
        }
        if self.invoice.date.is_none() {
            gaps.push("invoice date not found".to_string());
        }
        if self.items.is_empty() {
            gaps.push("no line items extracted".to_string());
        }
        if self.amounts.grand_total.is_none() {
            gaps.push("grand total not found".to_string());
        }

        gaps
    }
}
