//! Configuration structures for the parsing pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{BillscanError, Result};

/// Main configuration for the billscan pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BillscanConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Number of leading lines scanned for vendor identifiers.
    pub header_window: usize,

    /// Number of leading lines considered as vendor name candidates.
    pub name_window: usize,

    /// Maximum allowed |unit_price * quantity - total| for a line item.
    /// Absorbs single-digit OCR corruption and rounding.
    pub arithmetic_tolerance: f64,

    /// How the last three numbers on an item line are interpreted.
    pub trailing_order: TrailingOrder,

    /// Currency tag stamped on extracted amounts. No detection is performed.
    pub currency: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            header_window: 12,
            name_window: 3,
            arithmetic_tolerance: 1.0,
            trailing_order: TrailingOrder::default(),
            currency: "INR".to_string(),
        }
    }
}

/// Interpretation order for the trailing numbers of an item line.
///
/// Receipts conventionally print `price qty total`, but some layouts swap the
/// first two columns. There is no reliable way to detect the layout from
/// unstructured text, so the order is a configuration knob rather than a
/// guess.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrailingOrder {
    /// unit_price, quantity, total (rightmost).
    #[default]
    PriceQtyTotal,
    /// quantity, unit_price, total (rightmost).
    QtyPriceTotal,
}

impl BillscanConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| BillscanError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
