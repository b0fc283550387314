//! Core library for receipt/invoice OCR text parsing.
//!
//! This crate provides:
//! - Line normalization for noisy OCR transcriptions
//! - Coarse document type classification
//! - Rule-based field extraction (vendor, invoice metadata, line items, amounts)
//! - Structured bill data models for bookkeeping/ERP ingestion
//!
//! The pipeline is a pure function of the input text: extraction misses are
//! reported as absent fields, never as errors. OCR itself, image handling,
//! and transport are external collaborators.

pub mod bill;
pub mod error;
pub mod models;

pub use bill::classifier::classify_document;
pub use bill::normalize::normalize_lines;
pub use bill::{BillParser, ExtractionResult, HeuristicBillParser};
pub use error::{BillscanError, Result};
pub use models::bill::{
    AmountsSummary, DocumentType, InvoiceInfo, ItemNumber, LineItem, StructuredBill, VendorInfo,
};
pub use models::config::{BillscanConfig, ExtractionConfig, TrailingOrder};
