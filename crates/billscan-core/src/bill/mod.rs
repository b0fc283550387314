//! Bill parsing module: normalization, classification, and field extraction.

pub mod classifier;
pub mod normalize;
mod parser;
pub mod rules;

pub use parser::{BillParser, ExtractionResult, HeuristicBillParser};
