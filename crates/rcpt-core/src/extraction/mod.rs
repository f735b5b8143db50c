//! Receipt line item extraction.

mod parser;
pub mod rules;

pub use parser::{Items, LineItemExtractor};

use crate::models::receipt::{ReceiptItem, TextLine};

/// Trait for receipt line item extractors.
///
/// Extraction never fails: unmatched input yields fewer or zero items.
pub trait ItemExtractor {
    /// Extract items from OCR lines in reading order.
    fn extract(&self, lines: &[TextLine]) -> Vec<ReceiptItem>;

    /// Extract items from plain text, one OCR line per text line.
    fn extract_from_text(&self, text: &str) -> Vec<ReceiptItem>;
}
