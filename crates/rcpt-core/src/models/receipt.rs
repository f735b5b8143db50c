//! Receipt data models.

use serde::{Deserialize, Serialize};

/// One OCR text line in document reading order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextLine {
    /// Position of the line within the document.
    pub index: usize,

    /// Line text, trimmed of leading and trailing whitespace.
    pub text: String,
}

impl TextLine {
    /// Create a line, trimming the text.
    pub fn new(index: usize, text: impl AsRef<str>) -> Self {
        Self {
            index,
            text: text.as_ref().trim().to_string(),
        }
    }

    /// Build an indexed line sequence from raw strings.
    pub fn from_strs<I, S>(lines: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        lines
            .into_iter()
            .enumerate()
            .map(|(i, s)| Self::new(i, s))
            .collect()
    }

    /// Split plain text into lines.
    pub fn from_text(text: &str) -> Vec<Self> {
        Self::from_strs(text.lines())
    }
}

impl AsRef<str> for TextLine {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// A single purchased item extracted from a receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptItem {
    /// Leading digit run of the item line, verbatim.
    pub item_number: String,

    /// Remainder of the item line, trimmed.
    pub item_name: String,

    /// Price parsed from the line that follows the item line.
    pub price: f64,
}

impl ReceiptItem {
    pub fn new(item_number: impl Into<String>, item_name: impl Into<String>, price: f64) -> Self {
        Self {
            item_number: item_number.into(),
            item_name: item_name.into(),
            price,
        }
    }
}

/// Sum of all item prices.
pub fn total_price(items: &[ReceiptItem]) -> f64 {
    // Float `sum` of an empty iterator is -0.0
    items.iter().fold(0.0, |acc, i| acc + i.price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_text_line_trims() {
        let line = TextLine::new(3, "  48757 SPRING MIX \t");
        assert_eq!(line.index, 3);
        assert_eq!(line.text, "48757 SPRING MIX");
    }

    #[test]
    fn test_from_text_keeps_order_and_empty_lines() {
        let lines = TextLine::from_text("a\n\n  b  ");
        assert_eq!(
            lines,
            vec![TextLine::new(0, "a"), TextLine::new(1, ""), TextLine::new(2, "b")]
        );
    }

    #[test]
    fn test_total_price() {
        assert_eq!(total_price(&[]).to_string(), "0");
        assert_eq!(format!("{:.2}", total_price(&[])), "0.00");

        let items = vec![
            ReceiptItem::new("1", "A", 1.25),
            ReceiptItem::new("2", "B", 2.50),
        ];
        assert_eq!(total_price(&items), 3.75);
    }

    #[test]
    fn test_item_serializes_snake_case() {
        let item = ReceiptItem::new("48757", "SPRING MIX", 3.89);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"item_number": "48757", "item_name": "SPRING MIX", "price": 3.89})
        );
    }
}
