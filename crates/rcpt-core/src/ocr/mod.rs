//! OCR collaborator contract and document model.
//!
//! The OCR service returns an ordered set of typed blocks. Only `LINE`
//! blocks carry the text the extractor consumes; their order is the
//! document reading order.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::OcrError;
use crate::event::ObjectLocation;
use crate::models::receipt::TextLine;

/// Kind of an OCR block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockType {
    Page,
    Line,
    Word,
    /// Any block kind the pipeline does not read (tables, key-value sets, ...).
    #[serde(other)]
    Other,
}

/// A typed block of recognized content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OcrBlock {
    pub block_type: BlockType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl OcrBlock {
    pub fn new(block_type: BlockType, text: Option<String>) -> Self {
        Self { block_type, text }
    }

    /// A `LINE` block with the given text.
    pub fn line(text: impl Into<String>) -> Self {
        Self::new(BlockType::Line, Some(text.into()))
    }
}

/// OCR output for one document.
///
/// Deserializes from a saved Textract `DetectDocumentText` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OcrDocument {
    #[serde(default)]
    pub blocks: Vec<OcrBlock>,
}

impl OcrDocument {
    pub fn new(blocks: Vec<OcrBlock>) -> Self {
        Self { blocks }
    }

    /// Build a document made only of `LINE` blocks.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(lines.into_iter().map(OcrBlock::line).collect())
    }

    /// Parse a saved Textract JSON response.
    pub fn from_json(json: &str) -> Result<Self, OcrError> {
        serde_json::from_str(json).map_err(|e| OcrError::Response(e.to_string()))
    }

    /// Text lines in document order, trimmed.
    pub fn lines(&self) -> Vec<TextLine> {
        self.blocks
            .iter()
            .filter(|b| b.block_type == BlockType::Line)
            .filter_map(|b| b.text.as_deref())
            .enumerate()
            .map(|(i, text)| TextLine::new(i, text))
            .collect()
    }
}

/// OCR client trait that both real and mock implementations use.
#[async_trait]
pub trait OcrClient: Send + Sync {
    /// Detect text in the stored document.
    async fn detect_text(&self, location: &ObjectLocation) -> Result<OcrDocument, OcrError>;
}

/// Mock OCR client for testing.
#[derive(Clone, Default)]
pub struct MockOcrClient {
    responses: HashMap<String, Result<OcrDocument, OcrError>>,
}

impl MockOcrClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set up the response for `detect_text()` on one object.
    pub fn detect_text_ret(
        mut self,
        bucket: &str,
        key: &str,
        response: Result<OcrDocument, OcrError>,
    ) -> Self {
        self.responses.insert(format!("{bucket}:{key}"), response);
        self
    }
}

#[async_trait]
impl OcrClient for MockOcrClient {
    async fn detect_text(&self, location: &ObjectLocation) -> Result<OcrDocument, OcrError> {
        let cache_key = format!("{}:{}", location.bucket, location.key);
        match self.responses.get(&cache_key) {
            Some(response) => response.clone(),
            None => Err(OcrError::Request(format!("no such object: {cache_key}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_lines_keeps_only_line_blocks() {
        let doc = OcrDocument::new(vec![
            OcrBlock::new(BlockType::Page, None),
            OcrBlock::line(" 48757 SPRING MIX "),
            OcrBlock::new(BlockType::Word, Some("48757".to_string())),
            OcrBlock::new(BlockType::Line, None),
            OcrBlock::line("3.89 3"),
        ]);

        assert_eq!(
            doc.lines(),
            vec![TextLine::new(0, "48757 SPRING MIX"), TextLine::new(1, "3.89 3")]
        );
    }

    #[test]
    fn test_from_textract_json() {
        let json = r#"{
            "DocumentMetadata": {"Pages": 1},
            "Blocks": [
                {"BlockType": "PAGE", "Id": "p1"},
                {"BlockType": "LINE", "Text": "48757 SPRING MIX", "Confidence": 99.1},
                {"BlockType": "WORD", "Text": "48757"},
                {"BlockType": "KEY_VALUE_SET"},
                {"BlockType": "LINE", "Text": "3,89"}
            ]
        }"#;

        let doc = OcrDocument::from_json(json).unwrap();
        assert_eq!(doc.blocks.len(), 5);
        assert_eq!(doc.blocks[3].block_type, BlockType::Other);
        assert_eq!(doc.lines().len(), 2);
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            OcrDocument::from_json("not json"),
            Err(OcrError::Response(_))
        ));
    }

    #[tokio::test]
    async fn test_mock_client() {
        let location = ObjectLocation::new("bucket", "user/receipt.jpg");
        let client = MockOcrClient::new().detect_text_ret(
            "bucket",
            "user/receipt.jpg",
            Ok(OcrDocument::from_lines(["a"])),
        );

        assert_eq!(client.detect_text(&location).await.unwrap().lines().len(), 1);

        let missing = ObjectLocation::new("bucket", "other.jpg");
        assert!(matches!(
            client.detect_text(&missing).await,
            Err(OcrError::Request(_))
        ));
    }
}
