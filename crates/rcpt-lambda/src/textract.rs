//! Textract-backed OCR client.

use async_trait::async_trait;
use aws_sdk_textract::Client;
use aws_sdk_textract::error::DisplayErrorContext;
use aws_sdk_textract::types::{Block, BlockType as TextractBlockType, Document, S3Object};
use tracing::debug;

use rcpt_core::error::OcrError;
use rcpt_core::event::ObjectLocation;
use rcpt_core::ocr::{BlockType, OcrBlock, OcrClient, OcrDocument};

/// Runs `DetectDocumentText` against the stored object.
#[derive(Clone)]
pub struct TextractOcr {
    client: Client,
}

impl TextractOcr {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OcrClient for TextractOcr {
    async fn detect_text(&self, location: &ObjectLocation) -> Result<OcrDocument, OcrError> {
        let document = Document::builder()
            .s3_object(
                S3Object::builder()
                    .bucket(&location.bucket)
                    .name(&location.key)
                    .build(),
            )
            .build();

        let output = self
            .client
            .detect_document_text()
            .document(document)
            .send()
            .await
            .map_err(|e| {
                OcrError::Request(format!(
                    "DetectDocumentText failed: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        let blocks: Vec<OcrBlock> = output.blocks().iter().map(convert_block).collect();
        debug!("Textract returned {} blocks", blocks.len());

        Ok(OcrDocument::new(blocks))
    }
}

fn convert_block(block: &Block) -> OcrBlock {
    let block_type = match block.block_type() {
        Some(TextractBlockType::Page) => BlockType::Page,
        Some(TextractBlockType::Line) => BlockType::Line,
        Some(TextractBlockType::Word) => BlockType::Word,
        _ => BlockType::Other,
    };

    OcrBlock::new(block_type, block.text().map(str::to_string))
}
