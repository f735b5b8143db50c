//! Receipt invocation pipeline: OCR, extraction, sink write.

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;
use crate::event::ObjectLocation;
use crate::extraction::{ItemExtractor, LineItemExtractor};
use crate::models::config::RcptConfig;
use crate::models::receipt::ReceiptItem;
use crate::ocr::OcrClient;
use crate::sink::{MeasurementSink, build_records};

/// Outcome of processing one receipt.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessOutcome {
    /// OCR found no text lines in the document.
    NoTextFound,

    /// Extraction ran; `items` may be empty.
    Processed {
        user_id: String,
        items: Vec<ReceiptItem>,
    },
}

/// Response returned to the function runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationResponse {
    pub status_code: u16,
    pub body: String,
}

impl ProcessOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Processed { .. })
    }

    pub fn into_response(self) -> InvocationResponse {
        match self {
            Self::NoTextFound => InvocationResponse {
                status_code: 400,
                body: "No text found in document".to_string(),
            },
            Self::Processed { items, .. } => InvocationResponse {
                status_code: 200,
                body: format!("Processed {} items", items.len()),
            },
        }
    }
}

/// Runs one receipt through OCR, extraction, and the sink.
///
/// Client handles are built once per process and injected here.
pub struct ReceiptProcessor<O, S> {
    ocr: O,
    sink: S,
    extractor: LineItemExtractor,
    measure_name: String,
}

impl<O: OcrClient, S: MeasurementSink> ReceiptProcessor<O, S> {
    pub fn new(ocr: O, sink: S, config: &RcptConfig) -> Self {
        Self {
            ocr,
            sink,
            extractor: LineItemExtractor::from_config(&config.extraction),
            measure_name: config.sink.measure_name.clone(),
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Process the receipt stored at `location`, stamping records with the
    /// current time.
    pub async fn process(&self, location: &ObjectLocation) -> Result<ProcessOutcome> {
        self.process_at(location, Utc::now()).await
    }

    /// Process the receipt stored at `location`, stamping records with
    /// `timestamp`.
    pub async fn process_at(
        &self,
        location: &ObjectLocation,
        timestamp: DateTime<Utc>,
    ) -> Result<ProcessOutcome> {
        let start = Instant::now();
        info!(bucket = %location.bucket, key = %location.key, "Processing receipt");

        let document = self.ocr.detect_text(location).await?;
        let lines = document.lines();

        if lines.is_empty() {
            warn!(key = %location.key, "No text found in document");
            return Ok(ProcessOutcome::NoTextFound);
        }

        let items = self.extractor.extract(&lines);
        let user_id = location.user_id().to_string();

        if items.is_empty() {
            info!(lines = lines.len(), "No items extracted, skipping write");
        } else {
            let records = build_records(&user_id, &self.measure_name, &items, timestamp);
            self.sink.write(&records).await?;
            info!(
                records = records.len(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Wrote receipt items"
            );
        }

        Ok(ProcessOutcome::Processed { user_id, items })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{OcrError, RcptError, SinkError};
    use crate::ocr::{MockOcrClient, OcrDocument};
    use crate::sink::RecordingSink;
    use pretty_assertions::assert_eq;

    const BUCKET: &str = "receipts";
    const KEY: &str = "user-1/receipt.jpg";

    fn processor(
        document: std::result::Result<OcrDocument, OcrError>,
        sink: RecordingSink,
    ) -> ReceiptProcessor<MockOcrClient, RecordingSink> {
        let ocr = MockOcrClient::new().detect_text_ret(BUCKET, KEY, document);
        ReceiptProcessor::new(ocr, sink, &RcptConfig::default())
    }

    #[tokio::test]
    async fn test_processes_items() {
        let p = processor(
            Ok(OcrDocument::from_lines([
                "STORE #12",
                "48757 SPRING MIX",
                "3.89 3",
                "12 SUBTOTAL",
                "3.89",
            ])),
            RecordingSink::new(),
        );

        let outcome = p.process(&ObjectLocation::new(BUCKET, KEY)).await.unwrap();

        assert_eq!(
            outcome,
            ProcessOutcome::Processed {
                user_id: "user-1".to_string(),
                items: vec![ReceiptItem::new("48757", "SPRING MIX", 3.89)],
            }
        );

        let batches = p.sink().batches();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].len(), 1);
        assert_eq!(batches[0][0].dimensions[0].value, "user-1");
        assert_eq!(batches[0][0].measure_name, "price");
    }

    #[tokio::test]
    async fn test_no_text_found() {
        let p = processor(Ok(OcrDocument::default()), RecordingSink::new());

        let outcome = p.process(&ObjectLocation::new(BUCKET, KEY)).await.unwrap();

        assert_eq!(outcome, ProcessOutcome::NoTextFound);
        assert!(!outcome.is_success());
        assert_eq!(outcome.into_response().status_code, 400);
        assert!(p.sink().batches().is_empty());
    }

    #[tokio::test]
    async fn test_no_items_is_success_without_write() {
        let p = processor(
            Ok(OcrDocument::from_lines(["THANK YOU", "COME AGAIN"])),
            RecordingSink::new(),
        );

        let outcome = p.process(&ObjectLocation::new(BUCKET, KEY)).await.unwrap();

        assert!(outcome.is_success());
        assert_eq!(
            outcome.into_response(),
            InvocationResponse {
                status_code: 200,
                body: "Processed 0 items".to_string(),
            }
        );
        assert!(p.sink().batches().is_empty());
    }

    #[tokio::test]
    async fn test_ocr_failure_propagates() {
        let p = processor(
            Err(OcrError::Request("access denied".to_string())),
            RecordingSink::new(),
        );

        let result = p.process(&ObjectLocation::new(BUCKET, KEY)).await;

        assert!(matches!(result, Err(RcptError::Ocr(_))));
        assert!(p.sink().batches().is_empty());
    }

    #[tokio::test]
    async fn test_sink_failure_propagates() {
        let p = processor(
            Ok(OcrDocument::from_lines(["48757 SPRING MIX", "3.89"])),
            RecordingSink::failing(SinkError::Write("throttled".to_string())),
        );

        let result = p.process(&ObjectLocation::new(BUCKET, KEY)).await;

        assert!(matches!(result, Err(RcptError::Sink(SinkError::Write(_)))));
    }

    #[tokio::test]
    async fn test_records_share_timestamp() {
        let p = processor(
            Ok(OcrDocument::from_lines(["1 A", "1.00", "2 B", "2.00"])),
            RecordingSink::new(),
        );
        let ts = DateTime::from_timestamp_millis(1_700_000_000_123).unwrap();

        p.process_at(&ObjectLocation::new(BUCKET, KEY), ts)
            .await
            .unwrap();

        let batch = &p.sink().batches()[0];
        assert!(batch.iter().all(|r| r.time == "1700000000123"));
    }
}
