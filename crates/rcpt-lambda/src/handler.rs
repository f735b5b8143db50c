//! Invocation handler.

use lambda_runtime::Error;
use serde_json::Value;
use tracing::{info, warn};

use rcpt_core::event::ObjectLocation;
use rcpt_core::ocr::OcrClient;
use rcpt_core::processor::{InvocationResponse, ReceiptProcessor};
use rcpt_core::sink::MeasurementSink;

/// Validate the trigger payload and process the referenced receipt.
///
/// Malformed events and collaborator failures fail the invocation.
pub async fn handle<O, S>(
    processor: &ReceiptProcessor<O, S>,
    payload: &Value,
) -> Result<InvocationResponse, Error>
where
    O: OcrClient,
    S: MeasurementSink,
{
    let location = ObjectLocation::from_event(payload).inspect_err(|e| {
        warn!("Rejecting trigger event: {}", e);
    })?;

    let outcome = processor.process(&location).await?;
    let response = outcome.into_response();
    info!(status = response.status_code, "{}", response.body);

    Ok(response)
}
