//! Storage-triggered receipt function.
//!
//! Each invocation reads one uploaded receipt, extracts its line items via
//! Textract, and writes them to Timestream.

mod config;
mod handler;
mod textract;
mod timestream;

use aws_config::BehaviorVersion;
use envconfig::Envconfig;
use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use serde_json::Value;
use tracing::{Instrument, info, info_span};
use tracing_subscriber::EnvFilter;

use rcpt_core::ReceiptProcessor;

use config::Config;
use textract::TextractOcr;
use timestream::TimestreamSink;

fn setup_tracing() {
    // The log collector adds its own timestamps
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_ansi(false)
        .without_time()
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    setup_tracing();

    let config = Config::init_from_env()?;
    let rcpt_config = config.to_rcpt_config();

    // Clients are built once per process and reused across invocations
    let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let ocr = TextractOcr::new(aws_sdk_textract::Client::new(&sdk_config));
    let sink = TimestreamSink::connect(&sdk_config, &rcpt_config.sink).await?;
    let processor = ReceiptProcessor::new(ocr, sink, &rcpt_config);
    let processor = &processor;

    info!(
        database = %rcpt_config.sink.database_name,
        table = %rcpt_config.sink.table_name,
        "Receipt function ready"
    );

    run(service_fn(move |event: LambdaEvent<Value>| async move {
        let span = info_span!("invocation", request_id = %event.context.request_id);
        handler::handle(processor, &event.payload)
            .instrument(span)
            .await
    }))
    .await
}
