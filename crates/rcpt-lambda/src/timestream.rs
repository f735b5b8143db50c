//! Timestream-backed measurement sink.

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_timestreamwrite::Client;
use aws_sdk_timestreamwrite::error::DisplayErrorContext;
use aws_sdk_timestreamwrite::types::{
    Dimension, MeasureValueType as SdkMeasureValueType, Record, TimeUnit as SdkTimeUnit,
};
use tracing::debug;

use rcpt_core::error::SinkError;
use rcpt_core::models::config::SinkConfig;
use rcpt_core::sink::{MeasureRecord, MeasureValueType, MeasurementSink, TimeUnit};

/// Writes each batch with a single `WriteRecords` call.
#[derive(Clone)]
pub struct TimestreamSink {
    client: Client,
    database_name: String,
    table_name: String,
}

impl TimestreamSink {
    pub fn new(client: Client, config: &SinkConfig) -> Self {
        Self {
            client,
            database_name: config.database_name.clone(),
            table_name: config.table_name.clone(),
        }
    }

    /// Build a client with endpoint discovery, which Timestream requires.
    ///
    /// The endpoint reload task is spawned on the current runtime.
    pub async fn connect(sdk_config: &SdkConfig, config: &SinkConfig) -> Result<Self, SinkError> {
        let (client, reload) = Client::new(sdk_config)
            .with_endpoint_discovery_enabled()
            .await
            .map_err(|e| SinkError::Write(format!("endpoint discovery failed: {e}")))?;
        tokio::spawn(reload.reload_task());

        Ok(Self::new(client, config))
    }
}

#[async_trait]
impl MeasurementSink for TimestreamSink {
    async fn write(&self, records: &[MeasureRecord]) -> Result<(), SinkError> {
        let sdk_records = records
            .iter()
            .map(to_sdk_record)
            .collect::<Result<Vec<_>, _>>()?;

        self.client
            .write_records()
            .database_name(&self.database_name)
            .table_name(&self.table_name)
            .set_records(Some(sdk_records))
            .send()
            .await
            .map_err(|e| SinkError::Write(format!("WriteRecords failed: {}", DisplayErrorContext(&e))))?;

        debug!(
            database = %self.database_name,
            table = %self.table_name,
            "Wrote {} records",
            records.len()
        );
        Ok(())
    }
}

fn to_sdk_record(record: &MeasureRecord) -> Result<Record, SinkError> {
    let dimensions = record
        .dimensions
        .iter()
        .map(|d| {
            Dimension::builder()
                .name(&d.name)
                .value(&d.value)
                .build()
                .map_err(|e| SinkError::Build(e.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let value_type = match record.measure_value_type {
        MeasureValueType::Double => SdkMeasureValueType::Double,
    };
    let time_unit = match record.time_unit {
        TimeUnit::Milliseconds => SdkTimeUnit::Milliseconds,
    };

    Ok(Record::builder()
        .set_dimensions(Some(dimensions))
        .measure_name(&record.measure_name)
        .measure_value(&record.measure_value)
        .measure_value_type(value_type)
        .time(&record.time)
        .time_unit(time_unit)
        .build())
}
