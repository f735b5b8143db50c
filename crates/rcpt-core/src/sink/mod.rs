//! Time-series sink contract and record shaping.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SinkError;
use crate::models::receipt::ReceiptItem;

pub const USER_ID_DIMENSION: &str = "user_id";
pub const ITEM_NUMBER_DIMENSION: &str = "item_number";
pub const ITEM_NAME_DIMENSION: &str = "item_name";

/// A named dimension attached to a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    pub name: String,
    pub value: String,
}

impl Dimension {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MeasureValueType {
    Double,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeUnit {
    Milliseconds,
}

/// One time-series measurement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasureRecord {
    pub dimensions: Vec<Dimension>,
    pub measure_name: String,
    /// Decimal value, string-encoded.
    pub measure_value: String,
    pub measure_value_type: MeasureValueType,
    /// Epoch time in `time_unit`.
    pub time: String,
    pub time_unit: TimeUnit,
}

impl MeasureRecord {
    /// Value of the named dimension, if present.
    pub fn dimension(&self, name: &str) -> Option<&str> {
        self.dimensions
            .iter()
            .find(|d| d.name == name)
            .map(|d| d.value.as_str())
    }
}

/// Shape extracted items into records sharing one timestamp.
pub fn build_records(
    user_id: &str,
    measure_name: &str,
    items: &[ReceiptItem],
    timestamp: DateTime<Utc>,
) -> Vec<MeasureRecord> {
    let time = timestamp.timestamp_millis().to_string();

    items
        .iter()
        .map(|item| MeasureRecord {
            dimensions: vec![
                Dimension::new(USER_ID_DIMENSION, user_id),
                Dimension::new(ITEM_NUMBER_DIMENSION, &item.item_number),
                Dimension::new(ITEM_NAME_DIMENSION, &item.item_name),
            ],
            measure_name: measure_name.to_string(),
            measure_value: item.price.to_string(),
            measure_value_type: MeasureValueType::Double,
            time: time.clone(),
            time_unit: TimeUnit::Milliseconds,
        })
        .collect()
}

/// Sink trait that both real and in-memory implementations use.
#[async_trait]
pub trait MeasurementSink: Send + Sync {
    /// Write one batch. The batch succeeds or fails as a whole.
    async fn write(&self, records: &[MeasureRecord]) -> Result<(), SinkError>;
}

/// In-memory sink that records every batch it receives.
#[derive(Clone, Default)]
pub struct RecordingSink {
    batches: Arc<Mutex<Vec<Vec<MeasureRecord>>>>,
    fail_with: Option<SinkError>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every write fail with the given error.
    pub fn failing(error: SinkError) -> Self {
        Self {
            fail_with: Some(error),
            ..Self::default()
        }
    }

    /// Batches written so far.
    pub fn batches(&self) -> Vec<Vec<MeasureRecord>> {
        self.batches
            .lock()
            .map(|b| b.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl MeasurementSink for RecordingSink {
    async fn write(&self, records: &[MeasureRecord]) -> Result<(), SinkError> {
        if let Some(error) = &self.fail_with {
            return Err(error.clone());
        }

        self.batches
            .lock()
            .map_err(|e| SinkError::Write(e.to_string()))?
            .push(records.to_vec());
        Ok(())
    }
}
