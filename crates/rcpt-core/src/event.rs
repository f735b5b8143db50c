//! Trigger event validation.
//!
//! The storage notification arrives as untyped JSON. Only the first record's
//! bucket name and object key are read; everything else is ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::EventError;

/// Location of the uploaded receipt in object storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectLocation {
    pub bucket: String,
    pub key: String,
}

impl ObjectLocation {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// The key segment before the first `/`, or the whole key.
    pub fn user_id(&self) -> &str {
        self.key.split('/').next().unwrap_or(&self.key)
    }

    /// Validate a raw notification payload.
    pub fn from_event(event: &Value) -> Result<Self, EventError> {
        let record = event
            .get("Records")
            .and_then(Value::as_array)
            .and_then(|records| records.first())
            .ok_or(EventError::NoRecords)?;

        let bucket = record
            .pointer("/s3/bucket/name")
            .and_then(Value::as_str)
            .ok_or(EventError::MissingField("s3.bucket.name"))?;

        let raw_key = record
            .pointer("/s3/object/key")
            .and_then(Value::as_str)
            .ok_or(EventError::MissingField("s3.object.key"))?;

        Ok(Self::new(bucket, decode_key(raw_key)?))
    }
}

/// Decode a notification object key: `+` is a space, the rest is
/// percent-encoded.
pub fn decode_key(raw: &str) -> Result<String, EventError> {
    let plus_decoded = raw.replace('+', " ");
    urlencoding::decode(&plus_decoded)
        .map(|key| key.into_owned())
        .map_err(|e| EventError::InvalidKey {
            key: raw.to_string(),
            reason: e.to_string(),
        })
}
