//! Error types for the rcpt-core library.

use thiserror::Error;

/// Main error type for the rcpt library.
#[derive(Error, Debug)]
pub enum RcptError {
    /// OCR collaborator failure.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Time-series sink failure.
    #[error("sink error: {0}")]
    Sink(#[from] SinkError),

    /// The triggering event could not be turned into an object location.
    #[error("invalid trigger event: {0}")]
    Event(#[from] EventError),
}

/// Errors raised by the OCR collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OcrError {
    /// The remote call failed (network, permission, quota).
    #[error("text detection request failed: {0}")]
    Request(String),

    /// The response could not be interpreted.
    #[error("malformed OCR response: {0}")]
    Response(String),
}

/// Errors raised by the time-series sink.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SinkError {
    /// A record could not be constructed for the sink's wire format.
    #[error("failed to build record: {0}")]
    Build(String),

    /// The batch write was rejected or failed in transit.
    #[error("write failed: {0}")]
    Write(String),
}

/// Errors related to trigger event validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EventError {
    /// The event carries no records.
    #[error("event has no records")]
    NoRecords,

    /// A required field is absent or not a string.
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// The object key could not be decoded.
    #[error("invalid object key {key}: {reason}")]
    InvalidKey { key: String, reason: String },
}

/// Result type for the rcpt library.
pub type Result<T> = std::result::Result<T, RcptError>;
