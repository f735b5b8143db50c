//! Core library for receipt OCR processing.
//!
//! This crate provides:
//! - Line item extraction from OCR text lines
//! - OCR and time-series sink collaborator traits, with in-memory doubles
//! - Trigger event validation
//! - Time-series record shaping and the per-receipt processing pipeline

pub mod error;
pub mod event;
pub mod extraction;
pub mod models;
pub mod ocr;
pub mod processor;
pub mod sink;

pub use error::{RcptError, Result};
pub use event::ObjectLocation;
pub use extraction::{ItemExtractor, LineItemExtractor};
pub use models::config::RcptConfig;
pub use models::receipt::{ReceiptItem, TextLine};
pub use ocr::{OcrClient, OcrDocument};
pub use processor::{InvocationResponse, ProcessOutcome, ReceiptProcessor};
pub use sink::{MeasureRecord, MeasurementSink, build_records};
