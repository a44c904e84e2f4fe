//! Core library for handwritten production-log OCR processing.
//!
//! This crate provides:
//! - Word-box model and the OCR collaborator interface
//! - Text-layout line grouping by vertical proximity
//! - (item, quantity) field extraction with a confidence gate
//! - Range sanitization and per-item aggregation
//! - CSV report serialization

pub mod error;
pub mod extract;
pub mod models;
pub mod ocr;
pub mod report;

pub use error::{OcrError, PreplogError, ReportError, Result};
pub use extract::{
    aggregate, extract_record, group_lines, sanitize_quantity, LabelSplitter, Line, LogExtractor,
};
pub use models::config::{ExtractionConfig, LabelConfig, MailSettings, PreplogConfig};
pub use models::record::{AggregatedRow, Record};
pub use ocr::{parse_word_boxes, OcrSource, WordBox};
