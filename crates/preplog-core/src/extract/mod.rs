//! The extraction pipeline: word boxes in, records and report rows out.
//!
//! Data flows strictly one way: word boxes are grouped into lines, each
//! line yields at most one record, quantities are range-sanitized, and the
//! surviving records are aggregated per item.

mod aggregate;
mod disambiguate;
mod fields;
mod lines;
mod sanitize;

pub use aggregate::{aggregate, aggregate_with};
pub use disambiguate::{Contribution, LabelSplitter};
pub use fields::extract_record;
pub use lines::{group_lines, Line};
pub use sanitize::sanitize_quantity;

use tracing::debug;

use crate::models::config::PreplogConfig;
use crate::models::record::{AggregatedRow, Record};
use crate::ocr::WordBox;

/// The configured extraction pipeline.
pub struct LogExtractor {
    confidence_threshold: i32,
    line_tolerance: i32,
    min_quantity: i64,
    max_quantity: i64,
    splitter: Option<LabelSplitter>,
}

impl LogExtractor {
    /// Create an extractor with default settings.
    pub fn new() -> Self {
        Self {
            confidence_threshold: 80,
            line_tolerance: 12,
            min_quantity: 0,
            max_quantity: 10_000,
            splitter: None,
        }
    }

    /// Build an extractor from configuration.
    pub fn from_config(config: &PreplogConfig) -> Self {
        let mut extractor = Self::new()
            .with_confidence_threshold(config.extraction.confidence_threshold)
            .with_line_tolerance(config.extraction.line_tolerance)
            .with_quantity_range(config.extraction.min_quantity, config.extraction.max_quantity);
        if config.labels.enabled && !config.labels.known_labels.is_empty() {
            extractor =
                extractor.with_splitter(LabelSplitter::new(config.labels.known_labels.clone()));
        }
        extractor
    }

    /// Set the confidence gate for quantity tokens.
    pub fn with_confidence_threshold(mut self, threshold: i32) -> Self {
        self.confidence_threshold = threshold;
        self
    }

    /// Set the vertical tolerance for line grouping.
    pub fn with_line_tolerance(mut self, tolerance: i32) -> Self {
        self.line_tolerance = tolerance;
        self
    }

    /// Set the accepted quantity range (inclusive).
    pub fn with_quantity_range(mut self, min: i64, max: i64) -> Self {
        self.min_quantity = min;
        self.max_quantity = max;
        self
    }

    /// Install a known-label splitter stage.
    pub fn with_splitter(mut self, splitter: LabelSplitter) -> Self {
        self.splitter = Some(splitter);
        self
    }

    /// Extract sanitized records from one image's word boxes.
    ///
    /// Lines yielding neither field produce no record; out-of-range
    /// quantities are nulled but the record is kept.
    pub fn extract(&self, boxes: Vec<WordBox>) -> Vec<Record> {
        let lines = group_lines(boxes, self.line_tolerance);
        let line_count = lines.len();

        let records: Vec<Record> = lines
            .iter()
            .filter_map(|line| extract_record(line, self.confidence_threshold))
            .map(|mut record| {
                record.quantity =
                    sanitize_quantity(record.quantity, self.min_quantity, self.max_quantity);
                record
            })
            .collect();

        debug!("{} lines produced {} records", line_count, records.len());

        records
    }

    /// Aggregate records into the final report rows, applying the splitter
    /// stage when one is configured.
    pub fn summarize(&self, records: &[Record]) -> Vec<AggregatedRow> {
        aggregate_with(records, self.splitter.as_ref())
    }
}

impl Default for LogExtractor {
    fn default() -> Self {
        Self::new()
    }
}
