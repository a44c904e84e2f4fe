//! Extracted record types.

use serde::{Deserialize, Serialize};

/// One extracted (item, quantity) candidate before aggregation.
///
/// At least one field is non-null; the field extractor never emits a fully
/// empty record. Item text is opaque free text, not matched against any
/// fixed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Free-text item label, if any token survived cleaning.
    pub item: Option<String>,

    /// Quantity from the highest-confidence numeric token, if one passed
    /// the confidence gate (and later, the range sanitizer).
    pub quantity: Option<i64>,
}

impl Record {
    pub fn new(item: Option<String>, quantity: Option<i64>) -> Self {
        Self { item, quantity }
    }

    /// Whether both fields are null. Such a record carries no information
    /// and is dropped rather than retained.
    pub fn is_empty(&self) -> bool {
        self.item.is_none() && self.quantity.is_none()
    }
}

/// One final output row: an item and the sum of its contributing quantities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedRow {
    /// Distinct item label.
    pub item: String,

    /// Sum over all contributing records; null quantities are excluded
    /// from the sum, not treated as zero.
    pub total_quantity: f64,
}

impl AggregatedRow {
    pub fn new(item: impl Into<String>, total_quantity: f64) -> Self {
        Self {
            item: item.into(),
            total_quantity,
        }
    }
}
