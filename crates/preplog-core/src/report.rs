//! CSV report serialization.
//!
//! Two views exist: the raw "all entries" view (one row per record, null
//! quantities blank) and the aggregated summary (one row per item). Both
//! are UTF-8 with a header row and fixed field order.

use crate::error::ReportError;
use crate::models::record::{AggregatedRow, Record};

/// Serialize raw records to CSV bytes with header `item,quantity`.
///
/// The header is present even when no records exist, so an empty report
/// still carries the schema.
pub fn entries_to_csv(records: &[Record]) -> Result<Vec<u8>, ReportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["item", "quantity"])?;
    for record in records {
        writer.write_record([
            record.item.as_deref().unwrap_or(""),
            &record.quantity.map(|q| q.to_string()).unwrap_or_default(),
        ])?;
    }
    writer
        .into_inner()
        .map_err(|e| ReportError::Finish(e.to_string()))
}

/// Serialize aggregated rows to CSV bytes with header `item,total_quantity`.
pub fn summary_to_csv(rows: &[AggregatedRow]) -> Result<Vec<u8>, ReportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["item", "total_quantity"])?;
    for row in rows {
        writer.write_record([row.item.as_str(), &row.total_quantity.to_string()])?;
    }
    writer
        .into_inner()
        .map_err(|e| ReportError::Finish(e.to_string()))
}

/// Parse an aggregated summary back from CSV bytes.
pub fn summary_from_csv(bytes: &[u8]) -> Result<Vec<AggregatedRow>, ReportError> {
    let mut reader = csv::Reader::from_reader(bytes);
    let mut rows = Vec::new();
    for result in reader.deserialize() {
        rows.push(result?);
    }
    Ok(rows)
}
