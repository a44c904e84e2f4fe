//! Per-item aggregation of extracted records.

use std::collections::HashMap;

use super::disambiguate::{Contribution, LabelSplitter};
use crate::models::record::{AggregatedRow, Record};

/// Group records by item and sum their quantities.
///
/// Records without an item contribute nothing to any group. Null quantities
/// are excluded from the sum, not treated as zero, so an item seen only
/// with null quantities still appears with a total of 0.0. Rows come back
/// sorted by total descending; ties keep first-seen grouping order (stable
/// sort). Empty input yields an empty result, not an error.
pub fn aggregate(records: &[Record]) -> Vec<AggregatedRow> {
    aggregate_with(records, None)
}

/// Aggregate with an optional label-splitter stage applied to each record
/// first.
pub fn aggregate_with(records: &[Record], splitter: Option<&LabelSplitter>) -> Vec<AggregatedRow> {
    let mut totals: Vec<AggregatedRow> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    let mut add = |contribution: Contribution| {
        let slot = *index.entry(contribution.item.clone()).or_insert_with(|| {
            totals.push(AggregatedRow::new(contribution.item.clone(), 0.0));
            totals.len() - 1
        });
        if let Some(q) = contribution.quantity {
            totals[slot].total_quantity += q;
        }
    };

    for record in records {
        match splitter {
            Some(splitter) => {
                for contribution in splitter.split(record) {
                    add(contribution);
                }
            }
            None => {
                if let Some(item) = &record.item {
                    add(Contribution {
                        item: item.clone(),
                        quantity: record.quantity.map(|q| q as f64),
                    });
                }
            }
        }
    }

    totals.sort_by(|a, b| {
        b.total_quantity
            .partial_cmp(&a.total_quantity)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(item: Option<&str>, quantity: Option<i64>) -> Record {
        Record::new(item.map(String::from), quantity)
    }

    #[test]
    fn test_sums_per_item_sorted_descending() {
        let records = vec![
            record(Some("Rice"), Some(5)),
            record(Some("Rice"), Some(3)),
            record(Some("Broccoli"), None),
            record(Some("Broccoli"), Some(2)),
        ];

        let rows = aggregate(&records);
        assert_eq!(
            rows,
            vec![
                AggregatedRow::new("Rice", 8.0),
                AggregatedRow::new("Broccoli", 2.0),
            ]
        );
    }

    #[test]
    fn test_itemless_records_are_excluded() {
        let records = vec![record(None, Some(9)), record(Some("Rice"), Some(1))];
        let rows = aggregate(&records);
        assert_eq!(rows, vec![AggregatedRow::new("Rice", 1.0)]);
    }

    #[test]
    fn test_null_quantities_do_not_zero_the_sum() {
        let records = vec![
            record(Some("Rice"), Some(4)),
            record(Some("Rice"), None),
        ];
        let rows = aggregate(&records);
        assert_eq!(rows, vec![AggregatedRow::new("Rice", 4.0)]);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let records = vec![
            record(Some("Beans"), Some(2)),
            record(Some("Corn"), Some(2)),
            record(Some("Kale"), Some(5)),
        ];

        let rows = aggregate(&records);
        assert_eq!(rows[0].item, "Kale");
        assert_eq!(rows[1].item, "Beans");
        assert_eq!(rows[2].item, "Corn");
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert!(aggregate(&[]).is_empty());
    }

    #[test]
    fn test_splitter_contributions_merge_into_groups() {
        let splitter = LabelSplitter::new(["Teriyaki Chicken", "Rice"]);
        let records = vec![
            record(Some("Teriyaki Chicken Rice"), Some(5)),
            record(Some("Rice"), Some(3)),
        ];

        let rows = aggregate_with(&records, Some(&splitter));
        assert_eq!(
            rows,
            vec![
                AggregatedRow::new("Rice", 5.5),
                AggregatedRow::new("Teriyaki Chicken", 2.5),
            ]
        );
    }
}
