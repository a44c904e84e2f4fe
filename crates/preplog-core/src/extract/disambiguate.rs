//! Known-label splitting for merged rows.
//!
//! Handwritten logs sometimes OCR two menu rows into one line, producing an
//! item like "Teriyaki Chicken Rice". When a list of known labels is
//! configured, this stage splits such a record's quantity evenly across the
//! labels found inside its item text. The pipeline itself stays
//! vocabulary-agnostic; the splitter is an optional stage between field
//! extraction and aggregation.

use tracing::debug;

use crate::models::record::Record;

/// One item's share of a record after splitting.
///
/// Quantities turn fractional here: an even split of 5 across two labels
/// contributes 2.5 to each.
#[derive(Debug, Clone, PartialEq)]
pub struct Contribution {
    pub item: String,
    pub quantity: Option<f64>,
}

/// Splits records whose item text contains more than one known label.
#[derive(Debug, Clone, Default)]
pub struct LabelSplitter {
    labels: Vec<String>,
}

impl LabelSplitter {
    /// Create a splitter over the given canonical labels.
    ///
    /// Longer labels are matched first and consume their span, so "Fried
    /// Rice" wins over a bare "Rice" inside it. Labels that are substrings
    /// of each other remain ambiguous in general; this ordering is a
    /// tie-break, not a resolution.
    pub fn new(labels: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let mut labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        labels.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        Self { labels }
    }

    /// Expand one record into per-label contributions.
    ///
    /// No match, or no item at all, passes the record through unchanged.
    /// One match relabels to the canonical label. Multiple matches split
    /// the quantity evenly.
    pub fn split(&self, record: &Record) -> Vec<Contribution> {
        let Some(item) = record.item.as_deref() else {
            return Vec::new();
        };
        let quantity = record.quantity.map(|q| q as f64);

        // Match case-insensitively on a lowercased working copy; spans are
        // blanked out so shorter labels cannot re-match them.
        let mut remaining = item.to_lowercase();
        let mut found: Vec<&str> = Vec::new();
        for label in &self.labels {
            let needle = label.to_lowercase();
            if let Some(pos) = remaining.find(&needle) {
                found.push(label);
                remaining.replace_range(pos..pos + needle.len(), &" ".repeat(needle.len()));
            }
        }

        match found.len() {
            0 => vec![Contribution {
                item: item.to_string(),
                quantity,
            }],
            1 => vec![Contribution {
                item: found[0].to_string(),
                quantity,
            }],
            n => {
                debug!("splitting {:?} across {} known labels", item, n);
                let share = quantity.map(|q| q / n as f64);
                found
                    .into_iter()
                    .map(|label| Contribution {
                        item: label.to_string(),
                        quantity: share,
                    })
                    .collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn splitter() -> LabelSplitter {
        LabelSplitter::new(["Roasted Broccoli", "Teriyaki Chicken", "Rice"])
    }

    #[test]
    fn test_no_match_passes_through() {
        let record = Record::new(Some("Mashed Potatoes".to_string()), Some(4));
        let out = splitter().split(&record);
        assert_eq!(
            out,
            vec![Contribution {
                item: "Mashed Potatoes".to_string(),
                quantity: Some(4.0),
            }]
        );
    }

    #[test]
    fn test_single_match_relabels() {
        let record = Record::new(Some("teriyaki chicken lbs".to_string()), Some(6));
        let out = splitter().split(&record);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].item, "Teriyaki Chicken");
        assert_eq!(out[0].quantity, Some(6.0));
    }

    #[test]
    fn test_multiple_matches_split_evenly() {
        let record = Record::new(Some("Teriyaki Chicken Rice".to_string()), Some(5));
        let out = splitter().split(&record);
        assert_eq!(out.len(), 2);
        assert!(out.iter().any(|c| c.item == "Teriyaki Chicken"));
        assert!(out.iter().any(|c| c.item == "Rice"));
        for c in &out {
            assert_eq!(c.quantity, Some(2.5));
        }
    }

    #[test]
    fn test_longest_label_consumes_its_span() {
        let splitter = LabelSplitter::new(["Fried Rice", "Rice"]);
        let record = Record::new(Some("Fried Rice".to_string()), Some(4));
        let out = splitter.split(&record);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].item, "Fried Rice");
        assert_eq!(out[0].quantity, Some(4.0));
    }

    #[test]
    fn test_null_quantity_splits_to_null_shares() {
        let record = Record::new(Some("Teriyaki Chicken Rice".to_string()), None);
        let out = splitter().split(&record);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|c| c.quantity.is_none()));
    }

    #[test]
    fn test_itemless_record_contributes_nothing() {
        let record = Record::new(None, Some(3));
        assert!(splitter().split(&record).is_empty());
    }
}
