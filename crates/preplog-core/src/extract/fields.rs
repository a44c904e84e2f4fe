//! Field extraction: splitting one line into an item label and a quantity.

use lazy_static::lazy_static;
use regex::Regex;

use super::lines::Line;
use crate::models::record::Record;

/// Minimum cleaned length for a token to join the item label.
const ITEM_TOKEN_MIN_LEN: usize = 2;

lazy_static! {
    static ref ALPHA: Regex = Regex::new(r"[A-Za-z]").unwrap();
    static ref DISALLOWED: Regex = Regex::new(r"[^A-Za-z0-9'/-]+").unwrap();
}

/// Extract an (item, quantity) record from one line.
///
/// The quantity is the highest-confidence digit-only token at or above
/// `confidence_threshold`; ties go to the first token in line order.
/// Sub-threshold numeric tokens are dropped entirely, never folded into the
/// item text. Item tokens keep only `[A-Za-z0-9'/-]`, are trimmed, must be
/// at least two characters after cleaning, and are joined with single
/// spaces.
///
/// Returns `None` when the line yields neither field, or when the result
/// fails the post-filter (an item with no alphabetic character and no
/// quantity is spurious punctuation, not a record).
pub fn extract_record(line: &Line, confidence_threshold: i32) -> Option<Record> {
    let mut quantity: Option<i64> = None;
    let mut quantity_conf = -1;
    let mut words: Vec<String> = Vec::new();

    for word in line.words() {
        if word.is_numeric() {
            if word.confidence >= confidence_threshold && word.confidence > quantity_conf {
                quantity = word.text.parse::<i64>().ok();
                quantity_conf = word.confidence;
            }
            continue;
        }
        if ALPHA.is_match(&word.text) {
            let cleaned = DISALLOWED.replace_all(&word.text, " ").trim().to_string();
            if cleaned.len() >= ITEM_TOKEN_MIN_LEN {
                words.push(cleaned);
            }
        }
    }

    let item = if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    };

    let record = Record::new(item, quantity);
    if record.is_empty() {
        return None;
    }

    // Guard against punctuation-only item strings surviving as records.
    let item_has_alpha = record
        .item
        .as_deref()
        .map(|i| ALPHA.is_match(i))
        .unwrap_or(false);
    if item_has_alpha || record.quantity.is_some() {
        Some(record)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::lines::group_lines;
    use crate::ocr::WordBox;
    use pretty_assertions::assert_eq;

    fn line(words: Vec<WordBox>) -> Line {
        let mut lines = group_lines(words, i32::MAX);
        assert_eq!(lines.len(), 1);
        lines.remove(0)
    }

    #[test]
    fn test_quantity_tie_breaks_to_first_in_line_order() {
        let l = line(vec![
            WordBox::new("12", 10, 0, 60),
            WordBox::new("7", 20, 0, 85),
            WordBox::new("9", 30, 0, 85),
        ]);

        let record = extract_record(&l, 80).unwrap();
        assert_eq!(record.quantity, Some(7));
        assert_eq!(record.item, None);
    }

    #[test]
    fn test_no_numeric_token_meets_threshold() {
        let l = line(vec![
            WordBox::new("Rice", 10, 0, 90),
            WordBox::new("12", 20, 0, 40),
        ]);

        let record = extract_record(&l, 80).unwrap();
        assert_eq!(record.item.as_deref(), Some("Rice"));
        assert_eq!(record.quantity, None);
    }

    #[test]
    fn test_item_cleaning_strips_disallowed_characters() {
        let l = line(vec![
            WordBox::new("Ro@sted!", 10, 0, 90),
            WordBox::new("Broc-coli", 20, 0, 90),
            WordBox::new("#12", 30, 0, 90),
        ]);

        let record = extract_record(&l, 80).unwrap();
        let item = record.item.unwrap();
        // The contract: characters outside [A-Za-z0-9'/-] become spaces,
        // tokens are trimmed, sub-2-char tokens drop, survivors join.
        assert!(item.contains("Broc-coli"));
        assert!(!item.contains('@'));
        assert!(!item.contains('!'));
        assert!(!item.contains('#'));
    }

    #[test]
    fn test_short_cleaned_tokens_are_dropped() {
        let l = line(vec![
            WordBox::new("a.", 10, 0, 90),
            WordBox::new("Beans", 20, 0, 90),
        ]);

        let record = extract_record(&l, 80).unwrap();
        assert_eq!(record.item.as_deref(), Some("Beans"));
    }

    #[test]
    fn test_empty_line_yields_no_record() {
        let l = line(vec![WordBox::new("!!", 10, 0, 90), WordBox::new("12", 20, 0, 40)]);
        assert_eq!(extract_record(&l, 80), None);
    }

    #[test]
    fn test_quantity_only_line_is_retained() {
        let l = line(vec![WordBox::new("42", 10, 0, 95)]);
        let record = extract_record(&l, 80).unwrap();
        assert_eq!(record.item, None);
        assert_eq!(record.quantity, Some(42));
    }
}
