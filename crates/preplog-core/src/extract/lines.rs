//! Grouping of word boxes into visual text lines.

use tracing::debug;

use crate::ocr::WordBox;

/// A cluster of word boxes judged to lie on the same visual row.
///
/// Invariant: non-empty, sorted by (y, x) ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line(Vec<WordBox>);

impl Line {
    /// Word boxes in reading order.
    pub fn words(&self) -> &[WordBox] {
        &self.0
    }
}

/// Cluster word boxes into ordered lines by vertical proximity.
///
/// Boxes are sorted by (y, x); a box joins the current line when its y is
/// within `y_tol` of the previously placed box, otherwise it starts a new
/// line. Every input box lands in exactly one line.
///
/// The baseline is the previous box, not the line's first token, so a row
/// whose y values drift gradually can creep into the next visual row. That
/// imprecision is accepted; callers should not depend on creep either way.
pub fn group_lines(mut boxes: Vec<WordBox>, y_tol: i32) -> Vec<Line> {
    boxes.sort_by(|a, b| (a.y, a.x).cmp(&(b.y, b.x)));

    let mut lines = Vec::new();
    let mut current: Vec<WordBox> = Vec::new();
    let mut prev_y: Option<i32> = None;

    for word in boxes {
        let y = word.y;
        match prev_y {
            Some(prev) if (y - prev).abs() > y_tol => {
                if !current.is_empty() {
                    lines.push(Line(std::mem::take(&mut current)));
                }
                current.push(word);
            }
            _ => current.push(word),
        }
        prev_y = Some(y);
    }

    if !current.is_empty() {
        lines.push(Line(current));
    }

    debug!("grouped word boxes into {} lines", lines.len());

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn word(text: &str, x: i32, y: i32) -> WordBox {
        WordBox::new(text, x, y, 90)
    }

    #[test]
    fn test_groups_by_vertical_proximity() {
        let boxes = vec![
            word("Rice", 10, 100),
            word("5", 200, 104),
            word("Broccoli", 10, 160),
            word("3", 200, 158),
        ];

        let lines = group_lines(boxes, 12);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].words().len(), 2);
        assert_eq!(lines[0].words()[0].text, "Rice");
        assert_eq!(lines[1].words()[0].text, "Broccoli");
    }

    #[test]
    fn test_orders_within_line_by_x() {
        let boxes = vec![word("5", 200, 100), word("Rice", 10, 100)];
        let lines = group_lines(boxes, 12);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].words()[0].text, "Rice");
        assert_eq!(lines[0].words()[1].text, "5");
    }

    #[test]
    fn test_deterministic_partition() {
        let boxes = vec![
            word("a", 5, 10),
            word("bb", 50, 14),
            word("cc", 5, 40),
            word("d", 90, 44),
            word("e", 5, 80),
        ];

        let first = group_lines(boxes.clone(), 12);
        let second = group_lines(boxes.clone(), 12);
        assert_eq!(first, second);

        // Partition completeness: every input box appears exactly once.
        let mut flattened: Vec<WordBox> = first
            .iter()
            .flat_map(|l| l.words().iter().cloned())
            .collect();
        flattened.sort_by(|a, b| (a.y, a.x).cmp(&(b.y, b.x)));
        let mut expected = boxes;
        expected.sort_by(|a, b| (a.y, a.x).cmp(&(b.y, b.x)));
        assert_eq!(flattened, expected);
    }

    #[test]
    fn test_gradual_drift_creeps_into_one_line() {
        // Each step is within tolerance of its predecessor even though the
        // total drift exceeds it. The walk keeps them in a single line.
        let boxes = vec![word("a", 0, 0), word("b", 10, 10), word("c", 20, 20)];
        let lines = group_lines(boxes, 12);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].words().len(), 3);
    }

    #[test]
    fn test_empty_input() {
        assert!(group_lines(Vec::new(), 12).is_empty());
    }
}
