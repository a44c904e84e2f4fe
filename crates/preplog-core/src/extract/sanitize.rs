//! Range sanitization for extracted quantities.

/// Null out quantities outside the accepted range.
///
/// Values within `[min_quantity, max_quantity]` (inclusive) pass through;
/// out-of-range or absent values become `None`. Idempotent: sanitizing an
/// already-sanitized value yields the same value. An out-of-range quantity
/// is not an error; the owning record is kept with a null quantity for
/// manual review.
pub fn sanitize_quantity(
    quantity: Option<i64>,
    min_quantity: i64,
    max_quantity: i64,
) -> Option<i64> {
    quantity.filter(|&q| q >= min_quantity && q <= max_quantity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_inclusive_boundaries() {
        assert_eq!(sanitize_quantity(Some(0), 0, 100), Some(0));
        assert_eq!(sanitize_quantity(Some(100), 0, 100), Some(100));
        assert_eq!(sanitize_quantity(Some(101), 0, 100), None);
        assert_eq!(sanitize_quantity(Some(-1), 0, 100), None);
        assert_eq!(sanitize_quantity(None, 0, 100), None);
    }

    #[test]
    fn test_idempotent() {
        for q in [Some(0), Some(50), Some(101), None] {
            let once = sanitize_quantity(q, 0, 100);
            let twice = sanitize_quantity(once, 0, 100);
            assert_eq!(once, twice);
        }
    }
}
