// ── Catalog pagination ──

use std::ops::Range;

/// Number of pages needed for `total` items; 0 for an empty collection.
pub fn page_count(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1))
}

/// Highest valid page. Never below 1, so an empty catalog still has a
/// (blank) first page.
pub fn last_page(total: usize, page_size: usize) -> usize {
    page_count(total, page_size).max(1)
}

/// Clamp a requested page into `[1, last_page]`.
pub fn clamp_page(requested: i64, total: usize, page_size: usize) -> usize {
    let last = last_page(total, page_size);
    if requested < 1 {
        return 1;
    }
    usize::try_from(requested).map_or(last, |p| p.min(last))
}

/// Index range of `page` within a collection of `total` items.
pub fn page_range(page: usize, total: usize, page_size: usize) -> Range<usize> {
    let size = page_size.max(1);
    let start = page.saturating_sub(1).saturating_mul(size).min(total);
    let end = start.saturating_add(size).min(total);
    start..end
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twenty_five_items_make_three_pages() {
        assert_eq!(page_count(25, 12), 3);
        assert_eq!(clamp_page(5, 25, 12), 3);
        assert_eq!(clamp_page(0, 25, 12), 1);
        assert_eq!(clamp_page(-4, 25, 12), 1);
        assert_eq!(clamp_page(2, 25, 12), 2);
    }

    #[test]
    fn exact_multiple_has_no_trailing_page() {
        assert_eq!(page_count(24, 12), 2);
        assert_eq!(page_range(2, 24, 12), 12..24);
    }

    #[test]
    fn empty_collection() {
        assert_eq!(page_count(0, 12), 0);
        assert_eq!(last_page(0, 12), 1);
        assert_eq!(clamp_page(3, 0, 12), 1);
        assert!(page_range(1, 0, 12).is_empty());
    }

    #[test]
    fn last_page_is_partial() {
        assert_eq!(page_range(3, 25, 12), 24..25);
        assert_eq!(page_range(1, 25, 12), 0..12);
    }

    #[test]
    fn huge_requests_clamp_to_last_page() {
        assert_eq!(clamp_page(i64::MAX, 25, 12), 3);
    }
}
