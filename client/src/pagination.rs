//! Pagination control of the users list.

use std::ops::RangeInclusive;

use crate::filter::{Change, PAGE_SIZES};

/// Maximum number of page buttons shown at once.
pub const MAX_VISIBLE_PAGES: usize = 5;

/// State of a pagination control.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Pagination {
    /// Total count of the paginated items.
    pub total: usize,

    /// 1-based index of the current page.
    pub current: usize,

    /// Number of items on a page.
    pub page_size: usize,
}

impl Pagination {
    /// Returns the total number of pages.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.total.div_ceil(self.page_size.max(1))
    }

    /// Returns the range of the page buttons to show.
    ///
    /// At most [`MAX_VISIBLE_PAGES`] pages are shown around the current one,
    /// shifted back when reaching the last page.
    #[must_use]
    pub fn visible_pages(&self) -> RangeInclusive<usize> {
        let total = self.total_pages();
        if total <= MAX_VISIBLE_PAGES {
            return 1..=total;
        }

        let mut start = self.current.saturating_sub(2).max(1);
        let end = total.min(start.saturating_add(MAX_VISIBLE_PAGES - 1));
        if end == total {
            start = end
                .saturating_add(1)
                .saturating_sub(MAX_VISIBLE_PAGES)
                .max(1);
        }
        start..=end
    }

    /// Indicates whether there is a page before the current one.
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.current > 1
    }

    /// Indicates whether there is a page after the current one.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.current < self.total_pages()
    }

    /// Returns the [`Change`] selecting the provided `page`.
    ///
    /// [`None`] is returned for the current page and pages out of range.
    #[must_use]
    pub fn go_to(&self, page: usize) -> Option<Change> {
        ((1..=self.total_pages()).contains(&page) && page != self.current)
            .then_some(Change::Page(page))
    }

    /// Returns the [`Change`] selecting the provided page `size`.
    ///
    /// [`None`] is returned for the current size and sizes out of
    /// [`PAGE_SIZES`].
    #[must_use]
    pub fn resize(&self, size: usize) -> Option<Change> {
        (size != self.page_size && PAGE_SIZES.contains(&size))
            .then_some(Change::PageSize(size))
    }
}

#[cfg(test)]
mod spec {
    use super::Pagination;
    use crate::filter::Change;

    fn at(current: usize, total: usize) -> Pagination {
        Pagination {
            total,
            current,
            page_size: 10,
        }
    }

    #[test]
    fn counts_pages() {
        assert_eq!(at(1, 0).total_pages(), 0);
        assert_eq!(at(1, 10).total_pages(), 1);
        assert_eq!(at(1, 25).total_pages(), 3);
    }

    #[test]
    fn shows_all_few_pages() {
        assert_eq!(at(2, 25).visible_pages(), 1..=3);
        assert!(at(1, 0).visible_pages().is_empty());
    }

    #[test]
    fn centers_visible_pages() {
        assert_eq!(at(1, 100).visible_pages(), 1..=5);
        assert_eq!(at(5, 100).visible_pages(), 3..=7);
        assert_eq!(at(9, 100).visible_pages(), 6..=10);
        assert_eq!(at(10, 100).visible_pages(), 6..=10);
    }

    #[test]
    fn clamps_visible_pages_of_huge_current_page() {
        assert_eq!(at(usize::MAX, 100).visible_pages(), 6..=10);
    }

    #[test]
    fn navigates_within_range() {
        let p = at(3, 25);

        assert!(p.has_previous());
        assert!(!p.has_next());
        assert_eq!(p.go_to(2), Some(Change::Page(2)));
        assert_eq!(p.go_to(3), None);
        assert_eq!(p.go_to(4), None);
        assert_eq!(p.go_to(0), None);
    }

    #[test]
    fn resizes_to_known_sizes() {
        let p = at(1, 25);

        assert_eq!(p.resize(30), Some(Change::PageSize(30)));
        assert_eq!(p.resize(10), None);
        assert_eq!(p.resize(20), None);
    }
}
