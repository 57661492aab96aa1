use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Largest page the dashboards ever request.
pub const MAX_PAGE_SIZE: usize = 100;
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// The page the caller wants to see. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: usize,
    pub page_size: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    pub fn new(page: usize, page_size: usize) -> Self {
        Self { page, page_size }
    }
}

/// A resolved page over a result set of `total` records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
    pub page_count: usize,
}

impl Pagination {
    /// Page 0 is read as page 1 and the size is clamped to `1..=MAX_PAGE_SIZE`.
    /// Pages past the end stay as requested and slice to nothing.
    pub fn new(request: PageRequest, total: usize) -> Self {
        let page_size = request.page_size.clamp(1, MAX_PAGE_SIZE);
        Self {
            page: request.page.max(1),
            page_size,
            total,
            page_count: total.div_ceil(page_size),
        }
    }

    pub fn range(&self) -> Range<usize> {
        let start = (self.page - 1).saturating_mul(self.page_size).min(self.total);
        let end = self.page.saturating_mul(self.page_size).min(self.total);
        start..end
    }

    pub fn slice<'s, T>(&self, items: &'s [T]) -> &'s [T] {
        let range = self.range();
        let end = range.end.min(items.len());
        let start = range.start.min(end);
        &items[start..end]
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.page_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slices_are_one_based() {
        let items: Vec<u32> = (1..=25).collect();
        let page = Pagination::new(PageRequest::new(2, 10), items.len());
        assert_eq!(page.slice(&items), &(11..=20).collect::<Vec<_>>()[..]);
        assert_eq!(page.page_count, 3);
        assert!(page.has_previous());
        assert!(page.has_next());
    }

    #[test]
    fn last_page_is_partial() {
        let items: Vec<u32> = (1..=25).collect();
        let page = Pagination::new(PageRequest::new(3, 10), items.len());
        assert_eq!(page.slice(&items), &[21, 22, 23, 24, 25]);
        assert!(!page.has_next());
    }

    #[test]
    fn out_of_range_page_is_empty() {
        let items: Vec<u32> = (1..=5).collect();
        let page = Pagination::new(PageRequest::new(4, 10), items.len());
        assert!(page.slice(&items).is_empty());
        assert_eq!(page.page, 4);
    }

    #[test]
    fn clamps_page_and_size() {
        let page = Pagination::new(PageRequest::new(0, 0), 3);
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 1);

        let page = Pagination::new(PageRequest::new(1, 5000), 300);
        assert_eq!(page.page_size, MAX_PAGE_SIZE);
        assert_eq!(page.page_count, 3);
    }

    #[test]
    fn empty_result_has_no_pages() {
        let page = Pagination::new(PageRequest::default(), 0);
        assert_eq!(page.page_count, 0);
        assert_eq!(page.range(), 0..0);
        assert!(!page.has_next());
    }
}
