//! Page-number pagination

use serde::Serialize;

/// A validated page request (1-based page number, bounded page size)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    pub const DEFAULT_PAGE_SIZE: u32 = 10;
    pub const MAX_PAGE_SIZE: u32 = 100;

    /// Build a request, clamping out-of-range values instead of rejecting them
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.clamp(1, Self::MAX_PAGE_SIZE),
        }
    }

    #[inline]
    pub fn page(&self) -> u32 {
        self.page
    }

    #[inline]
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Row offset of the first item on this page
    #[inline]
    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.page_size)
    }

    #[inline]
    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }

    /// Slice an already-ordered collection down to this page
    pub fn slice<T: Clone>(&self, items: &[T]) -> Vec<T> {
        let start = usize::try_from(self.offset()).unwrap_or(usize::MAX);
        items
            .iter()
            .skip(start)
            .take(self.page_size as usize)
            .cloned()
            .collect()
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, Self::DEFAULT_PAGE_SIZE)
    }
}

/// One page of results plus the total number of matching items
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub page_size: u32,
    pub total: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total: i64) -> Self {
        Self {
            items,
            page: request.page(),
            page_size: request.page_size(),
            total,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total: self.total,
        }
    }

    pub fn has_more(&self) -> bool {
        i64::from(self.page) * i64::from(self.page_size) < self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamps_out_of_range_values() {
        let req = PageRequest::new(0, 0);
        assert_eq!(req.page(), 1);
        assert_eq!(req.page_size(), 1);

        let req = PageRequest::new(3, 500);
        assert_eq!(req.page_size(), PageRequest::MAX_PAGE_SIZE);
    }

    #[test]
    fn test_offset() {
        assert_eq!(PageRequest::new(1, 10).offset(), 0);
        assert_eq!(PageRequest::new(3, 10).offset(), 20);
    }

    #[test]
    fn test_slice() {
        let items: Vec<i32> = (1..=25).collect();
        assert_eq!(PageRequest::new(3, 10).slice(&items), vec![21, 22, 23, 24, 25]);
        assert!(PageRequest::new(4, 10).slice(&items).is_empty());
    }

    #[test]
    fn test_page_map_and_has_more() {
        let page = Page::new(vec![1, 2], PageRequest::new(1, 2), 3).map(|n| n * 10);
        assert_eq!(page.items, vec![10, 20]);
        assert!(page.has_more());
    }
}
