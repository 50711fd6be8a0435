use serde::{Deserialize, Serialize};

/// Raw `?page=&page_size=` query
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

/// Normalized page request: `page >= 1`, `1 <= page_size <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub page_size: i64,
}

impl PageRequest {
    /// Pages below 1 become page 1. A missing or non-positive page size falls
    /// back to `default_size`; oversized requests are capped at `max_size`.
    pub fn resolve(query: &PageQuery, default_size: i64, max_size: i64) -> Self {
        let page = query.page.unwrap_or(1).max(1);
        let page_size = match query.page_size {
            Some(size) if size >= 1 => size.min(max_size),
            _ => default_size.min(max_size),
        };

        Self { page, page_size }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Pagination {
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

impl Pagination {
    pub fn new(total: i64, request: PageRequest) -> Self {
        let total_pages = (total + request.page_size - 1) / request.page_size;
        Self {
            total,
            page: request.page,
            page_size: request.page_size,
            total_pages,
        }
    }
}

/// One page of results plus the unpaged total
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: Option<i64>, page_size: Option<i64>) -> PageQuery {
        PageQuery { page, page_size }
    }

    #[test]
    fn test_defaults() {
        let req = PageRequest::resolve(&PageQuery::default(), 10, 100);
        assert_eq!(req, PageRequest { page: 1, page_size: 10 });
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn test_page_clamped_to_one() {
        let req = PageRequest::resolve(&query(Some(0), None), 10, 100);
        assert_eq!(req.page, 1);
        let req = PageRequest::resolve(&query(Some(-3), None), 10, 100);
        assert_eq!(req.page, 1);
    }

    #[test]
    fn test_page_size_bounds() {
        assert_eq!(PageRequest::resolve(&query(None, Some(0)), 20, 100).page_size, 20);
        assert_eq!(PageRequest::resolve(&query(None, Some(-5)), 20, 100).page_size, 20);
        assert_eq!(PageRequest::resolve(&query(None, Some(500)), 20, 100).page_size, 100);
        assert_eq!(PageRequest::resolve(&query(None, Some(7)), 20, 100).page_size, 7);
    }

    #[test]
    fn test_offset() {
        let req = PageRequest::resolve(&query(Some(3), Some(10)), 10, 100);
        assert_eq!(req.offset(), 20);
        assert_eq!(req.limit(), 10);
    }

    #[test]
    fn test_huge_page_does_not_overflow() {
        let req = PageRequest::resolve(&query(Some(i64::MAX), Some(100)), 10, 100);
        assert_eq!(req.offset(), i64::MAX);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let req = PageRequest { page: 3, page_size: 10 };
        assert_eq!(Pagination::new(25, req).total_pages, 3);
        assert_eq!(Pagination::new(30, req).total_pages, 3);
        assert_eq!(Pagination::new(31, req).total_pages, 4);
        assert_eq!(Pagination::new(0, req).total_pages, 0);
    }
}
