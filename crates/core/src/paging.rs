//! Shared pagination types used by every list operation.

use serde::{Deserialize, Serialize};

/// Page request, 1-based. Page sizes are fixed per entity (see `constants`),
/// never client-specified.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: i64,
    pub page_size: i64,
}

impl Pagination {
    pub fn new(page: i64, page_size: i64) -> Self {
        Self {
            page: page.max(1),
            page_size,
        }
    }

    /// SQL OFFSET for this page.
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }
}

/// Response metadata for a paginated list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total_row_count: i64,
    pub page: i64,
    pub page_size: i64,
}

impl PageMeta {
    /// Number of pages needed for `total_row_count` rows.
    pub fn page_count(&self) -> i64 {
        if self.page_size <= 0 {
            return 0;
        }
        (self.total_row_count + self.page_size - 1) / self.page_size
    }
}

/// A page of results plus the total count for the active filters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, total_row_count: i64, pagination: Pagination) -> Self {
        Self {
            data,
            meta: PageMeta {
                total_row_count,
                page: pagination.page,
                page_size: pagination.page_size,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_offset_is_one_based() {
        assert_eq!(Pagination::new(1, 10).offset(), 0);
        assert_eq!(Pagination::new(3, 10).offset(), 20);
    }

    #[test]
    fn test_pagination_clamps_page_to_one() {
        assert_eq!(Pagination::new(0, 10).page, 1);
        assert_eq!(Pagination::new(-5, 10).page, 1);
    }

    #[test]
    fn test_page_count_rounds_up() {
        let page: Page<i32> = Page::new(vec![], 21, Pagination::new(1, 10));
        assert_eq!(page.meta.page_count(), 3);
        let empty: Page<i32> = Page::new(vec![], 0, Pagination::new(1, 10));
        assert_eq!(empty.meta.page_count(), 0);
    }
}
