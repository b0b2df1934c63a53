//! Paging request and result page

use serde::{Deserialize, Serialize};

/// Page request options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageRequest {
    /// Page index. Page index is 0-based and cannot be a negative number
    pub page: u32,
    /// Page size. Page size must be greater than zero
    pub size: u32,
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self { page, size }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: 0, size: 10 }
    }
}

/// One page of query results
///
/// `count` is the total number of matching items, independent of the page
/// size; `items` holds the current page only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QueryResultPage<R> {
    /// Page request options echoed by the server
    pub page_request: PageRequest,
    /// Total number of items
    pub count: u64,
    /// Items for the current page
    pub items: Vec<R>,
}

impl<R> QueryResultPage<R> {
    /// Number of pages needed to hold `count` items
    pub fn page_count(&self) -> u64 {
        let size = u64::from(self.page_request.size);
        if size == 0 {
            return 0;
        }
        self.count.div_ceil(size)
    }

    /// True if a page follows the current one
    pub fn has_next(&self) -> bool {
        u64::from(self.page_request.page) + 1 < self.page_count()
    }
}
