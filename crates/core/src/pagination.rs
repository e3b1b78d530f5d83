//! Paginated result type matching the upstream page shape
//!
//! Upstream catalog APIs report `page`, `pagecount`, `limit`, and `total`
//! alongside the record list, but none of those fields can be trusted to be
//! present or numeric. Every field therefore has a safe default, and a fully
//! defaulted [`Page`] doubles as the "source failed" result the gateway
//! returns instead of propagating transport errors.

use serde::{Deserialize, Serialize};

/// Default number of items per page when the upstream does not say
pub const DEFAULT_LIMIT: u32 = 20;

/// One page of items together with upstream pagination metadata.
///
/// Invariants: `page >= 1` and `page_count >= 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page, in upstream order
    pub items: Vec<T>,
    /// Current page number (1-based)
    pub page: u32,
    /// Total number of pages
    pub page_count: u32,
    /// Page size limit
    pub limit: u32,
    /// Total item count across all pages
    pub total: u64,
}

impl<T> Page<T> {
    /// The all-defaults empty page: no items, page 1 of 1, default limit.
    /// Returned whenever upstream data is missing or malformed.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            page: 1,
            page_count: 1,
            limit: DEFAULT_LIMIT,
            total: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_page_defaults() {
        let page: Page<String> = Page::empty();
        assert!(page.is_empty());
        assert_eq!(page.page, 1);
        assert_eq!(page.page_count, 1);
        assert_eq!(page.limit, DEFAULT_LIMIT);
        assert_eq!(page.total, 0);
    }
}
