//! Pagination utilities for Halon API collections.

use serde::Serialize;

use crate::params::Pagination;

/// A page of results from a collection endpoint.
///
/// The appliance reports no totals for these collections, so `has_more` is
/// inferred from whether the page came back full.
#[derive(Debug, Clone, Serialize)]
#[serde(bound = "T: Serialize")]
pub struct Page<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Page index that was requested (0-based).
    pub offset: u32,
    /// Page size that was requested.
    pub limit: u32,
    /// Whether another page may follow.
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Create a new page from items and the request that produced them.
    #[must_use]
    pub fn new(items: Vec<T>, pagination: Pagination) -> Self {
        let has_more = pagination.limit > 0 && items.len() >= pagination.limit as usize;
        Self {
            items,
            offset: pagination.offset,
            limit: pagination.limit,
            has_more,
        }
    }

    /// The pagination that selects the following page.
    #[must_use]
    pub fn next_page(&self) -> Pagination {
        Pagination::new(self.offset, self.limit).next()
    }

    /// Map the items to a different type.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            offset: self.offset,
            limit: self.limit,
            has_more: self.has_more,
        }
    }

    /// Returns true if this page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns an iterator over the items in this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_page_has_more() {
        let page: Page<i32> = Page::new(vec![1; 5], Pagination::new(0, 5));
        assert!(page.has_more);
        assert_eq!(page.next_page(), Pagination::new(1, 5));
    }

    #[test]
    fn test_short_page_is_last() {
        let page: Page<i32> = Page::new(vec![1; 3], Pagination::new(2, 5));
        assert!(!page.has_more);
    }

    #[test]
    fn test_zero_limit_never_has_more() {
        let page: Page<i32> = Page::new(vec![], Pagination::new(0, 0));
        assert!(!page.has_more);
    }

    #[test]
    fn test_page_map() {
        let page = Page::new(vec![1, 2, 3], Pagination::new(0, 10));
        let mapped = page.map(|x| x * 2);
        assert_eq!(mapped.items, vec![2, 4, 6]);
        assert_eq!(mapped.limit, 10);
    }
}
