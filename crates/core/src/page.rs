//! Offset-based pagination primitives.
//!
//! Listing queries are scoped and paginated at the query boundary: the store
//! applies sorting, offset and limit itself and reports the total match count
//! alongside the page's items. Nothing in this layer post-filters a full
//! result set.

use serde::{Deserialize, Serialize};

/// Hard cap on page size, for safety.
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Pagination + sorting parameters for listing queries.
///
/// `page` is zero-indexed. `S` is the sortable-field type of the entity being
/// listed (an allow-list enum, so a caller-supplied field name is parsed and
/// rejected before it ever reaches a query).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest<S> {
    pub page: u32,
    pub size: u32,
    pub sort_by: S,
    pub ascending: bool,
}

impl<S> PageRequest<S> {
    pub fn new(page: u32, size: u32, sort_by: S, ascending: bool) -> Self {
        Self {
            page,
            size: size.clamp(1, MAX_PAGE_SIZE),
            sort_by,
            ascending,
        }
    }

    pub fn offset(&self) -> usize {
        self.page as usize * self.size as usize
    }

    pub fn limit(&self) -> usize {
        self.size as usize
    }
}

/// One page of results plus the pagination metadata that accompanies it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    /// Build a page; `total_pages` is derived from the total and page size.
    pub fn new(items: Vec<T>, page: u32, size: u32, total_elements: u64) -> Self {
        let size = size.max(1);
        let total_pages = total_elements.div_ceil(size as u64);
        Self {
            items,
            page,
            size,
            total_elements,
            total_pages,
        }
    }

    pub fn has_next(&self) -> bool {
        (self.page as u64 + 1) < self.total_pages
    }

    /// Map the page's items, keeping the metadata (entity page → DTO page).
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}
