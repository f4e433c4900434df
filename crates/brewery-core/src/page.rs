//! # Pagination Primitives
//!
//! The store only knows "skip N, take M" and "count". This module turns
//! those two numbers into a page container.
//!
//! ## Page Arithmetic
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  total = 14, size = 5                                                   │
//! │                                                                         │
//! │  page 0: [ 1  2  3  4  5]   offset 0    first   has_next                │
//! │  page 1: [ 6  7  8  9 10]   offset 5            has_next  has_previous  │
//! │  page 2: [11 12 13 14]      offset 10   last              has_previous  │
//! │  page 3: [ ]                offset 15   last              has_previous  │
//! │                                                                         │
//! │  total_pages = ceil(14 / 5) = 3 on every page, including page 3        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Out-of-range page requests are clamped, never rejected.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{ValidationError, ValidationResult};
use crate::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

// =============================================================================
// Page Bounds
// =============================================================================

/// Default and maximum page size, usually taken from configuration.
///
/// Always satisfies `1 <= default_size <= max_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageBounds {
    default_size: i64,
    max_size: i64,
}

impl PageBounds {
    /// Builds page bounds, rejecting a ceiling below 1 or a default outside
    /// `1..=max_size`.
    pub fn new(default_size: i64, max_size: i64) -> ValidationResult<Self> {
        if max_size < 1 {
            return Err(ValidationError::OutOfRange {
                field: "maxPageSize".to_string(),
                min: 1,
                max: i64::MAX,
            });
        }
        if !(1..=max_size).contains(&default_size) {
            return Err(ValidationError::OutOfRange {
                field: "defaultPageSize".to_string(),
                min: 1,
                max: max_size,
            });
        }
        Ok(PageBounds {
            default_size,
            max_size,
        })
    }

    #[inline]
    pub const fn default_size(&self) -> i64 {
        self.default_size
    }

    #[inline]
    pub const fn max_size(&self) -> i64 {
        self.max_size
    }
}

impl Default for PageBounds {
    fn default() -> Self {
        PageBounds {
            default_size: DEFAULT_PAGE_SIZE,
            max_size: MAX_PAGE_SIZE,
        }
    }
}

// =============================================================================
// Page Request
// =============================================================================

/// A clamped, always-valid page request.
///
/// Fields are private so that an unclamped request cannot be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    size: i64,
}

impl PageRequest {
    /// Clamps raw request parameters against the default bounds.
    pub fn new(page: Option<i64>, size: Option<i64>) -> Self {
        PageRequest::clamp(page, size, PageBounds::default())
    }

    /// Clamps raw request parameters.
    ///
    /// ## Rules
    /// - missing or negative page → 0
    /// - missing size, size < 1, or size > `bounds.max_size` → `bounds.default_size`
    pub fn clamp(page: Option<i64>, size: Option<i64>, bounds: PageBounds) -> Self {
        let page = page.unwrap_or(0).max(0);
        let size = match size {
            Some(size) if (1..=bounds.max_size).contains(&size) => size,
            _ => bounds.default_size,
        };
        PageRequest { page, size }
    }

    /// Zero-based page index.
    #[inline]
    pub const fn page(&self) -> i64 {
        self.page
    }

    /// Page size (always >= 1).
    #[inline]
    pub const fn size(&self) -> i64 {
        self.size
    }

    /// Number of records to skip.
    #[inline]
    pub const fn offset(&self) -> i64 {
        self.page.saturating_mul(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        PageRequest::new(None, None)
    }
}

// =============================================================================
// Page Result
// =============================================================================

/// A page of content plus totals for the full matching set.
///
/// Serialized with camelCase keys:
/// ```json
/// {
///   "content": [...],
///   "number": 0, "size": 25,
///   "totalElements": 4, "totalPages": 1, "numberOfElements": 4,
///   "first": true, "last": true, "hasNext": false, "hasPrevious": false
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PageResult<T> {
    content: Vec<T>,
    number: i64,
    size: i64,
    total_elements: i64,
    total_pages: i64,
    number_of_elements: i64,
    first: bool,
    last: bool,
    has_next: bool,
    has_previous: bool,
}

impl<T> PageResult<T> {
    /// Builds a page from a content slice and the total matching count.
    ///
    /// The content order is kept as given.
    pub fn assemble(content: Vec<T>, request: PageRequest, total_elements: i64) -> Self {
        let total_elements = total_elements.max(0);
        let size = request.size();
        let total_pages = if total_elements == 0 {
            0
        } else {
            (total_elements + size - 1) / size
        };
        let number = request.page();
        let has_next = number.saturating_add(1) < total_pages;
        let has_previous = number > 0;

        PageResult {
            number_of_elements: content.len() as i64,
            content,
            number,
            size,
            total_elements,
            total_pages,
            first: !has_previous,
            last: !has_next,
            has_next,
            has_previous,
        }
    }

    /// Converts every item, keeping the page metadata.
    pub fn map<U, F>(self, f: F) -> PageResult<U>
    where
        F: FnMut(T) -> U,
    {
        PageResult {
            content: self.content.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            number_of_elements: self.number_of_elements,
            first: self.first,
            last: self.last,
            has_next: self.has_next,
            has_previous: self.has_previous,
        }
    }

    pub fn content(&self) -> &[T] {
        &self.content
    }

    pub fn into_content(self) -> Vec<T> {
        self.content
    }

    /// Zero-based index of this page.
    pub const fn number(&self) -> i64 {
        self.number
    }

    pub const fn size(&self) -> i64 {
        self.size
    }

    /// Matching records across all pages.
    pub const fn total_elements(&self) -> i64 {
        self.total_elements
    }

    pub const fn total_pages(&self) -> i64 {
        self.total_pages
    }

    /// Records on this page.
    pub const fn number_of_elements(&self) -> i64 {
        self.number_of_elements
    }

    pub const fn is_first(&self) -> bool {
        self.first
    }

    pub const fn is_last(&self) -> bool {
        self.last
    }

    pub const fn has_next(&self) -> bool {
        self.has_next
    }

    pub const fn has_previous(&self) -> bool {
        self.has_previous
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_defaults() {
        let request = PageRequest::new(None, None);
        assert_eq!(request.page(), 0);
        assert_eq!(request.size(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_clamp_out_of_range() {
        let request = PageRequest::new(Some(-3), Some(0));
        assert_eq!(request.page(), 0);
        assert_eq!(request.size(), DEFAULT_PAGE_SIZE);

        let request = PageRequest::new(Some(2), Some(MAX_PAGE_SIZE + 1));
        assert_eq!(request.page(), 2);
        assert_eq!(request.size(), DEFAULT_PAGE_SIZE);

        let request = PageRequest::new(Some(1), Some(MAX_PAGE_SIZE));
        assert_eq!(request.size(), MAX_PAGE_SIZE);
    }

    #[test]
    fn test_clamp_custom_bounds() {
        let bounds = PageBounds::new(10, 50).unwrap();
        assert_eq!(PageRequest::clamp(None, Some(51), bounds).size(), 10);
        assert_eq!(PageRequest::clamp(None, Some(50), bounds).size(), 50);
    }

    #[test]
    fn test_bounds_reject_zero_default() {
        let err = PageBounds::new(0, 10).unwrap_err();
        assert_eq!(err.field(), "defaultPageSize");
        assert!(PageBounds::new(-1, 10).is_err());
    }

    #[test]
    fn test_bounds_reject_default_above_max() {
        let err = PageBounds::new(20, 10).unwrap_err();
        assert_eq!(
            err,
            ValidationError::OutOfRange {
                field: "defaultPageSize".to_string(),
                min: 1,
                max: 10,
            }
        );
        assert_eq!(PageBounds::new(5, 0).unwrap_err().field(), "maxPageSize");
    }

    #[test]
    fn test_bounds_keep_every_page_within_ceiling() {
        let bounds = PageBounds::new(10, 10).unwrap();
        for size in [None, Some(0), Some(-3), Some(10), Some(11)] {
            let request = PageRequest::clamp(Some(0), size, bounds);
            assert!((1..=bounds.max_size()).contains(&request.size()));
            let page = PageResult::assemble(vec![1], request, 1);
            assert_eq!(page.total_pages(), 1);
        }
    }

    #[test]
    fn test_offset() {
        assert_eq!(PageRequest::new(Some(3), Some(5)).offset(), 15);
        assert_eq!(PageRequest::new(Some(i64::MAX), Some(5)).offset(), i64::MAX);
    }

    #[test]
    fn test_assemble_middle_page() {
        let page = PageResult::assemble(vec![6, 7, 8, 9, 10], PageRequest::new(Some(1), Some(5)), 14);
        assert_eq!(page.total_pages(), 3);
        assert_eq!(page.number_of_elements(), 5);
        assert!(page.has_next());
        assert!(page.has_previous());
        assert!(!page.is_first());
        assert!(!page.is_last());
    }

    #[test]
    fn test_assemble_past_the_end_keeps_totals() {
        let page: PageResult<i32> =
            PageResult::assemble(Vec::new(), PageRequest::new(Some(9), Some(5)), 14);
        assert!(page.is_empty());
        assert_eq!(page.total_elements(), 14);
        assert_eq!(page.total_pages(), 3);
        assert!(!page.has_next());
        assert!(page.has_previous());
    }

    #[test]
    fn test_assemble_empty_set() {
        let page: PageResult<i32> = PageResult::assemble(Vec::new(), PageRequest::default(), 0);
        assert_eq!(page.total_pages(), 0);
        assert!(page.is_first());
        assert!(page.is_last());
    }

    #[test]
    fn test_exact_multiple_of_size() {
        let page = PageResult::assemble(vec![1, 2, 3, 4], PageRequest::new(Some(0), Some(4)), 4);
        assert_eq!(page.total_pages(), 1);
        assert!(!page.has_next());
    }

    #[test]
    fn test_map_keeps_metadata() {
        let page = PageResult::assemble(vec![1, 2], PageRequest::new(Some(0), Some(2)), 5);
        let mapped = page.map(|n| n.to_string());
        assert_eq!(mapped.content().to_vec(), vec!["1".to_string(), "2".to_string()]);
        assert_eq!(mapped.total_pages(), 3);
    }

    #[test]
    fn test_serialized_shape() {
        let page = PageResult::assemble(vec![1], PageRequest::new(Some(0), Some(25)), 1);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["totalElements"], 1);
        assert_eq!(json["hasNext"], false);
        assert_eq!(json["numberOfElements"], 1);
    }
}
