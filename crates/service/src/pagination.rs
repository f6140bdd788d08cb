//! Paging specification for category listings.
//!
//! Raw `{page, size}` values arrive straight from the request body and are
//! checked here before anything reaches the store.

use crate::errors::ServiceError;

/// Largest page the store is ever asked for.
pub const MAX_PAGE_SIZE: u64 = 1000;

/// A validated, zero-based page request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    size: u64,
}

impl PageRequest {
    /// Validate raw paging input.
    ///
    /// A missing page means the first page. `size` has no default: a missing,
    /// zero or negative size is rejected, as is a negative page.
    pub fn new(page: Option<i64>, size: Option<i64>) -> Result<Self, ServiceError> {
        let size = match size {
            None => return Err(ServiceError::invalid_argument("size", "is required")),
            Some(s) if s <= 0 => {
                return Err(ServiceError::invalid_argument("size", format!("must be greater than 0, got {}", s)))
            }
            Some(s) if s as u64 > MAX_PAGE_SIZE => {
                return Err(ServiceError::invalid_argument("size", format!("must be at most {}, got {}", MAX_PAGE_SIZE, s)))
            }
            Some(s) => s as u64,
        };
        let page = match page.unwrap_or(0) {
            p if p < 0 => {
                return Err(ServiceError::invalid_argument("page", format!("must be zero or greater, got {}", p)))
            }
            p => p as u64,
        };
        // Stores compute `page * size` as the row offset; it must fit a SQL bigint.
        match page.checked_mul(size) {
            Some(offset) if offset <= i64::MAX as u64 => {}
            _ => {
                return Err(ServiceError::invalid_argument(
                    "page",
                    format!("page {} with size {} is past any addressable row", page, size),
                ))
            }
        }
        Ok(Self { page, size })
    }

    /// Zero-based page index.
    pub fn page(&self) -> u64 { self.page }

    pub fn size(&self) -> u64 { self.size }

    pub fn offset(&self) -> u64 { self.page.saturating_mul(self.size) }

    pub fn total_pages(&self, total_elements: u64) -> u64 { total_elements.div_ceil(self.size) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected_field(page: Option<i64>, size: Option<i64>) -> &'static str {
        match PageRequest::new(page, size) {
            Err(ServiceError::InvalidArgument { field, .. }) => field,
            other => panic!("expected InvalidArgument, got {:?}", other),
        }
    }

    #[test]
    fn zero_negative_and_missing_size_are_rejected() {
        assert_eq!(rejected_field(Some(0), Some(0)), "size");
        assert_eq!(rejected_field(Some(0), Some(-5)), "size");
        assert_eq!(rejected_field(Some(0), None), "size");
    }

    #[test]
    fn oversized_page_is_rejected() {
        assert_eq!(rejected_field(Some(0), Some(MAX_PAGE_SIZE as i64 + 1)), "size");
        assert!(PageRequest::new(Some(0), Some(MAX_PAGE_SIZE as i64)).is_ok());
    }

    #[test]
    fn negative_page_is_rejected_and_missing_page_defaults_to_first() {
        assert_eq!(rejected_field(Some(-1), Some(10)), "page");
        let p = PageRequest::new(None, Some(10)).unwrap();
        assert_eq!(p.page(), 0);
        assert_eq!(p.size(), 10);
    }

    #[test]
    fn page_whose_offset_overflows_is_rejected() {
        assert_eq!(rejected_field(Some(i64::MAX), Some(10)), "page");
        assert_eq!(rejected_field(Some(18_446_744_073_709_552), Some(1000)), "page");
        // largest page that still addresses a valid offset
        let p = PageRequest::new(Some(i64::MAX / 1000), Some(1000)).unwrap();
        assert!(p.offset() <= i64::MAX as u64);
    }

    #[test]
    fn offset_and_total_pages() {
        let p = PageRequest::new(Some(2), Some(10)).unwrap();
        assert_eq!(p.offset(), 20);
        assert_eq!(p.total_pages(25), 3);
        assert_eq!(p.total_pages(30), 3);
        assert_eq!(p.total_pages(0), 0);
    }
}
