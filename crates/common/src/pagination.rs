//! Page requests and paged result sets.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when pagination values violate their bounds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaginationError {
    /// Pages are 1-indexed.
    #[error("Invalid page: {0} (must be at least 1)")]
    InvalidPage(u64),

    /// A page request must ask for at least one item.
    #[error("Invalid page size: {0} (must be at least 1)")]
    InvalidPageSize(u64),

    /// The page starts beyond the largest addressable row offset.
    #[error("Page {page} with page size {page_size} is out of range")]
    OffsetOverflow { page: u64, page_size: u64 },
}

/// A request for one page of a result set.
///
/// Both `page` (1-indexed) and `page_size` must be at least 1, and the row
/// offset of the page must fit in a `u64`. The bounds are enforced on
/// construction and on deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPageRequest")]
pub struct PageRequest {
    page: u64,
    page_size: u64,
}

#[derive(Deserialize)]
struct RawPageRequest {
    page: u64,
    page_size: u64,
}

impl TryFrom<RawPageRequest> for PageRequest {
    type Error = PaginationError;

    fn try_from(raw: RawPageRequest) -> Result<Self, Self::Error> {
        Self::new(raw.page, raw.page_size)
    }
}

impl PageRequest {
    /// Creates a page request, rejecting a zero page or page size and pages
    /// whose offset would overflow.
    pub fn new(page: u64, page_size: u64) -> Result<Self, PaginationError> {
        if page < 1 {
            return Err(PaginationError::InvalidPage(page));
        }
        if page_size < 1 {
            return Err(PaginationError::InvalidPageSize(page_size));
        }
        if (page - 1).checked_mul(page_size).is_none() {
            return Err(PaginationError::OffsetOverflow { page, page_size });
        }
        Ok(Self { page, page_size })
    }

    /// The requested page number (1-indexed).
    pub fn page(&self) -> u64 {
        self.page
    }

    /// The number of items per page.
    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Number of rows to skip for a database query.
    pub fn offset(&self) -> u64 {
        // `new` guarantees the product fits.
        (self.page - 1).saturating_mul(self.page_size)
    }

    /// Maximum number of rows to fetch for a database query.
    pub fn limit(&self) -> u64 {
        self.page_size
    }
}

/// One page of items together with the metadata needed to navigate the rest.
///
/// `page` is 1-indexed on construction and on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPagedResult<T>")]
pub struct PagedResult<T> {
    items: Vec<T>,
    total_count: u64,
    page: u64,
    page_size: u64,
}

#[derive(Deserialize)]
struct RawPagedResult<T> {
    items: Vec<T>,
    total_count: u64,
    page: u64,
    page_size: u64,
}

impl<T> TryFrom<RawPagedResult<T>> for PagedResult<T> {
    type Error = PaginationError;

    fn try_from(raw: RawPagedResult<T>) -> Result<Self, Self::Error> {
        Self::new(raw.items, raw.total_count, raw.page, raw.page_size)
    }
}

impl<T> PagedResult<T> {
    /// Creates a paged result.
    ///
    /// `page_size` may be zero (an empty projection), but `page` is 1-indexed.
    pub fn new(
        items: Vec<T>,
        total_count: u64,
        page: u64,
        page_size: u64,
    ) -> Result<Self, PaginationError> {
        if page < 1 {
            return Err(PaginationError::InvalidPage(page));
        }
        Ok(Self {
            items,
            total_count,
            page,
            page_size,
        })
    }

    /// Creates a paged result for the page described by `request`.
    pub fn for_request(items: Vec<T>, total_count: u64, request: PageRequest) -> Self {
        Self {
            items,
            total_count,
            page: request.page(),
            page_size: request.page_size(),
        }
    }

    /// Returns the items on this page, in order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consumes the result and returns its items.
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Total number of pages, or 0 when there are no items or the page size is 0.
    pub fn total_pages(&self) -> u64 {
        if self.total_count == 0 || self.page_size == 0 {
            return 0;
        }
        self.total_count.div_ceil(self.page_size)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn next_page(&self) -> Option<u64> {
        self.has_next().then(|| self.page + 1)
    }

    pub fn previous_page(&self) -> Option<u64> {
        self.has_previous().then(|| self.page - 1)
    }

    /// Converts every item while keeping the page metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PagedResult<U> {
        PagedResult {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            page: self.page,
            page_size: self.page_size,
        }
    }
}
