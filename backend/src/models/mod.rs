//! Data models shared across database access and API handlers.

use serde::Serialize;
use utoipa::ToSchema;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Normalized page selection for list endpoints.
///
/// Raw query values that are absent, non-numeric or below 1 fall back to
/// `page = 1` and `page_size = 10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub page_size: i64,
}

impl Pagination {
    pub fn from_raw(page: Option<&str>, page_size: Option<&str>) -> Self {
        Self {
            page: parse_positive(page).unwrap_or(DEFAULT_PAGE),
            page_size: parse_positive(page_size).unwrap_or(DEFAULT_PAGE_SIZE),
        }
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

fn parse_positive(raw: Option<&str>) -> Option<i64> {
    let value = raw?.trim().parse::<i64>().ok()?;
    if value < 1 {
        tracing::warn!(value, "pagination value below 1, using default");
        return None;
    }
    Some(value)
}

/// Wrapper for paginated API responses.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginatedResponse<T: Serialize> {
    /// The data items for the current page.
    pub data: Vec<T>,
    /// Total number of records matching the filters.
    pub total: i64,
    /// 1-based page number.
    pub page: i64,
    /// Maximum number of records per page.
    pub page_size: i64,
}

impl<T: Serialize> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, total: i64, pagination: Pagination) -> Self {
        Self {
            data,
            total,
            page: pagination.page,
            page_size: pagination.page_size,
        }
    }
}

pub mod effort;
pub mod task;
pub mod user;
