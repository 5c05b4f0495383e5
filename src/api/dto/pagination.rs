//! Pagination and filtering query parameters.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

/// Default number of items per page.
pub const DEFAULT_PAGE_SIZE: u32 = 25;

/// Largest accepted page size.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Pagination query parameters.
///
/// Uses `serde_with` to parse page numbers from query strings as integers,
/// which also works when the struct is flattened into another one.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<u32>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page_size: Option<u32>,
}

impl PaginationParams {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1)
    }

    pub fn page_size(&self) -> u32 {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// Validates pagination parameters and converts to database offset/limit.
    ///
    /// Page must be > 0 and page size between 1 and [`MAX_PAGE_SIZE`].
    pub fn validate_and_get_offset_limit(&self) -> Result<(i64, i64), String> {
        let page = self.page();
        let page_size = self.page_size();

        if page == 0 {
            return Err("Page must be greater than 0".to_string());
        }

        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(format!("Page size must be between 1 and {MAX_PAGE_SIZE}"));
        }

        let offset = (page as i64 - 1) * page_size as i64;

        Ok((offset, page_size as i64))
    }
}

/// Query parameters shared by the list endpoints.
///
/// `search` is a case-insensitive substring match on the URL. `mine` is only
/// honored by `GET /api/domains`.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct ListQueryParams {
    #[serde(flatten)]
    pub pagination: PaginationParams,

    #[serde(default)]
    pub search: Option<String>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub mine: Option<bool>,
}

/// Pagination metadata for responses.
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    pub page: u32,
    pub page_size: u32,
    pub total_items: i64,
    pub total_pages: u32,
}

impl PaginationMeta {
    pub fn new(params: &PaginationParams, total_items: i64) -> Self {
        let page_size = params.page_size();
        let total_pages = ((total_items.max(0) as f64) / (page_size as f64)).ceil() as u32;

        Self {
            page: params.page(),
            page_size,
            total_items,
            total_pages,
        }
    }
}

/// Paginated list response.
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub pagination: PaginationMeta,
    pub items: Vec<T>,
}
