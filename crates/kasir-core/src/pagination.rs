//! # Pagination
//!
//! Page/limit normalisation for list endpoints.
//!
//! ```text
//! ?page=&limit=        →  PageRequest { page: 1, limit: 10 }  →  LIMIT 10 OFFSET 0
//! ?page=3&limit=20     →  PageRequest { page: 3, limit: 20 }  →  LIMIT 20 OFFSET 40
//! ?page=0&limit=0      →  PageRequest { page: 1, limit: 10 }  →  LIMIT 10 OFFSET 0
//! ```
//!
//! A page past the end of the data yields an empty `data` list, not an error.

use serde::{Deserialize, Serialize};

/// Page used when the client sends none (or zero).
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when the client sends none (or zero).
pub const DEFAULT_LIMIT: i64 = 10;

/// A normalised page request. Both fields are always ≥ 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    limit: i64,
}

impl PageRequest {
    /// Builds a page request from raw query values.
    ///
    /// Missing, zero or negative values fall back to the defaults.
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        PageRequest {
            page: page.filter(|p| *p > 0).unwrap_or(DEFAULT_PAGE),
            limit: limit.filter(|l| *l > 0).unwrap_or(DEFAULT_LIMIT),
        }
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    /// Rows to skip before this page.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Wraps one page of rows in the list response envelope.
    pub fn wrap<T>(&self, data: Vec<T>) -> Page<T> {
        Page {
            page: self.page,
            limit: self.limit,
            data,
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        PageRequest::new(None, None)
    }
}

/// List response envelope: `{page, limit, data}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub page: i64,
    pub limit: i64,
    pub data: Vec<T>,
}
