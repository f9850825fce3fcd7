//! Fixed-size pagination for listing endpoints.

use crate::error::AppError;
use serde::Serialize;

/// Rows per page for every listing.
pub const PAGE_SIZE: u32 = 10;

/// 1-based page number.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest(u32);

impl Default for PageRequest {
    fn default() -> Self {
        Self(1)
    }
}

impl PageRequest {
    pub fn new(page: u32) -> Result<Self, AppError> {
        if page == 0 {
            return Err(AppError::BadRequest("page numbers start at 1".into()));
        }
        Ok(Self(page))
    }

    /// Parse an optional path segment; absent means the first page.
    pub fn parse(segment: Option<&str>) -> Result<Self, AppError> {
        match segment {
            None => Ok(Self::default()),
            Some(s) => {
                let n: u32 = s
                    .trim()
                    .parse()
                    .map_err(|_| AppError::BadRequest(format!("invalid page '{}'", s)))?;
                Self::new(n)
            }
        }
    }

    pub fn limit(self) -> i64 {
        i64::from(PAGE_SIZE)
    }

    pub fn offset(self) -> i64 {
        i64::from(self.0 - 1) * i64::from(PAGE_SIZE)
    }
}

/// One page of a listing plus totals over every matching row.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub list: Vec<T>,
    pub total: i64,
    pub pages: i64,
}

impl<T> Page<T> {
    pub fn new(list: Vec<T>, total: i64) -> Self {
        Self {
            list,
            total,
            pages: page_count(total),
        }
    }
}

pub fn page_count(total: i64) -> i64 {
    let size = i64::from(PAGE_SIZE);
    (total.max(0) + size - 1) / size
}
