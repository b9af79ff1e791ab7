//! Offset pagination shared by every list endpoint.
//!
//! `page` and `limit` default to 1 and 10; `offset = (page - 1) * limit`.
//! Results are always ordered by primary key so a window is deterministic.

use serde::Deserialize;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageArgs {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PageArgs {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).max(1)
    }

    pub fn offset(&self) -> i64 {
        let page = self.page.unwrap_or(DEFAULT_PAGE).max(1);
        (page - 1) * self.limit()
    }
}
