//! Pagination

/// Largest page size any listing will return.
pub const MAX_PAGE_SIZE: i64 = 100;

/// A normalised page request; `page` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
}

impl Pagination {
    /// Clamp `limit` into `1..=100` (missing means `default_limit`) and `page` to at least 1.
    #[must_use]
    pub fn clamped(page: Option<i64>, limit: Option<i64>, default_limit: i64) -> Self {
        Self {
            page: normalise_page(page),
            limit: limit.unwrap_or(default_limit).clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Like [`Pagination::clamped`], but an out-of-range `limit` falls back to
    /// `default_limit` instead of being pinned to the nearest bound.
    #[must_use]
    pub fn or_default(page: Option<i64>, limit: Option<i64>, default_limit: i64) -> Self {
        let limit = limit
            .filter(|limit| (1..=MAX_PAGE_SIZE).contains(limit))
            .unwrap_or(default_limit);

        Self {
            page: normalise_page(page),
            limit,
        }
    }

    #[must_use]
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

fn normalise_page(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}

/// One page of results plus the total number of matching rows.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub pagination: Pagination,
}
