use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Query string of `GET /api/products`. Missing fields fall back to server
/// defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    #[serde(default)]
    pub search: String,
}

impl ListQuery {
    pub fn new(page: usize, limit: usize, search: impl Into<String>) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
            search: search.into(),
        }
    }

    /// Lowercased, trimmed search text; empty means "match all".
    pub fn needle(&self) -> String {
        self.search.trim().to_lowercase()
    }
}

/// One page of results plus total-count metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    pub total_pages: usize,
}

impl<T> PaginatedResponse<T> {
    /// Convert the page items, keeping the metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResponse<U> {
        PaginatedResponse {
            data: self.data.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages,
        }
    }

    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn is_first_page(&self) -> bool {
        self.page <= 1
    }
}

/// `ceil(total / limit)`; zero when there is nothing to show.
pub fn total_pages(total: usize, limit: usize) -> usize {
    if limit == 0 {
        0
    } else {
        total.div_ceil(limit)
    }
}

/// Slice an already-filtered result set into a 1-based page.
///
/// Pages past the end yield an empty `data` with the same `total`.
pub fn paginate<T: Clone>(items: &[T], page: usize, limit: usize) -> PaginatedResponse<T> {
    let page = page.max(1);
    let total = items.len();
    let start = (page - 1).saturating_mul(limit).min(total);
    let end = start.saturating_add(limit).min(total);
    PaginatedResponse {
        data: items[start..end].to_vec(),
        total,
        page,
        limit,
        total_pages: total_pages(total, limit),
    }
}
