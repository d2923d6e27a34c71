use crate::errors::ApiError;
use serde::{Deserialize, Serialize};
use url::Url;

pub const DEFAULT_FROM: u32 = 0;
pub const DEFAULT_SIZE: u32 = 25;

#[derive(Debug, Default, Deserialize)]
pub struct PaginationQuery {
    pub from: Option<String>,
    pub size: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
pub struct Pagination {
    pub from: u32,
    pub size: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            from: DEFAULT_FROM,
            size: DEFAULT_SIZE,
        }
    }
}

impl Pagination {
    pub fn from_query(query: PaginationQuery) -> Result<Self, ApiError> {
        let from = get_from_param(query.from).map_err(|e| ApiError::custom_400(e.to_string()))?;
        let size = get_size_param(query.size).map_err(|e| ApiError::custom_400(e.to_string()))?;

        Ok(Pagination { from, size })
    }

    /// Applies the window to an in-memory slice.
    pub fn window<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = (self.from as usize).min(items.len());
        let end = start.saturating_add(self.size as usize).min(items.len());

        &items[start..end]
    }
}

pub trait ApplyPagination {
    fn apply_pagination(&mut self, pagination: &Pagination);
}

impl ApplyPagination for Url {
    fn apply_pagination(&mut self, pagination: &Pagination) {
        self.query_pairs_mut()
            .append_pair("from", &pagination.from.to_string())
            .append_pair("size", &pagination.size.to_string());
    }
}

/// Optional minus sign followed by ASCII digits, nothing else.
fn parse_integer(value: &str) -> Option<i64> {
    let digits = value.strip_prefix('-').unwrap_or(value);

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    value.parse().ok()
}

pub fn get_from_param(param: Option<String>) -> Result<u32, &'static str> {
    let Some(from) = param else {
        return Ok(DEFAULT_FROM);
    };

    let from = parse_integer(&from).ok_or("querystring/from must be integer")?;

    if from < 0 {
        return Err("querystring/from must be >= 0");
    }

    from.try_into()
        .map_err(|_| "querystring/from must be integer")
}

// Page size has no maximum.
pub fn get_size_param(param: Option<String>) -> Result<u32, &'static str> {
    let Some(size) = param else {
        return Ok(DEFAULT_SIZE);
    };

    let size = parse_integer(&size).ok_or("querystring/size must be integer")?;

    if size < 1 {
        return Err("querystring/size must be >= 1");
    }

    size.try_into()
        .map_err(|_| "querystring/size must be integer")
}
