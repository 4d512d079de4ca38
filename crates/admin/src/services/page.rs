//! Pagination normalization for list endpoints.
//!
//! The backend nests lists as `{ <resource>: [...], pagination: {...} }`,
//! but some endpoints answer with a bare array and some omit `pagination`.
//! Callers always get a [`Page`]; a missing `pagination` becomes a single
//! page holding every returned item, and a partial one is completed the
//! same way field by field.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;

/// Position within a paginated list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default = "first_page", alias = "pages")]
    pub total_pages: u32,
    #[serde(default = "first_page", alias = "page")]
    pub current_page: u32,
    #[serde(default)]
    pub total: u64,
}

const fn first_page() -> u32 {
    1
}

/// Pagination as the backend sends it. Any field may be missing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PartialPagination {
    #[serde(default, alias = "pages")]
    total_pages: Option<u32>,
    #[serde(default, alias = "page")]
    current_page: Option<u32>,
    #[serde(default)]
    total: Option<u64>,
}

impl PartialPagination {
    /// Fill the gaps from the page that was actually returned.
    fn complete(self, item_count: usize) -> Pagination {
        Pagination {
            total_pages: self.total_pages.unwrap_or(1),
            current_page: self.current_page.unwrap_or(1),
            total: self.total.unwrap_or(item_count as u64),
        }
    }
}

impl Pagination {
    /// Everything on a single page.
    #[must_use]
    pub const fn single_page(total: u64) -> Self {
        Self {
            total_pages: 1,
            current_page: 1,
            total,
        }
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Page<T> {
    /// A page whose pagination is derived from the items alone.
    #[must_use]
    pub fn from_items(items: Vec<T>) -> Self {
        let pagination = Pagination::single_page(items.len() as u64);
        Self { items, pagination }
    }
}

/// Normalize the `data` of a list response.
///
/// `key` names the array inside an object payload (`products`, `orders`,
/// ...); `items` is accepted as well.
pub(crate) fn into_page<T: DeserializeOwned>(data: Value, key: &str) -> Result<Page<T>, ApiError> {
    let (items, pagination) = match data {
        Value::Array(items) => (Value::Array(items), None),
        Value::Object(mut map) => {
            let items = map
                .remove(key)
                .or_else(|| map.remove("items"))
                .unwrap_or(Value::Null);
            (items, map.remove("pagination"))
        }
        _ => (Value::Null, None),
    };

    let items: Vec<T> = match items {
        Value::Null => Vec::new(),
        items => serde_json::from_value(items)?,
    };

    let partial = match pagination {
        Some(Value::Null) | None => PartialPagination::default(),
        Some(pagination) => serde_json::from_value(pagination)?,
    };
    let pagination = partial.complete(items.len());
    Ok(Page { items, pagination })
}
