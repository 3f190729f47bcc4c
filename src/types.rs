/// Shared types used across the codebase

use serde::{Deserialize, Deserializer, Serialize};

/// One page of a collection endpoint, as carried in the envelope's `data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    #[serde(default = "Vec::new", deserialize_with = "null_as_empty")]
    pub list: Vec<T>,
    #[serde(default)]
    pub total: i64,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

/// Go encodes nil slices as `null`; treat that as an empty list.
pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Paging part of every collection query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub page: u32,
    pub page_size: u32,
}

impl PageQuery {
    pub const MAX_PAGE_SIZE: u32 = 100;

    /// Clamp to what the backend accepts (`page >= 1`, `1 <= pageSize <= 100`).
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.clamp(1, Self::MAX_PAGE_SIZE),
        }
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        Self { page: 1, page_size: 10 }
    }
}
