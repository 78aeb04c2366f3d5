//! List-endpoint query parameters.
//!
//! DESIGN
//! ======
//! Parameters are an open JSON object rather than a fixed struct: every list
//! endpoint accepts `page`, `size`, `sortBy`, `sortDir` and `search`, but
//! also endpoint-specific filters (`type`, `userId`, `startDate`, ...).
//! Updates merge shallowly, key by key.

#[cfg(test)]
#[path = "query_test.rs"]
mod query_test;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const PAGE_KEY: &str = "page";
pub const SIZE_KEY: &str = "size";
pub const SORT_BY_KEY: &str = "sortBy";
pub const SORT_DIR_KEY: &str = "sortDir";
pub const SEARCH_KEY: &str = "search";

pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    Asc,
    Desc,
}

impl SortDir {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Shallow-mergeable parameter bag for list requests.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListParams(Map<String, Value>);

impl ListParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// First page at the given size.
    pub fn paged(page: u32, size: u32) -> Self {
        Self::new().with_page(page).with_size(size)
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    #[must_use]
    pub fn with_page(self, page: u32) -> Self {
        self.with(PAGE_KEY, page)
    }

    #[must_use]
    pub fn with_size(self, size: u32) -> Self {
        self.with(SIZE_KEY, size)
    }

    #[must_use]
    pub fn with_sort(self, by: impl Into<String>, dir: SortDir) -> Self {
        let by: String = by.into();
        self.with(SORT_BY_KEY, by).with(SORT_DIR_KEY, dir.as_str())
    }

    #[must_use]
    pub fn with_search(self, search: impl Into<String>) -> Self {
        let search: String = search.into();
        self.with(SEARCH_KEY, search)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn page(&self) -> Option<u32> {
        self.get_u32(PAGE_KEY)
    }

    pub fn size(&self) -> Option<u32> {
        self.get_u32(SIZE_KEY)
    }

    pub fn search(&self) -> Option<&str> {
        self.get(SEARCH_KEY).and_then(Value::as_str)
    }

    fn get_u32(&self, key: &str) -> Option<u32> {
        self.get(key)
            .and_then(|v| v.as_u64().or_else(|| v.as_str().and_then(|s| s.parse().ok())))
            .and_then(|n| u32::try_from(n).ok())
    }

    /// Overwrite keys present in `partial`, keeping all others.
    pub fn merge(&mut self, partial: &ListParams) {
        for (key, value) in &partial.0 {
            self.0.insert(key.clone(), value.clone());
        }
    }

    /// Return a copy of `self` with `partial` merged in.
    #[must_use]
    pub fn merged(&self, partial: &ListParams) -> Self {
        let mut next = self.clone();
        next.merge(partial);
        next
    }

    /// Key/value pairs for a query string. Nulls are skipped, arrays repeat
    /// their key, and keys come out in sorted order.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut keys: Vec<&String> = self.0.keys().collect();
        keys.sort();

        let mut pairs = Vec::new();
        for key in keys {
            let Some(value) = self.0.get(key) else {
                continue;
            };
            match value {
                Value::Array(items) => {
                    pairs.extend(items.iter().filter_map(scalar_text).map(|v| (key.clone(), v)));
                }
                other => {
                    if let Some(text) = scalar_text(other) {
                        pairs.push((key.clone(), text));
                    }
                }
            }
        }
        pairs
    }
}

impl From<Map<String, Value>> for ListParams {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}
