//! The uniform envelope returned by listing tools

use openhexa_mcp_client::model::Page;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::errors::ToolError;

/// Pagination details echoed back alongside a listing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pagination {
    pub current_page: u32,
    pub per_page: u32,
    pub total_pages: Option<u32>,
    pub total_items: Option<u32>,
}

impl Pagination {
    pub fn new(current_page: u32, per_page: u32) -> Self {
        Self {
            current_page,
            per_page,
            total_pages: None,
            total_items: None,
        }
    }

    pub fn with_total_pages<T>(mut self, page: &Page<T>) -> Self {
        self.total_pages = Some(page.total_pages.unwrap_or(0));
        self
    }

    pub fn with_total_items<T>(mut self, page: &Page<T>) -> Self {
        self.total_items = Some(page.total_items.unwrap_or(0));
        self
    }
}

/// A list of resources under a resource-named key, e.g. `{"workspaces": [...], "count": 3}`.
///
/// `count` is always the length of the serialized list.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing<T> {
    key: &'static str,
    pub items: Vec<T>,
    pub pagination: Option<Pagination>,
}

impl<T> Listing<T> {
    pub fn new(key: &'static str, items: Vec<T>) -> Self {
        Self {
            key,
            items,
            pagination: None,
        }
    }

    pub fn paginated(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }
}

impl<T: Serialize> Serialize for Listing<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry(self.key, &self.items)?;
        if let Some(pagination) = &self.pagination {
            if let Some(total_pages) = pagination.total_pages {
                map.serialize_entry("total_pages", &total_pages)?;
            }
            if let Some(total_items) = pagination.total_items {
                map.serialize_entry("total_items", &total_items)?;
            }
            map.serialize_entry("current_page", &pagination.current_page)?;
            map.serialize_entry("per_page", &pagination.per_page)?;
        }
        map.serialize_entry("count", &self.count())?;
        map.end()
    }
}

/// Reject paging arguments the remote API cannot honour
pub fn check_paging(page: u32, per_page: u32) -> Result<(), ToolError> {
    if page < 1 {
        return Err(ToolError::InvalidInput(
            "page must be greater than or equal to 1".to_string(),
        ));
    }
    if per_page < 1 {
        return Err(ToolError::InvalidInput(
            "per_page must be greater than 0".to_string(),
        ));
    }
    Ok(())
}

pub(crate) fn default_page() -> u32 {
    1
}

pub(crate) fn default_per_page() -> u32 {
    10
}

pub(crate) fn default_search_per_page() -> u32 {
    20
}
