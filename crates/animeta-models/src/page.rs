use serde::{Deserialize, Serialize};

/// One page of a paginated result set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    pub records: Vec<T>,
    #[serde(rename = "currentPage")]
    pub current_page: u32,
    #[serde(rename = "lastPage")]
    pub last_page: u32,
}

impl<T> Page<T> {
    pub fn new(records: Vec<T>, current_page: u32, last_page: u32) -> Self {
        Self { records, current_page, last_page }
    }

    /// A page with no records, positioned so callers see no further pages.
    pub fn empty(page: u32) -> Self {
        Self { records: Vec::new(), current_page: page, last_page: page }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
