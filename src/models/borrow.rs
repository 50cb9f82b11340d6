//! Borrow and reservation payloads

use serde::Serialize;

use super::push_opt;

/// Body naming a single book, used by borrow and reservation requests
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BookRef {
    pub book_id: i64,
}

/// Parameters for the current user's borrow history
#[derive(Debug, Clone, Default)]
pub struct MyBorrowsQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    /// `borrowed`, `returned`, `overdue`; repeated once per value
    pub status: Vec<String>,
}

impl MyBorrowsQuery {
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_opt(&mut pairs, "page", self.page);
        push_opt(&mut pairs, "per_page", self.per_page);
        for status in &self.status {
            pairs.push(("status", status.clone()));
        }
        pairs
    }
}

/// Parameters for the admin borrow listing
#[derive(Debug, Clone, Default, Serialize)]
pub struct BorrowQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}
