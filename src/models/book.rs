//! Book catalog and review payloads

use chrono::NaiveDate;
use serde::Serialize;

/// Book search parameters for `GET /books`
#[derive(Debug, Clone, Default, Serialize)]
pub struct BookQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    /// Matches title, author or ISBN
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_publish_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_publish_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_only: Option<bool>,
}

/// Create or update book request (admin)
///
/// Unset fields are left out of the body, so an update only touches the
/// fields that are present.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BookInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_copies: Option<u32>,
}

/// New review for a book; rating is 1 to 5
#[derive(Debug, Clone, Serialize)]
pub struct NewReview {
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ReviewUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}
