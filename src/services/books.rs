//! Book catalog and review endpoints

use serde_json::Value;

use crate::{
    error::ClientResult,
    http::HttpClient,
    models::{
        book::{BookInput, BookQuery, NewReview, ReviewUpdate},
        PageQuery,
    },
};

#[derive(Clone, Debug)]
pub struct BookService {
    http: HttpClient,
}

impl BookService {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// List books with optional filters and pagination
    pub async fn list(&self, query: &BookQuery) -> ClientResult<Value> {
        self.http.get_query("/books", query).await
    }

    pub async fn get(&self, id: i64) -> ClientResult<Value> {
        self.http.get(&format!("/books/{}", id)).await
    }

    pub async fn create(&self, book: &BookInput) -> ClientResult<Value> {
        self.http.post("/books", book).await
    }

    pub async fn update(&self, id: i64, book: &BookInput) -> ClientResult<Value> {
        self.http.put(&format!("/books/{}", id), book).await
    }

    pub async fn delete(&self, id: i64) -> ClientResult<Value> {
        self.http.delete(&format!("/books/{}", id)).await
    }

    /// Keyword search; the keyword overrides any `search` already in `query`
    pub async fn search(&self, keyword: &str, query: &BookQuery) -> ClientResult<Value> {
        let query = BookQuery {
            search: Some(keyword.to_string()),
            ..query.clone()
        };
        self.http.get_query("/books", &query).await
    }

    pub async fn reviews(&self, book_id: i64, page: &PageQuery) -> ClientResult<Value> {
        self.http
            .get_query(&format!("/books/{}/reviews", book_id), page)
            .await
    }

    pub async fn add_review(&self, book_id: i64, review: &NewReview) -> ClientResult<Value> {
        self.http
            .post(&format!("/books/{}/reviews", book_id), review)
            .await
    }

    pub async fn update_review(&self, review_id: i64, update: &ReviewUpdate) -> ClientResult<Value> {
        self.http
            .put(&format!("/reviews/{}", review_id), update)
            .await
    }

    pub async fn delete_review(&self, review_id: i64) -> ClientResult<Value> {
        self.http.delete(&format!("/reviews/{}", review_id)).await
    }

    /// Reviews written by the current user
    pub async fn my_reviews(&self, page: &PageQuery) -> ClientResult<Value> {
        self.http.get_query("/reviews/my", page).await
    }
}
