//! Borrow endpoints

use serde_json::Value;

use crate::{
    error::ClientResult,
    http::HttpClient,
    models::borrow::{BookRef, BorrowQuery, MyBorrowsQuery},
};

#[derive(Clone, Debug)]
pub struct BorrowService {
    http: HttpClient,
}

impl BorrowService {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Borrow a book for the current user
    pub async fn borrow(&self, book_id: i64) -> ClientResult<Value> {
        self.http.post("/borrow", &BookRef { book_id }).await
    }

    /// Return a borrowed book by borrow record id
    pub async fn return_book(&self, record_id: i64) -> ClientResult<Value> {
        self.http.post_empty(&format!("/return/{}", record_id)).await
    }

    pub async fn my_borrows(&self, query: &MyBorrowsQuery) -> ClientResult<Value> {
        self.http.get_query("/borrows/my", &query.pairs()).await
    }

    /// All borrow records (admin)
    pub async fn all_borrows(&self, query: &BorrowQuery) -> ClientResult<Value> {
        self.http.get_query("/borrows", query).await
    }

    pub async fn renew(&self, record_id: i64) -> ClientResult<Value> {
        self.http
            .post_empty(&format!("/borrows/{}/renew", record_id))
            .await
    }

    /// Borrow statistics (admin)
    pub async fn stats(&self) -> ClientResult<Value> {
        self.http.get("/borrows/stats").await
    }
}
