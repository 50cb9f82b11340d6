//! Reservation endpoints

use serde_json::Value;

use crate::{
    error::ClientResult,
    http::HttpClient,
    models::{borrow::BookRef, PageQuery},
};

#[derive(Clone, Debug)]
pub struct ReservationService {
    http: HttpClient,
}

impl ReservationService {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Reserve a book that currently has no available copy
    pub async fn create(&self, book_id: i64) -> ClientResult<Value> {
        self.http.post("/reservations", &BookRef { book_id }).await
    }

    pub async fn cancel(&self, reservation_id: i64) -> ClientResult<Value> {
        self.http
            .delete(&format!("/reservations/{}", reservation_id))
            .await
    }

    pub async fn mine(&self, page: &PageQuery) -> ClientResult<Value> {
        self.http.get_query("/reservations/my", page).await
    }

    /// All reservations (admin)
    pub async fn all(&self, page: &PageQuery) -> ClientResult<Value> {
        self.http.get_query("/reservations", page).await
    }

    /// Mark a pending reservation as fulfilled (admin)
    pub async fn fulfill(&self, reservation_id: i64) -> ClientResult<Value> {
        self.http
            .post_empty(&format!("/reservations/{}/fulfill", reservation_id))
            .await
    }
}
