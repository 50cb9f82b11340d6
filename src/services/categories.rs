//! Category endpoints

use serde_json::Value;

use crate::{
    error::ClientResult,
    http::HttpClient,
    models::{category::CategoryInput, PageQuery},
};

#[derive(Clone, Debug)]
pub struct CategoryService {
    http: HttpClient,
}

impl CategoryService {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub async fn list(&self, page: &PageQuery) -> ClientResult<Value> {
        self.http.get_query("/categories", page).await
    }

    pub async fn get(&self, id: i64) -> ClientResult<Value> {
        self.http.get(&format!("/categories/{}", id)).await
    }

    pub async fn create(&self, category: &CategoryInput) -> ClientResult<Value> {
        self.http.post("/categories", category).await
    }

    pub async fn update(&self, id: i64, category: &CategoryInput) -> ClientResult<Value> {
        self.http.put(&format!("/categories/{}", id), category).await
    }

    pub async fn delete(&self, id: i64) -> ClientResult<Value> {
        self.http.delete(&format!("/categories/{}", id)).await
    }
}
