//! System log endpoints (admin)

use serde_json::Value;

use crate::{error::ClientResult, http::HttpClient, models::notification::LogQuery};

#[derive(Clone, Debug)]
pub struct LogService {
    http: HttpClient,
}

impl LogService {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Newest entries first, as returned by the server
    pub async fn list(&self, query: &LogQuery) -> ClientResult<Value> {
        self.http.get_query("/logs", query).await
    }

    pub async fn clear(&self) -> ClientResult<Value> {
        self.http.delete("/logs").await
    }
}
