//! Notification endpoints

use serde_json::Value;

use crate::{error::ClientResult, http::HttpClient, models::notification::NotificationQuery};

#[derive(Clone, Debug)]
pub struct NotificationService {
    http: HttpClient,
}

impl NotificationService {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub async fn list(&self, query: &NotificationQuery) -> ClientResult<Value> {
        self.http.get_query("/notifications", query).await
    }

    pub async fn mark_read(&self, notification_id: i64) -> ClientResult<Value> {
        self.http
            .put_empty(&format!("/notifications/{}/read", notification_id))
            .await
    }

    pub async fn mark_all_read(&self) -> ClientResult<Value> {
        self.http.put_empty("/notifications/read-all").await
    }

    pub async fn delete(&self, notification_id: i64) -> ClientResult<Value> {
        self.http
            .delete(&format!("/notifications/{}", notification_id))
            .await
    }
}
