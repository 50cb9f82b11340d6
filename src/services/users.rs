//! User management endpoints

use serde_json::Value;

use crate::{
    error::ClientResult,
    http::HttpClient,
    models::user::{ProfileUpdate, UserInput, UserQuery},
};

#[derive(Clone, Debug)]
pub struct UserService {
    http: HttpClient,
}

impl UserService {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// List users (admin)
    pub async fn list(&self, query: &UserQuery) -> ClientResult<Value> {
        self.http.get_query("/users", &query.pairs()).await
    }

    pub async fn get(&self, id: i64) -> ClientResult<Value> {
        self.http.get(&format!("/users/{}", id)).await
    }

    pub async fn update(&self, id: i64, user: &UserInput) -> ClientResult<Value> {
        self.http.put(&format!("/users/{}", id), user).await
    }

    pub async fn delete(&self, id: i64) -> ClientResult<Value> {
        self.http.delete(&format!("/users/{}", id)).await
    }

    /// Create a user (admin)
    pub async fn create(&self, user: &UserInput) -> ClientResult<Value> {
        self.http.post("/users", user).await
    }

    /// Update the current user's own profile
    pub async fn update_profile(&self, profile: &ProfileUpdate) -> ClientResult<Value> {
        self.http.put("/auth/profile", profile).await
    }
}
