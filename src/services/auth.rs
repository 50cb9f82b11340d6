//! Authentication endpoints

use serde_json::Value;

use crate::{
    error::ClientResult,
    http::HttpClient,
    models::auth::{AuthResponse, Credentials, RegisterRequest},
};

#[derive(Clone, Debug)]
pub struct AuthService {
    http: HttpClient,
}

impl AuthService {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Exchange credentials for a user record and token
    pub async fn login(&self, credentials: &Credentials) -> ClientResult<AuthResponse> {
        self.http.post("/auth/login", credentials).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<AuthResponse> {
        self.http.post("/auth/register", request).await
    }

    /// Current user as seen by the server
    pub async fn current_user(&self) -> ClientResult<Value> {
        self.http.get("/auth/me").await
    }

    pub async fn refresh_token(&self) -> ClientResult<Value> {
        self.http.post_empty("/auth/refresh").await
    }
}
