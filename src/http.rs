//! Shared HTTP pipeline for every backend call
//!
//! Requests carry `Authorization: Bearer <token>` whenever the session holds a
//! token. Successful responses are decoded straight from the body. Failures
//! are classified, surfaced once through the [`Notifier`] and then returned to
//! the caller, so views can still react locally. A 401 also ends the session
//! and navigates to the login page.

use std::{sync::Arc, time::Duration};

use reqwest::{header::AUTHORIZATION, Method, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::{
    config::ApiConfig,
    error::{ClientError, ClientResult},
    notify::Notifier,
    router::{Router, LOGIN_PATH},
    session::Session,
};

#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
    session: Arc<Session>,
    router: Arc<Router>,
    notifier: Arc<dyn Notifier>,
}

impl HttpClient {
    pub fn new(
        config: &ApiConfig,
        session: Arc<Session>,
        router: Arc<Router>,
        notifier: Arc<dyn Notifier>,
    ) -> ClientResult<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        reqwest::Url::parse(&base_url).map_err(|e| ClientError::Url(format!("{}: {}", base_url, e)))?;

        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            client,
            base_url,
            timeout: config.timeout(),
            session,
            router,
            notifier,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Same pipeline with a different per-request timeout
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        Self {
            timeout,
            ..self.clone()
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.dispatch(Method::GET, path, |b| b).await
    }

    pub async fn get_query<T, Q>(&self, path: &str, query: &Q) -> ClientResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.dispatch(Method::GET, path, |b| b.query(query)).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.dispatch(Method::POST, path, |b| b.json(body)).await
    }

    /// POST without a request body
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.dispatch(Method::POST, path, |b| b).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.dispatch(Method::PUT, path, |b| b.json(body)).await
    }

    /// PUT without a request body
    pub async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.dispatch(Method::PUT, path, |b| b).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.dispatch(Method::DELETE, path, |b| b).await
    }

    fn builder(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.client.request(method, url).timeout(self.timeout);

        match self.session.token().filter(|t| !t.is_empty()) {
            Some(token) => builder.header(AUTHORIZATION, format!("Bearer {}", token)),
            None => builder,
        }
    }

    async fn dispatch<T, F>(&self, method: Method, path: &str, build: F) -> ClientResult<T>
    where
        T: DeserializeOwned,
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        tracing::debug!(%method, path, "API request");
        let builder = build(self.builder(method.clone(), path));

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => return Err(self.fail(&method, path, transport_error(e))),
        };

        let status = response.status();
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => return Err(self.fail(&method, path, transport_error(e))),
        };
        tracing::debug!(%method, path, status = status.as_u16(), "API response");

        if !status.is_success() {
            return Err(self.fail(&method, path, classify(status.as_u16(), &body)));
        }

        decode(&body).map_err(|e| self.fail(&method, path, e))
    }

    /// Surface a failure to the user and hand it back for propagation
    fn fail(&self, method: &Method, path: &str, err: ClientError) -> ClientError {
        tracing::warn!(%method, path, "API error: {}", err);

        if matches!(err, ClientError::SessionExpired) {
            if let Err(e) = self.session.clear() {
                tracing::warn!("Failed to remove persisted token: {}", e);
            }
            if let Err(e) = self.router.push(LOGIN_PATH) {
                tracing::warn!("Failed to navigate to login: {}", e);
            }
        }

        self.notifier.error(err.notice());
        err
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn transport_error(e: reqwest::Error) -> ClientError {
    if e.is_timeout() {
        ClientError::Timeout
    } else {
        ClientError::Network(e)
    }
}

/// Map a non-success response to an error
///
/// 401 and 403 win over any message in the body; otherwise a truthy `error`
/// field is reported, strings as-is and other values as JSON text.
pub fn classify(status: u16, body: &[u8]) -> ClientError {
    match status {
        401 => ClientError::SessionExpired,
        403 => ClientError::PermissionDenied,
        _ => {
            let message = serde_json::from_slice::<Value>(body)
                .ok()
                .and_then(|v| v.get("error").and_then(error_message));

            match message {
                Some(message) => ClientError::ServerReported { status, message },
                None => ClientError::UnexpectedStatus(status),
            }
        }
    }
}

fn error_message(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(message) if message.is_empty() => None,
        Value::String(message) => Some(message.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

/// Decode a success body; an empty body reads as JSON `null`
fn decode<T: DeserializeOwned>(body: &[u8]) -> ClientResult<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::from_value(Value::Null)?);
    }
    Ok(serde_json::from_slice(body)?)
}
