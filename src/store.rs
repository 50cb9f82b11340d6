//! Auth store: session transitions driven by the auth endpoints
//!
//! ```text
//! Anonymous --login/register ok--> Authenticated --logout | 401--> Anonymous
//! ```
//!
//! The 401 transition is taken by the HTTP client; everything else happens
//! here.

use std::sync::Arc;

use crate::{
    error::ClientResult,
    models::{
        auth::{AuthResponse, Credentials, RegisterRequest},
        User,
    },
    router::{Router, LOGIN_PATH},
    services::auth::AuthService,
    session::Session,
};

#[derive(Clone, Debug)]
pub struct AuthStore {
    session: Arc<Session>,
    router: Arc<Router>,
    auth: AuthService,
}

impl AuthStore {
    pub fn new(session: Arc<Session>, router: Arc<Router>, auth: AuthService) -> Self {
        Self {
            session,
            router,
            auth,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn is_admin(&self) -> bool {
        self.session.is_admin()
    }

    pub fn user(&self) -> Option<User> {
        self.session.user()
    }

    /// Log in and persist the returned token; failures are returned unchanged
    pub async fn login(&self, credentials: &Credentials) -> ClientResult<AuthResponse> {
        let response = self.auth.login(credentials).await?;
        self.session
            .establish(response.user.clone(), response.token.clone())?;
        Ok(response)
    }

    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<AuthResponse> {
        let response = self.auth.register(request).await?;
        self.session
            .establish(response.user.clone(), response.token.clone())?;
        Ok(response)
    }

    /// End the session locally and go to the login page. No server call.
    pub fn logout(&self) -> ClientResult<()> {
        let cleared = self.session.clear();
        self.router.push(LOGIN_PATH)?;
        cleared
    }

    /// Whether a token is present
    ///
    /// The token is not validated against the server: a stale token passes
    /// here and in the router guard, and is only rejected by the first request
    /// that answers 401.
    pub fn check_auth(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Reload the user record for a restored token
    pub async fn fetch_current_user(&self) -> ClientResult<User> {
        let body = self.auth.current_user().await?;
        // Either `{"user": {...}}` or a bare record
        let record = body.get("user").cloned().unwrap_or(body);
        let user: User = serde_json::from_value(record)?;
        self.session.set_user(user.clone());
        Ok(user)
    }
}
