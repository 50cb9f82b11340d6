//! Session context: the authenticated user and bearer token
//!
//! A single [`Session`] is created at application start and shared through an
//! `Arc` with the router, the HTTP client and the auth store. It is the only
//! mutable state in the client. The token is mirrored to [`TokenStorage`]
//! under [`TOKEN_KEY`]; the user is kept in memory only.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::{
    error::ClientResult,
    models::User,
    storage::{TokenStorage, TOKEN_KEY},
};

/// Point-in-time view of the session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub user: Option<User>,
    pub token: Option<String>,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_admin)
    }
}

pub struct Session {
    state: RwLock<SessionState>,
    storage: Arc<dyn TokenStorage>,
}

impl Session {
    /// Empty session that ignores whatever the storage holds
    pub fn new(storage: Arc<dyn TokenStorage>) -> Self {
        Self {
            state: RwLock::new(SessionState::default()),
            storage,
        }
    }

    /// Session with the token restored from storage; the user stays unknown
    /// until fetched again
    pub fn restore(storage: Arc<dyn TokenStorage>) -> Self {
        let token = match storage.get(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!("Failed to read persisted token, starting anonymous: {}", e);
                None
            }
        };
        if token.is_some() {
            tracing::debug!("Restored persisted session token");
        }

        Self {
            state: RwLock::new(SessionState { user: None, token }),
            storage,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn snapshot(&self) -> SessionState {
        self.read().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.read().token.clone()
    }

    pub fn user(&self) -> Option<User> {
        self.read().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_authenticated()
    }

    pub fn is_admin(&self) -> bool {
        self.read().is_admin()
    }

    /// Persist the token, then enter the authenticated state
    ///
    /// The session is left untouched when the token cannot be stored.
    pub fn establish(&self, user: User, token: String) -> ClientResult<()> {
        self.storage.set(TOKEN_KEY, &token)?;

        tracing::info!(user_id = user.id, role = %user.role, "Session established");
        let mut state = self.write();
        state.user = Some(user);
        state.token = Some(token);
        Ok(())
    }

    /// Replace the user record, keeping the token
    pub fn set_user(&self, user: User) {
        self.write().user = Some(user);
    }

    /// Return to the anonymous state and remove the persisted token
    ///
    /// Memory is always cleared, even when removing the stored token fails.
    pub fn clear(&self) -> ClientResult<()> {
        {
            let mut state = self.write();
            if state.token.is_some() {
                tracing::info!("Session cleared");
            }
            *state = SessionState::default();
        }
        self.storage.remove(TOKEN_KEY)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.read();
        f.debug_struct("Session")
            .field("user", &state.user)
            .field("authenticated", &state.is_authenticated())
            .finish()
    }
}
