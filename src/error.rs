//! Error types for the library client

use thiserror::Error;

/// Notice shown when the server rejects the session token
pub const NOTICE_SESSION_EXPIRED: &str = "Session expired, please log in again";
/// Notice shown when the server refuses an operation for the current role
pub const NOTICE_PERMISSION_DENIED: &str = "Insufficient permission";
/// Notice shown for any failure without a usable server message
pub const NOTICE_NETWORK: &str = "Network error, please try again later";

/// Main client error type
#[derive(Error, Debug)]
pub enum ClientError {
    /// A route needs a token and none is present; see
    /// [`RedirectReason::error`](crate::router::RedirectReason::error)
    #[error("Authentication required")]
    AuthenticationRequired,

    /// A route needs the admin role
    #[error("Authorization denied")]
    AuthorizationDenied,

    /// The server answered 401
    #[error("Session expired")]
    SessionExpired,

    /// The server answered 403
    #[error("Permission denied")]
    PermissionDenied,

    /// The server answered with an `error` message in the body
    #[error("Server error ({status}): {message}")]
    ServerReported { status: u16, message: String },

    /// Non-success status without a usable `error` message
    #[error("Unexpected HTTP status {0}")]
    UnexpectedStatus(u16),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Request timed out")]
    Timeout,

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    Url(String),

    #[error("Redirect loop while navigating to {0}")]
    RedirectLoop(String),
}

impl ClientError {
    /// User-visible notice for this failure
    pub fn notice(&self) -> &str {
        match self {
            ClientError::SessionExpired | ClientError::AuthenticationRequired => {
                NOTICE_SESSION_EXPIRED
            }
            ClientError::PermissionDenied | ClientError::AuthorizationDenied => {
                NOTICE_PERMISSION_DENIED
            }
            ClientError::ServerReported { message, .. } => message.as_str(),
            _ => NOTICE_NETWORK,
        }
    }

    /// HTTP status of the failed response, when one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::SessionExpired => Some(401),
            ClientError::PermissionDenied => Some(403),
            ClientError::ServerReported { status, .. } => Some(*status),
            ClientError::UnexpectedStatus(status) => Some(*status),
            ClientError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;
