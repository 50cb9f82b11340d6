//! Request and response types exchanged with the library backend
//!
//! Responses are left as raw JSON where the client only passes them through;
//! only the shapes the client itself reads (auth responses, users) are typed.

pub mod auth;
pub mod book;
pub mod borrow;
pub mod category;
pub mod notification;
pub mod user;

use serde::Serialize;

// Re-export commonly used types
pub use auth::{AuthResponse, Credentials, RegisterRequest};
pub use book::{BookInput, BookQuery, NewReview, ReviewUpdate};
pub use borrow::{BookRef, BorrowQuery, MyBorrowsQuery};
pub use category::CategoryInput;
pub use notification::{LogQuery, NotificationQuery};
pub use user::{ProfileUpdate, Role, User, UserInput, UserQuery};

/// Plain pagination parameters
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct PageQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

impl PageQuery {
    pub fn page(page: u32, per_page: u32) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
        }
    }
}

pub(crate) fn push_opt<T: ToString>(
    pairs: &mut Vec<(&'static str, String)>,
    key: &'static str,
    value: Option<T>,
) {
    if let Some(value) = value {
        pairs.push((key, value.to_string()));
    }
}
