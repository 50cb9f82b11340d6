//! REST service wrappers, one per backend resource
//!
//! Every method maps to exactly one request through the shared
//! [`HttpClient`](crate::http::HttpClient) and holds no state of its own.
//! Errors are surfaced to the user by the client; the services only pass
//! them on.

pub mod auth;
pub mod books;
pub mod borrows;
pub mod categories;
pub mod logs;
pub mod notifications;
pub mod reservations;
pub mod users;

use crate::http::HttpClient;

/// Container for all services
#[derive(Clone, Debug)]
pub struct Services {
    pub auth: auth::AuthService,
    pub books: books::BookService,
    pub borrows: borrows::BorrowService,
    pub categories: categories::CategoryService,
    pub logs: logs::LogService,
    pub notifications: notifications::NotificationService,
    pub reservations: reservations::ReservationService,
    pub users: users::UserService,
}

impl Services {
    /// Create all services on top of the given client
    pub fn new(http: HttpClient) -> Self {
        Self {
            auth: auth::AuthService::new(http.clone()),
            books: books::BookService::new(http.clone()),
            borrows: borrows::BorrowService::new(http.clone()),
            categories: categories::CategoryService::new(http.clone()),
            logs: logs::LogService::new(http.clone()),
            notifications: notifications::NotificationService::new(http.clone()),
            reservations: reservations::ReservationService::new(http.clone()),
            users: users::UserService::new(http),
        }
    }
}
