//! Library Management System client
//!
//! Client-side layer of the library web application: a session context, a
//! route table with its navigation guard, and REST wrappers for books, users,
//! borrows, reservations, categories, notifications and logs.

use std::sync::Arc;

pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod notify;
pub mod router;
pub mod services;
pub mod session;
pub mod storage;
pub mod store;

pub use config::AppConfig;
pub use error::{ClientError, ClientResult};

use http::HttpClient;
use notify::{Notifier, TracingNotifier};
use router::Router;
use services::Services;
use session::Session;
use storage::{FileStorage, TokenStorage};
use store::AuthStore;

/// Application context, created once at start and shared by every view
#[derive(Clone, Debug)]
pub struct App {
    pub config: Arc<AppConfig>,
    pub session: Arc<Session>,
    pub router: Arc<Router>,
    pub http: HttpClient,
    pub services: Arc<Services>,
    pub store: AuthStore,
}

impl App {
    /// Wire the client with explicit storage and notice sink
    pub fn new(
        config: AppConfig,
        storage: Arc<dyn TokenStorage>,
        notifier: Arc<dyn Notifier>,
    ) -> ClientResult<Self> {
        let session = Arc::new(Session::restore(storage));
        let router = Arc::new(Router::new(session.clone()));
        let http = HttpClient::new(&config.api, session.clone(), router.clone(), notifier)?;
        let services = Services::new(http.clone());
        let store = AuthStore::new(session.clone(), router.clone(), services.auth.clone());

        Ok(Self {
            config: Arc::new(config),
            session,
            router,
            http,
            services: Arc::new(services),
            store,
        })
    }

    /// File-backed storage from config, notices as tracing warnings
    pub fn from_config(config: AppConfig) -> ClientResult<Self> {
        let storage = Arc::new(FileStorage::new(config.storage.path.clone()));
        Self::new(config, storage, Arc::new(TracingNotifier))
    }
}
