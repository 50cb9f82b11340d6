//! Route table and navigation guard
//!
//! Paths map to named views. Child routes inherit the meta flags of their
//! parents, and a few routes redirect statically to a default child. Every
//! navigation through [`Router::push`] runs [`guard`] against the current
//! session before it is committed; a guard redirect starts a fresh navigation.

use std::sync::{Arc, RwLock};

use crate::{
    error::{ClientError, ClientResult},
    session::{Session, SessionState},
};

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";
pub const UNAUTHORIZED_PATH: &str = "/unauthorized";

/// Upper bound on redirects followed by a single navigation
const MAX_REDIRECTS: usize = 10;

/// Static per-route access flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteMeta {
    pub requires_auth: bool,
    pub requires_admin: bool,
    pub requires_guest: bool,
}

impl RouteMeta {
    pub const NONE: RouteMeta = RouteMeta {
        requires_auth: false,
        requires_admin: false,
        requires_guest: false,
    };
    const AUTH: RouteMeta = RouteMeta {
        requires_auth: true,
        ..RouteMeta::NONE
    };
    const ADMIN: RouteMeta = RouteMeta {
        requires_auth: true,
        requires_admin: true,
        ..RouteMeta::NONE
    };
    const GUEST: RouteMeta = RouteMeta {
        requires_guest: true,
        ..RouteMeta::NONE
    };

    /// Flags of a child route nested under `self`
    fn inherit(self, child: RouteMeta) -> RouteMeta {
        RouteMeta {
            requires_auth: self.requires_auth || child.requires_auth,
            requires_admin: self.requires_admin || child.requires_admin,
            requires_guest: self.requires_guest || child.requires_guest,
        }
    }
}

/// One entry of the route table
#[derive(Debug)]
pub struct RouteRecord {
    /// Absolute for top-level routes, relative to the parent for children
    pub path: &'static str,
    pub name: &'static str,
    pub meta: RouteMeta,
    pub redirect: Option<&'static str>,
    pub children: &'static [RouteRecord],
}

const fn leaf(path: &'static str, name: &'static str) -> RouteRecord {
    RouteRecord {
        path,
        name,
        meta: RouteMeta::NONE,
        redirect: None,
        children: &[],
    }
}

pub const NOT_FOUND: &str = "NotFound";

pub static ROUTES: &[RouteRecord] = &[
    RouteRecord {
        path: "/",
        name: "Home",
        meta: RouteMeta::AUTH,
        redirect: Some("/books"),
        children: &[
            leaf("books", "Books"),
            leaf("my-books", "MyBooks"),
            leaf("profile", "Profile"),
        ],
    },
    RouteRecord {
        meta: RouteMeta::GUEST,
        ..leaf("/login", "Login")
    },
    RouteRecord {
        meta: RouteMeta::GUEST,
        ..leaf("/register", "Register")
    },
    RouteRecord {
        path: "/admin",
        name: "Admin",
        meta: RouteMeta::ADMIN,
        redirect: Some("/admin/dashboard"),
        children: &[
            leaf("dashboard", "AdminDashboard"),
            leaf("users", "UserManagement"),
            leaf("books", "BookManagement"),
            leaf("categories", "CategoryManagement"),
            leaf("borrows", "BorrowManagement"),
            leaf("statistics", "Statistics"),
        ],
    },
];

/// A path matched against the route table, redirects applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    pub name: &'static str,
    pub path: String,
    pub meta: RouteMeta,
}

/// Why the guard turned a navigation away
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectReason {
    AuthenticationRequired,
    AuthorizationDenied,
    GuestOnly,
}

impl RedirectReason {
    /// Error describing a denied navigation; guest-only redirects deny nothing
    pub fn error(self) -> Option<ClientError> {
        match self {
            RedirectReason::AuthenticationRequired => Some(ClientError::AuthenticationRequired),
            RedirectReason::AuthorizationDenied => Some(ClientError::AuthorizationDenied),
            RedirectReason::GuestOnly => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDecision {
    Allow,
    Redirect {
        to: &'static str,
        reason: RedirectReason,
    },
}

/// Decide whether a navigation to a route with `meta` may complete
///
/// Checks run in order: authentication, then admin role, then guest-only.
/// The admin check is therefore never reached without a token.
pub fn guard(meta: &RouteMeta, session: &SessionState) -> NavigationDecision {
    if meta.requires_auth && !session.is_authenticated() {
        return NavigationDecision::Redirect {
            to: LOGIN_PATH,
            reason: RedirectReason::AuthenticationRequired,
        };
    }

    if meta.requires_admin && !session.is_admin() {
        return NavigationDecision::Redirect {
            to: UNAUTHORIZED_PATH,
            reason: RedirectReason::AuthorizationDenied,
        };
    }

    if meta.requires_guest && session.is_authenticated() {
        return NavigationDecision::Redirect {
            to: HOME_PATH,
            reason: RedirectReason::GuestOnly,
        };
    }

    NavigationDecision::Allow
}

/// Strip query and fragment, force a leading slash, drop a trailing one
fn normalize(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_matches('/');
    format!("/{}", trimmed)
}

fn join(parent: &str, child: &str) -> String {
    if parent.ends_with('/') {
        format!("{}{}", parent, child)
    } else {
        format!("{}/{}", parent, child)
    }
}

fn find<'a>(
    records: &'a [RouteRecord],
    base: Option<&str>,
    inherited: RouteMeta,
    path: &str,
) -> Option<(&'a RouteRecord, RouteMeta)> {
    for record in records {
        let full = match base {
            Some(base) => join(base, record.path),
            None => record.path.to_string(),
        };
        let meta = inherited.inherit(record.meta);

        if full.eq_ignore_ascii_case(path) {
            return Some((record, meta));
        }
        if let Some(found) = find(record.children, Some(&full), meta, path) {
            return Some(found);
        }
    }
    None
}

/// Match `path` against the route table, following static redirects
///
/// Unknown paths resolve to the catch-all [`NOT_FOUND`] route, which has no
/// access flags.
pub fn resolve(path: &str) -> ClientResult<ResolvedRoute> {
    let mut target = normalize(path);

    for _ in 0..MAX_REDIRECTS {
        match find(ROUTES, None, RouteMeta::NONE, &target) {
            Some((record, _)) if record.redirect.is_some() => {
                target = record.redirect.map(normalize).unwrap_or_default();
            }
            Some((record, meta)) => {
                return Ok(ResolvedRoute {
                    name: record.name,
                    path: target,
                    meta,
                })
            }
            None => {
                return Ok(ResolvedRoute {
                    name: NOT_FOUND,
                    path: target,
                    meta: RouteMeta::NONE,
                })
            }
        }
    }

    Err(ClientError::RedirectLoop(path.to_string()))
}

/// Navigation state bound to a session
#[derive(Debug)]
pub struct Router {
    session: Arc<Session>,
    current: RwLock<Option<ResolvedRoute>>,
}

impl Router {
    pub fn new(session: Arc<Session>) -> Self {
        Self {
            session,
            current: RwLock::new(None),
        }
    }

    /// Route committed by the last successful navigation
    pub fn current(&self) -> Option<ResolvedRoute> {
        self.current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Navigate to `path`, applying the guard and following its redirects
    pub fn push(&self, path: &str) -> ClientResult<ResolvedRoute> {
        let mut target = path.to_string();

        for _ in 0..MAX_REDIRECTS {
            let route = resolve(&target)?;
            match guard(&route.meta, &self.session.snapshot()) {
                NavigationDecision::Allow => {
                    tracing::debug!(route = route.name, path = %route.path, "Navigated");
                    *self
                        .current
                        .write()
                        .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(route.clone());
                    return Ok(route);
                }
                NavigationDecision::Redirect { to, reason } => {
                    match reason.error() {
                        Some(denied) => {
                            tracing::info!(from = %route.path, to, "Navigation denied: {}", denied)
                        }
                        None => tracing::debug!(from = %route.path, to, "Navigation redirected"),
                    }
                    target = to.to_string();
                }
            }
        }

        Err(ClientError::RedirectLoop(path.to_string()))
    }
}
