//! Session lifecycle: login, register, logout, restore and navigation

use std::sync::Arc;

use library_client::{
    error::{ClientError, NOTICE_SESSION_EXPIRED},
    models::{Credentials, RegisterRequest, Role},
    storage::{MemoryStorage, TokenStorage, TOKEN_KEY},
};

use crate::common::{spawn_backend, Harness};

#[tokio::test]
async fn test_login_establishes_session() {
    let (url, _backend) = spawn_backend().await;
    let h = Harness::new(&url);
    assert!(!h.app.store.is_authenticated());

    let response = h
        .app
        .store
        .login(&Credentials::new("a@x.com", "p"))
        .await
        .unwrap();

    assert_eq!(response.token, "T1");
    assert_eq!(response.user.id, 1);
    assert!(h.app.store.is_authenticated());
    assert!(!h.app.store.is_admin());
    assert!(h.app.store.check_auth());
    assert_eq!(h.stored_token().as_deref(), Some("T1"));
    assert_eq!(h.app.store.user().map(|u| u.role), Some(Role::User));
}

#[tokio::test]
async fn test_logout_clears_everything() {
    let (url, backend) = spawn_backend().await;
    let h = Harness::new(&url);
    h.app
        .store
        .login(&Credentials::new("a@x.com", "p"))
        .await
        .unwrap();
    let requests_before = backend.requests().len();

    h.app.store.logout().unwrap();

    assert!(!h.app.store.is_authenticated());
    assert!(!h.app.store.check_auth());
    assert_eq!(h.app.store.user(), None);
    assert_eq!(h.stored_token(), None);
    assert_eq!(h.app.router.current().unwrap().name, "Login");
    // Logout is local only
    assert_eq!(backend.requests().len(), requests_before);
}

#[tokio::test]
async fn test_register_establishes_session() {
    let (url, _backend) = spawn_backend().await;
    let h = Harness::new(&url);

    let response = h
        .app
        .store
        .register(&RegisterRequest {
            username: "ann".to_string(),
            email: "ann@x.com".to_string(),
            password: "secret".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(response.user.username.as_deref(), Some("ann"));
    assert!(h.app.store.is_authenticated());
    assert_eq!(h.stored_token().as_deref(), Some("R1"));
}

#[tokio::test]
async fn test_rejected_login_stays_anonymous() {
    let (url, _backend) = spawn_backend().await;
    let h = Harness::new(&url);

    let err = h
        .app
        .store
        .login(&Credentials::new("a@x.com", "wrong"))
        .await
        .unwrap_err();

    // The backend answers bad credentials with 401, which takes the expired-session path
    assert!(matches!(err, ClientError::SessionExpired));
    assert!(!h.app.store.is_authenticated());
    assert_eq!(h.stored_token(), None);
    assert_eq!(h.notifier.last().as_deref(), Some(NOTICE_SESSION_EXPIRED));
}

#[tokio::test]
async fn test_admin_navigation() {
    let (url, _backend) = spawn_backend().await;
    let h = Harness::new(&url);

    assert_eq!(h.app.router.push("/admin").unwrap().name, "Login");

    h.app
        .store
        .login(&Credentials::new("admin@x.com", "p"))
        .await
        .unwrap();
    assert!(h.app.store.is_admin());

    let route = h.app.router.push("/admin").unwrap();
    assert_eq!(route.name, "AdminDashboard");
    assert_eq!(route.path, "/admin/dashboard");
    assert_eq!(h.app.router.push("/register").unwrap().name, "Books");
}

#[tokio::test]
async fn test_restored_token_without_user() {
    let (url, backend) = spawn_backend().await;
    let storage = Arc::new(MemoryStorage::new());
    storage.set(TOKEN_KEY, "TA").unwrap();

    let h = Harness::with_storage(&url, storage);

    // The token alone passes the guard; the role is unknown until fetched
    assert!(h.app.store.check_auth());
    assert_eq!(h.app.store.user(), None);
    assert_eq!(h.app.router.push("/books").unwrap().name, "Books");
    assert_eq!(h.app.router.push("/admin/users").unwrap().path, "/unauthorized");

    let user = h.app.store.fetch_current_user().await.unwrap();
    assert_eq!(user.username.as_deref(), Some("admin"));
    assert_eq!(backend.last().authorization.as_deref(), Some("Bearer TA"));
    assert_eq!(h.app.router.push("/admin/users").unwrap().name, "UserManagement");
}

#[tokio::test]
async fn test_stale_token_fails_on_first_request() {
    let (url, _backend) = spawn_backend().await;
    let storage = Arc::new(MemoryStorage::new());
    storage.set(TOKEN_KEY, "STALE").unwrap();
    let h = Harness::with_storage(&url, storage);

    assert!(h.app.store.check_auth());

    let err = h.app.store.fetch_current_user().await.unwrap_err();

    assert!(matches!(err, ClientError::SessionExpired));
    assert!(!h.app.store.check_auth());
    assert_eq!(h.stored_token(), None);
    assert_eq!(h.app.router.current().unwrap().path, "/login");
}
