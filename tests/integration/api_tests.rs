//! Request pipeline and service tests

use std::time::Duration;

use serde_json::{json, Value};

use library_client::{
    error::{ClientError, NOTICE_NETWORK, NOTICE_PERMISSION_DENIED, NOTICE_SESSION_EXPIRED},
    models::{
        BookInput, BookQuery, CategoryInput, Credentials, MyBorrowsQuery, NewReview, PageQuery,
        ProfileUpdate, ReviewUpdate, UserInput, UserQuery,
    },
    services::logs::LogService,
};

use crate::common::{
    dead_base_url, spawn_backend, spawn_recording_backend, Harness, BOOKS_PAYLOAD,
};

#[tokio::test]
async fn test_search_returns_raw_payload() {
    let (url, backend) = spawn_backend().await;
    let h = Harness::new(&url);

    let body = h
        .app
        .services
        .books
        .search("dune", &BookQuery::default())
        .await
        .unwrap();

    let expected: Value = serde_json::from_str(BOOKS_PAYLOAD).unwrap();
    assert_eq!(body, expected);

    let request = backend.last();
    assert_eq!(request.method, "GET");
    assert_eq!(request.path, "/api/books");
    assert_eq!(request.query.as_deref(), Some("search=dune"));
    assert!(h.notifier.messages().is_empty());
}

#[tokio::test]
async fn test_anonymous_requests_carry_no_bearer() {
    let (url, backend) = spawn_backend().await;
    let h = Harness::new(&url);

    h.app.services.books.list(&BookQuery::default()).await.unwrap();

    let request = backend.last();
    assert_eq!(request.authorization, None);
    assert_eq!(request.query, None);
}

#[tokio::test]
async fn test_token_is_attached_after_login() {
    let (url, backend) = spawn_backend().await;
    let h = Harness::new(&url);

    h.app
        .store
        .login(&Credentials::new("a@x.com", "p"))
        .await
        .unwrap();
    assert_eq!(backend.last().authorization, None);

    let query = BookQuery {
        page: Some(2),
        available_only: Some(true),
        ..Default::default()
    };
    h.app.services.books.list(&query).await.unwrap();

    let request = backend.last();
    assert_eq!(request.authorization.as_deref(), Some("Bearer T1"));
    assert_eq!(request.query.as_deref(), Some("page=2&available_only=true"));
}

#[tokio::test]
async fn test_unauthorized_response_ends_session() {
    let (url, _backend) = spawn_backend().await;
    let h = Harness::new(&url);
    h.app
        .store
        .login(&Credentials::new("a@x.com", "p"))
        .await
        .unwrap();
    h.app.router.push("/my-books").unwrap();

    let err = h
        .app
        .services
        .users
        .list(&UserQuery::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::SessionExpired));
    assert!(!h.app.session.is_authenticated());
    assert_eq!(h.app.session.user(), None);
    assert_eq!(h.stored_token(), None);
    assert_eq!(h.app.router.current().unwrap().name, "Login");
    assert_eq!(h.notifier.messages(), vec![NOTICE_SESSION_EXPIRED.to_string()]);
}

#[tokio::test]
async fn test_forbidden_keeps_session() {
    let (url, _backend) = spawn_backend().await;
    let h = Harness::new(&url);
    h.app
        .store
        .login(&Credentials::new("a@x.com", "p"))
        .await
        .unwrap();

    let err = h.app.services.books.delete(3).await.unwrap_err();

    assert!(matches!(err, ClientError::PermissionDenied));
    assert!(h.app.session.is_authenticated());
    assert_eq!(h.stored_token().as_deref(), Some("T1"));
    assert_eq!(h.notifier.last().as_deref(), Some(NOTICE_PERMISSION_DENIED));
}

#[tokio::test]
async fn test_server_error_message_is_surfaced() {
    let (url, _backend) = spawn_backend().await;
    let h = Harness::new(&url);

    let err = h.app.services.borrows.borrow(3).await.unwrap_err();

    match &err {
        ClientError::ServerReported { status, message } => {
            assert_eq!(*status, 400);
            assert_eq!(message, "No copies available");
        }
        other => panic!("unexpected {:?}", other),
    }
    assert_eq!(h.notifier.last().as_deref(), Some("No copies available"));
}

#[tokio::test]
async fn test_status_without_message_is_a_network_notice() {
    let (url, _backend) = spawn_backend().await;
    let h = Harness::new(&url);

    let err = h
        .app
        .services
        .borrows
        .all_borrows(&Default::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::UnexpectedStatus(500)));
    assert_eq!(h.notifier.last().as_deref(), Some(NOTICE_NETWORK));
}

#[tokio::test]
async fn test_unreachable_backend() {
    let h = Harness::new(&dead_base_url().await);

    let err = h
        .app
        .services
        .books
        .list(&BookQuery::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Network(_)));
    assert_eq!(h.notifier.messages(), vec![NOTICE_NETWORK.to_string()]);
}

#[tokio::test]
async fn test_per_request_timeout() {
    let (url, _backend) = spawn_backend().await;
    let h = Harness::new(&url);
    assert_eq!(h.app.http.timeout(), Duration::from_secs(10));

    let logs = LogService::new(h.app.http.with_timeout(Duration::from_millis(200)));
    let err = logs.list(&Default::default()).await.unwrap_err();

    assert!(matches!(err, ClientError::Timeout));
    assert_eq!(h.notifier.last().as_deref(), Some(NOTICE_NETWORK));
}

#[tokio::test]
async fn test_empty_success_body_is_null() {
    let (url, backend) = spawn_backend().await;
    let h = Harness::new(&url);

    let body = h.app.services.notifications.mark_all_read().await.unwrap();

    assert_eq!(body, Value::Null);
    assert_eq!(backend.last().method, "PUT");
}

#[tokio::test]
async fn test_repeated_status_filter() {
    let (url, backend) = spawn_backend().await;
    let h = Harness::new(&url);

    let query = MyBorrowsQuery {
        status: vec!["borrowed".to_string(), "overdue".to_string()],
        ..Default::default()
    };
    let body = h.app.services.borrows.my_borrows(&query).await.unwrap();

    assert_eq!(body, json!({"borrows": [], "total": 0}));
    let request = backend.last();
    assert_eq!(request.path, "/api/borrows/my");
    assert_eq!(request.query.as_deref(), Some("status=borrowed&status=overdue"));
}

#[tokio::test]
async fn test_reservation_posts_book_id() {
    let (url, backend) = spawn_backend().await;
    let h = Harness::new(&url);

    let body = h.app.services.reservations.create(3).await.unwrap();

    assert_eq!(body["reservation"]["id"], 9);
    let request = backend.last();
    assert_eq!((request.method.as_str(), request.path.as_str()), ("POST", "/api/reservations"));
}

#[tokio::test]
async fn test_every_service_method_hits_its_endpoint() {
    let (url, backend) = spawn_recording_backend().await;
    let h = Harness::new(&url);
    let s = &h.app.services;
    let page = PageQuery::default();

    s.auth.refresh_token().await.unwrap();

    let book = BookInput {
        title: Some("Dune".to_string()),
        ..Default::default()
    };
    s.books.get(3).await.unwrap();
    s.books.create(&book).await.unwrap();
    s.books.update(3, &book).await.unwrap();
    s.books.reviews(3, &page).await.unwrap();
    s.books
        .add_review(3, &NewReview { rating: 5, comment: None })
        .await
        .unwrap();
    s.books.update_review(8, &ReviewUpdate::default()).await.unwrap();
    s.books.delete_review(8).await.unwrap();
    s.books.my_reviews(&page).await.unwrap();

    s.borrows.borrow(3).await.unwrap();
    s.borrows.return_book(4).await.unwrap();
    s.borrows.renew(4).await.unwrap();
    s.borrows.stats().await.unwrap();

    let category = CategoryInput {
        name: Some("Fiction".to_string()),
        ..Default::default()
    };
    s.categories.list(&page).await.unwrap();
    s.categories.get(2).await.unwrap();
    s.categories.create(&category).await.unwrap();
    s.categories.update(2, &category).await.unwrap();
    s.categories.delete(2).await.unwrap();

    s.reservations.create(3).await.unwrap();
    s.reservations.cancel(9).await.unwrap();
    s.reservations.mine(&page).await.unwrap();
    s.reservations.all(&page).await.unwrap();
    s.reservations.fulfill(9).await.unwrap();

    s.notifications.list(&Default::default()).await.unwrap();
    s.notifications.mark_read(6).await.unwrap();
    s.notifications.mark_all_read().await.unwrap();
    s.notifications.delete(6).await.unwrap();

    s.users.get(5).await.unwrap();
    s.users.update(5, &UserInput::default()).await.unwrap();
    s.users.delete(5).await.unwrap();
    s.users.create(&UserInput::default()).await.unwrap();
    s.users.update_profile(&ProfileUpdate::default()).await.unwrap();

    s.logs.clear().await.unwrap();

    let expected = [
        ("POST", "/api/auth/refresh"),
        ("GET", "/api/books/3"),
        ("POST", "/api/books"),
        ("PUT", "/api/books/3"),
        ("GET", "/api/books/3/reviews"),
        ("POST", "/api/books/3/reviews"),
        ("PUT", "/api/reviews/8"),
        ("DELETE", "/api/reviews/8"),
        ("GET", "/api/reviews/my"),
        ("POST", "/api/borrow"),
        ("POST", "/api/return/4"),
        ("POST", "/api/borrows/4/renew"),
        ("GET", "/api/borrows/stats"),
        ("GET", "/api/categories"),
        ("GET", "/api/categories/2"),
        ("POST", "/api/categories"),
        ("PUT", "/api/categories/2"),
        ("DELETE", "/api/categories/2"),
        ("POST", "/api/reservations"),
        ("DELETE", "/api/reservations/9"),
        ("GET", "/api/reservations/my"),
        ("GET", "/api/reservations"),
        ("POST", "/api/reservations/9/fulfill"),
        ("GET", "/api/notifications"),
        ("PUT", "/api/notifications/6/read"),
        ("PUT", "/api/notifications/read-all"),
        ("DELETE", "/api/notifications/6"),
        ("GET", "/api/users/5"),
        ("PUT", "/api/users/5"),
        ("DELETE", "/api/users/5"),
        ("POST", "/api/users"),
        ("PUT", "/api/auth/profile"),
        ("DELETE", "/api/logs"),
    ];

    let requests = backend.requests();
    let seen: Vec<(&str, &str)> = requests
        .iter()
        .map(|r| (r.method.as_str(), r.path.as_str()))
        .collect();
    assert_eq!(seen, expected);

    let body_of = |path: &str, method: &str| {
        requests
            .iter()
            .find(|r| r.path == path && r.method == method)
            .and_then(|r| r.body.clone())
    };
    assert_eq!(body_of("/api/borrow", "POST"), Some(json!({"book_id": 3})));
    assert_eq!(body_of("/api/reservations", "POST"), Some(json!({"book_id": 3})));
    assert_eq!(body_of("/api/books", "POST"), Some(json!({"title": "Dune"})));
    assert_eq!(body_of("/api/return/4", "POST"), None);
    assert!(h.notifier.messages().is_empty());
}
