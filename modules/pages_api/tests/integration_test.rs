use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tower::ServiceExt;

use pages_api::api::rest::dto::{PageDto, TokenDto, UserDto};
use pages_api::domain::auth::token::TokenService;
use pages_api::domain::error::DomainError;
use pages_api::domain::service::Service;
use pages_api::infra::storage::entity::page;
use pages_api::infra::storage::migrations::Migrator;

/// Create a fresh test database for each test
async fn create_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

fn create_service(db: DatabaseConnection) -> Arc<Service> {
    let tokens = TokenService::new("test-secret", Duration::from_secs(3600));
    Arc::new(Service::new(db, tokens))
}

/// Create a test HTTP router backed by an in-memory database
async fn create_test_router() -> Router {
    let db = create_test_db().await;
    pages_api::api::rest::routes::router(create_service(db))
}

async fn body_json(response: axum::response::Response) -> Result<serde_json::Value> {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&body)?)
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn authed_json_request(
    method: &str,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn authed_request(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

/// Register a user and return the issued access token
async fn register_and_login(router: &Router, email: &str, password: &str) -> Result<String> {
    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/auth/register",
            serde_json::json!({ "email": email, "password": password }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/token")
                .header("content-type", "application/x-www-form-urlencoded")
                .body(Body::from(format!(
                    "username={}&password={}",
                    email, password
                )))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let token: TokenDto = serde_json::from_slice(&body)?;
    assert_eq!(token.token_type, "bearer");
    Ok(token.access_token)
}

#[tokio::test]
async fn test_liveness_check() -> Result<()> {
    let router = create_test_router().await;

    let request = Request::builder()
        .method("GET")
        .uri("/")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await?;
    assert_eq!(body["status"], "ok");

    Ok(())
}

#[tokio::test]
async fn test_register_returns_user_without_password() -> Result<()> {
    let router = create_test_router().await;

    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/auth/register",
            serde_json::json!({ "email": "alice@example.com", "name": "Alice", "password": "secret1" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let user: UserDto = serde_json::from_slice(&body)?;
    assert_eq!(user.email, "alice@example.com");
    assert_eq!(user.name.as_deref(), Some("Alice"));

    // nothing hash-shaped leaks through the DTO
    let raw: serde_json::Value = serde_json::from_slice(&body)?;
    assert!(raw.get("password").is_none());
    assert!(raw.get("password_hash").is_none());

    Ok(())
}

#[tokio::test]
async fn test_duplicate_email_is_rejected() -> Result<()> {
    let router = create_test_router().await;

    let payload = serde_json::json!({ "email": "dup@example.com", "password": "secret1" });

    let response = router
        .clone()
        .oneshot(json_request("POST", "/auth/register", payload.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .clone()
        .oneshot(json_request("POST", "/auth/register", payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await?;
    assert_eq!(body["detail"], "Email already registered");

    Ok(())
}

#[tokio::test]
async fn test_login_with_wrong_password_is_unauthenticated() -> Result<()> {
    let router = create_test_router().await;
    register_and_login(&router, "bob@example.com", "secret1").await?;

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/token")
                .header("content-type", "application/x-www-form-urlencoded")
                // close is not good enough
                .body(Body::from("username=bob@example.com&password=secret2"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn test_unauthenticated_requests_are_rejected() -> Result<()> {
    let router = create_test_router().await;

    // no header at all
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/pages/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // wrong scheme
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/pages/")
                .header("authorization", "Basic YWxpY2U6c2VjcmV0")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // bearer scheme with an empty token
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/pages/")
                .header("authorization", "Bearer ")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // garbage token
    let response = router
        .clone()
        .oneshot(authed_request("GET", "/pages/", "not.a.token"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn test_page_lifecycle_end_to_end() -> Result<()> {
    let router = create_test_router().await;
    let token = register_and_login(&router, "alice@example.com", "secret1").await?;

    // create
    let response = router
        .clone()
        .oneshot(authed_json_request(
            "POST",
            "/pages/",
            &token,
            serde_json::json!({ "title": "Notes", "content": "# hello" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let page: PageDto = serde_json::from_slice(&body)?;
    assert_eq!(page.title, "Notes");
    assert!(page.owner_id.is_some());
    let uid = page.uid.clone();

    // fetch by public identifier
    let response = router
        .clone()
        .oneshot(authed_request("GET", &format!("/pages/{}", uid), &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await?;
    assert_eq!(body["title"], "Notes");
    assert_eq!(body["content"], "# hello");

    // partial update: title only, content untouched
    let response = router
        .clone()
        .oneshot(authed_json_request(
            "PATCH",
            &format!("/pages/{}", uid),
            &token,
            serde_json::json!({ "title": "Notes v2" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await?;
    assert_eq!(body["title"], "Notes v2");
    assert_eq!(body["content"], "# hello");

    // listed under the caller by default
    let response = router
        .clone()
        .oneshot(authed_request("GET", "/pages/", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await?;
    assert_eq!(body.as_array().unwrap().len(), 1);

    // a different authenticated user is forbidden, not told "not found"
    let intruder = register_and_login(&router, "mallory@example.com", "secret2").await?;
    for request in [
        authed_request("GET", &format!("/pages/{}", uid), &intruder),
        authed_json_request(
            "PATCH",
            &format!("/pages/{}", uid),
            &intruder,
            serde_json::json!({ "title": "mine now" }),
        ),
        authed_request("DELETE", &format!("/pages/{}", uid), &intruder),
    ] {
        let response = router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    // owner deletes
    let response = router
        .clone()
        .oneshot(authed_request("DELETE", &format!("/pages/{}", uid), &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await?;
    assert_eq!(body["ok"], true);

    // gone now
    let response = router
        .clone()
        .oneshot(authed_request("GET", &format!("/pages/{}", uid), &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn test_uids_are_unique_and_unknown_uid_is_not_found() -> Result<()> {
    let router = create_test_router().await;
    let token = register_and_login(&router, "carol@example.com", "secret1").await?;

    let mut uids = std::collections::HashSet::new();
    for i in 0..5 {
        let response = router
            .clone()
            .oneshot(authed_json_request(
                "POST",
                "/pages/",
                &token,
                serde_json::json!({ "title": format!("p{}", i), "content": "" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await?;
        assert!(uids.insert(body["uid"].as_str().unwrap().to_string()));
    }
    assert_eq!(uids.len(), 5);

    let response = router
        .clone()
        .oneshot(authed_request("GET", "/pages/never-issued-uid", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn test_unowned_page_is_readable_by_any_authenticated_user() -> Result<()> {
    let db = create_test_db().await;
    let service = create_service(db.clone());
    let router = pages_api::api::rest::routes::router(service);

    let token = register_and_login(&router, "dave@example.com", "secret1").await?;

    // seed an ownerless page directly in storage
    let row = page::create(
        &db,
        page::NewPageEntity {
            uid: "shared-page".to_string(),
            title: "Shared".to_string(),
            content: "open to all".to_string(),
            owner_id: None,
        },
    )
    .await?;
    assert!(row.owner_id.is_none());

    let response = router
        .clone()
        .oneshot(authed_request("GET", "/pages/shared-page", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await?;
    assert_eq!(body["title"], "Shared");

    Ok(())
}

#[tokio::test]
async fn test_dangling_token_subject_is_unauthenticated() -> Result<()> {
    let db = create_test_db().await;
    let service = create_service(db);

    // token signed with the right secret but pointing at a user that
    // never existed in this database
    let tokens = TokenService::new("test-secret", Duration::from_secs(3600));
    let orphan = tokens.issue(999).unwrap();

    let err = service.authenticate_token(&orphan).await.unwrap_err();
    assert!(matches!(err, DomainError::UserNotFound { id: 999 }));

    Ok(())
}

#[tokio::test]
async fn test_owner_filter_on_list() -> Result<()> {
    let router = create_test_router().await;
    let alice = register_and_login(&router, "alice2@example.com", "secret1").await?;
    let bob = register_and_login(&router, "bob2@example.com", "secret2").await?;

    let response = router
        .clone()
        .oneshot(authed_json_request(
            "POST",
            "/pages/",
            &alice,
            serde_json::json!({ "title": "alice's", "content": "" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created = body_json(response).await?;
    let alice_id = created["owner_id"].as_i64().unwrap();

    // bob's default listing shows his (empty) set, not alice's
    let response = router
        .clone()
        .oneshot(authed_request("GET", "/pages/", &bob))
        .await
        .unwrap();
    let body = body_json(response).await?;
    assert_eq!(body.as_array().unwrap().len(), 0);

    // explicit owner filter
    let response = router
        .clone()
        .oneshot(authed_request(
            "GET",
            &format!("/pages/?owner_id={}", alice_id),
            &bob,
        ))
        .await
        .unwrap();
    let body = body_json(response).await?;
    assert_eq!(body.as_array().unwrap().len(), 1);

    Ok(())
}
