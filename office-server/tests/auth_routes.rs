//! Route guards over the fully assembled app.
//! Run: cargo test -p office-server --test auth_routes

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use office_server::auth::TokenType;
use office_server::db::models::{User, UserCreate, UserRole, UserStatus};
use office_server::db::repository::UserRepository;
use office_server::services::build_app;
use office_server::{ServerConfig, ServerState};

async fn setup() -> (TempDir, ServerState, Router) {
    let tmp = tempfile::tempdir().unwrap();
    let config = ServerConfig::with_overrides("127.0.0.1", 0, tmp.path().to_str().unwrap());
    let state = ServerState::initialize(&config).await.unwrap();
    let app = build_app(state.clone());
    (tmp, state, app)
}

async fn seed_user(state: &ServerState, email: &str, role: UserRole) -> User {
    UserRepository::new(state.get_db())
        .create(
            UserCreate {
                name: Some("Route Guard".to_string()),
                email: Some(email.to_string()),
                password: None,
                role: None,
                phone: None,
                bio: None,
                avatar: None,
                cover_image: None,
            },
            "not-a-real-hash".to_string(),
            role,
            UserStatus::Active,
        )
        .await
        .unwrap()
}

fn bearer(state: &ServerState, user: &User) -> String {
    let token = state
        .jwt_service
        .issue(user, TokenType::Access)
        .unwrap();
    format!("Bearer {token}")
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_is_public() {
    let (_tmp, _state, app) = setup().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["database"], "up");
    assert_eq!(body["data"]["status"], "ok");
}

#[tokio::test]
async fn api_rejects_missing_token() {
    let (_tmp, _state, app) = setup().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/users")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn api_rejects_garbage_token() {
    let (_tmp, _state, app) = setup().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/users")
                .header(header::AUTHORIZATION, "Bearer not.a.token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn employee_is_kept_out_of_admin_routes() {
    let (_tmp, state, app) = setup().await;
    let employee = seed_user(&state, "guard-emp@example.com", UserRole::Employee).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/settings")
                .header(header::AUTHORIZATION, bearer(&state, &employee))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Admin access required");
}

#[tokio::test]
async fn admin_passes_the_same_guard() {
    let (_tmp, state, app) = setup().await;
    let admin = seed_user(&state, "guard-admin@example.com", UserRole::Admin).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/settings")
                .header(header::AUTHORIZATION, bearer(&state, &admin))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
}
