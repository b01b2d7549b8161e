//! Asset assignment over the HTTP surface.
//! Run: cargo test -p office-server --test asset_assign

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use office_server::auth::TokenType;
use office_server::db::models::{Asset, AssetCategory, AssetStatus, UserCreate, UserId, UserRole, UserStatus};
use office_server::db::repository::asset::AssetWrite;
use office_server::db::repository::{AssetRepository, UserRepository};
use office_server::services::build_app;
use office_server::{ServerConfig, ServerState};

async fn setup() -> (TempDir, ServerState, Router, String) {
    let tmp = tempfile::tempdir().unwrap();
    let config = ServerConfig::with_overrides("127.0.0.1", 0, tmp.path().to_str().unwrap());
    let state = ServerState::initialize(&config).await.unwrap();
    let app = build_app(state.clone());

    let admin = UserRepository::new(state.get_db())
        .create(
            UserCreate {
                name: Some("Asset Admin".to_string()),
                email: Some("asset-admin@example.com".to_string()),
                password: None,
                role: None,
                phone: None,
                bio: None,
                avatar: None,
                cover_image: None,
            },
            "not-a-real-hash".to_string(),
            UserRole::Admin,
            UserStatus::Active,
        )
        .await
        .unwrap();
    let token = state
        .jwt_service
        .issue(&admin, TokenType::Access)
        .unwrap();
    (tmp, state, app, format!("Bearer {token}"))
}

async fn seed_asset(state: &ServerState, created_by: UserId) -> Asset {
    AssetRepository::new(state.get_db())
        .create(
            AssetWrite {
                name: "Test Laptop".to_string(),
                category: AssetCategory::Hardware,
                serial_number: "SN-TEST-0001".to_string(),
                purchase_date: None,
                warranty_expiry: None,
                cost: 1200.0,
                location: None,
                remarks: None,
            },
            created_by,
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn assigning_to_missing_employee_is_404_and_leaves_asset_untouched() {
    let (_tmp, state, app, auth) = setup().await;
    let admin = state
        .users()
        .find_by_email("asset-admin@example.com")
        .await
        .unwrap()
        .unwrap();
    let asset = seed_asset(&state, admin.id.unwrap()).await;
    let asset_id = asset.id.clone().unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri(format!("/api/assets/{asset_id}/assign"))
                .header(header::AUTHORIZATION, &auth)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    r#"{"assignedTo":"employee:doesnotexist","assignedToModel":"Employee"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Employee not found");

    // the failed assignment must not have touched the record
    let stored = AssetRepository::new(state.get_db())
        .find_by_id(&asset_id.to_string())
        .await
        .unwrap()
        .unwrap();
    assert!(stored.assigned_to.is_none());
    assert_eq!(stored.status, AssetStatus::Available);
}
