//! Daily matrix reconstruction over the HTTP surface.
//! Run: cargo test -p office-server --test attendance_matrix

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use office_server::auth::TokenType;
use office_server::db::models::{
    AttendanceStatus, Employee, EmployeeCreate, UserCreate, UserRole, UserStatus, derive_hours,
};
use office_server::db::repository::attendance::AttendanceWrite;
use office_server::db::repository::{AttendanceRepository, EmployeeRepository, UserRepository};
use office_server::services::build_app;
use office_server::utils::time;
use office_server::{ServerConfig, ServerState};

const HOUR_MS: i64 = 60 * 60 * 1000;

async fn setup() -> (TempDir, ServerState, Router, String) {
    let tmp = tempfile::tempdir().unwrap();
    let config = ServerConfig::with_overrides("127.0.0.1", 0, tmp.path().to_str().unwrap());
    let state = ServerState::initialize(&config).await.unwrap();
    let app = build_app(state.clone());

    let admin = UserRepository::new(state.get_db())
        .create(
            UserCreate {
                name: Some("Matrix Admin".to_string()),
                email: Some("matrix-admin@example.com".to_string()),
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

async fn seed_employee(state: &ServerState, email: &str) -> Employee {
    let user = UserRepository::new(state.get_db())
        .create(
            UserCreate {
                name: Some("Matrix Worker".to_string()),
                email: Some(email.to_string()),
                password: None,
                role: None,
                phone: None,
                bio: None,
                avatar: None,
                cover_image: None,
            },
            "not-a-real-hash".to_string(),
            UserRole::Employee,
            UserStatus::Active,
        )
        .await
        .unwrap();
    let user_id = user.id.unwrap();
    let employee = EmployeeRepository::new(state.get_db())
        .create(
            EmployeeCreate {
                user: None,
                designation: None,
                department: None,
                employment_type: None,
                salary: Some(50000.0),
                joining_date: None,
                qualifications: None,
                phone: None,
                address: None,
                avatar_url: None,
                cv_url: None,
            },
            user_id.clone(),
            user.name.clone(),
            user_id,
        )
        .await
        .unwrap();
    // employeeCode is derived from the creation millis; keep seeds apart
    tokio::time::sleep(std::time::Duration::from_millis(3)).await;
    employee
}

async fn get_json(app: &Router, uri: &str, auth: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .header(header::AUTHORIZATION, auth)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn matrix_fills_every_employee_day_cell() {
    let (_tmp, state, app, auth) = setup().await;
    let first = seed_employee(&state, "matrix-w1@example.com").await;
    seed_employee(&state, "matrix-w2@example.com").await;

    // one real record in a 2 x 3 grid, the rest must come back virtual
    let day = time::day_start_millis(time::parse_date("2025-03-02").unwrap());
    let check_in = day + 9 * HOUR_MS;
    let check_out = day + 18 * HOUR_MS + 30 * 60 * 1000;
    let (total, overtime) = derive_hours(check_in, check_out).unwrap();
    AttendanceRepository::new(state.get_db())
        .create_for_day(
            first.id.unwrap(),
            day,
            AttendanceWrite {
                check_in: Some(check_in),
                check_out: Some(check_out),
                attendance_status: AttendanceStatus::Present,
                remarks: None,
                total_hours: total,
                overtime_hours: overtime,
            },
            None,
        )
        .await
        .unwrap();

    let (status, body) = get_json(
        &app,
        "/api/attendance?from=2025-03-01&to=2025-03-03",
        &auth,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["meta"]["total"], 6);

    let items = body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 6);
    let virtual_rows = items
        .iter()
        .filter(|row| row["id"].as_str().unwrap().starts_with("virtual-"))
        .count();
    assert_eq!(virtual_rows, 5);

    let stored = items
        .iter()
        .find(|row| row["attendanceStatus"] == "present")
        .unwrap();
    assert!(stored["id"].as_str().unwrap().starts_with("attendance:"));
    assert_eq!(stored["totalHours"], 9.5);
}

#[tokio::test]
async fn matrix_status_filter_keeps_matching_rows_only() {
    let (_tmp, state, app, auth) = setup().await;
    let employee = seed_employee(&state, "matrix-w3@example.com").await;

    let day = time::day_start_millis(time::parse_date("2025-03-02").unwrap());
    AttendanceRepository::new(state.get_db())
        .create_for_day(
            employee.id.unwrap(),
            day,
            AttendanceWrite {
                attendance_status: AttendanceStatus::Present,
                ..Default::default()
            },
            None,
        )
        .await
        .unwrap();

    let (status, body) = get_json(
        &app,
        "/api/attendance?from=2025-03-01&to=2025-03-03&status=present",
        &auth,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["meta"]["total"], 1);

    let (status, body) = get_json(
        &app,
        "/api/attendance?from=2025-03-01&to=2025-03-03&status=absent",
        &auth,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["meta"]["total"], 2);
}
