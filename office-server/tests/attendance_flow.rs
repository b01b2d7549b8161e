//! Attendance lifecycle against the embedded database.
//! Run: cargo test -p office-server --test attendance_flow

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tempfile::TempDir;

use office_server::db::DbService;
use office_server::db::models::{
    AttendanceStatus, Employee, EmployeeCreate, User, UserCreate, UserRole, UserStatus,
    derive_hours,
};
use office_server::db::repository::attendance::AttendanceWrite;
use office_server::db::repository::{
    AttendanceRepository, EmployeeRepository, RepoError, UserRepository,
};
use office_server::utils::time;

const HOUR_MS: i64 = 60 * 60 * 1000;

async fn setup() -> (TempDir, Surreal<Db>) {
    let tmp = tempfile::tempdir().unwrap();
    let service = DbService::new(tmp.path().to_str().unwrap()).await.unwrap();
    (tmp, service.db)
}

async fn seed_user(db: &Surreal<Db>, email: &str) -> User {
    UserRepository::new(db.clone())
        .create(
            UserCreate {
                name: Some("Test Admin".to_string()),
                email: Some(email.to_string()),
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
        .unwrap()
}

async fn seed_employee(db: &Surreal<Db>, email: &str) -> Employee {
    let user = seed_user(db, email).await;
    let employee = EmployeeRepository::new(db.clone())
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
            user.id.clone().unwrap(),
            user.name.clone(),
            user.id.unwrap(),
        )
        .await
        .unwrap();
    // employeeCode is derived from the creation millis; keep seeds apart
    tokio::time::sleep(std::time::Duration::from_millis(3)).await;
    employee
}

#[tokio::test]
async fn check_in_then_out_derives_hours() {
    let (_tmp, db) = setup().await;
    let employee = seed_employee(&db, "worker1@example.com").await;
    let employee_id = employee.id.unwrap();
    let repo = AttendanceRepository::new(db.clone());

    let day = time::day_start_millis(time::parse_date("2025-03-03").unwrap());
    let check_in = day + 9 * HOUR_MS;
    let record = repo
        .create_for_day(
            employee_id.clone(),
            day,
            AttendanceWrite {
                check_in: Some(check_in),
                ..Default::default()
            },
            None,
        )
        .await
        .unwrap();
    assert_eq!(record.total_hours, 0.0);

    // 09:00 -> 18:30 is 9.5h total, 1.5h past the 8h mark
    let check_out = day + 18 * HOUR_MS + 30 * 60 * 1000;
    let (total, overtime) = derive_hours(check_in, check_out).unwrap();
    let updated = repo
        .update(
            record.id.as_ref().unwrap(),
            AttendanceWrite {
                check_in: Some(check_in),
                check_out: Some(check_out),
                attendance_status: AttendanceStatus::Present,
                remarks: None,
                total_hours: total,
                overtime_hours: overtime,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.total_hours, 9.5);
    assert_eq!(updated.overtime_hours, 1.5);
}

#[tokio::test]
async fn duplicate_day_hits_unique_index() {
    let (_tmp, db) = setup().await;
    let employee = seed_employee(&db, "worker2@example.com").await;
    let employee_id = employee.id.unwrap();
    let repo = AttendanceRepository::new(db.clone());

    let day = time::day_start_millis(time::parse_date("2025-03-04").unwrap());
    repo.create_for_day(
        employee_id.clone(),
        day,
        AttendanceWrite::default(),
        None,
    )
    .await
    .unwrap();

    let err = repo
        .create_for_day(employee_id, day, AttendanceWrite::default(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(_)), "got {err:?}");
}

#[tokio::test]
async fn range_query_uses_half_open_window() {
    let (_tmp, db) = setup().await;
    let employee = seed_employee(&db, "worker3@example.com").await;
    let employee_id = employee.id.unwrap();
    let repo = AttendanceRepository::new(db.clone());

    for date in ["2025-03-01", "2025-03-02", "2025-03-03"] {
        let day = time::day_start_millis(time::parse_date(date).unwrap());
        repo.create_for_day(
            employee_id.clone(),
            day,
            AttendanceWrite::default(),
            None,
        )
        .await
        .unwrap();
    }

    let from = time::parse_date("2025-03-01").unwrap();
    let to = time::parse_date("2025-03-02").unwrap();
    let records = repo
        .find_in_range(time::day_start_millis(from), time::day_end_millis(to))
        .await
        .unwrap();
    assert_eq!(records.len(), 2, "March 3rd lies past the exclusive end");
}

#[tokio::test]
async fn period_snapshot_counts_statuses() {
    let (_tmp, db) = setup().await;
    let employee = seed_employee(&db, "worker4@example.com").await;
    let employee_id = employee.id.unwrap();
    let repo = AttendanceRepository::new(db.clone());

    let days = [
        ("2025-02-03", AttendanceStatus::Present),
        ("2025-02-04", AttendanceStatus::Present),
        ("2025-02-05", AttendanceStatus::Absent),
        ("2025-02-06", AttendanceStatus::Leave),
    ];
    for (date, status) in days {
        let day = time::day_start_millis(time::parse_date(date).unwrap());
        repo.create_for_day(
            employee_id.clone(),
            day,
            AttendanceWrite {
                attendance_status: status,
                ..Default::default()
            },
            None,
        )
        .await
        .unwrap();
    }

    let (start, end) = time::month_range(2025, 2).unwrap();
    let snapshot = repo
        .snapshot_for_period(&employee_id, start, end)
        .await
        .unwrap();
    assert_eq!(snapshot.working_days, 4);
    assert_eq!(snapshot.present_days, 2);
    assert_eq!(snapshot.absent_days, 1);
}

#[tokio::test]
async fn personal_listing_is_newest_first() {
    let (_tmp, db) = setup().await;
    let employee = seed_employee(&db, "worker5@example.com").await;
    let employee_id = employee.id.unwrap();
    let repo = AttendanceRepository::new(db.clone());

    for date in ["2025-03-01", "2025-03-05", "2025-03-03"] {
        let day = time::day_start_millis(time::parse_date(date).unwrap());
        repo.create_for_day(
            employee_id.clone(),
            day,
            AttendanceWrite::default(),
            None,
        )
        .await
        .unwrap();
    }

    let (records, total) = repo
        .list_for_employee(&employee_id, None, Some(2))
        .await
        .unwrap();
    assert_eq!(total, 3);
    assert_eq!(records.len(), 2);
    assert_eq!(
        records[0].day,
        time::day_start_millis(time::parse_date("2025-03-05").unwrap())
    );
}
