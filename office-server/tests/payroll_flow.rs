//! Payroll generation pipeline against the embedded database.
//! Run: cargo test -p office-server --test payroll_flow

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tempfile::TempDir;

use office_server::db::DbService;
use office_server::db::models::{
    AttendanceSnapshot, Employee, EmployeeCreate, PaymentStatus, RecordStatus, SalaryInput,
    SalaryPatch, UserCreate, UserId, UserRole, UserStatus,
};
use office_server::db::repository::payroll::PayrollFilter;
use office_server::db::repository::{
    EmployeeRepository, PayrollRepository, RepoError, UserRepository,
};

async fn setup() -> (TempDir, Surreal<Db>) {
    let tmp = tempfile::tempdir().unwrap();
    let service = DbService::new(tmp.path().to_str().unwrap()).await.unwrap();
    (tmp, service.db)
}

async fn seed_employee(db: &Surreal<Db>, email: &str) -> (Employee, UserId) {
    let user = UserRepository::new(db.clone())
        .create(
            UserCreate {
                name: Some("Payroll Admin".to_string()),
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
        .unwrap();
    let user_id = user.id.unwrap();
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
            user_id.clone(),
            user.name.clone(),
            user_id.clone(),
        )
        .await
        .unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(3)).await;
    (employee, user_id)
}

fn sample_salary() -> SalaryInput {
    SalaryInput {
        basic_salary: 50000.0,
        allowances: 5000.0,
        bonuses: 0.0,
        deductions: 2000.0,
    }
}

#[tokio::test]
async fn generate_stores_recomputed_amounts() {
    let (_tmp, db) = setup().await;
    let (employee, admin) = seed_employee(&db, "pay1@example.com").await;
    let employee_id = employee.id.unwrap();
    let repo = PayrollRepository::new(db.clone());

    let salary = sample_salary();
    let payroll = repo
        .create(
            employee_id.clone(),
            3,
            2025,
            salary,
            salary.calculate(),
            AttendanceSnapshot::default(),
            admin,
            None,
        )
        .await
        .unwrap();

    assert_eq!(payroll.calculations.gross_salary, 55000.0);
    assert_eq!(payroll.calculations.net_salary, 53000.0);
    assert_eq!(payroll.payment_status, PaymentStatus::Pending);
    assert!(repo.exists_for_period(&employee_id, 3, 2025).await.unwrap());
    assert!(!repo.exists_for_period(&employee_id, 4, 2025).await.unwrap());
}

#[tokio::test]
async fn second_generation_for_period_is_rejected() {
    let (_tmp, db) = setup().await;
    let (employee, admin) = seed_employee(&db, "pay2@example.com").await;
    let employee_id = employee.id.unwrap();
    let repo = PayrollRepository::new(db.clone());

    let salary = sample_salary();
    repo.create(
        employee_id.clone(),
        3,
        2025,
        salary,
        salary.calculate(),
        AttendanceSnapshot::default(),
        admin.clone(),
        None,
    )
    .await
    .unwrap();

    // straight to the unique index, as a racing second request would
    let err = repo
        .create(
            employee_id,
            3,
            2025,
            salary,
            salary.calculate(),
            AttendanceSnapshot::default(),
            admin,
            None,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(_)), "got {err:?}");
}

#[tokio::test]
async fn update_recomputes_and_is_idempotent() {
    let (_tmp, db) = setup().await;
    let (employee, admin) = seed_employee(&db, "pay3@example.com").await;
    let repo = PayrollRepository::new(db.clone());

    let salary = sample_salary();
    let payroll = repo
        .create(
            employee.id.unwrap(),
            3,
            2025,
            salary,
            salary.calculate(),
            AttendanceSnapshot::default(),
            admin,
            None,
        )
        .await
        .unwrap();
    let id = payroll.id.unwrap();

    let patched = SalaryPatch {
        deductions: Some(0.0),
        ..Default::default()
    }
    .apply(payroll.salary);
    let updated = repo
        .update(&id, patched, patched.calculate(), None, None)
        .await
        .unwrap();
    assert_eq!(updated.calculations.net_salary, 55000.0);

    // saving the same inputs again changes nothing
    let again = repo
        .update(&id, patched, patched.calculate(), None, None)
        .await
        .unwrap();
    assert_eq!(again.salary, updated.salary);
    assert_eq!(again.calculations, updated.calculations);
}

#[tokio::test]
async fn soft_delete_hides_from_listings() {
    let (_tmp, db) = setup().await;
    let (employee, admin) = seed_employee(&db, "pay4@example.com").await;
    let employee_id = employee.id.unwrap();
    let repo = PayrollRepository::new(db.clone());

    let salary = sample_salary();
    let payroll = repo
        .create(
            employee_id.clone(),
            3,
            2025,
            salary,
            salary.calculate(),
            AttendanceSnapshot::default(),
            admin,
            None,
        )
        .await
        .unwrap();

    repo.soft_delete(payroll.id.as_ref().unwrap()).await.unwrap();

    assert!(!repo.exists_for_period(&employee_id, 3, 2025).await.unwrap());
    let page = repo.list(PayrollFilter::default()).await.unwrap();
    assert_eq!(page.total, 0);
    assert!(page.items.is_empty());
    let own = repo.list_for_employee(&employee_id).await.unwrap();
    assert!(own.is_empty());

    // direct id lookup still works after the soft delete
    let fetched = repo
        .find_by_id(payroll.id.as_ref().unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched.status, RecordStatus::Inactive);
    assert_eq!(fetched.calculations.net_salary, 53000.0);
}

#[tokio::test]
async fn mark_paid_flips_status_and_feeds_stats() {
    let (_tmp, db) = setup().await;
    let (employee, admin) = seed_employee(&db, "pay5@example.com").await;
    let repo = PayrollRepository::new(db.clone());

    let salary = sample_salary();
    let payroll = repo
        .create(
            employee.id.unwrap(),
            3,
            2025,
            salary,
            salary.calculate(),
            AttendanceSnapshot::default(),
            admin,
            None,
        )
        .await
        .unwrap();

    let paid = repo.mark_paid(payroll.id.as_ref().unwrap()).await.unwrap();
    assert_eq!(paid.payment_status, PaymentStatus::Paid);

    let page = repo.list(PayrollFilter::default()).await.unwrap();
    assert_eq!(page.stats.paid_count, 1);
    assert_eq!(page.stats.pending_count, 0);
    assert_eq!(page.stats.total_net, 53000.0);
}
