//! Database Schema
//!
//! 版本化 schema 迁移，启动时按版本号顺序应用。
//!
//! 所有表都是 SCHEMAFULL：字段、枚举约束和唯一索引由数据库强制执行，
//! 已应用的版本记录在 `_migration` 表中，重启时跳过。
//!
//! | Table        | Purpose                          | Unique Index            |
//! |--------------|----------------------------------|-------------------------|
//! | user         | 登录账户 / login accounts        | email                   |
//! | employee     | 员工档案 / HR profiles           | employeeCode, email, user |
//! | attendance   | 每日考勤 / daily attendance      | (employee, day)         |
//! | payroll      | 月度工资单 / monthly payroll     | (employee, month, year) |
//! | client       | 客户账户 / client accounts       | email                   |
//! | project      | 项目 / projects                  |                         |
//! | room         | 办公室房间 / office rooms        | name                    |
//! | asset        | 公司资产 / company assets        | serialNumber            |
//! | finance      | 收支流水 / income & expenses     |                         |
//! | report       | 生成的报表 / generated reports   |                         |
//! | notification | 站内通知 / notifications         |                         |
//! | activity     | 操作审计 / audit trail           |                         |
//! | setting      | 全局配置单例 / settings singleton|                         |

use serde::Deserialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::utils::AppError;

/// A single schema migration. Statements run in one batch.
pub struct Migration {
    pub version: u32,
    pub name: &'static str,
    pub statements: &'static str,
}

/// All migrations in application order. Append only, never edit a shipped entry.
pub const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial-schema",
    statements: V1_INITIAL_SCHEMA,
}];

#[derive(Debug, Deserialize)]
struct AppliedMigration {
    version: u32,
}

/// Apply any migrations newer than the latest recorded version.
pub async fn run_migrations(db: &Surreal<Db>) -> Result<(), AppError> {
    // Bootstrap the tracking table first so the version query below always works
    db.query(
        r#"
        DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
        DEFINE FIELD IF NOT EXISTS version ON _migration TYPE int;
        DEFINE FIELD IF NOT EXISTS name ON _migration TYPE string;
        DEFINE FIELD IF NOT EXISTS appliedAt ON _migration TYPE datetime DEFAULT time::now();
        DEFINE INDEX IF NOT EXISTS idx_migration_version ON _migration FIELDS version UNIQUE;
        "#,
    )
    .await
    .map_err(|e| AppError::database(format!("Failed to bootstrap migration table: {e}")))?
    .check()
    .map_err(|e| AppError::database(format!("Failed to bootstrap migration table: {e}")))?;

    let mut result = db
        .query("SELECT version FROM _migration ORDER BY version")
        .await
        .map_err(|e| AppError::database(format!("Failed to read applied migrations: {e}")))?;
    let applied: Vec<AppliedMigration> = result
        .take(0)
        .map_err(|e| AppError::database(format!("Failed to read applied migrations: {e}")))?;
    let current = applied.iter().map(|m| m.version).max().unwrap_or(0);

    for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
        db.query(migration.statements)
            .await
            .map_err(|e| {
                AppError::database(format!(
                    "Migration {} ({}) failed: {e}",
                    migration.version, migration.name
                ))
            })?
            .check()
            .map_err(|e| {
                AppError::database(format!(
                    "Migration {} ({}) failed: {e}",
                    migration.version, migration.name
                ))
            })?;

        db.query("CREATE _migration SET version = $version, name = $name")
            .bind(("version", migration.version))
            .bind(("name", migration.name))
            .await
            .map_err(|e| {
                AppError::database(format!(
                    "Failed to record migration {}: {e}",
                    migration.version
                ))
            })?
            .check()
            .map_err(|e| {
                AppError::database(format!(
                    "Failed to record migration {}: {e}",
                    migration.version
                ))
            })?;

        tracing::info!(
            version = migration.version,
            name = migration.name,
            "Schema migration applied"
        );
    }

    Ok(())
}

// 所有字段名与 JSON wire 格式一致（camelCase），时间戳为 Unix 毫秒 int。
// DEFINE ... IF NOT EXISTS 保证在「语句已执行但版本未记录」的崩溃后重跑安全。
const V1_INITIAL_SCHEMA: &str = r#"
-- ========== user ==========
DEFINE TABLE IF NOT EXISTS user SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS name ON user TYPE string;
DEFINE FIELD IF NOT EXISTS email ON user TYPE string ASSERT string::is::email($value);
DEFINE FIELD IF NOT EXISTS hashPass ON user TYPE string;
DEFINE FIELD IF NOT EXISTS avatar ON user TYPE string DEFAULT '';
DEFINE FIELD IF NOT EXISTS coverImage ON user TYPE string DEFAULT '';
DEFINE FIELD IF NOT EXISTS bio ON user TYPE option<string>;
DEFINE FIELD IF NOT EXISTS phone ON user TYPE option<string>;
DEFINE FIELD IF NOT EXISTS role ON user TYPE string DEFAULT 'employee'
    ASSERT $value INSIDE ['admin', 'manager', 'employee', 'client'];
DEFINE FIELD IF NOT EXISTS status ON user TYPE string DEFAULT 'pending'
    ASSERT $value INSIDE ['pending', 'active', 'inactive', 'blocked'];
DEFINE FIELD IF NOT EXISTS otpHash ON user TYPE option<string>;
DEFINE FIELD IF NOT EXISTS otpExpiresAt ON user TYPE option<int>;
DEFINE FIELD IF NOT EXISTS resetOtpHash ON user TYPE option<string>;
DEFINE FIELD IF NOT EXISTS resetOtpExpiresAt ON user TYPE option<int>;
DEFINE FIELD IF NOT EXISTS refreshTokens ON user TYPE array<string> DEFAULT [];
DEFINE FIELD IF NOT EXISTS createdAt ON user TYPE int;
DEFINE FIELD IF NOT EXISTS updatedAt ON user TYPE int;
DEFINE INDEX IF NOT EXISTS idx_user_email ON user FIELDS email UNIQUE;

-- ========== employee ==========
DEFINE TABLE IF NOT EXISTS employee SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS user ON employee TYPE record<user>;
DEFINE FIELD IF NOT EXISTS employeeCode ON employee TYPE string;
DEFINE FIELD IF NOT EXISTS name ON employee TYPE string;
DEFINE FIELD IF NOT EXISTS email ON employee TYPE string ASSERT string::is::email($value);
DEFINE FIELD IF NOT EXISTS designation ON employee TYPE string DEFAULT 'Staff';
DEFINE FIELD IF NOT EXISTS department ON employee TYPE string DEFAULT 'General';
DEFINE FIELD IF NOT EXISTS employmentType ON employee TYPE string DEFAULT 'full-time'
    ASSERT $value INSIDE ['full-time', 'part-time', 'contract', 'intern'];
DEFINE FIELD IF NOT EXISTS salary ON employee TYPE number DEFAULT 0 ASSERT $value >= 0;
DEFINE FIELD IF NOT EXISTS joiningDate ON employee TYPE int;
DEFINE FIELD IF NOT EXISTS qualifications ON employee TYPE option<string>;
DEFINE FIELD IF NOT EXISTS avatarUrl ON employee TYPE string DEFAULT '';
DEFINE FIELD IF NOT EXISTS cvUrl ON employee TYPE string DEFAULT '';
DEFINE FIELD IF NOT EXISTS phone ON employee TYPE option<string>;
DEFINE FIELD IF NOT EXISTS address ON employee TYPE option<string>;
DEFINE FIELD IF NOT EXISTS status ON employee TYPE string DEFAULT 'active'
    ASSERT $value INSIDE ['active', 'inactive'];
DEFINE FIELD IF NOT EXISTS createdBy ON employee TYPE option<record<user>>;
DEFINE FIELD IF NOT EXISTS createdAt ON employee TYPE int;
DEFINE FIELD IF NOT EXISTS updatedAt ON employee TYPE int;
DEFINE INDEX IF NOT EXISTS idx_employee_code ON employee FIELDS employeeCode UNIQUE;
DEFINE INDEX IF NOT EXISTS idx_employee_email ON employee FIELDS email UNIQUE;
DEFINE INDEX IF NOT EXISTS idx_employee_user ON employee FIELDS user UNIQUE;

-- ========== attendance ==========
DEFINE TABLE IF NOT EXISTS attendance SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS employee ON attendance TYPE record<employee>;
DEFINE FIELD IF NOT EXISTS day ON attendance TYPE int;
DEFINE FIELD IF NOT EXISTS checkIn ON attendance TYPE option<int>;
DEFINE FIELD IF NOT EXISTS checkOut ON attendance TYPE option<int>;
DEFINE FIELD IF NOT EXISTS totalHours ON attendance TYPE number DEFAULT 0;
DEFINE FIELD IF NOT EXISTS overtimeHours ON attendance TYPE number DEFAULT 0;
DEFINE FIELD IF NOT EXISTS attendanceStatus ON attendance TYPE string DEFAULT 'present'
    ASSERT $value INSIDE ['present', 'absent', 'leave', 'half-day'];
DEFINE FIELD IF NOT EXISTS createdBy ON attendance TYPE option<record<user>>;
DEFINE FIELD IF NOT EXISTS remarks ON attendance TYPE option<string>;
DEFINE FIELD IF NOT EXISTS createdAt ON attendance TYPE int;
DEFINE FIELD IF NOT EXISTS updatedAt ON attendance TYPE int;
DEFINE INDEX IF NOT EXISTS idx_attendance_employee_day ON attendance FIELDS employee, day UNIQUE;

-- ========== payroll ==========
DEFINE TABLE IF NOT EXISTS payroll SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS employee ON payroll TYPE record<employee>;
DEFINE FIELD IF NOT EXISTS month ON payroll TYPE int ASSERT $value >= 1 AND $value <= 12;
DEFINE FIELD IF NOT EXISTS year ON payroll TYPE int;
DEFINE FIELD IF NOT EXISTS salary ON payroll TYPE object;
DEFINE FIELD IF NOT EXISTS salary.basicSalary ON payroll TYPE number DEFAULT 0;
DEFINE FIELD IF NOT EXISTS salary.allowances ON payroll TYPE number DEFAULT 0;
DEFINE FIELD IF NOT EXISTS salary.bonuses ON payroll TYPE number DEFAULT 0;
DEFINE FIELD IF NOT EXISTS salary.deductions ON payroll TYPE number DEFAULT 0;
DEFINE FIELD IF NOT EXISTS calculations ON payroll TYPE object;
DEFINE FIELD IF NOT EXISTS calculations.grossSalary ON payroll TYPE number DEFAULT 0;
DEFINE FIELD IF NOT EXISTS calculations.netSalary ON payroll TYPE number DEFAULT 0;
DEFINE FIELD IF NOT EXISTS attendance ON payroll TYPE object;
DEFINE FIELD IF NOT EXISTS attendance.workingDays ON payroll TYPE int DEFAULT 0;
DEFINE FIELD IF NOT EXISTS attendance.presentDays ON payroll TYPE int DEFAULT 0;
DEFINE FIELD IF NOT EXISTS attendance.absentDays ON payroll TYPE int DEFAULT 0;
DEFINE FIELD IF NOT EXISTS paymentStatus ON payroll TYPE string DEFAULT 'pending'
    ASSERT $value INSIDE ['pending', 'paid', 'hold'];
DEFINE FIELD IF NOT EXISTS generatedBy ON payroll TYPE option<record<user>>;
DEFINE FIELD IF NOT EXISTS remarks ON payroll TYPE option<string>;
DEFINE FIELD IF NOT EXISTS status ON payroll TYPE string DEFAULT 'active'
    ASSERT $value INSIDE ['active', 'inactive'];
DEFINE FIELD IF NOT EXISTS createdAt ON payroll TYPE int;
DEFINE FIELD IF NOT EXISTS updatedAt ON payroll TYPE int;
DEFINE INDEX IF NOT EXISTS idx_payroll_period ON payroll FIELDS employee, month, year UNIQUE;

-- ========== client ==========
DEFINE TABLE IF NOT EXISTS client SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS name ON client TYPE string;
DEFINE FIELD IF NOT EXISTS email ON client TYPE string ASSERT string::is::email($value);
DEFINE FIELD IF NOT EXISTS password ON client TYPE string;
DEFINE FIELD IF NOT EXISTS avatar ON client TYPE string DEFAULT '';
DEFINE FIELD IF NOT EXISTS coverImage ON client TYPE string DEFAULT '';
DEFINE FIELD IF NOT EXISTS companyName ON client TYPE option<string>;
DEFINE FIELD IF NOT EXISTS phone ON client TYPE option<string>;
DEFINE FIELD IF NOT EXISTS address ON client TYPE option<string>;
DEFINE FIELD IF NOT EXISTS notes ON client TYPE option<string>;
DEFINE FIELD IF NOT EXISTS role ON client TYPE string DEFAULT 'client'
    ASSERT $value INSIDE ['admin', 'manager', 'employee', 'intern', 'client'];
DEFINE FIELD IF NOT EXISTS status ON client TYPE string DEFAULT 'active'
    ASSERT $value INSIDE ['active', 'inactive'];
DEFINE FIELD IF NOT EXISTS isVerified ON client TYPE bool DEFAULT false;
DEFINE FIELD IF NOT EXISTS createdAt ON client TYPE int;
DEFINE FIELD IF NOT EXISTS updatedAt ON client TYPE int;
DEFINE INDEX IF NOT EXISTS idx_client_email ON client FIELDS email UNIQUE;

-- ========== project ==========
DEFINE TABLE IF NOT EXISTS project SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS name ON project TYPE string;
DEFINE FIELD IF NOT EXISTS description ON project TYPE option<string>;
DEFINE FIELD IF NOT EXISTS client ON project TYPE option<record<client>>;
DEFINE FIELD IF NOT EXISTS team ON project TYPE array<record<employee>> DEFAULT [];
DEFINE FIELD IF NOT EXISTS startDate ON project TYPE option<int>;
DEFINE FIELD IF NOT EXISTS endDate ON project TYPE option<int>;
DEFINE FIELD IF NOT EXISTS priority ON project TYPE string DEFAULT 'medium'
    ASSERT $value INSIDE ['low', 'medium', 'high', 'urgent'];
DEFINE FIELD IF NOT EXISTS budget ON project TYPE number DEFAULT 0 ASSERT $value >= 0;
DEFINE FIELD IF NOT EXISTS status ON project TYPE string DEFAULT 'active'
    ASSERT $value INSIDE ['active', 'completed', 'on-hold', 'cancelled', 'inactive'];
DEFINE FIELD IF NOT EXISTS createdBy ON project TYPE option<record<user>>;
DEFINE FIELD IF NOT EXISTS assignedBy ON project TYPE option<record<user>>;
DEFINE FIELD IF NOT EXISTS createdAt ON project TYPE int;
DEFINE FIELD IF NOT EXISTS updatedAt ON project TYPE int;

-- ========== room ==========
DEFINE TABLE IF NOT EXISTS room SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS name ON room TYPE string;
DEFINE FIELD IF NOT EXISTS `type` ON room TYPE string DEFAULT 'meeting'
    ASSERT $value INSIDE ['meeting', 'office', 'conference', 'lab'];
DEFINE FIELD IF NOT EXISTS capacity ON room TYPE int DEFAULT 1 ASSERT $value >= 1;
DEFINE FIELD IF NOT EXISTS floor ON room TYPE option<string>;
DEFINE FIELD IF NOT EXISTS status ON room TYPE string DEFAULT 'available'
    ASSERT $value INSIDE ['available', 'occupied', 'maintenance', 'inactive'];
DEFINE FIELD IF NOT EXISTS assignedTo ON room TYPE option<string>;
DEFINE FIELD IF NOT EXISTS createdBy ON room TYPE option<record<user>>;
DEFINE FIELD IF NOT EXISTS remarks ON room TYPE option<string>;
DEFINE FIELD IF NOT EXISTS createdAt ON room TYPE int;
DEFINE FIELD IF NOT EXISTS updatedAt ON room TYPE int;
DEFINE INDEX IF NOT EXISTS idx_room_name ON room FIELDS name UNIQUE;

-- ========== asset ==========
DEFINE TABLE IF NOT EXISTS asset SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS name ON asset TYPE string;
DEFINE FIELD IF NOT EXISTS category ON asset TYPE string
    ASSERT $value INSIDE ['hardware', 'software', 'furniture', 'license'];
DEFINE FIELD IF NOT EXISTS serialNumber ON asset TYPE string;
DEFINE FIELD IF NOT EXISTS purchaseDate ON asset TYPE option<int>;
DEFINE FIELD IF NOT EXISTS warrantyExpiry ON asset TYPE option<int>;
DEFINE FIELD IF NOT EXISTS cost ON asset TYPE number DEFAULT 0 ASSERT $value >= 0;
DEFINE FIELD IF NOT EXISTS status ON asset TYPE string DEFAULT 'available'
    ASSERT $value INSIDE ['available', 'assigned', 'maintenance', 'retired'];
DEFINE FIELD IF NOT EXISTS assignedTo ON asset TYPE option<object>;
DEFINE FIELD IF NOT EXISTS assignedTo.model ON asset TYPE string
    ASSERT $value INSIDE ['Employee', 'Project', 'Room'];
DEFINE FIELD IF NOT EXISTS assignedTo.id ON asset TYPE string;
DEFINE FIELD IF NOT EXISTS location ON asset TYPE option<record<room>>;
DEFINE FIELD IF NOT EXISTS createdBy ON asset TYPE option<record<user>>;
DEFINE FIELD IF NOT EXISTS remarks ON asset TYPE option<string>;
DEFINE FIELD IF NOT EXISTS createdAt ON asset TYPE int;
DEFINE FIELD IF NOT EXISTS updatedAt ON asset TYPE int;
DEFINE INDEX IF NOT EXISTS idx_asset_serial ON asset FIELDS serialNumber UNIQUE;

-- ========== finance ==========
DEFINE TABLE IF NOT EXISTS finance SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS transactionType ON finance TYPE string
    ASSERT $value INSIDE ['income', 'expense'];
DEFINE FIELD IF NOT EXISTS amount ON finance TYPE number ASSERT $value > 0;
DEFINE FIELD IF NOT EXISTS description ON finance TYPE string;
DEFINE FIELD IF NOT EXISTS project ON finance TYPE option<record<project>>;
DEFINE FIELD IF NOT EXISTS client ON finance TYPE option<record<client>>;
DEFINE FIELD IF NOT EXISTS employee ON finance TYPE option<record<employee>>;
DEFINE FIELD IF NOT EXISTS transactionDate ON finance TYPE int;
DEFINE FIELD IF NOT EXISTS status ON finance TYPE string DEFAULT 'active'
    ASSERT $value INSIDE ['active', 'inactive'];
DEFINE FIELD IF NOT EXISTS createdBy ON finance TYPE record<user>;
DEFINE FIELD IF NOT EXISTS remarks ON finance TYPE option<string>;
DEFINE FIELD IF NOT EXISTS createdAt ON finance TYPE int;
DEFINE FIELD IF NOT EXISTS updatedAt ON finance TYPE int;

-- ========== report ==========
DEFINE TABLE IF NOT EXISTS report SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS reportType ON report TYPE string;
DEFINE FIELD IF NOT EXISTS month ON report TYPE option<int>;
DEFINE FIELD IF NOT EXISTS year ON report TYPE option<int>;
DEFINE FIELD IF NOT EXISTS project ON report TYPE option<record<project>>;
DEFINE FIELD IF NOT EXISTS employee ON report TYPE option<record<employee>>;
DEFINE FIELD IF NOT EXISTS client ON report TYPE option<record<client>>;
DEFINE FIELD IF NOT EXISTS data ON report FLEXIBLE TYPE object DEFAULT {};
DEFINE FIELD IF NOT EXISTS remarks ON report TYPE option<string>;
DEFINE FIELD IF NOT EXISTS generatedBy ON report TYPE record<user>;
DEFINE FIELD IF NOT EXISTS status ON report TYPE string DEFAULT 'active'
    ASSERT $value INSIDE ['active', 'inactive'];
DEFINE FIELD IF NOT EXISTS createdAt ON report TYPE int;
DEFINE FIELD IF NOT EXISTS updatedAt ON report TYPE int;

-- ========== notification ==========
DEFINE TABLE IF NOT EXISTS notification SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS notificationType ON notification TYPE string DEFAULT 'info'
    ASSERT $value INSIDE ['info', 'alert', 'reminder', 'system'];
DEFINE FIELD IF NOT EXISTS message ON notification TYPE string;
DEFINE FIELD IF NOT EXISTS recipient ON notification TYPE object;
DEFINE FIELD IF NOT EXISTS recipient.model ON notification TYPE string
    ASSERT $value INSIDE ['User', 'Employee', 'Client'];
DEFINE FIELD IF NOT EXISTS recipient.id ON notification TYPE string;
DEFINE FIELD IF NOT EXISTS recipientContact ON notification TYPE object DEFAULT {};
DEFINE FIELD IF NOT EXISTS recipientContact.email ON notification TYPE option<string>;
DEFINE FIELD IF NOT EXISTS recipientContact.phone ON notification TYPE option<string>;
DEFINE FIELD IF NOT EXISTS channels ON notification TYPE array<string> DEFAULT ['in-app']
    ASSERT $value ALLINSIDE ['in-app', 'email', 'sms'];
DEFINE FIELD IF NOT EXISTS deliveries ON notification TYPE array<object> DEFAULT [];
DEFINE FIELD IF NOT EXISTS deliveries.*.channel ON notification TYPE string
    ASSERT $value INSIDE ['in-app', 'email', 'sms'];
DEFINE FIELD IF NOT EXISTS deliveries.*.status ON notification TYPE string DEFAULT 'pending'
    ASSERT $value INSIDE ['pending', 'delivered', 'failed'];
DEFINE FIELD IF NOT EXISTS deliveries.*.deliveredAt ON notification TYPE option<int>;
DEFINE FIELD IF NOT EXISTS deliveries.*.error ON notification TYPE option<string>;
DEFINE FIELD IF NOT EXISTS status ON notification TYPE string DEFAULT 'unread'
    ASSERT $value INSIDE ['unread', 'read', 'archived'];
DEFINE FIELD IF NOT EXISTS createdBy ON notification TYPE option<record<user>>;
DEFINE FIELD IF NOT EXISTS sentBy ON notification TYPE option<record<user>>;
DEFINE FIELD IF NOT EXISTS remarks ON notification TYPE option<string>;
DEFINE FIELD IF NOT EXISTS createdAt ON notification TYPE int;
DEFINE FIELD IF NOT EXISTS updatedAt ON notification TYPE int;

-- ========== activity ==========
DEFINE TABLE IF NOT EXISTS activity SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS action ON activity TYPE string
    ASSERT $value INSIDE ['CREATE', 'UPDATE', 'DELETE', 'LOGIN', 'LOGOUT', 'ASSIGN', 'APPROVE'];
DEFINE FIELD IF NOT EXISTS module ON activity TYPE string;
DEFINE FIELD IF NOT EXISTS description ON activity TYPE string;
DEFINE FIELD IF NOT EXISTS performedBy ON activity TYPE record<user>;
DEFINE FIELD IF NOT EXISTS targetId ON activity TYPE option<string>;
DEFINE FIELD IF NOT EXISTS targetModel ON activity TYPE option<string>;
DEFINE FIELD IF NOT EXISTS ipAddress ON activity TYPE option<string>;
DEFINE FIELD IF NOT EXISTS userAgent ON activity TYPE option<string>;
DEFINE FIELD IF NOT EXISTS status ON activity TYPE string DEFAULT 'active'
    ASSERT $value INSIDE ['active', 'inactive'];
DEFINE FIELD IF NOT EXISTS createdAt ON activity TYPE int;

-- ========== setting ==========
DEFINE TABLE IF NOT EXISTS setting SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS companyName ON setting TYPE option<string>;
DEFINE FIELD IF NOT EXISTS companyEmail ON setting TYPE option<string>;
DEFINE FIELD IF NOT EXISTS companyPhone ON setting TYPE option<string>;
DEFINE FIELD IF NOT EXISTS companyAddress ON setting TYPE option<string>;
DEFINE FIELD IF NOT EXISTS logo ON setting TYPE option<string>;
DEFINE FIELD IF NOT EXISTS favicon ON setting TYPE option<string>;
DEFINE FIELD IF NOT EXISTS timezone ON setting TYPE option<string>;
DEFINE FIELD IF NOT EXISTS currency ON setting TYPE option<string>;
DEFINE FIELD IF NOT EXISTS dateFormat ON setting TYPE option<string>;
DEFINE FIELD IF NOT EXISTS language ON setting TYPE option<string>;
DEFINE FIELD IF NOT EXISTS smtpHost ON setting TYPE option<string>;
DEFINE FIELD IF NOT EXISTS smtpPort ON setting TYPE option<int>;
DEFINE FIELD IF NOT EXISTS smtpUser ON setting TYPE option<string>;
DEFINE FIELD IF NOT EXISTS smtpFromEmail ON setting TYPE option<string>;
DEFINE FIELD IF NOT EXISTS passwordMinLength ON setting TYPE int DEFAULT 8;
DEFINE FIELD IF NOT EXISTS sessionTimeout ON setting TYPE option<int>;
DEFINE FIELD IF NOT EXISTS enableTwoFactor ON setting TYPE bool DEFAULT false;
DEFINE FIELD IF NOT EXISTS emailEnabled ON setting TYPE bool DEFAULT true;
DEFINE FIELD IF NOT EXISTS smsEnabled ON setting TYPE bool DEFAULT false;
DEFINE FIELD IF NOT EXISTS inAppEnabled ON setting TYPE bool DEFAULT true;
DEFINE FIELD IF NOT EXISTS status ON setting TYPE string DEFAULT 'active'
    ASSERT $value INSIDE ['active', 'inactive'];
DEFINE FIELD IF NOT EXISTS updatedBy ON setting TYPE option<record<user>>;
DEFINE FIELD IF NOT EXISTS updatedAt ON setting TYPE int;
"#;
