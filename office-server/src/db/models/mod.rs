//! Database Models

use serde::{Deserialize, Serialize};

// Serde helpers
pub mod serde_helpers;

// Accounts
pub mod client;
pub mod user;

// HR Domain
pub mod attendance;
pub mod employee;
pub mod payroll;

// Office Resources
pub mod asset;
pub mod project;
pub mod room;

// Finance & Reporting
pub mod finance;
pub mod report;

// System
pub mod activity;
pub mod notification;
pub mod setting;

/// 通用记录生命周期 (软删除置 inactive)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    #[default]
    Active,
    Inactive,
}

// Re-exports
pub use activity::{Activity, ActivityAction};
pub use asset::{Asset, AssetAssign, AssetAssignee, AssetCategory, AssetCreate, AssetStatus, AssetUpdate};
pub use attendance::{
    derive_hours, Attendance, AttendanceRow, AttendanceRowId, AttendanceStatus, AttendanceUpdate,
};
pub use client::{Client, ClientCreate, ClientId, ClientProfileUpdate, ClientUpdate};
pub use employee::{
    Employee, EmployeeBrief, EmployeeCreate, EmployeeId, EmployeeUpdate, EmploymentType,
};
pub use finance::{FinanceCreate, FinanceSummary, FinanceTransaction, FinanceUpdate, TransactionType};
pub use notification::{
    Delivery, DeliveryChannel, DeliveryStatus, Notification, NotificationCreate, NotificationIds,
    NotificationStatus, NotificationType, RecipientContact, RecipientInput, RecipientRef,
};
pub use payroll::{
    AttendanceSnapshot, PaymentStatus, Payroll, PayrollCreate, PayrollStats, PayrollUpdate,
    SalaryCalculations, SalaryInput, SalaryPatch,
};
pub use project::{
    Project, ProjectCreate, ProjectPriority, ProjectStats, ProjectStatus, ProjectUpdate,
};
pub use report::{Report, ReportCreate, ReportUpdate};
pub use room::{Room, RoomCreate, RoomStatus, RoomType, RoomUpdate};
pub use setting::{Setting, SettingUpdate};
pub use user::{ProfileUpdate, User, UserCreate, UserId, UserRole, UserStatus, UserUpdate};

/// 按 serde 形式解析枚举字符串，供 handler 校验请求里的枚举字段
pub fn parse_enum<T: serde::de::DeserializeOwned>(value: &str, what: &str) -> Result<T, String> {
    serde_json::from_value(serde_json::Value::String(value.to_string()))
        .map_err(|_| format!("Invalid {}: {}", what, value))
}
