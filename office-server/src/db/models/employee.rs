//! Employee Profile Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::RecordStatus;
use super::serde_helpers;
use super::user::UserId;

/// Employee ID type
pub type EmployeeId = RecordId;

/// 雇佣类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum EmploymentType {
    #[default]
    FullTime,
    PartTime,
    Contract,
    Intern,
}

/// Employee profile matching SurrealDB schema
///
/// 每个 user 至多一份档案；employeeCode 与 email 全局唯一。
/// `name` 是创建时关联 user 姓名的快照，用于搜索与考勤矩阵。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<EmployeeId>,
    #[serde(with = "serde_helpers::record_id")]
    pub user: UserId,
    pub employee_code: String,
    pub name: String,
    pub email: String,
    pub designation: String,
    pub department: String,
    #[serde(default)]
    pub employment_type: EmploymentType,
    #[serde(default)]
    pub salary: f64,
    /// Unix millis
    #[serde(default)]
    pub joining_date: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualifications: Option<String>,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub cv_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default)]
    pub status: RecordStatus,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub created_by: Option<UserId>,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

/// Create employee payload
///
/// `user` 缺省为调用者自己的账户。
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeCreate {
    pub user: Option<String>,
    pub designation: Option<String>,
    pub department: Option<String>,
    pub employment_type: Option<String>,
    pub salary: Option<f64>,
    pub joining_date: Option<i64>,
    pub qualifications: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub avatar_url: Option<String>,
    pub cv_url: Option<String>,
}

/// Update employee payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeUpdate {
    pub name: Option<String>,
    pub designation: Option<String>,
    pub department: Option<String>,
    pub employment_type: Option<String>,
    pub salary: Option<f64>,
    pub joining_date: Option<i64>,
    pub qualifications: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub avatar_url: Option<String>,
    pub cv_url: Option<String>,
}

/// 考勤矩阵使用的员工摘要投影
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeBrief {
    #[serde(with = "serde_helpers::record_id")]
    pub id: EmployeeId,
    pub name: String,
    pub employee_code: String,
    pub designation: String,
}

impl EmployeeBrief {
    /// 空字段回退到占位值，矩阵行始终有可显示的摘要
    pub fn from_employee(emp: &Employee) -> Option<Self> {
        let id = emp.id.clone()?;
        Some(Self {
            id,
            name: if emp.name.is_empty() {
                "Staff Member".to_string()
            } else {
                emp.name.clone()
            },
            employee_code: if emp.employee_code.is_empty() {
                "N/A".to_string()
            } else {
                emp.employee_code.clone()
            },
            designation: if emp.designation.is_empty() {
                "Staff".to_string()
            } else {
                emp.designation.clone()
            },
        })
    }
}
