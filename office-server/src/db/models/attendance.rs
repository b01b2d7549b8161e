//! Attendance Model
//!
//! 考勤记录按 (employee, day) 唯一，day 为 UTC 日历日零点 millis。
//! 日报矩阵中无存储记录的格子由虚拟行补位，虚拟行 ID 编码
//! 员工与日期，更新时按 upsert 语义落盘，删除则直接拒绝。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};
use surrealdb::RecordId;

use super::employee::{EmployeeBrief, EmployeeId};
use super::user::UserId;
use super::serde_helpers;
use crate::utils::money;

/// 出勤状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum AttendanceStatus {
    #[default]
    Present,
    Absent,
    Leave,
    HalfDay,
}

/// Attendance record matching SurrealDB schema
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendance {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub employee: EmployeeId,
    /// UTC 日零点 Unix millis
    pub day: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_in: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_out: Option<i64>,
    #[serde(default)]
    pub total_hours: f64,
    #[serde(default)]
    pub overtime_hours: f64,
    #[serde(default)]
    pub attendance_status: AttendanceStatus,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub created_by: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

impl Attendance {
    /// 重算工时：checkIn/checkOut 齐备且区间为正时覆盖，否则保持原值
    pub fn recompute_hours(&mut self) {
        if let (Some(check_in), Some(check_out)) = (self.check_in, self.check_out)
            && let Some((total, overtime)) = derive_hours(check_in, check_out)
        {
            self.total_hours = total;
            self.overtime_hours = overtime;
        }
    }
}

/// checkIn/checkOut → (totalHours, overtimeHours)
///
/// 区间非正时返回 `None` (调用方保持既有值)；加班从 8 小时起算。
pub fn derive_hours(check_in: i64, check_out: i64) -> Option<(f64, f64)> {
    let diff_ms = check_out - check_in;
    if diff_ms <= 0 {
        return None;
    }
    let hours = diff_ms as f64 / (1000.0 * 60.0 * 60.0);
    let total = money::round2(hours);
    let overtime = money::round2(hours - 8.0).max(0.0);
    Some((total, overtime))
}

/// Update attendance payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceUpdate {
    pub check_in: Option<i64>,
    pub check_out: Option<i64>,
    pub attendance_status: Option<String>,
    pub remarks: Option<String>,
}

/// 日报矩阵行 ID：落盘记录或虚拟占位
///
/// 虚拟形式为 `virtual-<employee-key>-<day-millis>`，对外始终
/// 以字符串呈现，更新/删除接口先解析再分派。
#[derive(Debug, Clone, PartialEq)]
pub enum AttendanceRowId {
    Stored(RecordId),
    Virtual { employee: String, day: i64 },
}

impl AttendanceRowId {
    pub fn virtual_for(employee: &EmployeeId, day: i64) -> Self {
        AttendanceRowId::Virtual {
            employee: employee.key().to_string(),
            day,
        }
    }
}

impl fmt::Display for AttendanceRowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttendanceRowId::Stored(id) => write!(f, "{}", id),
            AttendanceRowId::Virtual { employee, day } => {
                write!(f, "virtual-{}-{}", employee, day)
            }
        }
    }
}

impl FromStr for AttendanceRowId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(rest) = s.strip_prefix("virtual-") {
            // 末尾的 millis 不含 '-'，从右切分保证 key 中的连字符安全
            let (employee, day) = rest
                .rsplit_once('-')
                .ok_or_else(|| format!("Invalid virtual attendance ID: {}", s))?;
            if employee.is_empty() {
                return Err(format!("Invalid virtual attendance ID: {}", s));
            }
            let day: i64 = day
                .parse()
                .map_err(|_| format!("Invalid virtual attendance ID: {}", s))?;
            return Ok(AttendanceRowId::Virtual {
                employee: employee.to_string(),
                day,
            });
        }
        s.parse::<RecordId>()
            .map(AttendanceRowId::Stored)
            .map_err(|_| format!("Invalid attendance ID: {}", s))
    }
}

impl Serialize for AttendanceRowId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// 日报矩阵行：真实记录与虚拟占位的统一展示形状
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRow {
    pub id: AttendanceRowId,
    pub employee: EmployeeBrief,
    pub day: i64,
    pub check_in: Option<i64>,
    pub check_out: Option<i64>,
    pub total_hours: f64,
    pub attendance_status: AttendanceStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR_MS: i64 = 60 * 60 * 1000;

    #[test]
    fn test_derive_hours_with_overtime() {
        // 09:00 -> 18:30
        let check_in = 9 * HOUR_MS;
        let check_out = 18 * HOUR_MS + 30 * 60 * 1000;
        assert_eq!(derive_hours(check_in, check_out), Some((9.5, 1.5)));
    }

    #[test]
    fn test_derive_hours_no_overtime() {
        let check_in = 9 * HOUR_MS;
        assert_eq!(derive_hours(check_in, check_in + 8 * HOUR_MS), Some((8.0, 0.0)));
        assert_eq!(derive_hours(check_in, check_in + 4 * HOUR_MS), Some((4.0, 0.0)));
    }

    #[test]
    fn test_derive_hours_invalid_interval() {
        assert_eq!(derive_hours(10 * HOUR_MS, 9 * HOUR_MS), None);
        assert_eq!(derive_hours(10 * HOUR_MS, 10 * HOUR_MS), None);
    }

    #[test]
    fn test_recompute_keeps_previous_on_invalid() {
        let mut record = Attendance {
            id: None,
            employee: RecordId::from(("employee", "e1")),
            day: 0,
            check_in: Some(9 * HOUR_MS),
            check_out: Some(19 * HOUR_MS),
            total_hours: 0.0,
            overtime_hours: 0.0,
            attendance_status: AttendanceStatus::Present,
            created_by: None,
            remarks: None,
            created_at: 0,
            updated_at: 0,
        };
        record.recompute_hours();
        assert_eq!(record.total_hours, 10.0);
        assert_eq!(record.overtime_hours, 2.0);

        // later edit makes the interval invalid: previous values survive
        record.check_out = Some(8 * HOUR_MS);
        record.recompute_hours();
        assert_eq!(record.total_hours, 10.0);
        assert_eq!(record.overtime_hours, 2.0);
    }

    #[test]
    fn test_row_id_round_trip() {
        let employee = RecordId::from(("employee", "k9x2"));
        let virtual_id = AttendanceRowId::virtual_for(&employee, 1740787200000);
        assert_eq!(virtual_id.to_string(), "virtual-k9x2-1740787200000");
        assert_eq!(
            virtual_id.to_string().parse::<AttendanceRowId>().unwrap(),
            virtual_id
        );

        let stored: AttendanceRowId = "attendance:abc123".parse().unwrap();
        assert!(matches!(stored, AttendanceRowId::Stored(_)));
        assert_eq!(stored.to_string(), "attendance:abc123");
    }

    #[test]
    fn test_row_id_rejects_garbage() {
        assert!("virtual-".parse::<AttendanceRowId>().is_err());
        assert!("virtual--123".parse::<AttendanceRowId>().is_err());
        assert!("virtual-e1-notanumber".parse::<AttendanceRowId>().is_err());
        assert!("not a record id".parse::<AttendanceRowId>().is_err());
    }
}
