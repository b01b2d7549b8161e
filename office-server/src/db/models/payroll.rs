//! Payroll Model
//!
//! 每 (employee, month, year) 至多一张工资单。calculations 永远
//! 由 salary 输入重算得出，绝不信任调用方传入的毛/净值。

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::employee::EmployeeId;
use super::user::UserId;
use super::{serde_helpers, RecordStatus};
use crate::utils::money::{to_decimal, to_f64};

/// 发放状态
///
/// pending → paid 仅经显式标记；hold 为管理员手工冻结态。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Hold,
}

/// 工资输入项，各项缺省 0
///
/// 负值不在此层拒绝 (见 DESIGN.md)。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SalaryInput {
    #[serde(default)]
    pub basic_salary: f64,
    #[serde(default)]
    pub allowances: f64,
    #[serde(default)]
    pub bonuses: f64,
    #[serde(default)]
    pub deductions: f64,
}

impl SalaryInput {
    /// gross = round2(basic + allowances + bonuses)
    /// net = round2(gross − deductions)
    pub fn calculate(&self) -> SalaryCalculations {
        let gross = to_f64(
            to_decimal(self.basic_salary) + to_decimal(self.allowances) + to_decimal(self.bonuses),
        );
        let net = to_f64(to_decimal(gross) - to_decimal(self.deductions));
        SalaryCalculations {
            gross_salary: gross,
            net_salary: net,
        }
    }
}

/// 派生金额，落库前由 [`SalaryInput::calculate`] 重算
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SalaryCalculations {
    #[serde(default)]
    pub gross_salary: f64,
    #[serde(default)]
    pub net_salary: f64,
}

/// 生成时刻的考勤快照，之后的考勤修改不回写
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSnapshot {
    #[serde(default)]
    pub working_days: u32,
    #[serde(default)]
    pub present_days: u32,
    #[serde(default)]
    pub absent_days: u32,
}

/// Payroll record matching SurrealDB schema
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payroll {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub employee: EmployeeId,
    pub month: u32,
    pub year: i32,
    #[serde(default)]
    pub salary: SalaryInput,
    #[serde(default)]
    pub calculations: SalaryCalculations,
    #[serde(default)]
    pub attendance: AttendanceSnapshot,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub generated_by: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    #[serde(default)]
    pub status: RecordStatus,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

/// Generate payroll payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollCreate {
    pub employee: Option<String>,
    pub month: Option<i64>,
    pub year: Option<i64>,
    #[serde(default)]
    pub salary: SalaryInput,
    pub remarks: Option<String>,
}

/// 工资输入的部分更新，仅覆盖出现的项
#[derive(Debug, Clone, Copy, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SalaryPatch {
    pub basic_salary: Option<f64>,
    pub allowances: Option<f64>,
    pub bonuses: Option<f64>,
    pub deductions: Option<f64>,
}

impl SalaryPatch {
    pub fn apply(&self, base: SalaryInput) -> SalaryInput {
        SalaryInput {
            basic_salary: self.basic_salary.unwrap_or(base.basic_salary),
            allowances: self.allowances.unwrap_or(base.allowances),
            bonuses: self.bonuses.unwrap_or(base.bonuses),
            deductions: self.deductions.unwrap_or(base.deductions),
        }
    }
}

/// Update payroll payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollUpdate {
    pub salary: Option<SalaryPatch>,
    pub remarks: Option<String>,
    pub payment_status: Option<String>,
}

/// 工资列表的看板统计，基于完整过滤集而非当前页
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PayrollStats {
    #[serde(default)]
    pub total_net: f64,
    #[serde(default)]
    pub paid_count: usize,
    #[serde(default)]
    pub pending_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_gross_and_net() {
        let salary = SalaryInput {
            basic_salary: 50000.0,
            allowances: 5000.0,
            bonuses: 0.0,
            deductions: 2000.0,
        };
        let calc = salary.calculate();
        assert_eq!(calc.gross_salary, 55000.0);
        assert_eq!(calc.net_salary, 53000.0);
    }

    #[test]
    fn test_calculate_is_idempotent() {
        let salary = SalaryInput {
            basic_salary: 41333.33,
            allowances: 1250.405,
            bonuses: 99.99,
            deductions: 500.0,
        };
        let first = salary.calculate();
        let second = salary.calculate();
        assert_eq!(first, second);
        assert_eq!(first.gross_salary, 42683.73);
        assert_eq!(first.net_salary, 42183.73);
    }

    #[test]
    fn test_negative_deductions_add_to_net() {
        // negative deduction acts as an addition, preserved as-is
        let salary = SalaryInput {
            basic_salary: 1000.0,
            allowances: 0.0,
            bonuses: 0.0,
            deductions: -250.0,
        };
        assert_eq!(salary.calculate().net_salary, 1250.0);
    }

    #[test]
    fn test_salary_patch_partial_overlay() {
        let base = SalaryInput {
            basic_salary: 50000.0,
            allowances: 3000.0,
            bonuses: 2000.0,
            deductions: 2000.0,
        };
        let patch = SalaryPatch {
            deductions: Some(0.0),
            ..Default::default()
        };
        let merged = patch.apply(base);
        assert_eq!(merged.basic_salary, 50000.0);
        assert_eq!(merged.deductions, 0.0);
        assert_eq!(merged.calculate().net_salary, 55000.0);
    }
}
