//! Payroll API Handlers
//!
//! 每 (employee, month, year) 至多一张工资单；金额永远由输入
//! 重算，考勤快照在生成时刻固化。

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{
    PaymentStatus, Payroll, PayrollCreate, PayrollStats, PayrollUpdate, parse_enum,
};
use crate::db::repository::payroll::PayrollFilter;
use crate::db::repository::{RepoError, page_window, parse_record_id};
use crate::utils::error::{PageMeta, created, ok};
use crate::utils::time;
use crate::utils::{AppError, AppResponse, AppResult};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollListQuery {
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub employee: Option<String>,
    pub payment_status: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

/// 工资列表载荷：分页数据 + 完整过滤集上的看板统计
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollListData {
    pub items: Vec<Payroll>,
    pub meta: PageMeta,
    pub stats: PayrollStats,
}

/// Generate a payroll record for a period
pub async fn create(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<PayrollCreate>,
) -> AppResult<(StatusCode, Json<AppResponse<Payroll>>)> {
    let employee_id = payload
        .employee
        .as_deref()
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| AppError::validation("Employee is required"))?;

    let employee = state
        .employees()
        .find_by_id(employee_id)
        .await?
        .ok_or_else(|| AppError::not_found("Employee not found"))?;
    let employee_id = employee
        .id
        .ok_or_else(|| AppError::internal("Employee record has no id"))?;

    // 周期缺省为当前 UTC 月份
    let today = time::today();
    let month = match payload.month {
        Some(m) if (1..=12).contains(&m) => m as u32,
        Some(m) => return Err(AppError::validation(format!("Invalid month: {}", m))),
        None => today.month(),
    };
    let year = payload.year.map(|y| y as i32).unwrap_or_else(|| today.year());

    if state
        .payrolls()
        .exists_for_period(&employee_id, month, year)
        .await?
    {
        return Err(AppError::conflict("Payroll for this period already exists"));
    }

    let (period_start, period_end) = time::month_range(year, month)?;
    let snapshot = state
        .attendance()
        .snapshot_for_period(&employee_id, period_start, period_end)
        .await?;

    let calculations = payload.salary.calculate();
    let generated_by = parse_record_id(&current.id)?;

    let payroll = state
        .payrolls()
        .create(
            employee_id,
            month,
            year,
            payload.salary,
            calculations,
            snapshot,
            generated_by,
            payload.remarks,
        )
        .await
        .map_err(|e| match e {
            // 并发生成由唯一索引兜底，对外同一条 409
            RepoError::Duplicate(_) => {
                AppError::conflict("Payroll for this period already exists")
            }
            other => other.into(),
        })?;

    Ok(created(payroll, "Payroll generated"))
}

/// List payrolls with filters and dashboard stats
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<PayrollListQuery>,
) -> AppResult<Json<AppResponse<PayrollListData>>> {
    let employee = query
        .employee
        .as_deref()
        .map(parse_record_id)
        .transpose()?;
    let payment_status = query
        .payment_status
        .as_deref()
        .map(|s| parse_enum::<PaymentStatus>(s, "paymentStatus"))
        .transpose()
        .map_err(AppError::validation)?;

    let (page, limit, _) = page_window(query.page, query.limit, 10);
    let result = state
        .payrolls()
        .list(PayrollFilter {
            month: query.month,
            year: query.year,
            employee,
            payment_status,
            page: query.page,
            limit: query.limit,
        })
        .await?;

    Ok(ok(
        PayrollListData {
            items: result.items,
            meta: PageMeta {
                total: result.total,
                page,
                limit,
            },
            stats: result.stats,
        },
        "Payrolls fetched",
    ))
}

/// `GET /payroll/me` - 调用者自己的有效工资单
pub async fn my_payrolls(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
) -> AppResult<Json<AppResponse<Vec<Payroll>>>> {
    let user = parse_record_id(&current.id)?;
    let employee = state
        .employees()
        .find_by_user(&user)
        .await?
        .ok_or_else(|| AppError::not_found("Employee profile not found"))?;
    let employee_id = employee
        .id
        .ok_or_else(|| AppError::internal("Employee record has no id"))?;

    let payrolls = state.payrolls().list_for_employee(&employee_id).await?;
    Ok(ok(payrolls, "Payrolls fetched"))
}

/// Get payroll by id. 软删记录仍可直取。
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Payroll>>> {
    let thing = parse_record_id(&id)?;
    let payroll = state
        .payrolls()
        .find_by_id(&thing)
        .await?
        .ok_or_else(|| AppError::not_found("Payroll not found"))?;
    Ok(ok(payroll, "Payroll fetched"))
}

/// Update salary inputs / remarks / payment status, amounts recomputed
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<PayrollUpdate>,
) -> AppResult<Json<AppResponse<Payroll>>> {
    let thing = parse_record_id(&id)?;
    let existing = state
        .payrolls()
        .find_by_id(&thing)
        .await?
        .ok_or_else(|| AppError::not_found("Payroll not found"))?;

    let payment_status = payload
        .payment_status
        .as_deref()
        .map(|s| parse_enum::<PaymentStatus>(s, "paymentStatus"))
        .transpose()
        .map_err(AppError::validation)?;

    let salary = payload
        .salary
        .unwrap_or_default()
        .apply(existing.salary);
    let calculations = salary.calculate();

    let payroll = state
        .payrolls()
        .update(&thing, salary, calculations, payload.remarks, payment_status)
        .await?;
    Ok(ok(payroll, "Payroll updated"))
}

/// `PATCH /payroll/{id}/pay`
pub async fn mark_paid(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Payroll>>> {
    let thing = parse_record_id(&id)?;
    let payroll = state.payrolls().mark_paid(&thing).await?;
    Ok(ok(payroll, "Payroll marked as paid"))
}

/// Soft delete
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Payroll>>> {
    let thing = parse_record_id(&id)?;
    let payroll = state.payrolls().soft_delete(&thing).await?;
    Ok(ok(payroll, "Payroll deleted"))
}
