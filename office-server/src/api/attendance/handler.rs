//! Attendance API Handlers
//!
//! 日报矩阵按 (employee, day) 补全虚拟行；虚拟行更新走 upsert，
//! 删除直接拒绝。打卡自助接口只操作调用者自己的当日记录。

use std::collections::HashMap;

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use surrealdb::RecordId;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{
    Attendance, AttendanceRow, AttendanceRowId, AttendanceStatus, AttendanceUpdate, Employee,
    EmployeeBrief, derive_hours, parse_enum,
};
use crate::db::repository::attendance::AttendanceWrite;
use crate::db::repository::{RepoError, parse_record_id};
use crate::utils::error::ok;
use crate::utils::time;
use crate::utils::{AppError, AppResponse, AppResult, Paged};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub q: Option<String>,
    pub status: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyRecordsQuery {
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

/// 日报矩阵：范围内每个 (employee, day) 一行，无记录的格子补虚拟行
pub async fn matrix(
    State(state): State<ServerState>,
    Query(query): Query<MatrixQuery>,
) -> AppResult<Json<AppResponse<Paged<AttendanceRow>>>> {
    let today = time::today();
    let from = query
        .from
        .as_deref()
        .map(time::parse_date)
        .transpose()?
        .unwrap_or(today);
    let to = query
        .to
        .as_deref()
        .map(time::parse_date)
        .transpose()?
        .unwrap_or(today);
    let status = query
        .status
        .as_deref()
        .map(|s| parse_enum::<AttendanceStatus>(s, "status"))
        .transpose()
        .map_err(AppError::validation)?;

    let range_start = time::day_start_millis(from);
    let range_end = time::day_end_millis(to);
    let days = time::enumerate_days(from, to);

    let mut employees = state.employees().find_all().await?;
    if let Some(q) = &query.q {
        let q = q.to_lowercase();
        employees.retain(|e| {
            e.name.to_lowercase().contains(&q) || e.employee_code.to_lowercase().contains(&q)
        });
    }

    let stored = state.attendance().find_in_range(range_start, range_end).await?;
    let mut by_cell: HashMap<(String, i64), Attendance> = stored
        .into_iter()
        .map(|record| ((record.employee.key().to_string(), record.day), record))
        .collect();

    let mut rows: Vec<AttendanceRow> = Vec::with_capacity(employees.len() * days.len());
    for employee in &employees {
        let Some(brief) = EmployeeBrief::from_employee(employee) else {
            continue;
        };
        for &day in &days {
            let row = match by_cell.remove(&(brief.id.key().to_string(), day)) {
                Some(record) => stored_row(record, brief.clone()),
                None => AttendanceRow {
                    id: AttendanceRowId::virtual_for(&brief.id, day),
                    employee: brief.clone(),
                    day,
                    check_in: None,
                    check_out: None,
                    total_hours: 0.0,
                    attendance_status: AttendanceStatus::Absent,
                },
            };
            rows.push(row);
        }
    }

    if let Some(status) = status {
        rows.retain(|row| row.attendance_status == status);
    }
    // stable sort keeps per-day employee order intact
    rows.sort_by(|a, b| b.day.cmp(&a.day));

    let total = rows.len();
    let paginate = query.page.is_some() || query.limit.is_some();
    let (page, limit) = if paginate {
        let page = query.page.unwrap_or(1).max(1);
        let limit = query.limit.unwrap_or(31).clamp(1, 100);
        let start = (page - 1) * limit;
        rows = rows.into_iter().skip(start).take(limit).collect();
        (page, limit)
    } else {
        (1, total.max(1))
    };

    Ok(ok(
        Paged::new(rows, total, page, limit),
        "Attendance fetched",
    ))
}

fn stored_row(record: Attendance, brief: EmployeeBrief) -> AttendanceRow {
    let id = match record.id {
        Some(id) => AttendanceRowId::Stored(id),
        None => AttendanceRowId::virtual_for(&brief.id, record.day),
    };
    AttendanceRow {
        id,
        employee: brief,
        day: record.day,
        check_in: record.check_in,
        check_out: record.check_out,
        total_hours: record.total_hours,
        attendance_status: record.attendance_status,
    }
}

/// 调用者的员工档案，考勤自助接口共用
async fn caller_employee(state: &ServerState, current: &CurrentUser) -> AppResult<Employee> {
    let user = parse_record_id(&current.id)?;
    state
        .employees()
        .find_by_user(&user)
        .await?
        .ok_or_else(|| AppError::not_found("Employee profile not found"))
}

/// `GET /attendance/me` - 个人落盘记录，按 day 倒序分页
pub async fn my_records(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Query(query): Query<MyRecordsQuery>,
) -> AppResult<Json<AppResponse<Paged<Attendance>>>> {
    let employee = caller_employee(&state, &current).await?;
    let employee_id = employee
        .id
        .ok_or_else(|| AppError::internal("Employee record has no id"))?;

    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(31).clamp(1, 100);
    let (records, total) = state
        .attendance()
        .list_for_employee(&employee_id, query.page, query.limit)
        .await?;

    Ok(ok(
        Paged::new(records, total, page, limit),
        "Attendance fetched",
    ))
}

/// `POST /attendance/check-in` - 当日首次打卡
pub async fn check_in(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
) -> AppResult<Json<AppResponse<Attendance>>> {
    let employee = caller_employee(&state, &current).await?;
    let employee_id = employee
        .id
        .ok_or_else(|| AppError::internal("Employee record has no id"))?;

    let day = time::day_start_millis(time::today());
    if state
        .attendance()
        .find_for_day(&employee_id, day)
        .await?
        .is_some()
    {
        return Err(AppError::conflict("Already checked in"));
    }

    let write = AttendanceWrite {
        check_in: Some(time::now_millis()),
        attendance_status: AttendanceStatus::Present,
        ..Default::default()
    };
    let created_by = parse_record_id(&current.id).ok();
    let record = state
        .attendance()
        .create_for_day(employee_id, day, write, created_by)
        .await
        .map_err(|e| match e {
            // 并发打卡被唯一索引拦下，对外同一条 409
            RepoError::Duplicate(_) => AppError::conflict("Already checked in"),
            other => other.into(),
        })?;

    Ok(ok(record, "Checked in"))
}

/// `POST /attendance/check-out` - 盖上 checkOut 并重算工时
pub async fn check_out(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
) -> AppResult<Json<AppResponse<Attendance>>> {
    let employee = caller_employee(&state, &current).await?;
    let employee_id = employee
        .id
        .ok_or_else(|| AppError::internal("Employee record has no id"))?;

    let day = time::day_start_millis(time::today());
    let mut record = state
        .attendance()
        .find_for_day(&employee_id, day)
        .await?
        .ok_or_else(|| AppError::not_found("Check-in not found"))?;

    record.check_out = Some(time::now_millis());
    record.recompute_hours();

    let stored_id = record
        .id
        .clone()
        .ok_or_else(|| AppError::internal("Attendance record has no id"))?;
    let updated = state
        .attendance()
        .update(&stored_id, write_from_record(&record))
        .await?;

    Ok(ok(updated, "Checked out"))
}

/// `PATCH /attendance/{id}` - 存量记录就地改，虚拟行按 upsert 落盘
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<AttendanceUpdate>,
) -> AppResult<Json<AppResponse<Attendance>>> {
    let row_id: AttendanceRowId = id.parse().map_err(AppError::Validation)?;
    let status = payload
        .attendance_status
        .as_deref()
        .map(|s| parse_enum::<AttendanceStatus>(s, "status"))
        .transpose()
        .map_err(AppError::validation)?;

    match row_id {
        AttendanceRowId::Stored(stored_id) => {
            let mut record = state
                .attendance()
                .find_by_id(&stored_id)
                .await?
                .ok_or_else(|| AppError::not_found("Attendance record not found"))?;
            apply_update(&mut record, &payload, status);
            let updated = state
                .attendance()
                .update(&stored_id, write_from_record(&record))
                .await?;
            Ok(ok(updated, "Attendance updated"))
        }
        AttendanceRowId::Virtual { employee, day } => {
            let employee_id = RecordId::from(("employee", employee.as_str()));
            state
                .employees()
                .find_by_id(&employee_id.to_string())
                .await?
                .ok_or_else(|| AppError::not_found("Employee not found"))?;

            // 同格子此刻可能已有落盘记录，upsert 语义
            match state.attendance().find_for_day(&employee_id, day).await? {
                Some(mut record) => {
                    apply_update(&mut record, &payload, status);
                    let stored_id = record
                        .id
                        .clone()
                        .ok_or_else(|| AppError::internal("Attendance record has no id"))?;
                    let updated = state
                        .attendance()
                        .update(&stored_id, write_from_record(&record))
                        .await?;
                    Ok(ok(updated, "Attendance updated"))
                }
                None => {
                    let (total_hours, overtime_hours) = payload
                        .check_in
                        .zip(payload.check_out)
                        .and_then(|(check_in, check_out)| derive_hours(check_in, check_out))
                        .unwrap_or((0.0, 0.0));
                    let write = AttendanceWrite {
                        check_in: payload.check_in,
                        check_out: payload.check_out,
                        attendance_status: status.unwrap_or_default(),
                        remarks: payload.remarks.clone(),
                        total_hours,
                        overtime_hours,
                    };
                    let record = state
                        .attendance()
                        .create_for_day(employee_id, day, write, None)
                        .await?;
                    Ok(ok(record, "Attendance updated"))
                }
            }
        }
    }
}

fn apply_update(record: &mut Attendance, payload: &AttendanceUpdate, status: Option<AttendanceStatus>) {
    if payload.check_in.is_some() {
        record.check_in = payload.check_in;
    }
    if payload.check_out.is_some() {
        record.check_out = payload.check_out;
    }
    if let Some(status) = status {
        record.attendance_status = status;
    }
    if payload.remarks.is_some() {
        record.remarks = payload.remarks.clone();
    }
    record.recompute_hours();
}

fn write_from_record(record: &Attendance) -> AttendanceWrite {
    AttendanceWrite {
        check_in: record.check_in,
        check_out: record.check_out,
        attendance_status: record.attendance_status,
        remarks: record.remarks.clone(),
        total_hours: record.total_hours,
        overtime_hours: record.overtime_hours,
    }
}

/// `DELETE /attendance/{id}` - 虚拟行无物可删
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Attendance>>> {
    let row_id: AttendanceRowId = id.parse().map_err(AppError::Validation)?;
    match row_id {
        AttendanceRowId::Stored(stored_id) => {
            let deleted = state.attendance().delete(&stored_id).await?;
            Ok(ok(deleted, "Attendance deleted"))
        }
        AttendanceRowId::Virtual { .. } => {
            Err(AppError::validation("Cannot delete unsaved record"))
        }
    }
}
