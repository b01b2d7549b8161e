//! Employee API Handlers

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{
    Employee, EmployeeCreate, EmployeeUpdate, EmploymentType, RecordStatus, parse_enum,
};
use crate::db::repository::employee::EmployeeFilter;
use crate::db::repository::{page_window, parse_record_id};
use crate::utils::error::{PageMeta, created, ok};
use crate::utils::{AppError, AppResponse, AppResult};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeListQuery {
    pub q: Option<String>,
    pub department: Option<String>,
    pub status: Option<String>,
    pub employment_type: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusPatch {
    pub status: Option<String>,
}

/// 员工列表载荷：过滤总数进 meta，全集总数单列
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeListData {
    pub items: Vec<Employee>,
    pub meta: PageMeta,
    pub collection_total: usize,
}

/// List employees with filters plus the unfiltered collection total
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<EmployeeListQuery>,
) -> AppResult<Json<AppResponse<EmployeeListData>>> {
    let status = query
        .status
        .as_deref()
        .map(|s| parse_enum::<RecordStatus>(s, "status"))
        .transpose()
        .map_err(AppError::validation)?;
    let employment_type = query
        .employment_type
        .as_deref()
        .map(|t| parse_enum::<EmploymentType>(t, "employmentType"))
        .transpose()
        .map_err(AppError::validation)?;

    let (page, limit, _) = page_window(query.page, query.limit, 10);
    let result = state
        .employees()
        .list(EmployeeFilter {
            q: query.q,
            department: query.department,
            status,
            employment_type,
            page: query.page,
            limit: query.limit,
        })
        .await?;

    Ok(ok(
        EmployeeListData {
            items: result.items,
            meta: PageMeta {
                total: result.total,
                page,
                limit,
            },
            collection_total: result.collection_total,
        },
        "Employees fetched",
    ))
}

/// Create an employee profile
///
/// `user` 缺省为调用者自己的账户；name 为账户姓名的快照。
pub async fn create(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<EmployeeCreate>,
) -> AppResult<(StatusCode, Json<AppResponse<Employee>>)> {
    let user_id = payload.user.clone().unwrap_or_else(|| current.id.clone());
    let account = state
        .users()
        .find_by_id(&user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;
    let user = account
        .id
        .clone()
        .ok_or_else(|| AppError::internal("User record has no id"))?;
    let created_by = parse_record_id(&current.id)?;

    let employee = state
        .employees()
        .create(payload, user, account.name, created_by)
        .await?;
    Ok(created(employee, "Employee created"))
}

/// Get employee by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Employee>>> {
    let employee = state
        .employees()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Employee not found"))?;
    Ok(ok(employee, "Employee fetched"))
}

/// Update an employee profile
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<EmployeeUpdate>,
) -> AppResult<Json<AppResponse<Employee>>> {
    let employment_type = payload
        .employment_type
        .as_deref()
        .map(|t| parse_enum::<EmploymentType>(t, "employmentType"))
        .transpose()
        .map_err(AppError::validation)?;

    let employee = state
        .employees()
        .update(&id, payload, employment_type)
        .await?;
    Ok(ok(employee, "Employee updated"))
}

/// Flip the lifecycle status
pub async fn set_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<StatusPatch>,
) -> AppResult<Json<AppResponse<Employee>>> {
    let status: RecordStatus = payload
        .status
        .as_deref()
        .map(|s| parse_enum(s, "status"))
        .transpose()
        .map_err(AppError::validation)?
        .ok_or_else(|| AppError::validation("Status is required"))?;

    let employee = state.employees().set_status(&id, status).await?;
    Ok(ok(employee, "Employee status updated"))
}

/// Soft delete
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Employee>>> {
    let employee = state
        .employees()
        .set_status(&id, RecordStatus::Inactive)
        .await?;
    Ok(ok(employee, "Employee deleted"))
}
