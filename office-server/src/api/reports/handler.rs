//! Report API Handlers

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Report, ReportCreate, ReportUpdate};
use crate::db::repository::report::{ReportFilter, ReportWrite};
use crate::db::repository::{page_window, parse_record_id};
use crate::utils::error::{created, ok};
use crate::utils::{AppError, AppResponse, AppResult, Paged};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportListQuery {
    #[serde(rename = "type")]
    pub report_type: Option<String>,
    pub month: Option<i64>,
    pub year: Option<i64>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

fn parse_month(month: Option<i64>) -> AppResult<Option<u32>> {
    match month {
        None => Ok(None),
        Some(m @ 1..=12) => Ok(Some(m as u32)),
        Some(m) => Err(AppError::validation(format!("Invalid month: {}", m))),
    }
}

/// Generate a report
pub async fn create(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<ReportCreate>,
) -> AppResult<(StatusCode, Json<AppResponse<Report>>)> {
    let report_type = payload
        .report_type
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::validation("reportType is required"))?;
    let month = parse_month(payload.month)?;
    let year = payload.year.map(|y| y as i32);

    let project = match payload.project.as_deref() {
        Some(id) => {
            state
                .projects()
                .find_by_id(id)
                .await?
                .ok_or_else(|| AppError::not_found("Project not found"))?;
            Some(parse_record_id(id)?)
        }
        None => None,
    };
    let employee = match payload.employee.as_deref() {
        Some(id) => {
            state
                .employees()
                .find_by_id(id)
                .await?
                .ok_or_else(|| AppError::not_found("Employee not found"))?;
            Some(parse_record_id(id)?)
        }
        None => None,
    };
    let client = match payload.client.as_deref() {
        Some(id) => {
            state
                .clients()
                .find_by_id(id)
                .await?
                .ok_or_else(|| AppError::not_found("Client not found"))?;
            Some(parse_record_id(id)?)
        }
        None => None,
    };
    let generated_by = parse_record_id(&current.id)?;

    let report = state
        .reports()
        .create(
            ReportWrite {
                report_type,
                month,
                year,
                project,
                employee,
                client,
                data: payload.data.unwrap_or_else(|| serde_json::json!({})),
                remarks: payload.remarks,
            },
            generated_by,
        )
        .await?;
    Ok(created(report, "Report generated"))
}

/// List reports with filters
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ReportListQuery>,
) -> AppResult<Json<AppResponse<Paged<Report>>>> {
    let month = parse_month(query.month)?;

    let (page, limit, _) = page_window(query.page, query.limit, 10);
    let (reports, total) = state
        .reports()
        .list(ReportFilter {
            report_type: query.report_type,
            month,
            year: query.year.map(|y| y as i32),
            page: query.page,
            limit: query.limit,
        })
        .await?;

    Ok(ok(
        Paged::new(reports, total, page, limit),
        "Reports fetched",
    ))
}

/// Get report by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Report>>> {
    let report = state
        .reports()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Report not found"))?;
    Ok(ok(report, "Report fetched"))
}

/// Update a report
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ReportUpdate>,
) -> AppResult<Json<AppResponse<Report>>> {
    let thing = parse_record_id(&id)?;
    let month = parse_month(payload.month)?;

    let report = state
        .reports()
        .update(
            &thing,
            payload.report_type,
            month,
            payload.year.map(|y| y as i32),
            payload.data,
            payload.remarks,
        )
        .await?;
    Ok(ok(report, "Report updated"))
}

/// Permanent delete
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Report>>> {
    let thing = parse_record_id(&id)?;
    let report = state.reports().delete(&thing).await?;
    Ok(ok(report, "Report deleted"))
}
