//! Activity API Handlers

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Activity, ActivityAction, parse_enum};
use crate::db::repository::activity::ActivityFilter;
use crate::db::repository::{page_window, parse_record_id};
use crate::utils::error::ok;
use crate::utils::{AppError, AppResponse, AppResult, Paged};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityListQuery {
    pub module: Option<String>,
    pub action: Option<String>,
    pub performed_by: Option<String>,
    pub from: Option<i64>,
    pub to: Option<i64>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

/// List audit entries with filters
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ActivityListQuery>,
) -> AppResult<Json<AppResponse<Paged<Activity>>>> {
    let action = query
        .action
        .as_deref()
        .map(|a| parse_enum::<ActivityAction>(a, "action"))
        .transpose()
        .map_err(AppError::validation)?;
    let performed_by = query
        .performed_by
        .as_deref()
        .map(parse_record_id)
        .transpose()?;

    let (page, limit, _) = page_window(query.page, query.limit, 20);
    let (activities, total) = state
        .activities()
        .list(ActivityFilter {
            module: query.module,
            action,
            performed_by,
            from: query.from,
            to: query.to,
            page: query.page,
            limit: query.limit,
        })
        .await?;

    Ok(ok(
        Paged::new(activities, total, page, limit),
        "Activities fetched",
    ))
}

/// `GET /activities/me` - 调用者自己的操作轨迹
pub async fn my_activities(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Query(query): Query<ActivityListQuery>,
) -> AppResult<Json<AppResponse<Paged<Activity>>>> {
    let action = query
        .action
        .as_deref()
        .map(|a| parse_enum::<ActivityAction>(a, "action"))
        .transpose()
        .map_err(AppError::validation)?;
    let performed_by = parse_record_id(&current.id)?;

    let (page, limit, _) = page_window(query.page, query.limit, 20);
    let (activities, total) = state
        .activities()
        .list(ActivityFilter {
            module: query.module,
            action,
            performed_by: Some(performed_by),
            from: query.from,
            to: query.to,
            page: query.page,
            limit: query.limit,
        })
        .await?;

    Ok(ok(
        Paged::new(activities, total, page, limit),
        "Activities fetched",
    ))
}

/// Soft delete
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Activity>>> {
    let thing = parse_record_id(&id)?;
    let activity = state.activities().soft_delete(&thing).await?;
    Ok(ok(activity, "Activity deleted"))
}
