//! Project API Handlers

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{
    EmployeeId, Project, ProjectCreate, ProjectPriority, ProjectStats, ProjectStatus,
    ProjectUpdate, parse_enum,
};
use crate::db::repository::project::{ProjectFilter, ProjectWrite};
use crate::db::repository::{page_window, parse_record_id};
use crate::utils::error::{created, ok};
use crate::utils::{AppError, AppResponse, AppResult, Paged};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectListQuery {
    pub q: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub client: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

fn parse_team(team: Option<Vec<String>>) -> AppResult<Option<Vec<EmployeeId>>> {
    team.map(|ids| {
        ids.iter()
            .map(|id| parse_record_id(id).map_err(AppError::from))
            .collect::<AppResult<Vec<_>>>()
    })
    .transpose()
}

/// Create a project
pub async fn create(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<ProjectCreate>,
) -> AppResult<(StatusCode, Json<AppResponse<Project>>)> {
    let name = payload
        .name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| AppError::validation("Project name is required"))?;

    let priority = payload
        .priority
        .as_deref()
        .map(|p| parse_enum::<ProjectPriority>(p, "priority"))
        .transpose()
        .map_err(AppError::validation)?
        .unwrap_or_default();
    let client = payload
        .client
        .as_deref()
        .map(parse_record_id)
        .transpose()?;
    let team = parse_team(payload.team)?.unwrap_or_default();
    let created_by = parse_record_id(&current.id)?;

    let project = state
        .projects()
        .create(
            name,
            ProjectWrite {
                description: payload.description,
                client,
                team,
                start_date: payload.start_date,
                end_date: payload.end_date,
                priority,
                budget: payload.budget.unwrap_or(0.0),
            },
            created_by,
        )
        .await?;
    Ok(created(project, "Project created"))
}

/// List projects with filters
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ProjectListQuery>,
) -> AppResult<Json<AppResponse<Paged<Project>>>> {
    let status = query
        .status
        .as_deref()
        .map(|s| parse_enum::<ProjectStatus>(s, "status"))
        .transpose()
        .map_err(AppError::validation)?;
    let priority = query
        .priority
        .as_deref()
        .map(|p| parse_enum::<ProjectPriority>(p, "priority"))
        .transpose()
        .map_err(AppError::validation)?;
    let client = query
        .client
        .as_deref()
        .map(parse_record_id)
        .transpose()?;

    let (page, limit, _) = page_window(query.page, query.limit, 10);
    let (projects, total) = state
        .projects()
        .list(ProjectFilter {
            q: query.q,
            status,
            priority,
            client,
            page: query.page,
            limit: query.limit,
        })
        .await?;

    Ok(ok(
        Paged::new(projects, total, page, limit),
        "Projects fetched",
    ))
}

/// `GET /projects/stats` - 看板计数
pub async fn stats(State(state): State<ServerState>) -> AppResult<Json<AppResponse<ProjectStats>>> {
    let stats = state.projects().stats().await?;
    Ok(ok(stats, "Project stats fetched"))
}

/// Get project by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Project>>> {
    let project = state
        .projects()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Project not found"))?;
    Ok(ok(project, "Project fetched"))
}

/// Update a project
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ProjectUpdate>,
) -> AppResult<Json<AppResponse<Project>>> {
    let thing = parse_record_id(&id)?;
    let priority = payload
        .priority
        .as_deref()
        .map(|p| parse_enum::<ProjectPriority>(p, "priority"))
        .transpose()
        .map_err(AppError::validation)?;
    let status = payload
        .status
        .as_deref()
        .map(|s| parse_enum::<ProjectStatus>(s, "status"))
        .transpose()
        .map_err(AppError::validation)?;
    let client = payload
        .client
        .as_deref()
        .map(parse_record_id)
        .transpose()?;
    let team = parse_team(payload.team)?;

    let project = state
        .projects()
        .update(
            &thing,
            payload.name,
            payload.description,
            client,
            team,
            payload.start_date,
            payload.end_date,
            priority,
            payload.budget,
            status,
        )
        .await?;
    Ok(ok(project, "Project updated"))
}

/// Soft delete
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Project>>> {
    let thing = parse_record_id(&id)?;
    let project = state.projects().soft_delete(&thing).await?;
    Ok(ok(project, "Project deleted"))
}
