//! Finance API Handlers
//!
//! 关联的项目/客户/员工必须存在才允许入账。

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{
    FinanceCreate, FinanceSummary, FinanceTransaction, FinanceUpdate, RecordStatus,
    TransactionType, parse_enum,
};
use crate::db::repository::finance::{FinanceFilter, FinanceWrite};
use crate::db::repository::{page_window, parse_record_id};
use crate::utils::error::{PageMeta, created, ok};
use crate::utils::time;
use crate::utils::{AppError, AppResponse, AppResult};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceListQuery {
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    pub project: Option<String>,
    pub client: Option<String>,
    pub employee: Option<String>,
    pub from: Option<i64>,
    pub to: Option<i64>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

/// 财务列表载荷：分页数据 + 完整过滤集上的收支汇总
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceListData {
    pub items: Vec<FinanceTransaction>,
    pub meta: PageMeta,
    pub summary: FinanceSummary,
}

/// Record a transaction
pub async fn create(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<FinanceCreate>,
) -> AppResult<(StatusCode, Json<AppResponse<FinanceTransaction>>)> {
    let transaction_type: TransactionType = payload
        .transaction_type
        .as_deref()
        .map(|t| parse_enum(t, "transactionType"))
        .transpose()
        .map_err(AppError::validation)?
        .ok_or_else(|| AppError::validation("transactionType is required"))?;
    let amount = payload
        .amount
        .filter(|a| *a > 0.0)
        .ok_or_else(|| AppError::validation("Valid positive amount is required"))?;
    let description = payload
        .description
        .filter(|d| !d.trim().is_empty())
        .ok_or_else(|| AppError::validation("Description is required"))?;

    // 外键目标先查存在，避免写入悬挂引用
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
    let created_by = parse_record_id(&current.id)?;

    let tx = state
        .finance()
        .create(
            FinanceWrite {
                transaction_type,
                amount,
                description,
                project,
                client,
                employee,
                transaction_date: payload.transaction_date.unwrap_or_else(time::now_millis),
                remarks: payload.remarks,
            },
            created_by,
        )
        .await?;
    Ok(created(tx, "Transaction recorded"))
}

/// List transactions with filters and income/expense summary
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<FinanceListQuery>,
) -> AppResult<Json<AppResponse<FinanceListData>>> {
    let transaction_type = query
        .transaction_type
        .as_deref()
        .map(|t| parse_enum::<TransactionType>(t, "type"))
        .transpose()
        .map_err(AppError::validation)?;
    let project = query
        .project
        .as_deref()
        .map(parse_record_id)
        .transpose()?;
    let client = query.client.as_deref().map(parse_record_id).transpose()?;
    let employee = query
        .employee
        .as_deref()
        .map(parse_record_id)
        .transpose()?;

    let (page, limit, _) = page_window(query.page, query.limit, 10);
    let result = state
        .finance()
        .list(FinanceFilter {
            transaction_type,
            project,
            client,
            employee,
            from: query.from,
            to: query.to,
            page: query.page,
            limit: query.limit,
        })
        .await?;

    Ok(ok(
        FinanceListData {
            items: result.items,
            meta: PageMeta {
                total: result.total,
                page,
                limit,
            },
            summary: result.summary,
        },
        "Transactions fetched",
    ))
}

/// Get transaction by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<FinanceTransaction>>> {
    let tx = state
        .finance()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Transaction not found"))?;
    Ok(ok(tx, "Transaction fetched"))
}

/// Update the mutable transaction fields
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<FinanceUpdate>,
) -> AppResult<Json<AppResponse<FinanceTransaction>>> {
    let thing = parse_record_id(&id)?;
    if let Some(amount) = payload.amount
        && amount <= 0.0
    {
        return Err(AppError::validation("Valid positive amount is required"));
    }
    let status = payload
        .status
        .as_deref()
        .map(|s| parse_enum::<RecordStatus>(s, "status"))
        .transpose()
        .map_err(AppError::validation)?;

    let tx = state
        .finance()
        .update(
            &thing,
            payload.amount,
            payload.description,
            status,
            payload.remarks,
        )
        .await?;
    Ok(ok(tx, "Transaction updated"))
}

/// Soft delete
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<FinanceTransaction>>> {
    let thing = parse_record_id(&id)?;
    let tx = state.finance().soft_delete(&thing).await?;
    Ok(ok(tx, "Transaction deleted"))
}
