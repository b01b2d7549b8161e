//! 健康检查
//!
//! 挂在根路径，无需认证；附带一次数据库往返探测。

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;
use crate::utils::error::ok;
use crate::utils::{AppResponse, AppResult};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthData {
    pub status: &'static str,
    pub database: &'static str,
    pub version: &'static str,
}

pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

async fn health(State(state): State<ServerState>) -> AppResult<Json<AppResponse<HealthData>>> {
    let database = match state.get_db().query("RETURN 1").await {
        Ok(_) => "up",
        Err(e) => {
            tracing::error!(error = %e, "Database probe failed");
            "down"
        }
    };
    let status = if database == "up" { "ok" } else { "degraded" };

    Ok(ok(
        HealthData {
            status,
            database,
            version: env!("CARGO_PKG_VERSION"),
        },
        "Health checked",
    ))
}
