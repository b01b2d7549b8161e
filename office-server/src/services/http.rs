//! HTTP 应用组装
//!
//! 汇总全部路由族并套上中间件栈。执行顺序 (外→内)：
//! request-id → trace → CORS → gzip → 请求日志 → 认证 → 审计。

use std::time::Instant;

use axum::{
    Router,
    extract::Request,
    middleware::{self, Next},
    response::Response,
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::activity;
use crate::api;
use crate::auth;
use crate::core::ServerState;

/// 组装完整的 axum 应用
pub fn build_app(state: ServerState) -> Router {
    let api_routes = Router::new()
        .nest("/api/auth", api::auth::router())
        .nest("/api/users", api::users::router())
        .nest("/api/employees", api::employees::router())
        .nest("/api/attendance", api::attendance::router())
        .nest("/api/payroll", api::payroll::router())
        .nest("/api/clients", api::clients::router())
        .nest("/api/projects", api::projects::router())
        .nest("/api/rooms", api::rooms::router())
        .nest("/api/assets", api::assets::router())
        .nest("/api/finance", api::finance::router())
        .nest("/api/reports", api::reports::router())
        .nest("/api/notifications", api::notifications::router())
        .nest("/api/activities", api::activities::router())
        .nest("/api/settings", api::settings::router());

    Router::new()
        .merge(api_routes)
        .merge(api::health::router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            activity::log_mutations,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth,
        ))
        .layer(middleware::from_fn(log_request))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}

/// 请求日志：方法、路径、状态码、耗时
async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(req).await;

    let latency_ms = started.elapsed().as_millis();
    let status = response.status().as_u16();
    if response.status().is_server_error() {
        tracing::error!(%method, path, status, latency_ms, "Request failed");
    } else {
        tracing::info!(%method, path, status, latency_ms, "Request handled");
    }
    response
}
