//! Project API Module

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_role;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    // 读取路由：所有登录角色
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id));

    // 管理路由：admin/manager。/stats 在 /{id} 之前注册。
    let manage_routes = Router::new()
        .route("/stats", get(handler::stats))
        .route("/", post(handler::create))
        .route(
            "/{id}",
            axum::routing::patch(handler::update).delete(handler::delete),
        )
        .layer(middleware::from_fn(require_role(&["admin", "manager"])));

    read_routes.merge(manage_routes)
}
