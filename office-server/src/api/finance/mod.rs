//! Finance API Module

mod handler;

use axum::{
    Router, middleware,
    routing::{delete, get},
};

use crate::auth::{require_admin, require_role};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    // 记账与查询：admin/manager
    let manage_routes = Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", get(handler::get_by_id).patch(handler::update))
        .layer(middleware::from_fn(require_role(&["admin", "manager"])));

    // 软删除：仅管理员
    let admin_routes = Router::new()
        .route("/{id}", delete(handler::delete))
        .layer(middleware::from_fn(require_admin));

    manage_routes.merge(admin_routes)
}
