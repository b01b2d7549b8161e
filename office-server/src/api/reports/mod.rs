//! Report API Module

mod handler;

use axum::{
    Router, middleware,
    routing::{delete, get, patch},
};

use crate::auth::{require_admin, require_role};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    // 生成与查询：admin/manager
    let manage_routes = Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", get(handler::get_by_id))
        .layer(middleware::from_fn(require_role(&["admin", "manager"])));

    // 修改与永久删除：仅管理员
    let admin_routes = Router::new()
        .route("/{id}", patch(handler::update).delete(handler::delete))
        .layer(middleware::from_fn(require_admin));

    manage_routes.merge(admin_routes)
}
