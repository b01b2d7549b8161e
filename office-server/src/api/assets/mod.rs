//! Asset API Module

mod handler;

use axum::{
    Router, middleware,
    routing::{delete, get, patch, post},
};

use crate::auth::{require_admin, require_role};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    // 读取：任意登录角色
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id));

    // 修改与指派：admin/manager
    let manage_routes = Router::new()
        .route("/{id}", patch(handler::update))
        .route("/{id}/assign", patch(handler::assign))
        .route("/{id}/unassign", patch(handler::unassign))
        .route("/{id}/maintenance", patch(handler::maintenance))
        .layer(middleware::from_fn(require_role(&["admin", "manager"])));

    // 创建与退役：仅管理员
    let admin_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", delete(handler::retire))
        .layer(middleware::from_fn(require_admin));

    read_routes.merge(manage_routes).merge(admin_routes)
}
