//! Room API Module

mod handler;

use axum::{
    Router, middleware,
    routing::{delete, get, patch},
};

use crate::auth::{require_admin, require_role};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    // 创建与读取：任意登录角色
    let open_routes = Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", get(handler::get_by_id));

    // 修改与指派：admin/manager
    let manage_routes = Router::new()
        .route("/{id}", patch(handler::update))
        .route("/{id}/assign", patch(handler::assign))
        .route("/{id}/release", patch(handler::release))
        .layer(middleware::from_fn(require_role(&["admin", "manager"])));

    // 软删除：仅管理员
    let admin_routes = Router::new()
        .route("/{id}", delete(handler::delete))
        .layer(middleware::from_fn(require_admin));

    open_routes.merge(manage_routes).merge(admin_routes)
}
