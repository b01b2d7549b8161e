//! Notification API Module

mod handler;

use axum::{
    Router, middleware,
    routing::{delete, get, patch, post},
};

use crate::auth::{require_admin, require_role};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    // 收件箱与已读：任意登录角色
    let self_routes = Router::new()
        .route("/me", get(handler::my_notifications))
        .route("/read", patch(handler::mark_read_bulk))
        .route("/{id}/read", patch(handler::mark_read_one));

    // 全量视图：admin/manager
    let manage_routes = Router::new()
        .route("/all", get(handler::list_all))
        .layer(middleware::from_fn(require_role(&["admin", "manager"])));

    // 发送与归档：仅管理员
    let admin_routes = Router::new()
        .route("/", post(handler::create).delete(handler::archive_bulk))
        .route("/{id}", delete(handler::archive_one))
        .layer(middleware::from_fn(require_admin));

    self_routes.merge(manage_routes).merge(admin_routes)
}
