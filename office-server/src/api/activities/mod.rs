//! Activity API Module

mod handler;

use axum::{
    Router, middleware,
    routing::{delete, get},
};

use crate::auth::require_role;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    // 个人轨迹：任意登录角色
    let self_routes = Router::new().route("/me", get(handler::my_activities));

    // 全量查询与软删除：admin/manager
    let manage_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", delete(handler::delete))
        .layer(middleware::from_fn(require_role(&["admin", "manager"])));

    self_routes.merge(manage_routes)
}
