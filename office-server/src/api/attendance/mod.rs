//! Attendance API Module

mod handler;

use axum::{
    Router, middleware,
    routing::{get, patch, post},
};

use crate::auth::{require_admin, require_role};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    // 自助打卡与个人记录
    let self_routes = Router::new()
        .route("/me", get(handler::my_records))
        .route("/check-in", post(handler::check_in))
        .route("/check-out", post(handler::check_out));

    // 日报矩阵：admin/manager
    let matrix_routes = Router::new()
        .route("/", get(handler::matrix))
        .layer(middleware::from_fn(require_role(&["admin", "manager"])));

    // 记录级修改：仅管理员
    let admin_routes = Router::new()
        .route("/{id}", patch(handler::update).delete(handler::delete))
        .layer(middleware::from_fn(require_admin));

    self_routes.merge(matrix_routes).merge(admin_routes)
}
