//! Payroll API Module

mod handler;

use axum::{
    Router, middleware,
    routing::{get, patch, post},
};

use crate::auth::require_role;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    // 个人工资单
    let self_routes = Router::new().route("/me", get(handler::my_payrolls));

    // 生成与管理：admin/manager
    let manage_routes = Router::new()
        .route("/", post(handler::create).get(handler::list))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .patch(handler::update)
                .delete(handler::delete),
        )
        .route("/{id}/pay", patch(handler::mark_paid))
        .layer(middleware::from_fn(require_role(&["admin", "manager"])));

    self_routes.merge(manage_routes)
}
