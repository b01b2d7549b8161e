//! Employee API Module

mod handler;

use axum::{
    Router, middleware,
    routing::{get, patch},
};

use crate::auth::require_role;
use crate::core::ServerState;

/// 员工档案全族都是 admin/manager 权限
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/{id}/status", patch(handler::set_status))
        .layer(middleware::from_fn(require_role(&["admin", "manager"])))
}
