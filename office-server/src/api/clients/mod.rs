//! Client Account API Module

mod handler;

use axum::{
    Router, middleware,
    routing::{get, patch, post},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    // 客户自助路由，账户按收件箱匹配
    let self_routes = Router::new()
        .route("/me", get(handler::me).patch(handler::update_me))
        .route("/me/avatar", patch(handler::set_avatar))
        .route("/me/cover", patch(handler::set_cover));

    // 管理路由：仅管理员，删除为永久删除
    let admin_routes = Router::new()
        .route("/", post(handler::create).get(handler::list))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .patch(handler::update)
                .delete(handler::delete),
        )
        .layer(middleware::from_fn(require_admin));

    self_routes.merge(admin_routes)
}
