//! Authentication API Module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

/// Auth router; register/login/refresh/forgot/reset 在认证中间件的
/// 公共名单内，me/logout 需要登录态。
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/register", post(handler::register))
        .route("/login", post(handler::login))
        .route("/refresh-token", post(handler::refresh_token))
        .route("/forgot-password", post(handler::forgot_password))
        .route("/reset-password", post(handler::reset_password))
        .route("/me", get(handler::me))
        .route("/logout", post(handler::logout))
}
