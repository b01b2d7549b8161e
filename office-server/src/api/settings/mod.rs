//! Settings API Module

mod handler;

use axum::{
    Router, middleware,
    routing::{get, patch},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::get).patch(handler::update))
        .route("/email", patch(handler::update_email))
        .route("/security", patch(handler::update_security))
        .layer(middleware::from_fn(require_admin))
}
