//! HTTP 服务器生命周期
//!
//! axum-server 绑定监听，ctrl-c 触发限时优雅关闭。

use std::net::SocketAddr;
use std::time::Duration;

use axum_server::Handle;

use crate::core::ServerState;
use crate::services::http::build_app;
use crate::utils::AppError;

/// 优雅关闭的排空时限
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// 启动 HTTP 服务器并阻塞运行直至关闭
pub async fn run(state: ServerState) -> Result<(), AppError> {
    let addr: SocketAddr = state
        .config
        .bind_addr()
        .parse()
        .map_err(|e| AppError::internal(format!("Invalid bind address: {e}")))?;

    let app = build_app(state);

    let handle = Handle::new();
    tokio::spawn(shutdown_on_signal(handle.clone()));

    tracing::info!(%addr, "HTTP server listening");
    axum_server::bind(addr)
        .handle(handle)
        .serve(app.into_make_service())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_on_signal(handle: Handle) {
    if tokio::signal::ctrl_c().await.is_err() {
        tracing::error!("Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received, draining connections");
    handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
}
