use office_server::{ServerConfig, ServerState, core, init_logger_with_file, print_banner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 环境与日志
    dotenv::dotenv().ok();
    let config = ServerConfig::from_env();
    init_logger_with_file(
        Some(&config.log_level),
        Some(config.is_production()),
        Some(&config.log_dir),
    );

    print_banner();
    tracing::info!(
        environment = %config.environment,
        addr = %config.bind_addr(),
        "Office Server starting..."
    );

    // 2. 初始化服务器状态 (数据库、JWT、后台 worker)
    let state = ServerState::initialize(&config).await?;

    // 3. 启动 HTTP 服务器
    core::server::run(state).await?;

    Ok(())
}
