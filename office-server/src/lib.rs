//! Office Server - 办公与人事管理系统
//!
//! # 架构概述
//!
//! 本模块是 Office Server 的主入口，提供以下核心功能：
//!
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储与迁移
//! - **认证** (`auth`): JWT + Argon2 认证体系
//! - **业务 API** (`api`): 员工、考勤、薪资等 RESTful 接口
//! - **审计** (`activity`): 变更操作的后台审计日志
//! - **通知** (`notify`): 多通道通知投递
//!
//! # 模块结构
//!
//! ```text
//! office-server/src/
//! ├── core/          # 配置、状态、服务器生命周期
//! ├── auth/          # JWT 认证、角色守卫、口令哈希
//! ├── activity/      # 审计队列与自动记录中间件
//! ├── notify/        # 通知投递队列
//! ├── services/      # HTTP 应用组装
//! ├── api/           # HTTP 路由和处理器
//! ├── utils/         # 错误、响应、时间、金额
//! └── db/            # 数据库层 (模型、仓库、迁移)
//! ```

pub mod activity;
pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod notify;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{ServerConfig, ServerState};
pub use db::DbService;
pub use utils::{AppError, AppResponse, AppResult, Paged};

// Re-export logger functions
pub use utils::logger::{cleanup_old_logs, init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

pub fn print_banner() {
    println!(
        r#"
   ____  __________________
  / __ \/ ____/ ____/  _/ ____/ ____/
 / / / / /_  / /_   / // /   / __/
/ /_/ / __/ / __/ _/ // /___/ /___
\____/_/   /_/   /___/\____/_____/
    "#
    );
}
