//! 审计日志模块
//!
//! 请求侧只投递，落库由后台 worker 异步完成；队列满时丢弃并告警，
//! 绝不把失败冒泡给调用方。

pub mod middleware;
pub mod service;
pub mod worker;

pub use middleware::log_mutations;
pub use service::ActivityService;
pub use worker::ActivityWorker;
