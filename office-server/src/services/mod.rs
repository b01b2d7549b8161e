//! 服务模块 - HTTP 应用组装

pub mod http;

pub use http::build_app;
