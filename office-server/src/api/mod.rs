//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 认证相关接口
//! - [`users`] - 账户管理接口
//! - [`employees`] - 员工档案接口
//! - [`attendance`] - 考勤矩阵与打卡接口
//! - [`payroll`] - 工资单接口
//! - [`clients`] - 客户账户接口
//! - [`projects`] - 项目管理接口
//! - [`rooms`] - 房间管理接口
//! - [`assets`] - 资产管理接口
//! - [`finance`] - 财务流水接口
//! - [`reports`] - 报表接口
//! - [`notifications`] - 通知接口
//! - [`activities`] - 审计日志接口
//! - [`settings`] - 系统设置接口

pub mod auth;
pub mod health;

// Accounts
pub mod clients;
pub mod users;

// HR domain
pub mod attendance;
pub mod employees;
pub mod payroll;

// Office resources
pub mod assets;
pub mod projects;
pub mod rooms;

// Finance & reporting
pub mod finance;
pub mod reports;

// System
pub mod activities;
pub mod notifications;
pub mod settings;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};
