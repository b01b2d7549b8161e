//! Repository Module
//!
//! Provides CRUD operations for SurrealDB tables.

// Accounts
pub mod client;
pub mod user;

// HR Domain
pub mod attendance;
pub mod employee;
pub mod payroll;

// Office Resources
pub mod asset;
pub mod project;
pub mod room;

// Finance & Reporting
pub mod finance;
pub mod report;

// System
pub mod activity;
pub mod notification;
pub mod setting;

// Re-exports
pub use activity::ActivityRepository;
pub use asset::AssetRepository;
pub use attendance::AttendanceRepository;
pub use client::ClientRepository;
pub use employee::EmployeeRepository;
pub use finance::FinanceRepository;
pub use notification::NotificationRepository;
pub use payroll::PayrollRepository;
pub use project::ProjectRepository;
pub use report::ReportRepository;
pub use room::RoomRepository;
pub use setting::SettingRepository;
pub use user::UserRepository;

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        let msg = err.to_string();
        // 唯一索引冲突随查询错误一起返回，保留为可识别的 Duplicate
        if msg.contains("already contains") {
            RepoError::Duplicate(msg)
        } else {
            RepoError::Database(msg)
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID Convention: 全栈统一使用 "table:id" 格式
// =============================================================================
//
// 使用 surrealdb::RecordId 处理所有 ID：
//   - 解析: parse_record_id("employee:abc")
//   - 创建: RecordId::from_table_key("employee", "abc")
//   - 获取纯ID: id.key().to_string()

/// Parse a `table:id` string, mapping failure to a validation error.
pub fn parse_record_id(id: &str) -> RepoResult<RecordId> {
    id.parse()
        .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))
}

/// `SELECT count() AS total ... GROUP ALL` 的结果行
#[derive(Debug, serde::Deserialize)]
pub(crate) struct CountRow {
    pub total: usize,
}

/// 列表查询统一的分页参数：page 从 1 起，换算为 START 偏移
pub fn page_window(page: Option<usize>, limit: Option<usize>, default_limit: usize) -> (usize, usize, usize) {
    let page = page.unwrap_or(1).max(1);
    let limit = limit.unwrap_or(default_limit).clamp(1, 100);
    let start = (page - 1) * limit;
    (page, limit, start)
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_window_defaults() {
        assert_eq!(page_window(None, None, 10), (1, 10, 0));
        assert_eq!(page_window(Some(3), Some(20), 10), (3, 20, 40));
    }

    #[test]
    fn test_page_window_clamps() {
        // page 0 treated as 1, limit clamped to [1, 100]
        assert_eq!(page_window(Some(0), Some(0), 10), (1, 1, 0));
        assert_eq!(page_window(Some(2), Some(500), 10), (2, 100, 100));
    }

    #[test]
    fn test_parse_record_id() {
        assert!(parse_record_id("employee:abc").is_ok());
        assert!(matches!(
            parse_record_id("no-table-part"),
            Err(RepoError::Validation(_))
        ));
    }
}
