//! Database Module
//!
//! 嵌入式 SurrealDB（RocksDB 存储），连接后选择 namespace/database 并应用迁移。

pub mod models;
pub mod repository;
pub mod schema;

use std::time::Duration;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use crate::utils::AppError;

const NAMESPACE: &str = "office";
const DATABASE: &str = "main";

/// RocksDB 持锁进程退出释放锁可能有延迟，短暂重试而非直接失败
const CONNECT_ATTEMPTS: u32 = 3;
const CONNECT_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Database service, owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the database at `db_path` and apply pending migrations.
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db = Self::connect(db_path).await?;

        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        tracing::info!(path = %db_path, "Database connection established (SurrealDB RocksDB)");

        schema::run_migrations(&db).await?;
        tracing::info!("Database schema up to date");

        Ok(Self { db })
    }

    async fn connect(db_path: &str) -> Result<Surreal<Db>, AppError> {
        let mut last_err = None;
        for attempt in 1..=CONNECT_ATTEMPTS {
            match Surreal::new::<RocksDb>(db_path).await {
                Ok(db) => return Ok(db),
                Err(e) => {
                    tracing::warn!(
                        attempt,
                        error = %e,
                        "Failed to open database, retrying"
                    );
                    last_err = Some(e);
                    if attempt < CONNECT_ATTEMPTS {
                        tokio::time::sleep(CONNECT_RETRY_DELAY).await;
                    }
                }
            }
        }
        Err(AppError::database(format!(
            "Failed to open database at {db_path}: {}",
            last_err.map(|e| e.to_string()).unwrap_or_default()
        )))
    }
}
