use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::activity::{ActivityService, ActivityWorker};
use crate::auth::JwtService;
use crate::core::ServerConfig;
use crate::db::DbService;
use crate::db::repository::{
    ActivityRepository, AssetRepository, AttendanceRepository, ClientRepository,
    EmployeeRepository, FinanceRepository, NotificationRepository, PayrollRepository,
    ProjectRepository, ReportRepository, RoomRepository, SettingRepository, UserRepository,
};
use crate::notify::{DeliveryWorker, NotifyService};
use crate::utils::AppError;

/// 服务器状态 - 持有配置、数据库与后台服务的共享引用
///
/// Arc 浅拷贝，随 axum `State` 注入每个请求。
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 配置项 (不可变) |
/// | db | 嵌入式数据库 (SurrealDB RocksDB) |
/// | jwt_service | JWT 签发/验证 |
/// | activity_service | 审计日志写入队列 |
/// | notify_service | 通知投递队列 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: ServerConfig,
    /// 嵌入式数据库
    pub db: Surreal<Db>,
    /// JWT 认证服务
    pub jwt_service: Arc<JwtService>,
    /// 审计日志服务 (后台 worker 消费)
    pub activity_service: Arc<ActivityService>,
    /// 通知投递服务 (后台 worker 消费)
    pub notify_service: Arc<NotifyService>,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序：打开数据库并应用迁移 → 构建 JWT 服务 →
    /// 创建两个有界队列并启动对应的后台 worker。
    pub async fn initialize(config: &ServerConfig) -> Result<Self, AppError> {
        let db_service = DbService::new(&config.db_path).await?;
        let db = db_service.db;

        let jwt_service = Arc::new(JwtService::new(config.jwt.clone()));

        let (activity_service, activity_rx) = ActivityService::new(config.activity_queue_size);
        let activity_worker = ActivityWorker::new(ActivityRepository::new(db.clone()));
        tokio::spawn(activity_worker.run(activity_rx));

        let (notify_service, delivery_rx) = NotifyService::new(config.delivery_queue_size);
        let delivery_worker = DeliveryWorker::new(NotificationRepository::new(db.clone()));
        tokio::spawn(delivery_worker.run(delivery_rx));

        Ok(Self {
            config: config.clone(),
            db,
            jwt_service,
            activity_service,
            notify_service,
        })
    }

    /// 获取数据库实例
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    // Repository 访问器：repository 仅持 db 句柄，按需构造即可

    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.db.clone())
    }

    pub fn employees(&self) -> EmployeeRepository {
        EmployeeRepository::new(self.db.clone())
    }

    pub fn attendance(&self) -> AttendanceRepository {
        AttendanceRepository::new(self.db.clone())
    }

    pub fn payrolls(&self) -> PayrollRepository {
        PayrollRepository::new(self.db.clone())
    }

    pub fn clients(&self) -> ClientRepository {
        ClientRepository::new(self.db.clone())
    }

    pub fn projects(&self) -> ProjectRepository {
        ProjectRepository::new(self.db.clone())
    }

    pub fn rooms(&self) -> RoomRepository {
        RoomRepository::new(self.db.clone())
    }

    pub fn assets(&self) -> AssetRepository {
        AssetRepository::new(self.db.clone())
    }

    pub fn finance(&self) -> FinanceRepository {
        FinanceRepository::new(self.db.clone())
    }

    pub fn reports(&self) -> ReportRepository {
        ReportRepository::new(self.db.clone())
    }

    pub fn activities(&self) -> ActivityRepository {
        ActivityRepository::new(self.db.clone())
    }

    pub fn notifications(&self) -> NotificationRepository {
        NotificationRepository::new(self.db.clone())
    }

    pub fn settings(&self) -> SettingRepository {
        SettingRepository::new(self.db.clone())
    }
}
