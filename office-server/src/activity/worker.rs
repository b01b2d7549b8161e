//! 审计日志后台 worker

use tokio::sync::mpsc;

use crate::db::repository::ActivityRepository;
use crate::db::repository::activity::ActivityWrite;

/// 消费审计队列并逐条落库
pub struct ActivityWorker {
    repository: ActivityRepository,
}

impl ActivityWorker {
    pub fn new(repository: ActivityRepository) -> Self {
        Self { repository }
    }

    /// 处理循环，通道关闭时退出
    pub async fn run(self, mut rx: mpsc::Receiver<ActivityWrite>) {
        tracing::info!("Activity worker started");
        while let Some(entry) = rx.recv().await {
            if let Err(e) = self.repository.append(entry).await {
                tracing::warn!(error = %e, "Failed to persist activity entry");
            }
        }
        tracing::info!("Activity worker stopped");
    }
}
