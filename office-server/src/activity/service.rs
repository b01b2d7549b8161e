//! 审计日志服务
//!
//! 持有有界 mpsc 发送端，worker 端见 [`super::worker`]。

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::db::repository::activity::ActivityWrite;

/// 审计日志写入队列的入口
pub struct ActivityService {
    tx: mpsc::Sender<ActivityWrite>,
}

impl ActivityService {
    /// 创建服务与配对的接收端，接收端交给 [`super::ActivityWorker`]
    pub fn new(capacity: usize) -> (Arc<Self>, mpsc::Receiver<ActivityWrite>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Arc::new(Self { tx }), rx)
    }

    /// 投递一条审计条目；队列满时丢弃并告警
    pub fn log(&self, entry: ActivityWrite) {
        if let Err(e) = self.tx.try_send(entry) {
            tracing::warn!(error = %e, "Activity log entry dropped, queue full or closed");
        }
    }
}
