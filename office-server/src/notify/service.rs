//! 通知投递服务
//!
//! 与审计队列同构：有界 mpsc，满则丢弃并告警，调用方无感知。

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::db::models::Notification;

/// 通知投递队列的入口
pub struct NotifyService {
    tx: mpsc::Sender<Notification>,
}

impl NotifyService {
    /// 创建服务与配对的接收端，接收端交给 [`super::DeliveryWorker`]
    pub fn new(capacity: usize) -> (Arc<Self>, mpsc::Receiver<Notification>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Arc::new(Self { tx }), rx)
    }

    /// 把已落库的通知交给后台投递；队列满时丢弃并告警
    pub fn enqueue(&self, notification: Notification) {
        if let Err(e) = self.tx.try_send(notification) {
            tracing::warn!(error = %e, "Notification delivery dropped, queue full or closed");
        }
    }
}
