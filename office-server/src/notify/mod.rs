//! 通知投递模块
//!
//! 创建即落库 (每通道 pending)，随后 fire-and-forget 交给后台
//! worker 记录每通道结果，不重试；真实 SMTP/SMS 传输不在范围内，
//! [`mailer`] 是记录日志的 no-op seam。

pub mod mailer;
pub mod service;
pub mod worker;

pub use service::NotifyService;
pub use worker::DeliveryWorker;
