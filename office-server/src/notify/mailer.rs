//! 邮件/短信传输 seam
//!
//! 真实传输不在范围内：调用只写结构化日志并返回成功。
//! 认证流程的 OTP 发送与通知投递共用这两个入口。

/// "发送" 一封邮件 (记录日志)
pub fn send_email(to: &str, subject: &str, body: &str) {
    tracing::info!(
        target: "mail",
        to = %to,
        subject = %subject,
        body = %body,
        "Outbound email"
    );
}

/// "发送" 一条短信 (记录日志)
pub fn send_sms(to: &str, message: &str) {
    tracing::info!(
        target: "sms",
        to = %to,
        message = %message,
        "Outbound SMS"
    );
}
