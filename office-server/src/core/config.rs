use crate::auth::jwt::JwtConfig;

/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HOST | 0.0.0.0 | 绑定地址 |
/// | PORT | 8000 | 绑定端口 |
/// | DB_PATH | office_data/db | RocksDB 数据目录 |
/// | LOG_DIR | office_data/logs | 滚动日志目录 |
/// | LOG_LEVEL | info | env-filter 缺省级别 |
/// | ENVIRONMENT | development | development / production |
/// | JWT_SECRET | (见下) | HMAC 密钥，至少 32 字符 |
/// | JWT_ISSUER | office-server | 令牌签发者 |
/// | JWT_AUDIENCE | office-client | 令牌受众 |
/// | ACCESS_TOKEN_EXPIRE_SECS | 900 | access 令牌有效期 |
/// | REFRESH_TOKEN_EXPIRE_SECS | 604800 | refresh 令牌有效期 |
/// | DELIVERY_QUEUE_SIZE | 256 | 通知投递队列上限 |
/// | ACTIVITY_QUEUE_SIZE | 512 | 审计日志队列上限 |
///
/// `JWT_SECRET` 缺省策略：debug 构建用固定开发密钥；release 构建
/// 生成一次性随机密钥并告警 (重启后已签发令牌全部失效)。
///
/// # 示例
///
/// ```ignore
/// PORT=8080 DB_PATH=/data/office cargo run
/// ```
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// 绑定地址
    pub host: String,
    /// 绑定端口
    pub port: u16,
    /// RocksDB 数据目录
    pub db_path: String,
    /// 滚动日志目录
    pub log_dir: String,
    /// 日志级别
    pub log_level: String,
    /// 运行环境: development | production
    pub environment: String,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 通知投递 worker 的队列上限
    pub delivery_queue_size: usize,
    /// 审计日志 worker 的队列上限
    pub activity_queue_size: usize,
}

impl ServerConfig {
    /// 从环境变量加载配置，未设置的项取默认值
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            db_path: std::env::var("DB_PATH").unwrap_or_else(|_| "office_data/db".into()),
            log_dir: std::env::var("LOG_DIR").unwrap_or_else(|_| "office_data/logs".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            jwt: JwtConfig {
                secret: load_jwt_secret(),
                access_expire_secs: std::env::var("ACCESS_TOKEN_EXPIRE_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(900),
                refresh_expire_secs: std::env::var("REFRESH_TOKEN_EXPIRE_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(604_800),
                issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "office-server".into()),
                audience: std::env::var("JWT_AUDIENCE")
                    .unwrap_or_else(|_| "office-client".into()),
            },
            delivery_queue_size: std::env::var("DELIVERY_QUEUE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(256),
            activity_queue_size: std::env::var("ACTIVITY_QUEUE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(512),
        }
    }

    /// 使用自定义值覆盖部分配置，常用于测试场景
    pub fn with_overrides(host: impl Into<String>, port: u16, db_path: impl Into<String>) -> Self {
        let mut config = Self::from_env();
        config.host = host.into();
        config.port = port;
        config.db_path = db_path.into();
        config
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// 监听地址 (host:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// 加载 JWT 密钥
///
/// 环境变量存在但过短视为配置错误直接拒绝启动。
fn load_jwt_secret() -> String {
    match std::env::var("JWT_SECRET") {
        Ok(secret) => {
            if secret.len() < 32 {
                panic!("JWT_SECRET must be at least 32 characters long");
            }
            secret
        }
        Err(_) => {
            #[cfg(debug_assertions)]
            {
                tracing::warn!("JWT_SECRET not set, using the fixed development key");
                "office-server-development-only-key-0000".to_string()
            }
            #[cfg(not(debug_assertions))]
            {
                tracing::warn!(
                    "JWT_SECRET not set! Generated a one-off key; tokens will not survive restarts"
                );
                crate::auth::jwt::generate_secret()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        // 环境变量未设置时的缺省值
        let config = ServerConfig::with_overrides("127.0.0.1", 0, "unused");
        assert_eq!(config.jwt.issuer, "office-server");
        assert_eq!(config.jwt.audience, "office-client");
        assert_eq!(config.jwt.access_expire_secs, 900);
        assert_eq!(config.jwt.refresh_expire_secs, 604_800);
        assert!(config.jwt.secret.len() >= 32);
        assert_eq!(config.delivery_queue_size, 256);
        assert_eq!(config.activity_queue_size, 512);
    }

    #[test]
    fn test_overrides_and_bind_addr() {
        let config = ServerConfig::with_overrides("127.0.0.1", 9000, "/tmp/office-test-db");
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9000);
        assert_eq!(config.db_path, "/tmp/office-test-db");
        assert_eq!(config.bind_addr(), "127.0.0.1:9000");
    }

    #[test]
    fn test_environment_accessors() {
        let mut config = ServerConfig::with_overrides("127.0.0.1", 0, "unused");
        config.environment = "production".to_string();
        assert!(config.is_production());
        assert!(!config.is_development());
        config.environment = "development".to_string();
        assert!(config.is_development());
    }
}
