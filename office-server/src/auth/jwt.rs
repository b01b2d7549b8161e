//! JWT 令牌服务
//!
//! access/refresh 双令牌共用一个 HMAC 密钥，靠 `tokenType`
//! claim 区分用途；验证时同时检查签发者、受众与令牌类型。

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::models::User;

/// JWT 配置 (由 `ServerConfig` 组装)
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC 密钥 (至少 32 字节)
    pub secret: String,
    /// access 令牌有效期 (秒)
    pub access_expire_secs: i64,
    /// refresh 令牌有效期 (秒)
    pub refresh_expire_secs: i64,
    /// 令牌签发者
    pub issuer: String,
    /// 令牌受众
    pub audience: String,
}

/// 令牌类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    Access,
    Refresh,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Access => "access",
            TokenType::Refresh => "refresh",
        }
    }
}

/// 存储在令牌中的 JWT Claims
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// 用户 ID (`user:...`)
    pub sub: String,
    /// 用户姓名
    pub name: String,
    /// 角色名
    pub role: String,
    /// 令牌类型 (access / refresh)
    pub token_type: String,
    /// 过期时间戳 (秒)
    pub exp: i64,
    /// 签发时间戳 (秒)
    pub iat: i64,
    /// 签发者
    pub iss: String,
    /// 受众
    pub aud: String,
}

/// JWT 错误
#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    ExpiredToken,

    #[error("Wrong token type")]
    WrongTokenType,

    #[error("Token generation failed: {0}")]
    GenerationFailed(String),
}

/// 生成 32 字节随机密钥的 hex 形式 (release 下 JWT_SECRET 缺省时使用)
pub fn generate_secret() -> String {
    let rng = SystemRandom::new();
    let mut key = [0u8; 32];
    if rng.fill(&mut key).is_err() {
        // SystemRandom 失败极罕见，启动期直接终止比带弱密钥运行安全
        panic!("Failed to generate JWT secret from system randomness");
    }
    hex::encode(key)
}

/// JWT 令牌服务
#[derive(Clone)]
pub struct JwtService {
    pub config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// 为用户签发指定类型的令牌
    pub fn issue(&self, user: &User, token_type: TokenType) -> Result<String, JwtError> {
        let user_id = user
            .id
            .as_ref()
            .map(|id| id.to_string())
            .ok_or_else(|| JwtError::GenerationFailed("User has no id".to_string()))?;

        let now = Utc::now().timestamp();
        let ttl = match token_type {
            TokenType::Access => self.config.access_expire_secs,
            TokenType::Refresh => self.config.refresh_expire_secs,
        };

        let claims = Claims {
            sub: user_id,
            name: user.name.clone(),
            role: user.role.as_str().to_string(),
            token_type: token_type.as_str().to_string(),
            exp: now + ttl,
            iat: now,
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// 验证并解码令牌，同时检查令牌类型
    pub fn verify(&self, token: &str, expected: TokenType) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss", "aud"]);

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                    _ => JwtError::InvalidToken(e.to_string()),
                }
            })?;

        if token_data.claims.token_type != expected.as_str() {
            return Err(JwtError::WrongTokenType);
        }
        Ok(token_data.claims)
    }

    /// 从 Authorization 头提取令牌
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ")
    }
}

/// 当前用户上下文 (从 JWT Claims 解析)
///
/// 由认证中间件注入请求扩展，handler 通过 `Extension` 取用。
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// 用户 ID (`user:...`)
    pub id: String,
    /// 用户姓名
    pub name: String,
    /// 角色名
    pub role: String,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            name: claims.name,
            role: claims.role,
        }
    }
}

impl CurrentUser {
    /// 管理员隐式通过所有角色检查
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }

    /// 角色是否命中允许名单 (admin 恒通过)
    pub fn has_role(&self, allowed: &[&str]) -> bool {
        self.is_admin() || allowed.contains(&self.role.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{UserRole, UserStatus};

    fn test_service() -> JwtService {
        JwtService::new(JwtConfig {
            secret: "test-secret-test-secret-test-secret!".to_string(),
            access_expire_secs: 900,
            refresh_expire_secs: 604800,
            issuer: "office-server".to_string(),
            audience: "office-client".to_string(),
        })
    }

    fn test_user() -> User {
        User {
            id: Some(surrealdb::RecordId::from(("user", "u1"))),
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            hash_pass: String::new(),
            avatar: String::new(),
            cover_image: String::new(),
            bio: None,
            phone: None,
            role: UserRole::Manager,
            status: UserStatus::Active,
            otp_hash: None,
            otp_expires_at: None,
            reset_otp_hash: None,
            reset_otp_expires_at: None,
            refresh_tokens: vec![],
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_issue_and_verify_access_token() {
        let service = test_service();
        let token = service.issue(&test_user(), TokenType::Access).unwrap();
        let claims = service.verify(&token, TokenType::Access).unwrap();
        assert_eq!(claims.sub, "user:u1");
        assert_eq!(claims.name, "Jane Doe");
        assert_eq!(claims.role, "manager");
        assert_eq!(claims.token_type, "access");
    }

    #[test]
    fn test_token_type_is_enforced() {
        let service = test_service();
        let refresh = service.issue(&test_user(), TokenType::Refresh).unwrap();
        assert!(service.verify(&refresh, TokenType::Refresh).is_ok());
        assert!(matches!(
            service.verify(&refresh, TokenType::Access),
            Err(JwtError::WrongTokenType)
        ));
    }

    #[test]
    fn test_wrong_audience_rejected() {
        let service = test_service();
        let token = service.issue(&test_user(), TokenType::Access).unwrap();

        let mut other_config = service.config.clone();
        other_config.audience = "someone-else".to_string();
        let other = JwtService::new(other_config);
        assert!(matches!(
            other.verify(&token, TokenType::Access),
            Err(JwtError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_role_guard_logic() {
        let manager = CurrentUser {
            id: "user:u1".to_string(),
            name: "Jane".to_string(),
            role: "manager".to_string(),
        };
        assert!(manager.has_role(&["admin", "manager"]));
        assert!(!manager.has_role(&["admin"]));
        assert!(!manager.is_admin());

        let admin = CurrentUser {
            id: "user:u2".to_string(),
            name: "Root".to_string(),
            role: "admin".to_string(),
        };
        // admin passes every allow-list
        assert!(admin.has_role(&["employee"]));
        assert!(admin.is_admin());
    }

    #[test]
    fn test_generate_secret_length_and_uniqueness() {
        let a = generate_secret();
        let b = generate_secret();
        assert_eq!(a.len(), 64);
        assert_ne!(a, b);
    }
}
