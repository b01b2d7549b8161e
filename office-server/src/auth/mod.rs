//! 认证模块
//!
//! JWT 签发/验证、argon2 口令散列、OTP 与 refresh token 摘要，
//! 以及路由层的认证/角色中间件。

pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService, TokenType};
pub use middleware::{CurrentUserExt, require_admin, require_auth, require_role};
pub use password::{generate_otp, hash_password, sha256_hex, verify_password};
