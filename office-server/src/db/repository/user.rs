//! User Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, CountRow, RepoError, RepoResult, page_window, parse_record_id};
use crate::db::models::{ProfileUpdate, User, UserCreate, UserRole, UserStatus, UserUpdate};
use crate::utils::time;

/// `GET /users` 查询过滤条件
#[derive(Debug, Default)]
pub struct UserFilter {
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
    pub q: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find user by email (lowercased lookup)
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let email = email.trim().to_lowercase();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user WHERE email = $email LIMIT 1")
            .bind(("email", email))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Find user by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>> {
        let thing = parse_record_id(id)?;
        let user: Option<User> = self.base.db().select(thing).await?;
        Ok(user)
    }

    /// Create a new user. The caller hashes the password and decides
    /// the initial status (register = pending, admin create = active).
    pub async fn create(
        &self,
        data: UserCreate,
        hash_pass: String,
        role: UserRole,
        status: UserStatus,
    ) -> RepoResult<User> {
        let email = data.email.unwrap_or_default().trim().to_lowercase();

        // Pre-check for a friendlier message; the unique index is the real guard
        if self.find_by_email(&email).await?.is_some() {
            return Err(RepoError::Duplicate("Email already in use".to_string()));
        }

        let now = time::now_millis();
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE user SET
                    name = $name,
                    email = $email,
                    hashPass = $hash_pass,
                    avatar = $avatar,
                    coverImage = $cover_image,
                    bio = $bio,
                    phone = $phone,
                    role = $role,
                    status = $status,
                    createdAt = $now,
                    updatedAt = $now
                RETURN AFTER"#,
            )
            .bind(("name", data.name.unwrap_or_default()))
            .bind(("email", email))
            .bind(("hash_pass", hash_pass))
            .bind(("avatar", data.avatar.unwrap_or_default()))
            .bind(("cover_image", data.cover_image.unwrap_or_default()))
            .bind(("bio", data.bio))
            .bind(("phone", data.phone))
            .bind(("role", role))
            .bind(("status", status))
            .bind(("now", now))
            .await?;

        result
            .take::<Option<User>>(0)?
            .ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }

    /// List users with filters; blocked accounts are hidden unless
    /// explicitly asked for via the status filter.
    pub async fn list(&self, filter: UserFilter) -> RepoResult<(Vec<User>, usize)> {
        let (_, limit, start) = page_window(filter.page, filter.limit, 10);

        let mut clauses: Vec<&str> = Vec::new();
        if filter.role.is_some() {
            clauses.push("role = $role");
        }
        if filter.status.is_some() {
            clauses.push("status = $status");
        } else {
            clauses.push("status != 'blocked'");
        }
        if filter.q.is_some() {
            clauses.push(
                "(string::lowercase(name) CONTAINS $q OR string::lowercase(email) CONTAINS $q)",
            );
        }
        let where_clause = format!(" WHERE {}", clauses.join(" AND "));

        let sql = format!(
            "SELECT count() AS total FROM user{where_clause} GROUP ALL; \
             SELECT * FROM user{where_clause} ORDER BY createdAt DESC LIMIT {limit} START {start}"
        );

        let mut qb = self.base.db().query(sql);
        if let Some(role) = filter.role {
            qb = qb.bind(("role", role));
        }
        if let Some(status) = filter.status {
            qb = qb.bind(("status", status));
        }
        if let Some(q) = filter.q {
            qb = qb.bind(("q", q.to_lowercase()));
        }

        let mut result = qb.await?;
        let total = result
            .take::<Option<CountRow>>(0)?
            .map(|c| c.total)
            .unwrap_or(0);
        let users: Vec<User> = result.take(1)?;
        Ok((users, total))
    }

    /// Admin update
    pub async fn update(
        &self,
        id: &str,
        data: UserUpdate,
        role: Option<UserRole>,
        status: Option<UserStatus>,
    ) -> RepoResult<User> {
        let thing = parse_record_id(id)?;
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    name = $name OR name,
                    phone = $phone OR phone,
                    bio = $bio OR bio,
                    avatar = $avatar OR avatar,
                    coverImage = $cover_image OR coverImage,
                    role = IF $has_role THEN $role ELSE role END,
                    status = IF $has_status THEN $status ELSE status END,
                    updatedAt = $now
                RETURN AFTER"#,
            )
            .bind(("thing", thing))
            .bind(("name", data.name))
            .bind(("phone", data.phone))
            .bind(("bio", data.bio))
            .bind(("avatar", data.avatar))
            .bind(("cover_image", data.cover_image))
            .bind(("has_role", role.is_some()))
            .bind(("role", role))
            .bind(("has_status", status.is_some()))
            .bind(("status", status))
            .bind(("now", time::now_millis()))
            .await?;

        result
            .take::<Option<User>>(0)?
            .ok_or_else(|| RepoError::NotFound("User not found".to_string()))
    }

    /// Self-service profile update
    pub async fn update_profile(&self, id: &str, data: ProfileUpdate) -> RepoResult<User> {
        let thing = parse_record_id(id)?;
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    name = $name OR name,
                    phone = $phone OR phone,
                    bio = $bio OR bio,
                    updatedAt = $now
                RETURN AFTER"#,
            )
            .bind(("thing", thing))
            .bind(("name", data.name))
            .bind(("phone", data.phone))
            .bind(("bio", data.bio))
            .bind(("now", time::now_millis()))
            .await?;

        result
            .take::<Option<User>>(0)?
            .ok_or_else(|| RepoError::NotFound("User not found".to_string()))
    }

    /// Store an avatar or cover image URL (`field` 只接受白名单内的列名)
    pub async fn set_image(&self, id: &str, field: ImageField, url: String) -> RepoResult<User> {
        let thing = parse_record_id(id)?;
        let sql = format!(
            "UPDATE $thing SET {} = $url, updatedAt = $now RETURN AFTER",
            field.column()
        );
        let mut result = self
            .base
            .db()
            .query(sql)
            .bind(("thing", thing))
            .bind(("url", url))
            .bind(("now", time::now_millis()))
            .await?;

        result
            .take::<Option<User>>(0)?
            .ok_or_else(|| RepoError::NotFound("User not found".to_string()))
    }

    /// Block a user account (admin delete)
    pub async fn block_by_id(&self, id: &str) -> RepoResult<User> {
        let thing = parse_record_id(id)?;
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET status = 'blocked', refreshTokens = [], updatedAt = $now RETURN AFTER")
            .bind(("thing", thing))
            .bind(("now", time::now_millis()))
            .await?;
        result
            .take::<Option<User>>(0)?
            .ok_or_else(|| RepoError::NotFound("User not found".to_string()))
    }

    /// Block a user account by email (admin delete accepts either form)
    pub async fn block_by_email(&self, email: &str) -> RepoResult<User> {
        let email = email.trim().to_lowercase();
        let mut result = self
            .base
            .db()
            .query("UPDATE user SET status = 'blocked', refreshTokens = [], updatedAt = $now WHERE email = $email RETURN AFTER")
            .bind(("email", email))
            .bind(("now", time::now_millis()))
            .await?;
        let users: Vec<User> = result.take(0)?;
        users
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound("User not found".to_string()))
    }

    /// Record a refresh-token digest
    pub async fn push_refresh_token(&self, id: &str, digest: String) -> RepoResult<()> {
        let thing = parse_record_id(id)?;
        self.base
            .db()
            .query("UPDATE $thing SET refreshTokens += $digest, updatedAt = $now")
            .bind(("thing", thing))
            .bind(("digest", digest))
            .bind(("now", time::now_millis()))
            .await?
            .check()?;
        Ok(())
    }

    /// Drop every refresh-token digest (logout)
    pub async fn clear_refresh_tokens(&self, id: &str) -> RepoResult<()> {
        let thing = parse_record_id(id)?;
        self.base
            .db()
            .query("UPDATE $thing SET refreshTokens = [], updatedAt = $now")
            .bind(("thing", thing))
            .bind(("now", time::now_millis()))
            .await?
            .check()?;
        Ok(())
    }

    /// Store the account-verification OTP digest
    pub async fn set_verification_otp(
        &self,
        id: &str,
        otp_hash: String,
        expires_at: i64,
    ) -> RepoResult<()> {
        let thing = parse_record_id(id)?;
        self.base
            .db()
            .query("UPDATE $thing SET otpHash = $otp_hash, otpExpiresAt = $expires_at, updatedAt = $now")
            .bind(("thing", thing))
            .bind(("otp_hash", otp_hash))
            .bind(("expires_at", expires_at))
            .bind(("now", time::now_millis()))
            .await?
            .check()?;
        Ok(())
    }

    /// Store the password-reset OTP digest
    pub async fn set_reset_otp(
        &self,
        id: &str,
        otp_hash: String,
        expires_at: i64,
    ) -> RepoResult<()> {
        let thing = parse_record_id(id)?;
        self.base
            .db()
            .query("UPDATE $thing SET resetOtpHash = $otp_hash, resetOtpExpiresAt = $expires_at, updatedAt = $now")
            .bind(("thing", thing))
            .bind(("otp_hash", otp_hash))
            .bind(("expires_at", expires_at))
            .bind(("now", time::now_millis()))
            .await?
            .check()?;
        Ok(())
    }

    /// Replace the password hash and clear reset-OTP state
    pub async fn reset_password(&self, id: &str, hash_pass: String) -> RepoResult<()> {
        let thing = parse_record_id(id)?;
        self.base
            .db()
            .query(
                r#"UPDATE $thing SET
                    hashPass = $hash_pass,
                    resetOtpHash = NONE,
                    resetOtpExpiresAt = NONE,
                    updatedAt = $now"#,
            )
            .bind(("thing", thing))
            .bind(("hash_pass", hash_pass))
            .bind(("now", time::now_millis()))
            .await?
            .check()?;
        Ok(())
    }
}

/// 可被 `set_image` 更新的图片字段白名单
#[derive(Debug, Clone, Copy)]
pub enum ImageField {
    Avatar,
    Cover,
}

impl ImageField {
    fn column(&self) -> &'static str {
        match self {
            ImageField::Avatar => "avatar",
            ImageField::Cover => "coverImage",
        }
    }
}
