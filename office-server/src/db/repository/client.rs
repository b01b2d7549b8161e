//! Client Account Repository
//!
//! 客户与 user 账户以 email 关联；删除为永久删除，外部图片
//! 资源的清理留在 handler 层的 seam。

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, CountRow, RepoError, RepoResult, page_window, parse_record_id};
use crate::db::models::{
    Client, ClientCreate, ClientProfileUpdate, ClientUpdate, RecordStatus,
};
use crate::utils::time;

/// `GET /clients` 查询过滤条件
#[derive(Debug, Default)]
pub struct ClientFilter {
    pub q: Option<String>,
    pub status: Option<RecordStatus>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

#[derive(Clone)]
pub struct ClientRepository {
    base: BaseRepository,
}

impl ClientRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find client by email (lowercased lookup)
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<Client>> {
        let email = email.trim().to_lowercase();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM client WHERE email = $email LIMIT 1")
            .bind(("email", email))
            .await?;
        let clients: Vec<Client> = result.take(0)?;
        Ok(clients.into_iter().next())
    }

    /// Find client by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Client>> {
        let thing = parse_record_id(id)?;
        let client: Option<Client> = self.base.db().select(thing).await?;
        Ok(client)
    }

    /// Create a client account. The caller hashes the password.
    pub async fn create(&self, data: ClientCreate, hash_pass: String) -> RepoResult<Client> {
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
                r#"CREATE client SET
                    name = $name,
                    email = $email,
                    password = $password,
                    avatar = $avatar,
                    coverImage = $cover_image,
                    companyName = $company_name,
                    phone = $phone,
                    address = $address,
                    notes = $notes,
                    role = 'client',
                    status = 'active',
                    isVerified = false,
                    createdAt = $now,
                    updatedAt = $now
                RETURN AFTER"#,
            )
            .bind(("name", data.name.unwrap_or_default()))
            .bind(("email", email))
            .bind(("password", hash_pass))
            .bind(("avatar", data.avatar.unwrap_or_default()))
            .bind(("cover_image", data.cover_image.unwrap_or_default()))
            .bind(("company_name", data.company_name))
            .bind(("phone", data.phone))
            .bind(("address", data.address))
            .bind(("notes", data.notes))
            .bind(("now", now))
            .await?;

        result
            .take::<Option<Client>>(0)?
            .ok_or_else(|| RepoError::Database("Failed to create client".to_string()))
    }

    /// List clients; soft-deleted hidden unless asked for via status
    pub async fn list(&self, filter: ClientFilter) -> RepoResult<(Vec<Client>, usize)> {
        let (_, limit, start) = page_window(filter.page, filter.limit, 10);

        let mut clauses: Vec<&str> = Vec::new();
        if filter.status.is_some() {
            clauses.push("status = $status");
        } else {
            clauses.push("status = 'active'");
        }
        if filter.q.is_some() {
            clauses.push(
                "(string::lowercase(name) CONTAINS $q \
                 OR string::lowercase(email) CONTAINS $q \
                 OR string::lowercase(companyName OR '') CONTAINS $q)",
            );
        }
        let where_clause = format!(" WHERE {}", clauses.join(" AND "));

        let sql = format!(
            "SELECT count() AS total FROM client{where_clause} GROUP ALL; \
             SELECT * FROM client{where_clause} ORDER BY createdAt DESC LIMIT {limit} START {start}"
        );

        let mut qb = self.base.db().query(sql);
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
        let clients: Vec<Client> = result.take(1)?;
        Ok((clients, total))
    }

    /// Admin update
    pub async fn update(
        &self,
        id: &str,
        data: ClientUpdate,
        status: Option<RecordStatus>,
    ) -> RepoResult<Client> {
        let thing = parse_record_id(id)?;
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    name = $name OR name,
                    companyName = $company_name OR companyName,
                    phone = $phone OR phone,
                    address = $address OR address,
                    notes = $notes OR notes,
                    status = IF $has_status THEN $status ELSE status END,
                    isVerified = IF $has_verified THEN $is_verified ELSE isVerified END,
                    updatedAt = $now
                RETURN AFTER"#,
            )
            .bind(("thing", thing))
            .bind(("name", data.name))
            .bind(("company_name", data.company_name))
            .bind(("phone", data.phone))
            .bind(("address", data.address))
            .bind(("notes", data.notes))
            .bind(("has_status", status.is_some()))
            .bind(("status", status))
            .bind(("has_verified", data.is_verified.is_some()))
            .bind(("is_verified", data.is_verified))
            .bind(("now", time::now_millis()))
            .await?;

        result
            .take::<Option<Client>>(0)?
            .ok_or_else(|| RepoError::NotFound("Client not found".to_string()))
    }

    /// Self-service profile update (`PATCH /clients/me`)
    pub async fn update_profile(&self, id: &str, data: ClientProfileUpdate) -> RepoResult<Client> {
        let thing = parse_record_id(id)?;
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    name = $name OR name,
                    companyName = $company_name OR companyName,
                    phone = $phone OR phone,
                    address = $address OR address,
                    updatedAt = $now
                RETURN AFTER"#,
            )
            .bind(("thing", thing))
            .bind(("name", data.name))
            .bind(("company_name", data.company_name))
            .bind(("phone", data.phone))
            .bind(("address", data.address))
            .bind(("now", time::now_millis()))
            .await?;

        result
            .take::<Option<Client>>(0)?
            .ok_or_else(|| RepoError::NotFound("Client not found".to_string()))
    }

    /// Store an avatar or cover image URL
    pub async fn set_image(
        &self,
        id: &str,
        field: ClientImageField,
        url: String,
    ) -> RepoResult<Client> {
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
            .take::<Option<Client>>(0)?
            .ok_or_else(|| RepoError::NotFound("Client not found".to_string()))
    }

    /// Permanent delete; returns the removed record so the handler can
    /// clean up externally stored images.
    pub async fn delete(&self, id: &str) -> RepoResult<Client> {
        let thing = parse_record_id(id)?;
        let mut result = self
            .base
            .db()
            .query("DELETE $thing RETURN BEFORE")
            .bind(("thing", thing))
            .await?;
        let deleted: Vec<Client> = result.take(0)?;
        deleted
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound("Client not found".to_string()))
    }
}

/// 可被 `set_image` 更新的图片字段白名单
#[derive(Debug, Clone, Copy)]
pub enum ClientImageField {
    Avatar,
    Cover,
}

impl ClientImageField {
    fn column(&self) -> &'static str {
        match self {
            ClientImageField::Avatar => "avatar",
            ClientImageField::Cover => "coverImage",
        }
    }
}
