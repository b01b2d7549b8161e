//! Asset Repository
//!
//! 指派目标以 `{model, id}` tagged union 整体落盘，schema 层
//! ASSERT 判别符闭集。

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, CountRow, RepoError, RepoResult, page_window, parse_record_id};
use crate::db::models::{Asset, AssetAssignee, AssetCategory, AssetStatus, UserId};
use crate::utils::time;

/// `GET /assets` 查询过滤条件
#[derive(Debug, Default)]
pub struct AssetFilter {
    pub q: Option<String>,
    pub status: Option<AssetStatus>,
    pub category: Option<AssetCategory>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

/// 创建时由 handler 校验后组装的字段集合
#[derive(Debug, Clone)]
pub struct AssetWrite {
    pub name: String,
    pub category: AssetCategory,
    pub serial_number: String,
    pub purchase_date: Option<i64>,
    pub warranty_expiry: Option<i64>,
    pub cost: f64,
    pub location: Option<RecordId>,
    pub remarks: Option<String>,
}

#[derive(Clone)]
pub struct AssetRepository {
    base: BaseRepository,
}

impl AssetRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find asset by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Asset>> {
        let thing = parse_record_id(id)?;
        let asset: Option<Asset> = self.base.db().select(thing).await?;
        Ok(asset)
    }

    /// Find asset by serial number
    pub async fn find_by_serial(&self, serial_number: &str) -> RepoResult<Option<Asset>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM asset WHERE serialNumber = $serial LIMIT 1")
            .bind(("serial", serial_number.to_string()))
            .await?;
        let assets: Vec<Asset> = result.take(0)?;
        Ok(assets.into_iter().next())
    }

    /// Create an asset
    pub async fn create(&self, write: AssetWrite, created_by: UserId) -> RepoResult<Asset> {
        // Pre-check for a friendlier message; the unique index is the real guard
        if self.find_by_serial(&write.serial_number).await?.is_some() {
            return Err(RepoError::Duplicate(
                "Asset with this serialNumber already exists".to_string(),
            ));
        }

        let now = time::now_millis();
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE asset SET
                    name = $name,
                    category = $category,
                    serialNumber = $serial_number,
                    purchaseDate = $purchase_date,
                    warrantyExpiry = $warranty_expiry,
                    cost = $cost,
                    status = 'available',
                    location = $location,
                    remarks = $remarks,
                    createdBy = $created_by,
                    createdAt = $now,
                    updatedAt = $now
                RETURN AFTER"#,
            )
            .bind(("name", write.name))
            .bind(("category", write.category))
            .bind(("serial_number", write.serial_number))
            .bind(("purchase_date", write.purchase_date))
            .bind(("warranty_expiry", write.warranty_expiry))
            .bind(("cost", write.cost))
            .bind(("location", write.location))
            .bind(("remarks", write.remarks))
            .bind(("created_by", created_by))
            .bind(("now", now))
            .await?;

        result
            .take::<Option<Asset>>(0)?
            .ok_or_else(|| RepoError::Database("Failed to create asset".to_string()))
    }

    /// List assets; retired included only when filtered for explicitly
    pub async fn list(&self, filter: AssetFilter) -> RepoResult<(Vec<Asset>, usize)> {
        let (_, limit, start) = page_window(filter.page, filter.limit, 10);

        let mut clauses: Vec<&str> = Vec::new();
        if filter.status.is_some() {
            clauses.push("status = $status");
        } else {
            clauses.push("status != 'retired'");
        }
        if filter.category.is_some() {
            clauses.push("category = $category");
        }
        if filter.q.is_some() {
            clauses.push(
                "(string::lowercase(name) CONTAINS $q \
                 OR string::lowercase(serialNumber) CONTAINS $q)",
            );
        }
        let where_clause = format!(" WHERE {}", clauses.join(" AND "));

        let sql = format!(
            "SELECT count() AS total FROM asset{where_clause} GROUP ALL; \
             SELECT * FROM asset{where_clause} ORDER BY createdAt DESC LIMIT {limit} START {start}"
        );

        let mut qb = self.base.db().query(sql);
        if let Some(status) = filter.status {
            qb = qb.bind(("status", status));
        }
        if let Some(category) = filter.category {
            qb = qb.bind(("category", category));
        }
        if let Some(q) = filter.q {
            qb = qb.bind(("q", q.to_lowercase()));
        }

        let mut result = qb.await?;
        let total = result
            .take::<Option<CountRow>>(0)?
            .map(|c| c.total)
            .unwrap_or(0);
        let assets: Vec<Asset> = result.take(1)?;
        Ok((assets, total))
    }

    /// Update asset fields that appear in the payload
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: &RecordId,
        name: Option<String>,
        category: Option<AssetCategory>,
        purchase_date: Option<i64>,
        warranty_expiry: Option<i64>,
        cost: Option<f64>,
        status: Option<AssetStatus>,
        location: Option<RecordId>,
        remarks: Option<String>,
    ) -> RepoResult<Asset> {
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    name = $name OR name,
                    category = IF $has_category THEN $category ELSE category END,
                    purchaseDate = IF $has_purchase THEN $purchase_date ELSE purchaseDate END,
                    warrantyExpiry = IF $has_warranty THEN $warranty_expiry ELSE warrantyExpiry END,
                    cost = IF $has_cost THEN $cost ELSE cost END,
                    status = IF $has_status THEN $status ELSE status END,
                    location = IF $has_location THEN $location ELSE location END,
                    remarks = $remarks OR remarks,
                    updatedAt = $now
                RETURN AFTER"#,
            )
            .bind(("thing", id.clone()))
            .bind(("name", name))
            .bind(("has_category", category.is_some()))
            .bind(("category", category))
            .bind(("has_purchase", purchase_date.is_some()))
            .bind(("purchase_date", purchase_date))
            .bind(("has_warranty", warranty_expiry.is_some()))
            .bind(("warranty_expiry", warranty_expiry))
            .bind(("has_cost", cost.is_some()))
            .bind(("cost", cost))
            .bind(("has_status", status.is_some()))
            .bind(("status", status))
            .bind(("has_location", location.is_some()))
            .bind(("location", location))
            .bind(("remarks", remarks))
            .bind(("now", time::now_millis()))
            .await?;

        result
            .take::<Option<Asset>>(0)?
            .ok_or_else(|| RepoError::NotFound("Asset not found".to_string()))
    }

    /// 指派给员工/项目/房间，目标存在性由 handler 先行校验
    pub async fn assign(&self, id: &RecordId, assignee: AssetAssignee) -> RepoResult<Asset> {
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $thing SET assignedTo = $assignee, status = 'assigned', \
                 updatedAt = $now RETURN AFTER",
            )
            .bind(("thing", id.clone()))
            .bind(("assignee", assignee))
            .bind(("now", time::now_millis()))
            .await?;
        result
            .take::<Option<Asset>>(0)?
            .ok_or_else(|| RepoError::NotFound("Asset not found".to_string()))
    }

    /// 解除指派并回到 available
    pub async fn unassign(&self, id: &RecordId) -> RepoResult<Asset> {
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $thing SET assignedTo = NONE, status = 'available', \
                 updatedAt = $now RETURN AFTER",
            )
            .bind(("thing", id.clone()))
            .bind(("now", time::now_millis()))
            .await?;
        result
            .take::<Option<Asset>>(0)?
            .ok_or_else(|| RepoError::NotFound("Asset not found".to_string()))
    }

    /// 状态流转：maintenance / retired (delete 即 retire)
    pub async fn set_status(&self, id: &RecordId, status: AssetStatus) -> RepoResult<Asset> {
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET status = $status, updatedAt = $now RETURN AFTER")
            .bind(("thing", id.clone()))
            .bind(("status", status))
            .bind(("now", time::now_millis()))
            .await?;
        result
            .take::<Option<Asset>>(0)?
            .ok_or_else(|| RepoError::NotFound("Asset not found".to_string()))
    }
}
