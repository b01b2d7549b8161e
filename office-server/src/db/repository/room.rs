//! Room Repository
//!
//! `type` 是 SurrealQL 关键字，语句中一律反引号转义。

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, CountRow, RepoError, RepoResult, page_window, parse_record_id};
use crate::db::models::{Room, RoomStatus, RoomType, UserId};
use crate::utils::time;

/// `GET /rooms` 查询过滤条件
#[derive(Debug, Default)]
pub struct RoomFilter {
    pub q: Option<String>,
    pub status: Option<RoomStatus>,
    pub room_type: Option<RoomType>,
    pub floor: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

#[derive(Clone)]
pub struct RoomRepository {
    base: BaseRepository,
}

impl RoomRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find room by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Room>> {
        let thing = parse_record_id(id)?;
        let room: Option<Room> = self.base.db().select(thing).await?;
        Ok(room)
    }

    /// 大小写不敏感的重名检查 (排除软删记录)
    pub async fn name_taken(&self, name: &str, exclude: Option<&RecordId>) -> RepoResult<bool> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT count() AS total FROM room \
                 WHERE string::lowercase(name) = $name \
                 AND status != 'inactive' \
                 AND ($exclude = NONE OR id != $exclude) GROUP ALL",
            )
            .bind(("name", name.trim().to_lowercase()))
            .bind(("exclude", exclude.cloned()))
            .await?;
        let total = result
            .take::<Option<CountRow>>(0)?
            .map(|c| c.total)
            .unwrap_or(0);
        Ok(total > 0)
    }

    /// Create a room
    pub async fn create(
        &self,
        name: String,
        room_type: RoomType,
        capacity: u32,
        floor: Option<String>,
        remarks: Option<String>,
        created_by: UserId,
    ) -> RepoResult<Room> {
        if self.name_taken(&name, None).await? {
            return Err(RepoError::Duplicate(
                "Room with this name already exists".to_string(),
            ));
        }

        let now = time::now_millis();
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE room SET
                    name = $name,
                    `type` = $room_type,
                    capacity = $capacity,
                    floor = $floor,
                    status = 'available',
                    remarks = $remarks,
                    createdBy = $created_by,
                    createdAt = $now,
                    updatedAt = $now
                RETURN AFTER"#,
            )
            .bind(("name", name))
            .bind(("room_type", room_type))
            .bind(("capacity", capacity))
            .bind(("floor", floor))
            .bind(("remarks", remarks))
            .bind(("created_by", created_by))
            .bind(("now", now))
            .await?;

        result
            .take::<Option<Room>>(0)?
            .ok_or_else(|| RepoError::Database("Failed to create room".to_string()))
    }

    /// List rooms; soft-deleted (inactive) hidden unless asked for
    pub async fn list(&self, filter: RoomFilter) -> RepoResult<(Vec<Room>, usize)> {
        let (_, limit, start) = page_window(filter.page, filter.limit, 10);

        let mut clauses: Vec<&str> = Vec::new();
        if filter.status.is_some() {
            clauses.push("status = $status");
        } else {
            clauses.push("status != 'inactive'");
        }
        if filter.room_type.is_some() {
            clauses.push("`type` = $room_type");
        }
        if filter.floor.is_some() {
            clauses.push("floor = $floor");
        }
        if filter.q.is_some() {
            clauses.push(
                "(string::lowercase(name) CONTAINS $q \
                 OR string::lowercase(remarks OR '') CONTAINS $q)",
            );
        }
        let where_clause = format!(" WHERE {}", clauses.join(" AND "));

        let sql = format!(
            "SELECT count() AS total FROM room{where_clause} GROUP ALL; \
             SELECT * FROM room{where_clause} ORDER BY name LIMIT {limit} START {start}"
        );

        let mut qb = self.base.db().query(sql);
        if let Some(status) = filter.status {
            qb = qb.bind(("status", status));
        }
        if let Some(room_type) = filter.room_type {
            qb = qb.bind(("room_type", room_type));
        }
        if let Some(floor) = filter.floor {
            qb = qb.bind(("floor", floor));
        }
        if let Some(q) = filter.q {
            qb = qb.bind(("q", q.to_lowercase()));
        }

        let mut result = qb.await?;
        let total = result
            .take::<Option<CountRow>>(0)?
            .map(|c| c.total)
            .unwrap_or(0);
        let rooms: Vec<Room> = result.take(1)?;
        Ok((rooms, total))
    }

    /// Update room fields; the handler re-checks name uniqueness first
    pub async fn update(
        &self,
        id: &RecordId,
        name: Option<String>,
        room_type: Option<RoomType>,
        capacity: Option<u32>,
        floor: Option<String>,
        status: Option<RoomStatus>,
        remarks: Option<String>,
    ) -> RepoResult<Room> {
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    name = $name OR name,
                    `type` = IF $has_type THEN $room_type ELSE `type` END,
                    capacity = IF $has_capacity THEN $capacity ELSE capacity END,
                    floor = $floor OR floor,
                    status = IF $has_status THEN $status ELSE status END,
                    remarks = $remarks OR remarks,
                    updatedAt = $now
                RETURN AFTER"#,
            )
            .bind(("thing", id.clone()))
            .bind(("name", name))
            .bind(("has_type", room_type.is_some()))
            .bind(("room_type", room_type))
            .bind(("has_capacity", capacity.is_some()))
            .bind(("capacity", capacity))
            .bind(("floor", floor))
            .bind(("has_status", status.is_some()))
            .bind(("status", status))
            .bind(("remarks", remarks))
            .bind(("now", time::now_millis()))
            .await?;

        result
            .take::<Option<Room>>(0)?
            .ok_or_else(|| RepoError::NotFound("Room not found".to_string()))
    }

    /// 指派占用方并置 occupied
    pub async fn assign(&self, id: &RecordId, assigned_to: String) -> RepoResult<Room> {
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $thing SET assignedTo = $assigned_to, status = 'occupied', \
                 updatedAt = $now RETURN AFTER",
            )
            .bind(("thing", id.clone()))
            .bind(("assigned_to", assigned_to))
            .bind(("now", time::now_millis()))
            .await?;
        result
            .take::<Option<Room>>(0)?
            .ok_or_else(|| RepoError::NotFound("Room not found".to_string()))
    }

    /// 释放占用并回到 available
    pub async fn release(&self, id: &RecordId) -> RepoResult<Room> {
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
            .take::<Option<Room>>(0)?
            .ok_or_else(|| RepoError::NotFound("Room not found".to_string()))
    }

    /// Soft delete (status → inactive)
    pub async fn soft_delete(&self, id: &RecordId) -> RepoResult<Room> {
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET status = 'inactive', updatedAt = $now RETURN AFTER")
            .bind(("thing", id.clone()))
            .bind(("now", time::now_millis()))
            .await?;
        result
            .take::<Option<Room>>(0)?
            .ok_or_else(|| RepoError::NotFound("Room not found".to_string()))
    }
}
