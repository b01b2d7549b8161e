//! Attendance Repository
//!
//! (employee, day) 唯一索引是并发下的最终防线，create 碰撞
//! 以 Duplicate 冒泡；工时由调用方重算后整体落盘。

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, CountRow, RepoError, RepoResult, page_window};
use crate::db::models::{Attendance, AttendanceStatus, AttendanceSnapshot, EmployeeId, UserId};
use crate::utils::time;

/// 落盘字段集合：调用方先行完成工时重算，repository 不再推导
#[derive(Debug, Clone, Default)]
pub struct AttendanceWrite {
    pub check_in: Option<i64>,
    pub check_out: Option<i64>,
    pub attendance_status: AttendanceStatus,
    pub remarks: Option<String>,
    pub total_hours: f64,
    pub overtime_hours: f64,
}

#[derive(Clone)]
pub struct AttendanceRepository {
    base: BaseRepository,
}

impl AttendanceRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find attendance by record id
    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Attendance>> {
        let record: Option<Attendance> = self.base.db().select(id.clone()).await?;
        Ok(record)
    }

    /// 按 (employee, day) 查唯一记录
    pub async fn find_for_day(
        &self,
        employee: &EmployeeId,
        day: i64,
    ) -> RepoResult<Option<Attendance>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM attendance WHERE employee = $employee AND day = $day LIMIT 1")
            .bind(("employee", employee.clone()))
            .bind(("day", day))
            .await?;
        let records: Vec<Attendance> = result.take(0)?;
        Ok(records.into_iter().next())
    }

    /// 取日期窗口内的全部落盘记录，`[start, end)` 语义
    pub async fn find_in_range(&self, start: i64, end: i64) -> RepoResult<Vec<Attendance>> {
        let records: Vec<Attendance> = self
            .base
            .db()
            .query("SELECT * FROM attendance WHERE day >= $start AND day < $end")
            .bind(("start", start))
            .bind(("end", end))
            .await?
            .take(0)?;
        Ok(records)
    }

    /// `GET /attendance/me` 的个人记录分页，按 day 倒序
    pub async fn list_for_employee(
        &self,
        employee: &EmployeeId,
        page: Option<usize>,
        limit: Option<usize>,
    ) -> RepoResult<(Vec<Attendance>, usize)> {
        let (_, limit, start) = page_window(page, limit, 31);
        let sql = format!(
            "SELECT count() AS total FROM attendance WHERE employee = $employee GROUP ALL; \
             SELECT * FROM attendance WHERE employee = $employee \
             ORDER BY day DESC LIMIT {limit} START {start}"
        );
        let mut result = self
            .base
            .db()
            .query(sql)
            .bind(("employee", employee.clone()))
            .await?;
        let total = result
            .take::<Option<CountRow>>(0)?
            .map(|c| c.total)
            .unwrap_or(0);
        let records: Vec<Attendance> = result.take(1)?;
        Ok((records, total))
    }

    /// Create the attendance record for a given day.
    ///
    /// 唯一索引拦下同日重复写入，冲突以 Duplicate 返回。
    pub async fn create_for_day(
        &self,
        employee: EmployeeId,
        day: i64,
        write: AttendanceWrite,
        created_by: Option<UserId>,
    ) -> RepoResult<Attendance> {
        let now = time::now_millis();
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE attendance SET
                    employee = $employee,
                    day = $day,
                    checkIn = $check_in,
                    checkOut = $check_out,
                    totalHours = $total_hours,
                    overtimeHours = $overtime_hours,
                    attendanceStatus = $attendance_status,
                    remarks = $remarks,
                    createdBy = $created_by,
                    createdAt = $now,
                    updatedAt = $now
                RETURN AFTER"#,
            )
            .bind(("employee", employee))
            .bind(("day", day))
            .bind(("check_in", write.check_in))
            .bind(("check_out", write.check_out))
            .bind(("total_hours", write.total_hours))
            .bind(("overtime_hours", write.overtime_hours))
            .bind(("attendance_status", write.attendance_status))
            .bind(("remarks", write.remarks))
            .bind(("created_by", created_by))
            .bind(("now", now))
            .await?;

        result
            .take::<Option<Attendance>>(0)?
            .ok_or_else(|| RepoError::Database("Failed to create attendance record".to_string()))
    }

    /// Overwrite the mutable fields of a stored record
    pub async fn update(&self, id: &RecordId, write: AttendanceWrite) -> RepoResult<Attendance> {
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    checkIn = $check_in,
                    checkOut = $check_out,
                    totalHours = $total_hours,
                    overtimeHours = $overtime_hours,
                    attendanceStatus = $attendance_status,
                    remarks = $remarks,
                    updatedAt = $now
                RETURN AFTER"#,
            )
            .bind(("thing", id.clone()))
            .bind(("check_in", write.check_in))
            .bind(("check_out", write.check_out))
            .bind(("total_hours", write.total_hours))
            .bind(("overtime_hours", write.overtime_hours))
            .bind(("attendance_status", write.attendance_status))
            .bind(("remarks", write.remarks))
            .bind(("now", time::now_millis()))
            .await?;

        result
            .take::<Option<Attendance>>(0)?
            .ok_or_else(|| RepoError::NotFound("Attendance record not found".to_string()))
    }

    /// 管理员删除为永久删除
    pub async fn delete(&self, id: &RecordId) -> RepoResult<Attendance> {
        let mut result = self
            .base
            .db()
            .query("DELETE $thing RETURN BEFORE")
            .bind(("thing", id.clone()))
            .await?;
        let deleted: Vec<Attendance> = result.take(0)?;
        deleted
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound("Attendance record not found".to_string()))
    }

    /// 工资周期考勤快照：窗口内落盘记录数 + present/absent 计数
    pub async fn snapshot_for_period(
        &self,
        employee: &EmployeeId,
        start: i64,
        end: i64,
    ) -> RepoResult<AttendanceSnapshot> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT count() AS total FROM attendance \
                 WHERE employee = $employee AND day >= $start AND day < $end GROUP ALL; \
                 SELECT count() AS total FROM attendance \
                 WHERE employee = $employee AND day >= $start AND day < $end \
                 AND attendanceStatus = 'present' GROUP ALL; \
                 SELECT count() AS total FROM attendance \
                 WHERE employee = $employee AND day >= $start AND day < $end \
                 AND attendanceStatus = 'absent' GROUP ALL",
            )
            .bind(("employee", employee.clone()))
            .bind(("start", start))
            .bind(("end", end))
            .await?;

        let take_count = |row: Option<CountRow>| row.map(|c| c.total).unwrap_or(0) as u32;
        let working_days = take_count(result.take(0)?);
        let present_days = take_count(result.take(1)?);
        let absent_days = take_count(result.take(2)?);
        Ok(AttendanceSnapshot {
            working_days,
            present_days,
            absent_days,
        })
    }
}
