//! Employee Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, CountRow, RepoError, RepoResult, page_window, parse_record_id};
use crate::db::models::{
    Employee, EmployeeCreate, EmployeeUpdate, EmploymentType, RecordStatus, UserId,
};
use crate::utils::time;

/// `GET /employees` 查询过滤条件
#[derive(Debug, Default)]
pub struct EmployeeFilter {
    pub q: Option<String>,
    pub department: Option<String>,
    pub status: Option<RecordStatus>,
    pub employment_type: Option<EmploymentType>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

/// 员工分页结果：当页数据、过滤总数、全集总数
#[derive(Debug)]
pub struct EmployeePage {
    pub items: Vec<Employee>,
    pub total: usize,
    pub collection_total: usize,
}

#[derive(Clone)]
pub struct EmployeeRepository {
    base: BaseRepository,
}

impl EmployeeRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Every employee, both statuses. 考勤矩阵在内存中做 q 过滤。
    pub async fn find_all(&self) -> RepoResult<Vec<Employee>> {
        let employees: Vec<Employee> = self
            .base
            .db()
            .query("SELECT * FROM employee ORDER BY name")
            .await?
            .take(0)?;
        Ok(employees)
    }

    /// Find employee by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Employee>> {
        let thing = parse_record_id(id)?;
        let emp: Option<Employee> = self.base.db().select(thing).await?;
        Ok(emp)
    }

    /// Find the employee profile linked to a user account
    pub async fn find_by_user(&self, user: &UserId) -> RepoResult<Option<Employee>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM employee WHERE user = $user LIMIT 1")
            .bind(("user", user.clone()))
            .await?;
        let employees: Vec<Employee> = result.take(0)?;
        Ok(employees.into_iter().next())
    }

    /// List employees with filters plus the unfiltered collection total
    pub async fn list(&self, filter: EmployeeFilter) -> RepoResult<EmployeePage> {
        let (_, limit, start) = page_window(filter.page, filter.limit, 10);

        let mut clauses: Vec<&str> = Vec::new();
        if filter.status.is_some() {
            clauses.push("status = $status");
        } else {
            clauses.push("status = 'active'");
        }
        if filter.department.is_some() {
            clauses.push("department = $department");
        }
        if filter.employment_type.is_some() {
            clauses.push("employmentType = $employment_type");
        }
        if filter.q.is_some() {
            clauses.push(
                "(string::lowercase(name) CONTAINS $q \
                 OR string::lowercase(email) CONTAINS $q \
                 OR string::lowercase(employeeCode) CONTAINS $q)",
            );
        }
        let where_clause = format!(" WHERE {}", clauses.join(" AND "));

        let sql = format!(
            "SELECT count() AS total FROM employee{where_clause} GROUP ALL; \
             SELECT count() AS total FROM employee GROUP ALL; \
             SELECT * FROM employee{where_clause} ORDER BY createdAt DESC LIMIT {limit} START {start}"
        );

        let mut qb = self.base.db().query(sql);
        if let Some(status) = filter.status {
            qb = qb.bind(("status", status));
        }
        if let Some(department) = filter.department {
            qb = qb.bind(("department", department));
        }
        if let Some(employment_type) = filter.employment_type {
            qb = qb.bind(("employment_type", employment_type));
        }
        if let Some(q) = filter.q {
            qb = qb.bind(("q", q.to_lowercase()));
        }

        let mut result = qb.await?;
        let total = result
            .take::<Option<CountRow>>(0)?
            .map(|c| c.total)
            .unwrap_or(0);
        let collection_total = result
            .take::<Option<CountRow>>(1)?
            .map(|c| c.total)
            .unwrap_or(0);
        let items: Vec<Employee> = result.take(2)?;
        Ok(EmployeePage {
            items,
            total,
            collection_total,
        })
    }

    /// Create an employee profile for a user account.
    ///
    /// employeeCode 取 `EMP<millis>`，缺省邮箱为 `<code>@office.local`；
    /// name 为关联 user 姓名的快照。
    pub async fn create(
        &self,
        data: EmployeeCreate,
        user: UserId,
        name: String,
        created_by: UserId,
    ) -> RepoResult<Employee> {
        if self.find_by_user(&user).await?.is_some() {
            return Err(RepoError::Duplicate(
                "Employee profile already exists for this user".to_string(),
            ));
        }

        let now = time::now_millis();
        let employee_code = format!("EMP{}", now);
        let email = format!("{}@office.local", employee_code.to_lowercase());

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE employee SET
                    user = $user,
                    employeeCode = $employee_code,
                    name = $name,
                    email = $email,
                    designation = $designation,
                    department = $department,
                    employmentType = $employment_type,
                    salary = $salary,
                    joiningDate = $joining_date,
                    qualifications = $qualifications,
                    avatarUrl = $avatar_url,
                    cvUrl = $cv_url,
                    phone = $phone,
                    address = $address,
                    createdBy = $created_by,
                    createdAt = $now,
                    updatedAt = $now
                RETURN AFTER"#,
            )
            .bind(("user", user))
            .bind(("employee_code", employee_code))
            .bind(("name", name))
            .bind(("email", email))
            .bind((
                "designation",
                data.designation.unwrap_or_else(|| "Staff".to_string()),
            ))
            .bind((
                "department",
                data.department.unwrap_or_else(|| "General".to_string()),
            ))
            .bind((
                "employment_type",
                data.employment_type.unwrap_or_else(|| "full-time".to_string()),
            ))
            .bind(("salary", data.salary.unwrap_or(0.0)))
            .bind(("joining_date", data.joining_date.unwrap_or(now)))
            .bind(("qualifications", data.qualifications))
            .bind(("avatar_url", data.avatar_url.unwrap_or_default()))
            .bind(("cv_url", data.cv_url.unwrap_or_default()))
            .bind(("phone", data.phone))
            .bind(("address", data.address))
            .bind(("created_by", created_by))
            .bind(("now", now))
            .await?;

        result
            .take::<Option<Employee>>(0)?
            .ok_or_else(|| RepoError::Database("Failed to create employee".to_string()))
    }

    /// Update an employee profile
    pub async fn update(
        &self,
        id: &str,
        data: EmployeeUpdate,
        employment_type: Option<EmploymentType>,
    ) -> RepoResult<Employee> {
        let thing = parse_record_id(id)?;
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    name = $name OR name,
                    designation = $designation OR designation,
                    department = $department OR department,
                    employmentType = IF $has_employment_type THEN $employment_type ELSE employmentType END,
                    salary = IF $has_salary THEN $salary ELSE salary END,
                    joiningDate = IF $has_joining_date THEN $joining_date ELSE joiningDate END,
                    qualifications = $qualifications OR qualifications,
                    phone = $phone OR phone,
                    address = $address OR address,
                    avatarUrl = $avatar_url OR avatarUrl,
                    cvUrl = $cv_url OR cvUrl,
                    updatedAt = $now
                RETURN AFTER"#,
            )
            .bind(("thing", thing))
            .bind(("name", data.name))
            .bind(("designation", data.designation))
            .bind(("department", data.department))
            .bind(("has_employment_type", employment_type.is_some()))
            .bind(("employment_type", employment_type))
            .bind(("has_salary", data.salary.is_some()))
            .bind(("salary", data.salary))
            .bind(("has_joining_date", data.joining_date.is_some()))
            .bind(("joining_date", data.joining_date))
            .bind(("qualifications", data.qualifications))
            .bind(("phone", data.phone))
            .bind(("address", data.address))
            .bind(("avatar_url", data.avatar_url))
            .bind(("cv_url", data.cv_url))
            .bind(("now", time::now_millis()))
            .await?;

        result
            .take::<Option<Employee>>(0)?
            .ok_or_else(|| RepoError::NotFound("Employee not found".to_string()))
    }

    /// Flip the lifecycle status (also used for soft delete)
    pub async fn set_status(&self, id: &str, status: RecordStatus) -> RepoResult<Employee> {
        let thing = parse_record_id(id)?;
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET status = $status, updatedAt = $now RETURN AFTER")
            .bind(("thing", thing))
            .bind(("status", status))
            .bind(("now", time::now_millis()))
            .await?;
        result
            .take::<Option<Employee>>(0)?
            .ok_or_else(|| RepoError::NotFound("Employee not found".to_string()))
    }
}
