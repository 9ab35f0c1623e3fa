//! PostgreSQL store. Tables live in the schema given at construction
//! (`DATABASE_SCHEMA`, default `public`); see `migration` for the DDL.

use super::{CourseStore, EnrollmentStore, PageRequest, Store, StudentStore};
use crate::domain::{Course, Enrollment, Gender, NewCourse, Student, StudentData};
use crate::error::{AppError, ConfigError};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

const STUDENT_COLUMNS: &str = "id, first_name, last_name, birth_date, gender, gsm_number";

#[derive(sqlx::FromRow)]
struct StudentRow {
    id: i64,
    first_name: String,
    last_name: String,
    birth_date: NaiveDate,
    gender: String,
    gsm_number: Option<String>,
}

impl TryFrom<StudentRow> for Student {
    type Error = AppError;

    fn try_from(row: StudentRow) -> Result<Self, Self::Error> {
        let gender = row
            .gender
            .parse::<Gender>()
            .map_err(|e| AppError::Internal(format!("student {}: {}", row.id, e)))?;
        Ok(Student {
            id: row.id,
            data: StudentData {
                first_name: row.first_name,
                last_name: row.last_name,
                birth_date: row.birth_date,
                gender,
                gsm_number: row.gsm_number,
            },
        })
    }
}

#[derive(sqlx::FromRow)]
struct CourseRow {
    id: i64,
    name: String,
    phase: i32,
}

impl From<CourseRow> for Course {
    fn from(row: CourseRow) -> Self {
        Course {
            id: row.id,
            name: row.name,
            phase: row.phase,
        }
    }
}

fn students_from_rows(rows: Vec<StudentRow>) -> Result<Vec<Student>, AppError> {
    rows.into_iter().map(Student::try_from).collect()
}

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
    schema: String,
}

impl PgStore {
    pub fn new(pool: PgPool, schema: impl Into<String>) -> Self {
        Self {
            pool,
            schema: schema.into(),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Schema-qualified table name (e.g. `"public".student`).
    fn table(&self, name: &str) -> String {
        format!("{}.{}", quote_ident(&self.schema), name)
    }
}

#[async_trait]
impl StudentStore for PgStore {
    async fn insert_student(&self, data: &StudentData) -> Result<Student, AppError> {
        let sql = format!(
            "INSERT INTO {} (first_name, last_name, birth_date, gender, gsm_number) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            self.table("student"),
            STUDENT_COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        let row: StudentRow = sqlx::query_as(&sql)
            .bind(&data.first_name)
            .bind(&data.last_name)
            .bind(data.birth_date)
            .bind(data.gender.as_code())
            .bind(&data.gsm_number)
            .fetch_one(&self.pool)
            .await?;
        row.try_into()
    }

    async fn save_student(&self, student: &Student) -> Result<Option<Student>, AppError> {
        let sql = format!(
            "UPDATE {} SET first_name = $1, last_name = $2, birth_date = $3, gender = $4, gsm_number = $5 \
             WHERE id = $6 RETURNING {}",
            self.table("student"),
            STUDENT_COLUMNS
        );
        tracing::debug!(sql = %sql, id = student.id, "query");
        let data = &student.data;
        let row: Option<StudentRow> = sqlx::query_as(&sql)
            .bind(&data.first_name)
            .bind(&data.last_name)
            .bind(data.birth_date)
            .bind(data.gender.as_code())
            .bind(&data.gsm_number)
            .bind(student.id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Student::try_from).transpose()
    }

    async fn find_student(&self, id: i64) -> Result<Option<Student>, AppError> {
        let sql = format!("SELECT {} FROM {} WHERE id = $1", STUDENT_COLUMNS, self.table("student"));
        tracing::debug!(sql = %sql, id, "query");
        let row: Option<StudentRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Student::try_from).transpose()
    }

    async fn list_students(&self, page: PageRequest) -> Result<(Vec<Student>, u64), AppError> {
        let sql = format!(
            "SELECT {} FROM {} ORDER BY id LIMIT $1 OFFSET $2",
            STUDENT_COLUMNS,
            self.table("student")
        );
        tracing::debug!(sql = %sql, page = page.page, size = page.size, "query");
        let offset = i64::try_from(page.offset())
            .map_err(|_| AppError::BadRequest("page out of range".into()))?;
        let rows: Vec<StudentRow> = sqlx::query_as(&sql)
            .bind(i64::from(page.size))
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        let (total,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {}", self.table("student")))
            .fetch_one(&self.pool)
            .await?;
        Ok((students_from_rows(rows)?, total.max(0) as u64))
    }

    async fn delete_student(&self, id: i64) -> Result<bool, AppError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", self.table("student"));
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl CourseStore for PgStore {
    async fn insert_course(&self, course: &NewCourse) -> Result<Course, AppError> {
        let sql = format!(
            "INSERT INTO {} (name, phase) VALUES ($1, $2) RETURNING id, name, phase",
            self.table("course")
        );
        tracing::debug!(sql = %sql, "query");
        let row: CourseRow = sqlx::query_as(&sql)
            .bind(&course.name)
            .bind(course.phase)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.into())
    }

    async fn find_course(&self, id: i64) -> Result<Option<Course>, AppError> {
        let sql = format!("SELECT id, name, phase FROM {} WHERE id = $1", self.table("course"));
        tracing::debug!(sql = %sql, id, "query");
        let row: Option<CourseRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Course::from))
    }

    async fn find_course_by_name(&self, name: &str) -> Result<Option<Course>, AppError> {
        let sql = format!(
            "SELECT id, name, phase FROM {} WHERE name = $1 ORDER BY id LIMIT 1",
            self.table("course")
        );
        tracing::debug!(sql = %sql, name, "query");
        let row: Option<CourseRow> = sqlx::query_as(&sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Course::from))
    }

    async fn list_courses(&self) -> Result<Vec<Course>, AppError> {
        let sql = format!("SELECT id, name, phase FROM {} ORDER BY id", self.table("course"));
        tracing::debug!(sql = %sql, "query");
        let rows: Vec<CourseRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(Course::from).collect())
    }
}

#[async_trait]
impl EnrollmentStore for PgStore {
    async fn enroll(&self, enrollment: Enrollment) -> Result<bool, AppError> {
        let sql = format!(
            "INSERT INTO {} (student_id, course_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
            self.table("student_courses")
        );
        tracing::debug!(sql = %sql, student_id = enrollment.student_id, course_id = enrollment.course_id, "query");
        let result = sqlx::query(&sql)
            .bind(enrollment.student_id)
            .bind(enrollment.course_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn unenroll(&self, enrollment: Enrollment) -> Result<bool, AppError> {
        let sql = format!(
            "DELETE FROM {} WHERE student_id = $1 AND course_id = $2",
            self.table("student_courses")
        );
        tracing::debug!(sql = %sql, student_id = enrollment.student_id, course_id = enrollment.course_id, "query");
        let result = sqlx::query(&sql)
            .bind(enrollment.student_id)
            .bind(enrollment.course_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn courses_of_student(&self, student_id: i64) -> Result<Vec<Course>, AppError> {
        let sql = format!(
            "SELECT c.id, c.name, c.phase FROM {} sc JOIN {} c ON c.id = sc.course_id \
             WHERE sc.student_id = $1 ORDER BY sc.seq",
            self.table("student_courses"),
            self.table("course")
        );
        tracing::debug!(sql = %sql, student_id, "query");
        let rows: Vec<CourseRow> = sqlx::query_as(&sql)
            .bind(student_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Course::from).collect())
    }

    async fn students_of_course(&self, course_id: i64) -> Result<Vec<Student>, AppError> {
        let sql = format!(
            "SELECT s.id, s.first_name, s.last_name, s.birth_date, s.gender, s.gsm_number \
             FROM {} sc JOIN {} s ON s.id = sc.student_id \
             WHERE sc.course_id = $1 ORDER BY sc.seq",
            self.table("student_courses"),
            self.table("student")
        );
        tracing::debug!(sql = %sql, course_id, "query");
        let rows: Vec<StudentRow> = sqlx::query_as(&sql)
            .bind(course_id)
            .fetch_all(&self.pool)
            .await?;
        students_from_rows(rows)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| ConfigError::DatabaseUrl(e.to_string()))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), ConfigError> {
    let path_start = url
        .rfind('/')
        .ok_or_else(|| ConfigError::DatabaseUrl("no path".into()))?
        + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    Ok((format!("{}postgres", base), db_name.to_string()))
}

pub(crate) fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
