//! PostgreSQL store. The `students` table lives in the schema named by `STUDENTS_SCHEMA` (default `public`).

use super::StudentStore;
use crate::config::StoreKind;
use crate::error::{AppError, ConfigError};
use crate::model::Student;
use async_trait::async_trait;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

const TABLE: &str = "students";
const COLUMNS: &str = "id, name, registration_number";

#[derive(Clone)]
pub struct PgStudentStore {
    pool: PgPool,
    schema: String,
}

impl PgStudentStore {
    /// `schema` must already be a valid identifier (checked by `ServerConfig`).
    pub fn new(pool: PgPool, schema: impl Into<String>) -> Self {
        PgStudentStore {
            pool,
            schema: schema.into(),
        }
    }

    fn table(&self) -> String {
        format!("{}.{}", quote_ident(&self.schema), TABLE)
    }

    /// Create the schema and `students` table if missing. Idempotent.
    pub async fn ensure_table(&self) -> Result<(), AppError> {
        sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", quote_ident(&self.schema)))
            .execute(&self.pool)
            .await?;
        let ddl = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                id BIGSERIAL PRIMARY KEY,
                name TEXT,
                registration_number INTEGER
            )
            "#,
            self.table()
        );
        sqlx::query(&ddl).execute(&self.pool).await?;
        tracing::info!(schema = %self.schema, "students table ready");
        Ok(())
    }
}

#[async_trait]
impl StudentStore for PgStudentStore {
    fn kind(&self) -> StoreKind {
        StoreKind::Postgres
    }

    async fn find_all(&self) -> Result<Vec<Student>, AppError> {
        let sql = format!("SELECT {} FROM {} ORDER BY id", COLUMNS, self.table());
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, Student>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Student>, AppError> {
        let sql = format!("SELECT {} FROM {} WHERE id = $1", COLUMNS, self.table());
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Student>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn save(&self, student: Student) -> Result<Student, AppError> {
        match student.id {
            None => {
                let sql = format!(
                    "INSERT INTO {} (name, registration_number) VALUES ($1, $2) RETURNING {}",
                    self.table(),
                    COLUMNS
                );
                tracing::debug!(sql = %sql, "query");
                let row = sqlx::query_as::<_, Student>(&sql)
                    .bind(&student.name)
                    .bind(student.registration_number)
                    .fetch_one(&self.pool)
                    .await?;
                Ok(row)
            }
            Some(id) => {
                let sql = format!(
                    "UPDATE {} SET name = $2, registration_number = $3 WHERE id = $1 RETURNING {}",
                    self.table(),
                    COLUMNS
                );
                tracing::debug!(sql = %sql, id, "query");
                sqlx::query_as::<_, Student>(&sql)
                    .bind(id)
                    .bind(&student.name)
                    .bind(student.registration_number)
                    .fetch_optional(&self.pool)
                    .await?
                    .ok_or_else(|| AppError::student_not_found(id))
            }
        }
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", self.table());
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, AppError> {
        let sql = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = $1)", self.table());
        let exists: (bool,) = sqlx::query_as(&sql).bind(id).fetch_one(&self.pool).await?;
        Ok(exists.0)
    }

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
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url).map_err(|e| invalid_database_url(e.to_string()))?;
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

fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let path_start = url.rfind('/').ok_or_else(|| invalid_database_url("no path".into()))? + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    let admin_url = format!("{}postgres", base);
    Ok((admin_url, db_name.to_string()))
}

fn invalid_database_url(reason: String) -> AppError {
    AppError::Config(ConfigError::InvalidVar {
        var: "DATABASE_URL",
        reason,
    })
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
