//! Student persistence: the `StudentStore` contract and its engines.

mod memory;
mod postgres;

pub use memory::MemoryStudentStore;
pub use postgres::{ensure_database_exists, PgStudentStore};

use crate::config::{ServerConfig, StoreKind};
use crate::error::AppError;
use crate::model::Student;
use async_trait::async_trait;
use std::sync::Arc;

/// Persistence boundary for student rows, keyed by integer id.
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// All rows in ascending id order.
    async fn find_all(&self) -> Result<Vec<Student>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Student>, AppError>;

    /// Insert when `student.id` is `None` (the store assigns the id), otherwise
    /// overwrite the row with that id. Overwriting a row that no longer exists
    /// fails with `NotFound` instead of recreating it.
    async fn save(&self, student: Student) -> Result<Student, AppError>;

    /// Returns true if a row was removed.
    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError>;

    async fn exists_by_id(&self, id: i64) -> Result<bool, AppError>;

    /// Engine name reported by `/ready`.
    fn kind(&self) -> StoreKind;

    /// Readiness check for the backing engine.
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// Build the store selected by `config`. For PostgreSQL this creates the database,
/// connects the pool and bootstraps the `students` table.
pub async fn open_store(config: &ServerConfig) -> Result<Arc<dyn StudentStore>, AppError> {
    match config.store {
        StoreKind::Memory => {
            tracing::warn!("using in-memory student store; data is lost on exit");
            Ok(Arc::new(MemoryStudentStore::new()))
        }
        StoreKind::Postgres => {
            ensure_database_exists(&config.database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(&config.database_url)
                .await?;
            let store = PgStudentStore::new(pool, config.schema.clone());
            store.ensure_table().await?;
            Ok(Arc::new(store))
        }
    }
}
