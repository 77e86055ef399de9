//! In-process store. Ids come from a counter and are never reused.

use super::StudentStore;
use crate::config::StoreKind;
use crate::error::AppError;
use crate::model::Student;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Table {
    rows: BTreeMap<i64, Student>,
    last_id: i64,
}

#[derive(Default)]
pub struct MemoryStudentStore {
    table: RwLock<Table>,
}

impl MemoryStudentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StudentStore for MemoryStudentStore {
    fn kind(&self) -> StoreKind {
        StoreKind::Memory
    }

    async fn find_all(&self) -> Result<Vec<Student>, AppError> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Student>, AppError> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn save(&self, student: Student) -> Result<Student, AppError> {
        let mut table = self.table.write().await;
        let id = match student.id {
            Some(id) if table.rows.contains_key(&id) => id,
            Some(id) => return Err(AppError::student_not_found(id)),
            None => {
                table.last_id += 1;
                table.last_id
            }
        };
        let row = student.with_id(id);
        table.rows.insert(id, row.clone());
        Ok(row)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError> {
        let mut table = self.table.write().await;
        Ok(table.rows.remove(&id).is_some())
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, AppError> {
        let table = self.table.read().await;
        Ok(table.rows.contains_key(&id))
    }
}
