//! Student business rules on top of the store.

use crate::error::AppError;
use crate::model::Student;
use crate::store::StudentStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct StudentService {
    store: Arc<dyn StudentStore>,
}

impl StudentService {
    pub fn new(store: Arc<dyn StudentStore>) -> Self {
        StudentService { store }
    }

    pub fn store(&self) -> &Arc<dyn StudentStore> {
        &self.store
    }

    pub async fn list_all(&self) -> Result<Vec<Student>, AppError> {
        self.store.find_all().await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Student, AppError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::student_not_found(id))
    }

    /// Insert a new row. Any id on `student` is discarded; the store assigns one.
    pub async fn add(&self, student: Student) -> Result<Student, AppError> {
        let saved = self.store.save(Student { id: None, ..student }).await?;
        tracing::info!(id = ?saved.id, "student created");
        Ok(saved)
    }

    /// Replace the row `id` wholesale with `student`.
    pub async fn update(&self, id: i64, student: Student) -> Result<Student, AppError> {
        if !self.store.exists_by_id(id).await? {
            return Err(AppError::student_not_found(id));
        }
        let saved = self.store.save(student.with_id(id)).await?;
        tracing::info!(id, "student updated");
        Ok(saved)
    }

    pub async fn delete_by_id(&self, id: i64) -> Result<(), AppError> {
        if !self.store.exists_by_id(id).await? {
            return Err(AppError::student_not_found(id));
        }
        // A concurrent delete between the check and here surfaces as NotFound too.
        if !self.store.delete_by_id(id).await? {
            return Err(AppError::student_not_found(id));
        }
        tracing::info!(id, "student deleted");
        Ok(())
    }
}
