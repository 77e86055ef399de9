//! Runs against a live PostgreSQL when `DATABASE_URL` is set; skipped otherwise or when `SKIP_DB_TESTS` is set.

use std::sync::Arc;

use anyhow::Result;
use student_registry::{AppError, PgStudentStore, Student, StudentService, StudentStore};

async fn setup_store() -> Result<Option<PgStudentStore>> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(None);
    }
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL missing; skip postgres store tests");
        return Ok(None);
    };
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await?;
    let store = PgStudentStore::new(pool, "student_registry_test");
    store.ensure_table().await?;
    Ok(Some(store))
}

#[tokio::test]
async fn pg_save_assigns_id_and_overwrites() -> Result<()> {
    let Some(store) = setup_store().await? else { return Ok(()) };

    let created = store.save(Student::new("Ada", 42)).await?;
    let id = created.id.expect("BIGSERIAL id");
    assert!(store.exists_by_id(id).await?);

    let updated = store.save(Student::new("Ada L.", 43).with_id(id)).await?;
    assert_eq!(updated.id, Some(id));
    assert_eq!(store.find_by_id(id).await?, Some(updated));

    assert!(store.delete_by_id(id).await?);
    assert!(!store.delete_by_id(id).await?);
    assert_eq!(store.find_by_id(id).await?, None);
    Ok(())
}

#[tokio::test]
async fn pg_save_on_deleted_row_does_not_recreate() -> Result<()> {
    let Some(store) = setup_store().await? else { return Ok(()) };

    let id = store.save(Student::new("Grace", 7)).await?.id.expect("id");
    store.delete_by_id(id).await?;

    let err = store.save(Student::new("Grace", 8).with_id(id)).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound { id: got, .. } if got == id));
    assert!(!store.exists_by_id(id).await?);
    Ok(())
}

#[tokio::test]
async fn pg_service_lists_in_id_order() -> Result<()> {
    let Some(store) = setup_store().await? else { return Ok(()) };
    let svc = StudentService::new(Arc::new(store));

    let a = svc.add(Student::new("first", 1)).await?.id.expect("id");
    let b = svc.add(Student::new("second", 2)).await?.id.expect("id");
    let ids: Vec<i64> = svc.list_all().await?.into_iter().filter_map(|s| s.id).collect();
    let pos_a = ids.iter().position(|&i| i == a).expect("a listed");
    let pos_b = ids.iter().position(|&i| i == b).expect("b listed");
    assert!(pos_a < pos_b);

    svc.delete_by_id(a).await?;
    svc.delete_by_id(b).await?;
    Ok(())
}
