use std::sync::Arc;

use anyhow::Result;
use student_registry::{AppError, MemoryStudentStore, Student, StudentService};

fn service() -> StudentService {
    StudentService::new(Arc::new(MemoryStudentStore::new()))
}

fn assert_not_found(err: AppError, expected: i64) {
    match err {
        AppError::NotFound { entity, id } => {
            assert_eq!(entity, "Student");
            assert_eq!(id, expected);
        }
        other => panic!("expected NotFound({}), got {:?}", expected, other),
    }
}

#[tokio::test]
async fn add_then_get_returns_same_fields() -> Result<()> {
    let svc = service();
    let created = svc.add(Student::new("Ada Lovelace", 1815)).await?;
    let id = created.id.expect("store assigns id");

    let fetched = svc.get_by_id(id).await?;
    assert_eq!(fetched.name.as_deref(), Some("Ada Lovelace"));
    assert_eq!(fetched.registration_number, Some(1815));
    Ok(())
}

#[tokio::test]
async fn add_ignores_client_id() -> Result<()> {
    let svc = service();
    let created = svc.add(Student::new("Grace", 7).with_id(500)).await?;
    assert_eq!(created.id, Some(1));
    assert_not_found(svc.get_by_id(500).await.unwrap_err(), 500);
    Ok(())
}

#[tokio::test]
async fn missing_id_is_not_found_everywhere() {
    let svc = service();
    assert_not_found(svc.get_by_id(77).await.unwrap_err(), 77);
    assert_not_found(svc.update(77, Student::new("X", 1)).await.unwrap_err(), 77);
    assert_not_found(svc.delete_by_id(77).await.unwrap_err(), 77);
    assert!(svc.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn second_delete_is_not_found() -> Result<()> {
    let svc = service();
    let id = svc.add(Student::new("Alan", 1912)).await?.id.expect("id");
    svc.delete_by_id(id).await?;
    assert_not_found(svc.delete_by_id(id).await.unwrap_err(), id);
    assert_not_found(svc.get_by_id(id).await.unwrap_err(), id);
    Ok(())
}

#[tokio::test]
async fn update_replaces_record_keeping_id() -> Result<()> {
    let svc = service();
    let id = svc.add(Student::new("Edsger", 1930)).await?.id.expect("id");

    let modified = Student {
        id: Some(id),
        name: Some("Edsger Dijkstra".into()),
        registration_number: None,
    };
    svc.update(id, modified.clone()).await?;

    let fetched = svc.get_by_id(id).await?;
    assert_eq!(fetched, modified);
    Ok(())
}

#[tokio::test]
async fn list_returns_every_added_student() -> Result<()> {
    let svc = service();
    let mut ids = Vec::new();
    for n in 0..5 {
        let s = svc.add(Student::new(format!("student-{}", n), n)).await?;
        ids.push(s.id.expect("id"));
    }

    let all = svc.list_all().await?;
    assert_eq!(all.len(), 5);
    assert_eq!(all.iter().filter_map(|s| s.id).collect::<Vec<_>>(), ids);
    for (n, id) in ids.into_iter().enumerate() {
        let s = svc.get_by_id(id).await?;
        assert_eq!(s.name, Some(format!("student-{}", n)));
    }
    Ok(())
}
