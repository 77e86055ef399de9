//! Student CRUD handlers: list, read, create, update, delete.

use crate::error::AppError;
use crate::model::Student;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

/// Parse the `{id}` path segment into a student id.
pub fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid id: {}", id_str)))
}

/// The body must carry an id equal to the path id.
pub fn check_body_id(path_id: i64, body: &Student) -> Result<(), AppError> {
    match body.id {
        Some(body_id) if body_id == path_id => Ok(()),
        Some(body_id) => Err(AppError::BadRequest(format!(
            "path id {} does not match body id {}",
            path_id, body_id
        ))),
        None => Err(AppError::BadRequest(
            "body id is required and must match path id".into(),
        )),
    }
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Student>>, AppError> {
    let rows = state.students.list_all().await?;
    Ok(Json(rows))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Json<Student>, AppError> {
    let id = parse_id(&id_str)?;
    let row = state.students.get_by_id(id).await?;
    Ok(Json(row))
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Student>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(student) = body?;
    state.students.add(student).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Result<Json<Student>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id_str)?;
    let Json(student) = body?;
    check_body_id(id, &student)?;
    state.students.update(id, student).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id_str)?;
    state.students.delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
