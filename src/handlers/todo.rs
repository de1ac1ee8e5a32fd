//! Todo handlers: every column is rewritten on update.

use super::parse_id;
use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::models::{Todo, TodoRequest, TODOS};
use crate::service::RequestValidator;
use crate::sql::Condition;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Todo>>, AppError> {
    let todos = state.mapper.read::<Todo>(TODOS, &Condition::all()).await?;
    Ok(Json(todos))
}

pub async fn create(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<TodoRequest>,
) -> Result<impl IntoResponse, AppError> {
    RequestValidator::todo(&req)?;
    let mut todo = req.into_todo(0);
    todo.id = state.mapper.create(TODOS, &todo).await?;
    tracing::info!(id = todo.id, "todo created");
    Ok((StatusCode::CREATED, Json(todo)))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Json<Todo>, AppError> {
    let id = parse_id(&id_str)?;
    let todo = state.mapper.read_one(TODOS, &Condition::eq("id", id)).await?;
    Ok(Json(todo))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    JsonBody(req): JsonBody<TodoRequest>,
) -> Result<Json<Todo>, AppError> {
    let id = parse_id(&id_str)?;
    RequestValidator::todo(&req)?;
    let todo = req.into_todo(id);
    state.mapper.update(TODOS, &todo, &Condition::eq("id", id)).await?;
    Ok(Json(todo))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id_str)?;
    state.mapper.delete(TODOS, &Condition::eq("id", id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
