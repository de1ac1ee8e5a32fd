use super::parse_id;
use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::models::{Category, Note, NoteRequest, CATEGORIES, NOTES};
use crate::response::MessageBody;
use crate::service::{Mapper, RequestValidator};
use crate::sql::Condition;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;

/// A note may only reference a category that exists.
async fn check_category(mapper: &Mapper, category_id: Option<i64>) -> Result<(), AppError> {
    let Some(id) = category_id else { return Ok(()) };
    match mapper.read_one::<Category>(CATEGORIES, &Condition::eq("id", id)).await {
        Ok(_) => Ok(()),
        Err(e) if e.is_not_found() => Err(AppError::Validation(format!("category {} does not exist", id))),
        Err(e) => Err(e.into()),
    }
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Note>>, AppError> {
    let notes = state.mapper.read::<Note>(NOTES, &Condition::all()).await?;
    Ok(Json(notes))
}

pub async fn create(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<NoteRequest>,
) -> Result<impl IntoResponse, AppError> {
    RequestValidator::note(&req)?;
    check_category(&state.mapper, req.category_id).await?;
    let now = Utc::now();
    let mut note = Note {
        id: 0,
        title: req.title,
        content: req.content,
        category_id: req.category_id,
        created_at: now,
        updated_at: now,
    };
    note.id = state.mapper.create(NOTES, &note).await?;
    tracing::info!(id = note.id, "note created");
    Ok((StatusCode::CREATED, Json(note)))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Json<Note>, AppError> {
    let id = parse_id(&id_str)?;
    let note = state.mapper.read_one(NOTES, &Condition::eq("id", id)).await?;
    Ok(Json(note))
}

/// Overwrites title, content and category; keeps `created_at`.
pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    JsonBody(req): JsonBody<NoteRequest>,
) -> Result<Json<Note>, AppError> {
    let id = parse_id(&id_str)?;
    RequestValidator::note(&req)?;
    let by_id = Condition::eq("id", id);
    let mut note: Note = state.mapper.read_one(NOTES, &by_id).await?;
    check_category(&state.mapper, req.category_id).await?;
    note.title = req.title;
    note.content = req.content;
    note.category_id = req.category_id;
    note.updated_at = Utc::now();
    state.mapper.update(NOTES, &note, &by_id).await?;
    Ok(Json(note))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Json<MessageBody>, AppError> {
    let id = parse_id(&id_str)?;
    state.mapper.delete(NOTES, &Condition::eq("id", id)).await?;
    Ok(Json(MessageBody::new("note deleted")))
}
