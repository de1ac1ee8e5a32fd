use super::parse_id;
use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::models::{Category, CategoryRequest, CategoryWithNotes, Note, CATEGORIES, NOTES};
use crate::response::MessageBody;
use crate::service::RequestValidator;
use crate::sql::Condition;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use std::collections::HashMap;

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<CategoryWithNotes>>, AppError> {
    let categories = state.mapper.read::<Category>(CATEGORIES, &Condition::all()).await?;
    let notes = state.mapper.read::<Note>(NOTES, &Condition::all()).await?;
    let mut by_category: HashMap<i64, Vec<Note>> = HashMap::new();
    for note in notes {
        if let Some(cid) = note.category_id {
            by_category.entry(cid).or_default().push(note);
        }
    }
    let out = categories
        .into_iter()
        .map(|category| CategoryWithNotes {
            notes: by_category.remove(&category.id).unwrap_or_default(),
            category,
        })
        .collect();
    Ok(Json(out))
}

pub async fn create(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CategoryRequest>,
) -> Result<impl IntoResponse, AppError> {
    RequestValidator::category(&req)?;
    let now = Utc::now();
    let mut category = Category {
        id: 0,
        name: req.name,
        created_at: now,
        updated_at: now,
    };
    category.id = state.mapper.create(CATEGORIES, &category).await?;
    tracing::info!(id = category.id, "category created");
    Ok((
        StatusCode::CREATED,
        Json(CategoryWithNotes {
            category,
            notes: Vec::new(),
        }),
    ))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Json<CategoryWithNotes>, AppError> {
    let id = parse_id(&id_str)?;
    let category = state.mapper.read_one(CATEGORIES, &Condition::eq("id", id)).await?;
    let notes = state.mapper.read(NOTES, &Condition::eq("category_id", id)).await?;
    Ok(Json(CategoryWithNotes { category, notes }))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    JsonBody(req): JsonBody<CategoryRequest>,
) -> Result<Json<CategoryWithNotes>, AppError> {
    let id = parse_id(&id_str)?;
    RequestValidator::category(&req)?;
    let by_id = Condition::eq("id", id);
    let mut category: Category = state.mapper.read_one(CATEGORIES, &by_id).await?;
    category.name = req.name;
    category.updated_at = Utc::now();
    state.mapper.update(CATEGORIES, &category, &by_id).await?;
    let notes = state.mapper.read(NOTES, &Condition::eq("category_id", id)).await?;
    Ok(Json(CategoryWithNotes { category, notes }))
}

/// Notes filed under the category are kept and lose their category (`ON DELETE SET NULL`).
pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Json<MessageBody>, AppError> {
    let id = parse_id(&id_str)?;
    state.mapper.delete(CATEGORIES, &Condition::eq("id", id)).await?;
    Ok(Json(MessageBody::new("category deleted")))
}
