//! Resource routes under the API prefix.

use crate::handlers::{category, note, todo};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn todo_routes(state: AppState) -> Router {
    Router::new()
        .route("/todos", get(todo::list).post(todo::create))
        .route("/todos/:id", get(todo::read).put(todo::update).delete(todo::delete))
        .with_state(state)
}

pub fn note_routes(state: AppState) -> Router {
    Router::new()
        .route("/notes", get(note::list).post(note::create))
        .route("/notes/:id", get(note::read).put(note::update).delete(note::delete))
        .route("/categories", get(category::list).post(category::create))
        .route(
            "/categories/:id",
            get(category::read).put(category::update).delete(category::delete),
        )
        .with_state(state)
}
