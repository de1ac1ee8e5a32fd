//! Router assembly: common routes at the root, resources under `/api/v1`, with request
//! tracing and panic recovery applied to everything. The body size limit is enforced by the
//! JSON extractor, so an oversized body gets the same error body as any other rejection.

mod api;
mod common;
pub use api::{note_routes, todo_routes};
pub use common::common_routes;

use crate::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

pub const API_PREFIX: &str = "/api/v1";

pub fn app(state: AppState, body_limit: usize) -> Router {
    let api = Router::new()
        .merge(todo_routes(state.clone()))
        .merge(note_routes(state.clone()));
    Router::new()
        .merge(common_routes(state))
        .nest(API_PREFIX, api)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
}
