//! Shared application state for all routes.

use crate::service::Mapper;

#[derive(Clone)]
pub struct AppState {
    pub mapper: Mapper,
}

impl AppState {
    pub fn new(mapper: Mapper) -> Self {
        AppState { mapper }
    }
}
