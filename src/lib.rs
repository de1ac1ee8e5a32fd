//! Nooter: notes, categories and todos over SQLite, built on a typed record mapper.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod record;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::Config;
pub use error::{AppError, ConfigError, EnvError, StoreError};
pub use record::{ColumnMap, Record};
pub use routes::app;
pub use service::Mapper;
pub use sql::{Condition, SqlValue};
pub use state::AppState;
pub use store::{connect, ensure_tables};

use models::{Category, Note, Todo};

/// Mapper with every stored record type registered. Broken column metadata fails here.
pub fn build_mapper(pool: sqlx::SqlitePool) -> Result<Mapper, StoreError> {
    let mapper = Mapper::new(pool);
    mapper.register::<Todo>()?;
    mapper.register::<Note>()?;
    mapper.register::<Category>()?;
    Ok(mapper)
}
