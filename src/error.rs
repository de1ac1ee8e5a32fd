//! Typed errors and HTTP mapping.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Invalid record metadata or SQL identifiers. Reported before any statement reaches the store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("record {record}: column #{index} has an empty name")]
    EmptyColumnName { record: &'static str, index: usize },
    #[error("record {record}: duplicate column '{column}'")]
    DuplicateColumn { record: &'static str, column: String },
    #[error("record {record}: more than one generated key column")]
    MultipleKeys { record: &'static str },
    #[error("record {record}: no columns declared")]
    NoColumns { record: &'static str },
    #[error("invalid identifier: '{0}'")]
    InvalidIdentifier(String),
}

/// Startup settings that could not be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvError {
    #[error("environment variable {var}: invalid value '{value}'")]
    Invalid { var: &'static str, value: String },
}

/// Errors returned by the record mapper. Every store-facing variant names the table.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{table}: {source}")]
    Db {
        table: String,
        #[source]
        source: sqlx::Error,
    },
    #[error("{table}: row mapping: {message}")]
    Mapping { table: String, message: String },
    #[error("{table}: no matching rows")]
    NotFound { table: String },
}

impl StoreError {
    pub(crate) fn db(table: &str, source: sqlx::Error) -> Self {
        StoreError::Db {
            table: table.to_string(),
            source,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("validation: {0}")]
    Validation(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("payload too large: {0}")]
    PayloadTooLarge(String),
}

#[derive(Serialize, serde::Deserialize, Debug)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Store(StoreError::NotFound { .. }) => StatusCode::NOT_FOUND,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }
}

/// Undecodable bodies are 400 whatever axum's own status would be; only the size limit keeps 413.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(rejection.body_text())
        } else {
            AppError::BadRequest(format!("invalid JSON payload: {}", rejection.body_text()))
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorBody {
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
