//! HTTP handlers: decode JSON, call the mapper, encode JSON.

pub mod category;
pub mod note;
pub mod todo;

use crate::error::AppError;

/// Path ids are positive integers.
pub(crate) fn parse_id(id_str: &str) -> Result<i64, AppError> {
    match id_str.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::BadRequest(format!("invalid id '{}'", id_str))),
    }
}
