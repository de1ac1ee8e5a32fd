//! Request validation: required text fields must be present and non-blank.

use crate::error::AppError;
use crate::models::{CategoryRequest, NoteRequest, TodoRequest};

pub struct RequestValidator;

impl RequestValidator {
    pub fn required(field: &str, value: &str) -> Result<(), AppError> {
        if value.trim().is_empty() {
            return Err(AppError::Validation(format!("{} is required", field)));
        }
        Ok(())
    }

    pub fn todo(req: &TodoRequest) -> Result<(), AppError> {
        Self::required("title", &req.title)?;
        Self::required("details", &req.details)
    }

    pub fn note(req: &NoteRequest) -> Result<(), AppError> {
        Self::required("title", &req.title)?;
        Self::required("content", &req.content)?;
        if let Some(id) = req.category_id {
            if id <= 0 {
                return Err(AppError::Validation("category_id must be positive".into()));
            }
        }
        Ok(())
    }

    pub fn category(req: &CategoryRequest) -> Result<(), AppError> {
        Self::required("name", &req.name)
    }
}
