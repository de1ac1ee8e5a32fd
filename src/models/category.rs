use super::Note;
use crate::error::ConfigError;
use crate::record::{ColumnMap, Record};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

pub const CATEGORIES: &str = "categories";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CategoryRequest {
    pub name: String,
}

/// Category as returned by the API, with the notes filed under it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CategoryWithNotes {
    #[serde(flatten)]
    pub category: Category,
    pub notes: Vec<Note>,
}

static CATEGORY_COLUMNS: Lazy<Result<ColumnMap<Category>, ConfigError>> = Lazy::new(|| {
    ColumnMap::<Category>::builder("Category")
        .key("id", |c: &Category| c.id, |c: &mut Category, v: i64| c.id = v)
        .column("name", |c: &Category| c.name.clone(), |c: &mut Category, v: String| c.name = v)
        .column("created_at", |c: &Category| c.created_at, |c: &mut Category, v: DateTime<Utc>| c.created_at = v)
        .column("updated_at", |c: &Category| c.updated_at, |c: &mut Category, v: DateTime<Utc>| c.updated_at = v)
        .build()
});

impl Record for Category {
    fn column_map() -> Result<&'static ColumnMap<Self>, ConfigError> {
        CATEGORY_COLUMNS.as_ref().map_err(Clone::clone)
    }
}
