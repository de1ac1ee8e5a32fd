use crate::error::ConfigError;
use crate::record::{ColumnMap, Record};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

pub const NOTES: &str = "notes";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub category_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct NoteRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub category_id: Option<i64>,
}

static NOTE_COLUMNS: Lazy<Result<ColumnMap<Note>, ConfigError>> = Lazy::new(|| {
    ColumnMap::<Note>::builder("Note")
        .key("id", |n: &Note| n.id, |n: &mut Note, v: i64| n.id = v)
        .column("title", |n: &Note| n.title.clone(), |n: &mut Note, v: String| n.title = v)
        .column("content", |n: &Note| n.content.clone(), |n: &mut Note, v: String| n.content = v)
        .column("category_id", |n: &Note| n.category_id, |n: &mut Note, v: Option<i64>| n.category_id = v)
        .column("created_at", |n: &Note| n.created_at, |n: &mut Note, v: DateTime<Utc>| n.created_at = v)
        .column("updated_at", |n: &Note| n.updated_at, |n: &mut Note, v: DateTime<Utc>| n.updated_at = v)
        .build()
});

impl Record for Note {
    fn column_map() -> Result<&'static ColumnMap<Self>, ConfigError> {
        NOTE_COLUMNS.as_ref().map_err(Clone::clone)
    }
}
