use crate::error::ConfigError;
use crate::record::{ColumnMap, Record};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

pub const TODOS: &str = "todos";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub details: String,
    pub done: bool,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TodoRequest {
    pub title: String,
    pub details: String,
    #[serde(default)]
    pub done: bool,
}

impl TodoRequest {
    pub fn into_todo(self, id: i64) -> Todo {
        Todo {
            id,
            title: self.title,
            details: self.details,
            done: self.done,
        }
    }
}

static TODO_COLUMNS: Lazy<Result<ColumnMap<Todo>, ConfigError>> = Lazy::new(|| {
    ColumnMap::<Todo>::builder("Todo")
        .key("id", |t: &Todo| t.id, |t: &mut Todo, v: i64| t.id = v)
        .column("title", |t: &Todo| t.title.clone(), |t: &mut Todo, v: String| t.title = v)
        .column("details", |t: &Todo| t.details.clone(), |t: &mut Todo, v: String| t.details = v)
        .column("done", |t: &Todo| t.done, |t: &mut Todo, v: bool| t.done = v)
        .build()
});

impl Record for Todo {
    fn column_map() -> Result<&'static ColumnMap<Self>, ConfigError> {
        TODO_COLUMNS.as_ref().map_err(Clone::clone)
    }
}
