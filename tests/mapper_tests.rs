//! Record mapper against an in-memory SQLite database.

mod common;

use chrono::{DateTime, Utc};
use common::memory_mapper;
use nooter::error::{ConfigError, StoreError};
use nooter::models::{Category, Note, Todo, CATEGORIES, NOTES, TODOS};
use nooter::record::{ColumnMap, Record};
use nooter::sql::Condition;
use once_cell::sync::Lazy;

fn todo(title: &str, details: &str, done: bool) -> Todo {
    Todo {
        id: 0,
        title: title.into(),
        details: details.into(),
        done,
    }
}

#[tokio::test]
async fn todo_lifecycle() {
    let mapper = memory_mapper().await;
    let by_id = Condition::eq("id", 1_i64);

    let id = mapper.create(TODOS, &todo("Buy milk", "2%", false)).await.unwrap();
    assert_eq!(id, 1);

    let rows: Vec<Todo> = mapper.read(TODOS, &by_id).await.unwrap();
    assert_eq!(
        rows,
        vec![Todo {
            id: 1,
            title: "Buy milk".into(),
            details: "2%".into(),
            done: false
        }]
    );

    let mut done = rows[0].clone();
    done.done = true;
    assert_eq!(mapper.update(TODOS, &done, &by_id).await.unwrap(), 1);
    let rows: Vec<Todo> = mapper.read(TODOS, &by_id).await.unwrap();
    assert!(rows[0].done);

    assert_eq!(mapper.delete(TODOS, &by_id).await.unwrap(), 1);
    let rows: Vec<Todo> = mapper.read(TODOS, &by_id).await.unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn update_overwrites_every_column() {
    let mapper = memory_mapper().await;
    let id = mapper.create(TODOS, &todo("old", "old details", false)).await.unwrap();
    let by_id = Condition::eq("id", id);

    let replacement = Todo {
        id,
        title: "new".into(),
        details: "new details".into(),
        done: true,
    };
    mapper.update(TODOS, &replacement, &by_id).await.unwrap();

    let back: Todo = mapper.read_one(TODOS, &by_id).await.unwrap();
    assert_eq!(back, replacement);
}

#[tokio::test]
async fn read_with_no_matches_is_empty() {
    let mapper = memory_mapper().await;
    mapper.create(TODOS, &todo("a", "b", false)).await.unwrap();
    let rows: Vec<Todo> = mapper.read(TODOS, &Condition::eq("id", 999_i64)).await.unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn read_one_without_match_is_not_found() {
    let mapper = memory_mapper().await;
    let err = mapper
        .read_one::<Todo>(TODOS, &Condition::eq("id", 1_i64))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound { ref table } if table == TODOS));
}

#[tokio::test]
async fn update_and_delete_without_match_are_not_found() {
    let mapper = memory_mapper().await;
    let by_id = Condition::eq("id", 42_i64);
    let err = mapper.update(TODOS, &todo("x", "y", true), &by_id).await.unwrap_err();
    assert!(err.is_not_found());
    let err = mapper.delete(TODOS, &by_id).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn delete_removes_only_the_matching_row() {
    let mapper = memory_mapper().await;
    let first = mapper.create(TODOS, &todo("one", "1", false)).await.unwrap();
    let second = mapper.create(TODOS, &todo("two", "2", false)).await.unwrap();

    mapper.delete(TODOS, &Condition::eq("id", first)).await.unwrap();

    let rest: Vec<Todo> = mapper.read(TODOS, &Condition::all()).await.unwrap();
    assert_eq!(rest.len(), 1);
    assert_eq!(rest[0].id, second);
}

#[tokio::test]
async fn composite_conditions_filter_rows() {
    let mapper = memory_mapper().await;
    for (title, done) in [("a", false), ("b", true), ("c", true)] {
        mapper.create(TODOS, &todo(title, "-", done)).await.unwrap();
    }
    let cond = Condition::eq("done", true).and(Condition::ne("title", "c"));
    let rows: Vec<Todo> = mapper.read(TODOS, &cond).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title, "b");

    let rows: Vec<Todo> = mapper.read(TODOS, &Condition::trusted("\"done\" = 0")).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title, "a");
}

#[tokio::test]
async fn hostile_values_are_bound_not_spliced() {
    let mapper = memory_mapper().await;
    mapper.create(TODOS, &todo("keep", "me", false)).await.unwrap();

    let cond = Condition::eq("title", "x' OR '1'='1");
    let rows: Vec<Todo> = mapper.read(TODOS, &cond).await.unwrap();
    assert!(rows.is_empty());
    assert!(mapper.delete(TODOS, &cond).await.unwrap_err().is_not_found());

    let rows: Vec<Todo> = mapper.read(TODOS, &Condition::all()).await.unwrap();
    assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn note_round_trip_keeps_timestamps_and_null_category() {
    let mapper = memory_mapper().await;
    let now = Utc::now();
    let note = Note {
        id: 0,
        title: "t".into(),
        content: "c".into(),
        category_id: None,
        created_at: now,
        updated_at: now,
    };
    let id = mapper.create(NOTES, &note).await.unwrap();
    let back: Note = mapper.read_one(NOTES, &Condition::eq("id", id)).await.unwrap();
    assert_eq!(back, Note { id, ..note });

    let rows: Vec<Note> = mapper.read(NOTES, &Condition::is_null("category_id")).await.unwrap();
    assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn notes_filter_by_category() {
    let mapper = memory_mapper().await;
    let now = Utc::now();
    let cid = mapper
        .create(
            CATEGORIES,
            &Category {
                id: 0,
                name: "work".into(),
                created_at: now,
                updated_at: now,
            },
        )
        .await
        .unwrap();
    for category_id in [Some(cid), None, Some(cid)] {
        let note = Note {
            title: "n".into(),
            content: "c".into(),
            category_id,
            created_at: now,
            updated_at: now,
            ..Note::default()
        };
        mapper.create(NOTES, &note).await.unwrap();
    }
    let filed: Vec<Note> = mapper.read(NOTES, &Condition::eq("category_id", cid)).await.unwrap();
    assert_eq!(filed.len(), 2);
}

#[tokio::test]
async fn store_errors_name_the_table() {
    let mapper = memory_mapper().await;
    let err = mapper.create("missing", &todo("a", "b", false)).await.unwrap_err();
    match err {
        StoreError::Db { table, .. } => assert_eq!(table, "missing"),
        other => panic!("expected Db error, got {other:?}"),
    }
}

#[derive(Debug, Default)]
struct MisTyped {
    id: i64,
    title: i64,
    details: String,
    done: bool,
}

static MIS_TYPED: Lazy<Result<ColumnMap<MisTyped>, ConfigError>> = Lazy::new(|| {
    ColumnMap::<MisTyped>::builder("MisTyped")
        .key("id", |r: &MisTyped| r.id, |r: &mut MisTyped, v: i64| r.id = v)
        .column("title", |r: &MisTyped| r.title, |r: &mut MisTyped, v: i64| r.title = v)
        .column("details", |r: &MisTyped| r.details.clone(), |r: &mut MisTyped, v: String| r.details = v)
        .column("done", |r: &MisTyped| r.done, |r: &mut MisTyped, v: bool| r.done = v)
        .build()
});

impl Record for MisTyped {
    fn column_map() -> Result<&'static ColumnMap<Self>, ConfigError> {
        MIS_TYPED.as_ref().map_err(Clone::clone)
    }
}

#[tokio::test]
async fn undecodable_row_is_a_mapping_error() {
    let mapper = memory_mapper().await;
    mapper.create(TODOS, &todo("not a number", "b", false)).await.unwrap();
    let err = mapper
        .read::<MisTyped>(TODOS, &Condition::all())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Mapping { ref table, .. } if table == TODOS));
}

#[derive(Default)]
struct Unnamed {
    id: i64,
    stamp: DateTime<Utc>,
}

static UNNAMED: Lazy<Result<ColumnMap<Unnamed>, ConfigError>> = Lazy::new(|| {
    ColumnMap::<Unnamed>::builder("Unnamed")
        .key("id", |r: &Unnamed| r.id, |r: &mut Unnamed, v: i64| r.id = v)
        .column("", |r: &Unnamed| r.stamp, |r: &mut Unnamed, v: DateTime<Utc>| r.stamp = v)
        .build()
});

impl Record for Unnamed {
    fn column_map() -> Result<&'static ColumnMap<Self>, ConfigError> {
        UNNAMED.as_ref().map_err(Clone::clone)
    }
}

#[tokio::test]
async fn missing_column_name_fails_at_registration() {
    let mapper = memory_mapper().await;
    let err = mapper.register::<Unnamed>().unwrap_err();
    assert!(matches!(
        err,
        StoreError::Config(ConfigError::EmptyColumnName { record: "Unnamed", index: 1 })
    ));

    let err = mapper.create("unnamed", &Unnamed::default()).await.unwrap_err();
    assert!(matches!(err, StoreError::Config(_)));
}

#[test]
fn column_enumeration_is_stable() {
    let first = Todo::column_map().unwrap().names();
    let second = Todo::column_map().unwrap().names();
    assert_eq!(first, vec!["id", "title", "details", "done"]);
    assert_eq!(first, second);
}
