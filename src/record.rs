//! Record types and their column maps.
//!
//! A record declares its columns once, in order, as `(name, accessor, binder)` entries.
//! The map is validated when built, so a broken declaration is reported at registration
//! instead of reaching the database as malformed SQL.

use crate::error::ConfigError;
use crate::sql::{validate_identifier, SqlValue};
use sqlx::sqlite::{Sqlite, SqliteRow};
use sqlx::{Decode, Row, Type};
use std::collections::HashSet;

type Getter<R> = Box<dyn Fn(&R) -> SqlValue + Send + Sync>;
type Binder<R> = Box<dyn Fn(&mut R, &SqliteRow, usize) -> Result<(), sqlx::Error> + Send + Sync>;

/// A struct stored as one row of a table.
pub trait Record: Default + Send + Sized + 'static {
    /// The validated column map for this type. Same map, same order, on every call.
    fn column_map() -> Result<&'static ColumnMap<Self>, ConfigError>;
}

pub struct Column<R> {
    name: &'static str,
    generated: bool,
    get: Getter<R>,
    bind: Binder<R>,
}

impl<R> Column<R> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Store-assigned key: skipped by INSERT and UPDATE, filled on read.
    pub fn is_generated(&self) -> bool {
        self.generated
    }

    pub fn value(&self, record: &R) -> SqlValue {
        (self.get)(record)
    }

    /// Decode result column `index` of `row` into this field of `record`.
    pub fn bind(&self, record: &mut R, row: &SqliteRow, index: usize) -> Result<(), sqlx::Error> {
        (self.bind)(record, row, index)
    }
}

impl<R> std::fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("name", &self.name)
            .field("generated", &self.generated)
            .finish()
    }
}

/// Ordered field-to-column table for a record type.
pub struct ColumnMap<R> {
    record: &'static str,
    columns: Vec<Column<R>>,
}

impl<R> std::fmt::Debug for ColumnMap<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColumnMap")
            .field("record", &self.record)
            .field("columns", &self.columns)
            .finish()
    }
}

impl<R: 'static> ColumnMap<R> {
    pub fn builder(record: &'static str) -> ColumnMapBuilder<R> {
        ColumnMapBuilder {
            record,
            columns: Vec::new(),
        }
    }
}

impl<R> ColumnMap<R> {
    pub fn record_name(&self) -> &'static str {
        self.record
    }

    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.name).collect()
    }

    /// Columns written by INSERT and UPDATE, in declaration order.
    pub fn writable(&self) -> impl Iterator<Item = &Column<R>> {
        self.columns.iter().filter(|c| !c.generated)
    }

    pub fn key(&self) -> Option<&Column<R>> {
        self.columns.iter().find(|c| c.generated)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

pub struct ColumnMapBuilder<R> {
    record: &'static str,
    columns: Vec<Column<R>>,
}

impl<R: 'static> ColumnMapBuilder<R> {
    /// Plain column written on insert and update.
    pub fn column<T>(self, name: &'static str, get: fn(&R) -> T, set: fn(&mut R, T)) -> Self
    where
        T: Into<SqlValue> + for<'r> Decode<'r, Sqlite> + Type<Sqlite> + 'static,
    {
        self.push(name, false, get, set)
    }

    /// Store-generated key column (e.g. `INTEGER PRIMARY KEY`).
    pub fn key<T>(self, name: &'static str, get: fn(&R) -> T, set: fn(&mut R, T)) -> Self
    where
        T: Into<SqlValue> + for<'r> Decode<'r, Sqlite> + Type<Sqlite> + 'static,
    {
        self.push(name, true, get, set)
    }

    fn push<T>(mut self, name: &'static str, generated: bool, get: fn(&R) -> T, set: fn(&mut R, T)) -> Self
    where
        T: Into<SqlValue> + for<'r> Decode<'r, Sqlite> + Type<Sqlite> + 'static,
    {
        self.columns.push(Column {
            name,
            generated,
            get: Box::new(move |r: &R| get(r).into()),
            bind: Box::new(move |r: &mut R, row: &SqliteRow, index: usize| {
                let v: T = row.try_get(index)?;
                set(r, v);
                Ok(())
            }),
        });
        self
    }

    pub fn build(self) -> Result<ColumnMap<R>, ConfigError> {
        let record = self.record;
        if self.columns.is_empty() {
            return Err(ConfigError::NoColumns { record });
        }
        let mut seen = HashSet::new();
        for (index, c) in self.columns.iter().enumerate() {
            if c.name.is_empty() {
                return Err(ConfigError::EmptyColumnName { record, index });
            }
            validate_identifier(c.name)?;
            if !seen.insert(c.name) {
                return Err(ConfigError::DuplicateColumn {
                    record,
                    column: c.name.to_string(),
                });
            }
        }
        if self.columns.iter().filter(|c| c.generated).count() > 1 {
            return Err(ConfigError::MultipleKeys { record });
        }
        Ok(ColumnMap {
            record,
            columns: self.columns,
        })
    }
}
