//! Builds parameterized INSERT, SELECT, UPDATE, DELETE from a record's column map.
//! Identifiers are validated and quoted; values are always parameters.

use super::{Condition, SqlValue};
use crate::error::ConfigError;
use crate::record::ColumnMap;

/// Quote identifier for SQLite.
pub(crate) fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Plain SQL identifier: `[A-Za-z_][A-Za-z0-9_]*`.
pub fn validate_identifier(s: &str) -> Result<(), ConfigError> {
    let mut chars = s.chars();
    let ok = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => chars.all(|c| c.is_ascii_alphanumeric() || c == '_'),
        _ => false,
    };
    if ok {
        Ok(())
    } else {
        Err(ConfigError::InvalidIdentifier(s.to_string()))
    }
}

fn table_name(table: &str) -> Result<String, ConfigError> {
    validate_identifier(table)?;
    Ok(quoted(table))
}

#[derive(Debug, Default)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

impl QueryBuf {
    pub(crate) fn push_param(&mut self, v: SqlValue) {
        self.params.push(v);
    }
}

fn column_list<R>(map: &ColumnMap<R>) -> String {
    map.columns()
        .iter()
        .map(|c| quoted(c.name()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// INSERT of every non-generated column, placeholders in declaration order.
pub fn insert<R>(table: &str, map: &ColumnMap<R>, record: &R) -> Result<QueryBuf, ConfigError> {
    let mut q = QueryBuf::default();
    let table = table_name(table)?;
    let mut cols = Vec::new();
    let mut placeholders = Vec::new();
    for c in map.writable() {
        q.push_param(c.value(record));
        cols.push(quoted(c.name()));
        placeholders.push("?");
    }
    q.sql = if cols.is_empty() {
        format!("INSERT INTO {} DEFAULT VALUES", table)
    } else {
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table,
            cols.join(", "),
            placeholders.join(", ")
        )
    };
    Ok(q)
}

/// SELECT with an explicit column list so result columns line up with fields by position.
pub fn select<R>(table: &str, map: &ColumnMap<R>, condition: &Condition) -> Result<QueryBuf, ConfigError> {
    let mut q = QueryBuf::default();
    let table = table_name(table)?;
    let where_clause = condition.render(&mut q)?;
    q.sql = format!("SELECT {} FROM {} WHERE {}", column_list(map), table, where_clause);
    Ok(q)
}

/// UPDATE rewriting every non-generated column.
pub fn update<R>(table: &str, map: &ColumnMap<R>, record: &R, condition: &Condition) -> Result<QueryBuf, ConfigError> {
    let mut q = QueryBuf::default();
    let table = table_name(table)?;
    let mut sets = Vec::new();
    for c in map.writable() {
        q.push_param(c.value(record));
        sets.push(format!("{} = ?", quoted(c.name())));
    }
    if sets.is_empty() {
        return Err(ConfigError::NoColumns {
            record: map.record_name(),
        });
    }
    let where_clause = condition.render(&mut q)?;
    q.sql = format!("UPDATE {} SET {} WHERE {}", table, sets.join(", "), where_clause);
    Ok(q)
}

pub fn delete(table: &str, condition: &Condition) -> Result<QueryBuf, ConfigError> {
    let mut q = QueryBuf::default();
    let table = table_name(table)?;
    let where_clause = condition.render(&mut q)?;
    q.sql = format!("DELETE FROM {} WHERE {}", table, where_clause);
    Ok(q)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Todo;
    use crate::record::Record;

    fn todo() -> Todo {
        Todo {
            id: 1,
            title: "Buy milk".into(),
            details: "2%".into(),
            done: false,
        }
    }

    #[test]
    fn insert_skips_key_and_binds_in_order() {
        let map = Todo::column_map().unwrap();
        let q = insert("todos", map, &todo()).unwrap();
        assert_eq!(q.sql, "INSERT INTO \"todos\" (\"title\", \"details\", \"done\") VALUES (?, ?, ?)");
        assert_eq!(
            q.params,
            vec![
                SqlValue::Text("Buy milk".into()),
                SqlValue::Text("2%".into()),
                SqlValue::Bool(false)
            ]
        );
    }

    #[test]
    fn select_lists_columns_in_declaration_order() {
        let map = Todo::column_map().unwrap();
        let q = select("todos", map, &Condition::eq("id", 1_i64)).unwrap();
        assert_eq!(
            q.sql,
            "SELECT \"id\", \"title\", \"details\", \"done\" FROM \"todos\" WHERE \"id\" = ?"
        );
        assert_eq!(q.params, vec![SqlValue::Int(1)]);
    }

    #[test]
    fn update_binds_sets_before_condition() {
        let map = Todo::column_map().unwrap();
        let mut t = todo();
        t.done = true;
        let q = update("todos", map, &t, &Condition::eq("id", 1_i64)).unwrap();
        assert_eq!(
            q.sql,
            "UPDATE \"todos\" SET \"title\" = ?, \"details\" = ?, \"done\" = ? WHERE \"id\" = ?"
        );
        assert_eq!(q.params.last(), Some(&SqlValue::Int(1)));
        assert_eq!(q.params[2], SqlValue::Bool(true));
    }

    #[test]
    fn delete_with_all_condition() {
        let q = delete("todos", &Condition::all()).unwrap();
        assert_eq!(q.sql, "DELETE FROM \"todos\" WHERE 1 = 1");
        assert!(q.params.is_empty());
    }

    #[test]
    fn bad_table_name_is_rejected() {
        let err = delete("todos; DROP TABLE x", &Condition::all()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidIdentifier(_)));
    }

    #[test]
    fn identifiers() {
        assert!(validate_identifier("category_id").is_ok());
        assert!(validate_identifier("_x1").is_ok());
        assert!(validate_identifier("").is_err());
        assert!(validate_identifier("1abc").is_err());
        assert!(validate_identifier("a-b").is_err());
    }
}
