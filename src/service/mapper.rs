//! Generic record CRUD against SQLite.

use crate::error::StoreError;
use crate::record::Record;
use crate::sql::{self, Condition, QueryBuf};
use sqlx::sqlite::{SqlitePool, SqliteQueryResult, SqliteRow};
use sqlx::Row;

/// Builds and runs one statement per call. Holds only the pool handle.
#[derive(Clone, Debug)]
pub struct Mapper {
    pool: SqlitePool,
}

impl Mapper {
    pub fn new(pool: SqlitePool) -> Self {
        Mapper { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Round trip to the store, used by the readiness route.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Validate `R`'s column map up front so broken metadata fails at startup.
    pub fn register<R: Record>(&self) -> Result<(), StoreError> {
        let map = R::column_map()?;
        tracing::debug!(record = map.record_name(), columns = ?map.names(), "registered record");
        Ok(())
    }

    /// Insert `record`; returns the store-assigned rowid.
    pub async fn create<R: Record>(&self, table: &str, record: &R) -> Result<i64, StoreError> {
        let map = R::column_map()?;
        let q = sql::insert(table, map, record)?;
        let result = self.execute(table, &q).await?;
        Ok(result.last_insert_rowid())
    }

    /// All rows matching `condition`, one fresh `R` per row. Nothing is returned unless every row decodes.
    pub async fn read<R: Record>(&self, table: &str, condition: &Condition) -> Result<Vec<R>, StoreError> {
        let map = R::column_map()?;
        let q = sql::select(table, map, condition)?;
        let rows = self.query(table, &q).await?;
        let mut out = Vec::with_capacity(rows.len());
        for row in &rows {
            out.push(row_to_record::<R>(table, row)?);
        }
        Ok(out)
    }

    /// First row matching `condition`, or `NotFound`.
    pub async fn read_one<R: Record>(&self, table: &str, condition: &Condition) -> Result<R, StoreError> {
        self.read(table, condition)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::NotFound {
                table: table.to_string(),
            })
    }

    /// Rewrite every non-key column of matching rows. Zero matches is `NotFound`.
    pub async fn update<R: Record>(&self, table: &str, record: &R, condition: &Condition) -> Result<u64, StoreError> {
        let map = R::column_map()?;
        let q = sql::update(table, map, record, condition)?;
        let result = self.execute(table, &q).await?;
        affected_or_not_found(table, result)
    }

    /// Delete matching rows. Zero matches is `NotFound`.
    pub async fn delete(&self, table: &str, condition: &Condition) -> Result<u64, StoreError> {
        let q = sql::delete(table, condition)?;
        let result = self.execute(table, &q).await?;
        affected_or_not_found(table, result)
    }

    async fn execute(&self, table: &str, q: &QueryBuf) -> Result<SqliteQueryResult, StoreError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "execute");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        query.execute(&self.pool).await.map_err(|e| StoreError::db(table, e))
    }

    async fn query(&self, table: &str, q: &QueryBuf) -> Result<Vec<SqliteRow>, StoreError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        query.fetch_all(&self.pool).await.map_err(|e| StoreError::db(table, e))
    }
}

fn affected_or_not_found(table: &str, result: SqliteQueryResult) -> Result<u64, StoreError> {
    match result.rows_affected() {
        0 => Err(StoreError::NotFound {
            table: table.to_string(),
        }),
        n => Ok(n),
    }
}

/// Bind result columns into fields by position.
fn row_to_record<R: Record>(table: &str, row: &SqliteRow) -> Result<R, StoreError> {
    let map = R::column_map()?;
    if row.len() != map.len() {
        return Err(StoreError::Mapping {
            table: table.to_string(),
            message: format!("row has {} columns, {} has {}", row.len(), map.record_name(), map.len()),
        });
    }
    let mut record = R::default();
    for (index, column) in map.columns().iter().enumerate() {
        column
            .bind(&mut record, row, index)
            .map_err(|e| StoreError::Mapping {
                table: table.to_string(),
                message: format!("column {}: {}", column.name(), e),
            })?;
    }
    Ok(record)
}
