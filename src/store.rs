//! Pool bootstrap and table DDL. Tables are created if missing; existing data is left alone.

use crate::config::Config;
use crate::error::StoreError;
use crate::models::{CATEGORIES, NOTES, TODOS};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

/// Open the SQLite pool named by `config.database_url`, creating the file if needed.
pub async fn connect(config: &Config) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await?;
    tracing::info!(url = %config.database_url, "database connection established");
    Ok(pool)
}

/// (table, DDL) in dependency order: notes reference categories.
const TABLES: &[(&str, &str)] = &[
    (
        TODOS,
        r#"
        CREATE TABLE IF NOT EXISTS "todos" (
            "id" INTEGER PRIMARY KEY AUTOINCREMENT,
            "title" TEXT NOT NULL,
            "details" TEXT NOT NULL,
            "done" BOOLEAN NOT NULL DEFAULT 0
        )
        "#,
    ),
    (
        CATEGORIES,
        r#"
        CREATE TABLE IF NOT EXISTS "categories" (
            "id" INTEGER PRIMARY KEY AUTOINCREMENT,
            "name" TEXT NOT NULL,
            "created_at" TEXT NOT NULL,
            "updated_at" TEXT NOT NULL
        )
        "#,
    ),
    (
        NOTES,
        r#"
        CREATE TABLE IF NOT EXISTS "notes" (
            "id" INTEGER PRIMARY KEY AUTOINCREMENT,
            "title" TEXT NOT NULL,
            "content" TEXT NOT NULL,
            "category_id" INTEGER REFERENCES "categories" ("id") ON DELETE SET NULL,
            "created_at" TEXT NOT NULL,
            "updated_at" TEXT NOT NULL
        )
        "#,
    ),
];

pub async fn ensure_tables(pool: &SqlitePool) -> Result<(), StoreError> {
    for (table, ddl) in TABLES {
        sqlx::query(ddl)
            .execute(pool)
            .await
            .map_err(|e| StoreError::db(table, e))?;
    }
    tracing::info!(tables = TABLES.len(), "tables ensured");
    Ok(())
}
