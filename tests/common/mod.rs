#![allow(dead_code)]

use nooter::{build_mapper, connect, ensure_tables, Config, Mapper};

/// Fresh in-memory database with all tables. One connection so every query sees the same database.
pub async fn memory_mapper() -> Mapper {
    let config = Config {
        database_url: "sqlite::memory:".into(),
        max_connections: 1,
        ..Config::default()
    };
    let pool = connect(&config).await.expect("connect");
    ensure_tables(&pool).await.expect("ensure tables");
    build_mapper(pool).expect("register records")
}
