//! Server: loads config from env, opens the SQLite pool, ensures tables, serves the API.

use nooter::{app, build_mapper, connect, ensure_tables, AppState, Config};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("nooter=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;
    let pool = connect(&config).await?;
    ensure_tables(&pool).await?;
    let state = AppState::new(build_mapper(pool)?);

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state, config.body_limit)).await?;
    Ok(())
}
