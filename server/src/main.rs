//! Enrollment server: reads config from the environment (and `.env`), picks the
//! PostgreSQL or in-memory store, optionally seeds demo data, and serves the API.
//!
//! Run from repo root: `cargo run -p enrollment-server`

use enrollment_api::{
    app, apply_migrations, ensure_database_exists, seed_demo_data, AppConfig, AppState, MemoryStore, PgStore,
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("enrollment_api=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    let state = match &config.database_url {
        Some(database_url) => {
            ensure_database_exists(database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(database_url)
                .await?;
            apply_migrations(&pool, &config.database_schema).await?;
            tracing::info!(schema = %config.database_schema, "using postgres store");
            AppState::new(PgStore::new(pool, config.database_schema.clone()))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory store");
            AppState::new(MemoryStore::new())
        }
    };

    if config.seed_demo_data {
        seed_demo_data(state.store.as_ref()).await?;
    }

    let router: axum::Router = app(state);
    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
