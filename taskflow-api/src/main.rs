//! # TaskFlow API Server
//!
//! REST API for the TaskFlow personal task manager: ownership-scoped task and
//! category CRUD, completion analytics, and JWT authentication over
//! PostgreSQL.
//!
//! ## Usage
//!
//! ```bash
//! DATABASE_URL=postgresql://localhost/taskflow \
//! JWT_SECRET=$(openssl rand -hex 32) \
//! cargo run -p taskflow-api
//! ```

use taskflow_api::{
    app::{build_router, AppState},
    config::Config,
};
use taskflow_shared::db;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskflow_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "TaskFlow API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    db::migrations::ensure_database_exists(&config.database.url).await?;

    let pool = db::pool::create_pool(db::pool::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    db::migrations::run_migrations(&pool).await?;

    // Explicit seed step: the default category set must exist before the
    // first registration copies it.
    db::seed::seed_default_categories(&pool).await?;

    let bind_address = config.bind_address();
    let state = AppState::new(pool, config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
