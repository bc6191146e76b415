use anyhow::Result;
use tracing::info;

use trea_members_api::app::{create_app, AppState, Storage};
use trea_members_api::config::{Config, StorageBackend};
use trea_members_api::middleware::{init_metrics, logging::init_logging};
use trea_members_api::services::{bootstrap_admin, BootstrapOutcome};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = Config::load()?;

    init_logging(&config.logging);
    init_metrics()?;

    info!("Starting TREA Members API v{}", env!("CARGO_PKG_VERSION"));

    let storage = match config.database.backend {
        StorageBackend::Postgres => {
            let pool = persistence::db::create_pool(&config.database.pool_config()).await?;

            info!("Running database migrations...");
            persistence::db::run_migrations(&pool).await?;
            info!("Migrations completed");

            Storage::Postgres(pool)
        }
        StorageBackend::Memory => {
            info!("Using in-memory storage; data is lost on restart");
            Storage::Memory(persistence::MemoryStore::new())
        }
    };

    let addr = config.socket_addr()?;
    let state = AppState::new(config, storage)?;

    match bootstrap_admin(state.repos.users.as_ref(), &state.config.admin).await? {
        BootstrapOutcome::Created => info!("Bootstrap admin created"),
        BootstrapOutcome::AlreadyExists => info!("Bootstrap admin already exists"),
        BootstrapOutcome::NotConfigured => {}
    }

    let app = create_app(state);

    info!("Server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
