//! GardenHub Server: shared gardens with roles, invitations and access requests.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use gardenhub_core::config::AppConfig;
use gardenhub_core::error::AppError;
use gardenhub_database::{DatabasePool, PgStore};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load `config/default.toml`, the `GARDENHUB_ENV` overlay, and env overrides.
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("GARDENHUB_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting GardenHub");

    let db = DatabasePool::connect(&config.database).await?;

    if config.database.run_migrations {
        gardenhub_database::migration::run_migrations(db.pool()).await?;
    } else {
        tracing::info!("Skipping migrations (database.run_migrations = false)");
    }

    let store = Arc::new(PgStore::new(db.clone()));
    let result = gardenhub_api::run_server(config, store).await;

    db.close().await;
    result
}
