//! CLI command definitions and dispatch.

pub mod migrate;
pub mod token;
pub mod user;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use gardenhub_core::config::AppConfig;
use gardenhub_core::error::AppError;
use gardenhub_database::{DatabasePool, PgStore, Store};

use crate::output::OutputFormat;

/// GardenHub administration
#[derive(Debug, Parser)]
#[command(name = "gardenhub-cli", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding default.toml and the environment overlays
    #[arg(short, long, default_value = "config")]
    pub config_dir: String,

    /// Environment overlay to load (config/<env>.toml)
    #[arg(short, long, env = "GARDENHUB_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// User management
    User(user::UserArgs),
    /// Development bearer tokens
    Token(token::TokenArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = AppConfig::load_from_dir(&self.config_dir, &self.env)?;
        match &self.command {
            Commands::Migrate(args) => migrate::execute(args, &config).await,
            Commands::User(args) => user::execute(args, &config, self.format).await,
            Commands::Token(args) => token::execute(args, &config, self.format).await,
        }
    }
}

/// Helper: open a PostgreSQL-backed store from config
pub async fn open_store(config: &AppConfig) -> Result<Arc<dyn Store>, AppError> {
    let pool = DatabasePool::connect(&config.database).await?;
    Ok(Arc::new(PgStore::new(pool)))
}
