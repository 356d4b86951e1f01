//! Database migration management commands.

use clap::{Args, Subcommand};

use gardenhub_core::config::AppConfig;
use gardenhub_core::error::AppError;
use gardenhub_database::DatabasePool;
use gardenhub_database::migration::{embedded_migrations, run_migrations};

use crate::output;

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run all pending migrations
    Run,
    /// List the migrations bundled with this binary
    List,
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, config: &AppConfig) -> Result<(), AppError> {
    match &args.command {
        MigrateCommand::Run => {
            let pool = DatabasePool::connect(&config.database).await?;
            println!("Running database migrations...");
            let outcome = run_migrations(pool.pool()).await;
            pool.close().await;
            outcome?;
            output::print_success("All migrations applied successfully.");
        }
        MigrateCommand::List => {
            for (version, description) in embedded_migrations() {
                output::print_kv(&version.to_string(), &description);
            }
        }
    }
    Ok(())
}
