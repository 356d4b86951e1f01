//! User management CLI commands.

use clap::{Args, Subcommand};

use gardenhub_core::config::AppConfig;
use gardenhub_core::error::AppError;
use gardenhub_entity::user::CreateUser;

use crate::output::{self, OutputFormat};

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Register a user identity
    Create {
        /// Display name
        #[arg(long)]
        username: String,
        /// Email invitations are matched against
        #[arg(long)]
        email: String,
    },
}

/// Execute user commands
pub async fn execute(
    args: &UserArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let store = super::open_store(config).await?;

    match &args.command {
        UserCommand::Create { username, email } => {
            let mut uow = store.begin().await?;
            let user = uow
                .create_user(&CreateUser {
                    username: username.trim().to_string(),
                    email: email.trim().to_lowercase(),
                })
                .await?;
            uow.commit().await?;

            output::print_success(&format!("User '{}' created", user.username));
            output::print_record(
                &[
                    ("id", user.id.to_string()),
                    ("username", user.username.clone()),
                    ("email", user.email.clone()),
                ],
                &user,
                format,
            );
        }
    }

    Ok(())
}
