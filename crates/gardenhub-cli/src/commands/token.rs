//! Issue bearer tokens for local development and testing.

use clap::{Args, Subcommand};
use serde::Serialize;

use gardenhub_auth::jwt::JwtEncoder;
use gardenhub_core::config::AppConfig;
use gardenhub_core::error::AppError;

use crate::output::{self, OutputFormat};

/// Arguments for token commands
#[derive(Debug, Args)]
pub struct TokenArgs {
    /// Token subcommand
    #[command(subcommand)]
    pub command: TokenCommand,
}

/// Token subcommands
#[derive(Debug, Subcommand)]
pub enum TokenCommand {
    /// Sign a token for an existing user
    Issue {
        /// Email of the user to sign for
        #[arg(long)]
        email: String,
    },
}

#[derive(Debug, Serialize)]
struct IssuedToken {
    token: String,
    user_id: String,
    expires_at: String,
}

/// Execute token commands
pub async fn execute(
    args: &TokenArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        TokenCommand::Issue { email } => {
            let store = super::open_store(config).await?;
            let mut uow = store.begin().await?;
            let user = uow
                .find_user_by_email(email.trim())
                .await?
                .ok_or_else(|| AppError::not_found(format!("No user with email '{email}'")))?;

            let encoder = JwtEncoder::new(&config.auth);
            let (token, expires_at) = encoder.issue(user.id, &user.email, &user.username)?;

            let issued = IssuedToken {
                token,
                user_id: user.id.to_string(),
                expires_at: expires_at.to_rfc3339(),
            };
            output::print_record(
                &[
                    ("user", format!("{} <{}>", user.username, user.email)),
                    ("expires_at", issued.expires_at.clone()),
                    ("token", issued.token.clone()),
                ],
                &issued,
                format,
            );
        }
    }

    Ok(())
}
