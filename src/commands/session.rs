//! Refresh registry inspection commands.

use clap::{Args, Subcommand};

use crate::output::{self, FieldRow, OutputFormat};
use mingle_core::error::AppError;

/// Arguments for session commands
#[derive(Debug, Args)]
pub struct SessionArgs {
    /// Session subcommand
    #[command(subcommand)]
    pub command: SessionCommand,
}

/// Session subcommands
#[derive(Debug, Subcommand)]
pub enum SessionCommand {
    /// Show whether an employee has a renewable session
    Status {
        /// Employee e-mail
        email: String,
    },
}

/// Execute session commands
pub async fn execute(
    args: &SessionArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let manager = super::build_manager(&config).await?;

    match &args.command {
        SessionCommand::Status { email } => {
            let status = manager.registry_status(email).await?;
            let ttl = status
                .ttl_seconds
                .map(|s| format!("{s}s"))
                .unwrap_or_else(|| "-".to_string());
            let rows = vec![
                FieldRow::new("email", &status.email),
                FieldRow::new("active", status.active),
                FieldRow::new("ttl", ttl),
            ];
            output::print_fields(&rows, &status, format);
        }
    }

    Ok(())
}
