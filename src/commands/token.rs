//! Token lifecycle CLI commands.

use chrono::Utc;
use clap::{Args, Subcommand};

use crate::output::{self, FieldRow, OutputFormat};
use mingle_auth::{RefreshCookie, TokenPair};
use mingle_core::error::AppError;

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
    /// Issue a new token pair for an employee
    Issue {
        /// Employee e-mail
        email: String,
    },
    /// Exchange a refresh token for a new pair
    Renew {
        /// Refresh token
        refresh_token: String,
    },
    /// Verify a token and show its subject
    Verify {
        /// Access or refresh token
        token: String,
    },
    /// Revoke the refresh token of the token's owner (logout)
    Revoke {
        /// Access token
        access_token: String,
    },
}

/// Execute token commands
pub async fn execute(
    args: &TokenArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let manager = super::build_manager(&config).await?;

    match &args.command {
        TokenCommand::Issue { email } => {
            let pair = manager.issue(email).await?;
            print_pair(&pair, &config.auth.refresh_cookie, format);
        }
        TokenCommand::Renew { refresh_token } => {
            let pair = manager.renew(refresh_token).await?;
            print_pair(&pair, &config.auth.refresh_cookie, format);
        }
        TokenCommand::Verify { token } => {
            let subject = manager.verify(token)?;
            let rows = vec![
                FieldRow::new("id", subject.id),
                FieldRow::new("name", &subject.name),
                FieldRow::new("email", &subject.email),
                FieldRow::new("authority", &subject.authority),
                FieldRow::new("type", subject.token_type),
            ];
            output::print_fields(&rows, &subject, format);
        }
        TokenCommand::Revoke { access_token } => {
            manager.invalidate(access_token).await?;
            output::print_success("Refresh token revoked");
        }
    }

    Ok(())
}

fn print_pair(
    pair: &TokenPair,
    cookie_config: &mingle_core::config::RefreshCookieConfig,
    format: OutputFormat,
) {
    let cookie = RefreshCookie::from_pair(pair, cookie_config, Utc::now());
    let rows = vec![
        FieldRow::new("access_token", &pair.access_token),
        FieldRow::new("access_expires_at", pair.access_expires_at.to_rfc3339()),
        FieldRow::new("refresh_token", &pair.refresh_token),
        FieldRow::new("refresh_expires_at", pair.refresh_expires_at.to_rfc3339()),
        FieldRow::new("set_cookie", &cookie),
    ];
    output::print_fields(&rows, pair, format);
}
