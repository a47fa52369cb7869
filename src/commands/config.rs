//! Configuration inspection commands.

use clap::{Args, Subcommand};
use serde_json::json;

use crate::output::{self, FieldRow, OutputFormat};
use mingle_core::config::mask_url;
use mingle_core::error::AppError;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Load and validate configuration, printing a masked summary
    Check,
}

/// Execute config commands
pub async fn execute(
    args: &ConfigArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Check => {
            let config = super::load_config(config_path)?;
            config.auth.validate()?;

            let database_url = mask_url(&config.database.url);
            let redis_url = mask_url(&config.cache.redis.url);
            let rows = vec![
                FieldRow::new("database.url", &database_url),
                FieldRow::new("cache.provider", &config.cache.provider),
                FieldRow::new("cache.redis.url", &redis_url),
                FieldRow::new("auth.jwt_secret", "****"),
                FieldRow::new(
                    "auth.jwt_access_ttl_minutes",
                    config.auth.jwt_access_ttl_minutes,
                ),
                FieldRow::new(
                    "auth.jwt_refresh_ttl_hours",
                    config.auth.jwt_refresh_ttl_hours,
                ),
                FieldRow::new("auth.refresh_cookie.name", &config.auth.refresh_cookie.name),
                FieldRow::new("logging.level", &config.logging.level),
            ];
            let summary = json!({
                "database_url": database_url,
                "cache_provider": config.cache.provider,
                "redis_url": redis_url,
                "jwt_access_ttl_minutes": config.auth.jwt_access_ttl_minutes,
                "jwt_refresh_ttl_hours": config.auth.jwt_refresh_ttl_hours,
                "refresh_cookie": config.auth.refresh_cookie.name,
                "logging_level": config.logging.level,
            });
            output::print_fields(&rows, &summary, format);
            output::print_success("Configuration is valid");
        }
    }

    Ok(())
}
