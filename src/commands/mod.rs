//! CLI command definitions and dispatch.

pub mod config;
pub mod session;
pub mod token;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::warn;

use crate::output::OutputFormat;
use mingle_auth::SessionManager;
use mingle_cache::CacheManager;
use mingle_core::config::AppConfig;
use mingle_core::error::{AppError, ErrorKind};
use mingle_core::traits::CacheProvider;
use mingle_database::{DatabasePool, EmployeeRepository};

/// MingleCRM session token administration
#[derive(Debug, Parser)]
#[command(name = "mingle", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Issue, renew, verify, and revoke session tokens
    Token(token::TokenArgs),
    /// Inspect refresh registry state
    Session(session::SessionArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Token(args) => token::execute(args, &self.config, self.format).await,
            Commands::Session(args) => session::execute(args, &self.config, self.format).await,
            Commands::Config(args) => config::execute(args, &self.config, self.format).await,
        }
    }
}

/// Helper: load configuration and start logging.
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    let config = AppConfig::load(config_path)?;
    crate::init_logging(&config.logging);
    Ok(config)
}

/// Helper: wire the session manager from configuration.
///
/// Fails before any token work if the signing key is unusable.
pub async fn build_manager(config: &AppConfig) -> Result<SessionManager, AppError> {
    config.auth.validate()?;

    if config.cache.provider == "memory" {
        warn!("In-memory registry does not outlive this process; use the redis provider to renew across runs");
    }

    let cache = Arc::new(CacheManager::new(&config.cache).await?);
    if !cache.health_check().await? {
        return Err(AppError::new(
            ErrorKind::Cache,
            "Refresh registry backend did not answer the health check",
        ));
    }
    let pool = DatabasePool::connect_lazy(&config.database)?;
    let principals = Arc::new(EmployeeRepository::new(pool.into_pool()));

    SessionManager::from_config(&config.auth, cache, principals)
}
