//! CLI command definitions and dispatch.

pub mod alert;
pub mod migrate;
pub mod seed;

use clap::{Parser, Subcommand};

use meditrek_core::config::{AppConfig, StoreProvider};
use meditrek_core::error::AppError;
use meditrek_database::Datastore;

use crate::output::OutputFormat;

/// MediTrek administration tool
#[derive(Debug, Parser)]
#[command(name = "meditrek", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding `default.toml` and the per-environment files
    #[arg(short, long, env = "MEDITREK_CONFIG_DIR", default_value = "config")]
    pub config_dir: String,

    /// Environment name; selects `{config_dir}/{env}.toml`
    #[arg(short, long, env = "MEDITREK_ENV", default_value = "development")]
    pub env: String,

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
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Load sample users, diagnostic tests and alerts
    Seed(seed::SeedArgs),
    /// Alert management
    Alert(alert::AlertArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = AppConfig::load(&self.config_dir, &self.env)?;

        match &self.command {
            Commands::Migrate(args) => migrate::execute(args, &config).await,
            Commands::Seed(args) => seed::execute(args, &config, self.format).await,
            Commands::Alert(args) => alert::execute(args, &config, self.format).await,
        }
    }
}

/// Open the configured PostgreSQL datastore.
///
/// The in-memory provider lives inside the server process, so there is
/// nothing for an offline command to act on.
pub async fn open_datastore(config: &AppConfig) -> Result<Datastore, AppError> {
    if config.database.provider != StoreProvider::Postgres {
        return Err(AppError::configuration(
            "This command requires database.provider = \"postgres\"",
        ));
    }
    Datastore::connect(&config.database).await
}
