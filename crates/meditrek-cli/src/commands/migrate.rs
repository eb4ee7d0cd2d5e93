//! Database migration management commands.

use clap::{Args, Subcommand};

use meditrek_core::config::AppConfig;
use meditrek_core::error::AppError;
use meditrek_database::migration::run_migrations;

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
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, config: &AppConfig) -> Result<(), AppError> {
    // Connect without the automatic run so the command reports its own result.
    let mut config = config.clone();
    config.database.run_migrations = false;
    let datastore = super::open_datastore(&config).await?;

    match &args.command {
        MigrateCommand::Run => {
            let pool = datastore
                .pool()
                .ok_or_else(|| AppError::internal("PostgreSQL pool missing"))?;
            println!("Running database migrations...");
            run_migrations(pool.pool()).await?;
            output::print_success("All migrations applied successfully.");
        }
    }

    datastore.close().await;
    Ok(())
}
