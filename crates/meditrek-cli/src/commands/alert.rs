//! Alert management CLI commands.

use chrono::{Duration, Utc};
use clap::{Args, Subcommand};
use validator::Validate;

use meditrek_core::config::AppConfig;
use meditrek_core::error::AppError;
use meditrek_service::validation::validation_error;
use meditrek_service::{AlertService, CreateAlertRequest};

use crate::output::{self, OutputFormat};

/// Arguments for alert commands
#[derive(Debug, Args)]
pub struct AlertArgs {
    /// Alert subcommand
    #[command(subcommand)]
    pub command: AlertCommand,
}

/// Alert subcommands
#[derive(Debug, Subcommand)]
pub enum AlertCommand {
    /// Push an alert into a user's inbox
    Create {
        /// Recipient email
        #[arg(long)]
        email: String,
        /// Alert title
        #[arg(long)]
        title: String,
        /// Alert body
        #[arg(long)]
        message: String,
        /// info, warning, error or success
        #[arg(long = "type")]
        alert_type: Option<String>,
        /// low, medium, high or critical
        #[arg(long)]
        priority: Option<String>,
        /// Delete the alert this many minutes from now
        #[arg(long)]
        expires_in_minutes: Option<i64>,
    },
}

/// Execute alert commands
pub async fn execute(
    args: &AlertArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let datastore = super::open_datastore(config).await?;

    match &args.command {
        AlertCommand::Create {
            email,
            title,
            message,
            alert_type,
            priority,
            expires_in_minutes,
        } => {
            let request = CreateAlertRequest {
                title: title.trim().to_string(),
                message: message.trim().to_string(),
                r#type: alert_type.clone(),
                priority: priority.clone(),
                expires_at: expires_in_minutes.map(|m| Utc::now() + Duration::minutes(m)),
            };
            request.validate().map_err(validation_error)?;

            let user = datastore
                .users
                .find_by_email(email)
                .await?
                .ok_or_else(|| AppError::not_found(format!("No user with email '{email}'")))?;

            let service = AlertService::new(datastore.alerts.clone());
            let alert = service.create_for(user.id, request).await?;

            output::print_success(&format!("Alert {} created for {}", alert.id, user.email));
            output::print_item(&alert, format);
        }
    }

    datastore.close().await;
    Ok(())
}
