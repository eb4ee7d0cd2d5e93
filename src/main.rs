//! MediTrek Server: patient diagnostics, alerts and chat backend.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use meditrek_api::{AppState, build_app};
use meditrek_core::config::AppConfig;
use meditrek_core::error::AppError;
use meditrek_database::Datastore;
use meditrek_service::{AlertExpirySweeper, HttpInferenceClient, InferenceClient};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load configuration from `MEDITREK_CONFIG_DIR` for `MEDITREK_ENV`.
fn load_configuration() -> Result<AppConfig, AppError> {
    let dir = std::env::var("MEDITREK_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
    let env = std::env::var("MEDITREK_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&dir, &env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting MediTrek v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Datastore ────────────────────────────────────────
    let datastore = Datastore::connect(&config.database).await?;
    tracing::info!(provider = ?datastore.provider(), "Datastore ready");

    // ── Step 2: Chat relay backend ───────────────────────────────
    let inference: Option<Arc<dyn InferenceClient>> = if config.chat.enabled {
        tracing::info!(endpoint = %config.chat.endpoint, model = %config.chat.model, "Chat relay enabled");
        Some(Arc::new(HttpInferenceClient::new(&config.chat)?))
    } else {
        tracing::info!("Chat relay disabled; replies will use the fallback message");
        None
    };

    // ── Step 3: Shutdown channel ─────────────────────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // ── Step 4: Alert expiry sweeper ─────────────────────────────
    let sweeper_handle = if config.alerts.expiry_sweep_interval_seconds > 0 {
        let sweeper = AlertExpirySweeper::new(
            Arc::clone(&datastore.alerts),
            config.alerts.expiry_sweep_interval_seconds,
        );
        let cancel = shutdown_rx.clone();
        Some(tokio::spawn(async move {
            sweeper.run(cancel).await;
        }))
    } else {
        tracing::info!("Alert expiry sweeper disabled");
        None
    };

    // ── Step 5: Build and start HTTP server ──────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);

    let state = AppState::new(config, datastore.clone(), inference);
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("MediTrek server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
            let _ = shutdown_tx.send(true);
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    // ── Step 6: Wait for background tasks ────────────────────────
    if let Some(handle) = sweeper_handle {
        let _ = tokio::time::timeout(grace, handle).await;
    }
    datastore.close().await;

    tracing::info!("MediTrek server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
