//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use meditrek_auth::{JwtDecoder, JwtEncoder, PasswordHasher, PasswordValidator};
use meditrek_core::config::AppConfig;
use meditrek_database::Datastore;
use meditrek_service::{
    AccountService, AlertService, ChatService, DiagnosticService, InferenceClient,
};

/// Shared application state passed to all Axum handlers via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Store handles, plus the pool when backed by PostgreSQL.
    pub datastore: Datastore,
    /// Registration, login, token checks, profile.
    pub accounts: Arc<AccountService>,
    /// Alert inbox.
    pub alerts: Arc<AlertService>,
    /// Diagnostic tests.
    pub diagnostics: Arc<DiagnosticService>,
    /// Chat relay.
    pub chat: Arc<ChatService>,
}

impl AppState {
    /// Wires every service over the given stores.
    ///
    /// `inference` is the chat backend; `None` makes every chat reply the
    /// fallback message.
    pub fn new(
        config: AppConfig,
        datastore: Datastore,
        inference: Option<Arc<dyn InferenceClient>>,
    ) -> Self {
        let encoder = Arc::new(JwtEncoder::new(&config.auth));
        let decoder = Arc::new(JwtDecoder::new(&config.auth));
        let hasher = Arc::new(PasswordHasher::new());
        let validator = Arc::new(PasswordValidator::new(&config.auth));

        let accounts = Arc::new(AccountService::new(
            Arc::clone(&datastore.users),
            Arc::clone(&datastore.alerts),
            Arc::clone(&datastore.diagnostics),
            encoder,
            decoder,
            hasher,
            validator,
        ));
        let alerts = Arc::new(AlertService::new(Arc::clone(&datastore.alerts)));
        let diagnostics = Arc::new(DiagnosticService::new(Arc::clone(&datastore.diagnostics)));
        let chat = Arc::new(ChatService::new(&config.chat, inference));

        Self {
            config: Arc::new(config),
            datastore,
            accounts,
            alerts,
            diagnostics,
            chat,
        }
    }
}
