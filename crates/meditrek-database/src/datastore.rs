//! Datastore that dispatches to the configured store provider.

use std::sync::Arc;

use tracing::info;

use meditrek_core::config::{DatabaseConfig, StoreProvider};
use meditrek_core::result::AppResult;

use crate::connection::DatabasePool;
use crate::memory::{MemoryAlertStore, MemoryDiagnosticTestStore, MemoryUserStore};
use crate::migration::run_migrations;
use crate::repositories::{AlertRepository, DiagnosticTestRepository, UserRepository};
use crate::store::{AlertStore, DiagnosticTestStore, UserStore};

/// The three collections behind one handle.
///
/// The provider is selected at construction time based on configuration.
#[derive(Debug, Clone)]
pub struct Datastore {
    /// User accounts.
    pub users: Arc<dyn UserStore>,
    /// Alert inbox.
    pub alerts: Arc<dyn AlertStore>,
    /// Diagnostic tests.
    pub diagnostics: Arc<dyn DiagnosticTestStore>,
    /// Present only for the `postgres` provider.
    pool: Option<DatabasePool>,
}

impl Datastore {
    /// Build the datastore from configuration, connecting (and migrating)
    /// when the provider is PostgreSQL.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        match config.provider {
            StoreProvider::Postgres => {
                info!("Initializing PostgreSQL datastore");
                let pool = DatabasePool::connect(config).await?;
                if config.run_migrations {
                    run_migrations(pool.pool()).await?;
                }
                Ok(Self::postgres(pool))
            }
            StoreProvider::Memory => {
                info!("Initializing in-memory datastore");
                Ok(Self::in_memory())
            }
        }
    }

    /// Datastore over an open PostgreSQL pool.
    pub fn postgres(pool: DatabasePool) -> Self {
        let pg = pool.pool().clone();
        Self {
            users: Arc::new(UserRepository::new(pg.clone())),
            alerts: Arc::new(AlertRepository::new(pg.clone())),
            diagnostics: Arc::new(DiagnosticTestRepository::new(pg)),
            pool: Some(pool),
        }
    }

    /// Empty process-local datastore.
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(MemoryUserStore::new()),
            alerts: Arc::new(MemoryAlertStore::new()),
            diagnostics: Arc::new(MemoryDiagnosticTestStore::new()),
            pool: None,
        }
    }

    /// Which provider backs this datastore.
    pub fn provider(&self) -> StoreProvider {
        if self.pool.is_some() {
            StoreProvider::Postgres
        } else {
            StoreProvider::Memory
        }
    }

    /// The PostgreSQL pool, if any.
    pub fn pool(&self) -> Option<&DatabasePool> {
        self.pool.as_ref()
    }

    /// Whether the backing store is reachable. Always true in memory.
    pub async fn ping(&self) -> bool {
        match &self.pool {
            Some(pool) => pool.ping().await,
            None => true,
        }
    }

    /// Release pooled connections.
    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }
}
