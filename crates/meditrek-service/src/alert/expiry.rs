//! Periodic removal of expired alerts.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::time;
use tracing::{debug, error, info};

use meditrek_core::result::AppResult;
use meditrek_database::store::AlertStore;

/// Deletes alerts whose expiry has passed, on a fixed interval.
#[derive(Debug, Clone)]
pub struct AlertExpirySweeper {
    /// Alert store.
    alerts: Arc<dyn AlertStore>,
    /// Time between passes.
    interval: Duration,
}

impl AlertExpirySweeper {
    /// Creates a sweeper that runs every `interval_seconds`.
    pub fn new(alerts: Arc<dyn AlertStore>, interval_seconds: u64) -> Self {
        Self {
            alerts,
            interval: Duration::from_secs(interval_seconds.max(1)),
        }
    }

    /// Runs one pass and returns the number of alerts removed.
    pub async fn sweep(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let removed = self.alerts.delete_expired(now).await?;
        if removed > 0 {
            info!(removed, "Expired alerts removed");
        } else {
            debug!("No expired alerts");
        }
        Ok(removed)
    }

    /// Sweeps until the cancel channel flips to `true`. Failed passes are
    /// logged and retried on the next tick.
    pub async fn run(&self, mut cancel: watch::Receiver<bool>) {
        info!(
            interval_seconds = self.interval.as_secs(),
            "Alert expiry sweeper started"
        );

        let mut interval = time::interval(self.interval);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if let Err(e) = self.sweep(Utc::now()).await {
                        error!(error = %e, "Alert expiry sweep failed");
                    }
                }
                changed = cancel.changed() => {
                    if changed.is_err() || *cancel.borrow() {
                        info!("Alert expiry sweeper shutting down");
                        break;
                    }
                }
            }
        }
    }
}
