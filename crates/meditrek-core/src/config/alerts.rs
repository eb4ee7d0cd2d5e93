//! Alert inbox configuration.

use serde::{Deserialize, Serialize};

/// Alert expiry settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertsConfig {
    /// Seconds between passes of the expiry sweeper. `0` disables it.
    #[serde(default = "default_sweep_interval")]
    pub expiry_sweep_interval_seconds: u64,
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            expiry_sweep_interval_seconds: default_sweep_interval(),
        }
    }
}

fn default_sweep_interval() -> u64 {
    60
}
