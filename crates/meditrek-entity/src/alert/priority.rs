//! Alert priority enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Urgency of an alert.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "alert_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AlertPriority {
    /// Can wait.
    Low,
    /// Normal urgency.
    #[default]
    Medium,
    /// Should be seen soon.
    High,
    /// Needs attention now.
    Critical,
}

impl AlertPriority {
    /// Return the priority as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for AlertPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AlertPriority {
    type Err = meditrek_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(meditrek_core::AppError::validation(
                "Priority must be one of: low, medium, high, critical",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_follows_urgency() {
        assert!(AlertPriority::Critical > AlertPriority::High);
        assert!(AlertPriority::Low < AlertPriority::Medium);
    }

    #[test]
    fn test_default_is_medium() {
        assert_eq!(AlertPriority::default(), AlertPriority::Medium);
        assert!("urgent".parse::<AlertPriority>().is_err());
    }
}
