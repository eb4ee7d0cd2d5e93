//! Diagnostic test status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a diagnostic test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "test_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    /// Ordered but no result yet.
    #[default]
    Pending,
    /// Result recorded.
    Completed,
    /// Will not be performed.
    Cancelled,
}

impl TestStatus {
    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TestStatus {
    type Err = meditrek_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(meditrek_core::AppError::validation(format!(
                "Invalid status: '{s}'. Expected one of: pending, completed, cancelled"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("completed".parse::<TestStatus>().expect("parse"), TestStatus::Completed);
        assert!("done".parse::<TestStatus>().is_err());
        assert!("".parse::<TestStatus>().is_err());
    }
}
