//! Password policy for new passwords.

use serde_json::json;

use meditrek_core::config::AuthConfig;
use meditrek_core::error::AppError;

/// Validates new passwords against the configured policy.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    /// Minimum password length in characters.
    min_length: usize,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }

    /// Minimum accepted length.
    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// The policy violation for `password`, if any.
    pub fn check(&self, password: &str) -> Option<String> {
        (password.chars().count() < self.min_length)
            .then(|| format!("Password must be at least {} characters", self.min_length))
    }

    /// Checks the policy, reporting the failure against `field`.
    pub fn validate(&self, field: &str, password: &str) -> Result<(), AppError> {
        match self.check(password) {
            Some(message) => Err(AppError::validation(message.clone())
                .with_details(json!({ field: [message] }))),
            None => Ok(()),
        }
    }

    /// Validates that a new password differs from the old one.
    pub fn validate_not_same(&self, old_password: &str, new_password: &str) -> Result<(), AppError> {
        if old_password == new_password {
            return Err(AppError::validation(
                "New password must be different from the current password",
            ));
        }
        Ok(())
    }
}
