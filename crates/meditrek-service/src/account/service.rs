//! Account service: credentials, token issuance, and self-service profile edits.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use validator::{Validate, ValidationErrors};

use meditrek_auth::jwt::{JwtDecoder, JwtEncoder};
use meditrek_auth::password::{PasswordHasher, PasswordValidator};
use meditrek_core::error::AppError;
use meditrek_core::result::AppResult;
use meditrek_database::store::{AlertStore, DiagnosticTestStore, UserStore};
use meditrek_entity::user::{CreateUser, UpdateProfile, User, UserProfile};

use crate::context::RequestContext;
use crate::validation::{self, invalid, not_blank, trimmed_opt, validation_error};

/// Highest accepted notification threshold.
pub const MAX_NOTIFICATION_THRESHOLD: i32 = 10;

/// Profile edits. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(default, deserialize_with = "trimmed_opt")]
    #[validate(custom(function = "not_blank", message = "Name is required"))]
    pub name: Option<String>,
    #[validate(range(
        min = 0,
        max = MAX_NOTIFICATION_THRESHOLD,
        message = "Notification threshold must be between 0 and 10"
    ))]
    pub notification_threshold: Option<i32>,
    pub email_notifications: Option<bool>,
}

impl From<UpdateProfileRequest> for UpdateProfile {
    fn from(req: UpdateProfileRequest) -> Self {
        Self {
            name: req.name,
            notification_threshold: req.notification_threshold,
            email_notifications: req.email_notifications,
        }
    }
}

/// A signed-in session handed back by register and login.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    /// Bearer token.
    pub token: String,
    /// Always `"Bearer"`.
    #[serde(rename = "type")]
    pub token_type: &'static str,
    /// Token expiry.
    pub expires_at: DateTime<Utc>,
    /// Public profile of the signed-in user.
    pub user: UserProfile,
}

/// Live counters shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_tests: u64,
    pub pending_tests: u64,
    pub completed_tests: u64,
    pub unread_alerts: u64,
    pub active_alerts: u64,
}

/// Dashboard payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    /// Greeting line.
    pub message: String,
    /// Public profile.
    pub user: UserProfile,
    /// Live counters.
    pub stats: DashboardStats,
}

/// Handles accounts and bearer authentication.
#[derive(Debug, Clone)]
pub struct AccountService {
    /// User store.
    users: Arc<dyn UserStore>,
    /// Alert store, read for dashboard counters.
    alerts: Arc<dyn AlertStore>,
    /// Diagnostic test store, read for dashboard counters.
    diagnostics: Arc<dyn DiagnosticTestStore>,
    /// Token issuer.
    encoder: Arc<JwtEncoder>,
    /// Token validator.
    decoder: Arc<JwtDecoder>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password policy.
    validator: Arc<PasswordValidator>,
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(
        users: Arc<dyn UserStore>,
        alerts: Arc<dyn AlertStore>,
        diagnostics: Arc<dyn DiagnosticTestStore>,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
    ) -> Self {
        Self {
            users,
            alerts,
            diagnostics,
            encoder,
            decoder,
            hasher,
            validator,
        }
    }

    /// Creates an account and signs it in.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> AppResult<AuthSession> {
        // Checked by hand: the password policy is runtime configuration.
        let mut errors = ValidationErrors::new();
        if not_blank(name).is_err() {
            errors.add("name", invalid("required", "Name is required"));
        }
        if not_blank(email).is_err() {
            errors.add("email", invalid("required", "Email is required"));
        }
        if let Some(message) = self.validator.check(password) {
            errors.add("password", invalid("password_policy", message));
        }
        validation::check(errors)?;

        if self.users.find_by_email(email).await?.is_some() {
            return Err(AppError::conflict("User already exists"));
        }

        let hash = self.hasher.hash_password(password)?;
        let user = self.users.create(CreateUser::new(name, email, hash)).await?;

        info!(user_id = %user.id, "User registered");

        self.session_for(&user)
    }

    /// Verifies credentials and issues a token.
    ///
    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthSession> {
        let Some(user) = self.users.find_by_email(email).await? else {
            warn!("Login attempt for unknown email");
            return Err(AppError::authentication("Invalid credentials"));
        };

        if !self.hasher.verify_password(password, &user.password_hash)? {
            warn!(user_id = %user.id, "Login attempt with wrong password");
            return Err(AppError::authentication("Invalid credentials"));
        }

        info!(user_id = %user.id, "User logged in");

        self.session_for(&user)
    }

    /// Resolves a bearer token to a request context.
    ///
    /// Fails with an authentication error when the token is invalid or its
    /// user no longer exists.
    pub async fn authenticate(&self, token: &str) -> AppResult<RequestContext> {
        let claims = self.decoder.decode(token)?;
        let user = self
            .users
            .find_by_id(claims.user_id())
            .await?
            .ok_or_else(|| AppError::authentication("User no longer exists"))?;
        Ok(RequestContext::new(&user, claims.jti))
    }

    /// Loads the authenticated user.
    pub async fn current_user(&self, ctx: &RequestContext) -> AppResult<User> {
        self.users
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Greeting plus live counters.
    pub async fn dashboard(&self, ctx: &RequestContext) -> AppResult<Dashboard> {
        let user = self.current_user(ctx).await?;
        let tests = self.diagnostics.count_by_status(ctx.user_id).await?;
        let unread_alerts = self.alerts.count_unread(ctx.user_id).await?;
        let active_alerts = self.alerts.count_active(ctx.user_id, Utc::now()).await?;

        Ok(Dashboard {
            message: format!("Welcome to your dashboard, {}!", user.name),
            user: user.profile(),
            stats: DashboardStats {
                total_tests: tests.total(),
                pending_tests: tests.pending,
                completed_tests: tests.completed,
                unread_alerts,
                active_alerts,
            },
        })
    }

    /// Applies profile edits after validating them.
    pub async fn update_profile(
        &self,
        ctx: &RequestContext,
        req: UpdateProfileRequest,
    ) -> AppResult<UserProfile> {
        req.validate().map_err(validation_error)?;

        let user = self
            .users
            .update_profile(ctx.user_id, &req.into())
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        info!(user_id = %ctx.user_id, "Profile updated");

        Ok(user.profile())
    }

    /// Changes the authenticated user's password.
    pub async fn change_password(
        &self,
        ctx: &RequestContext,
        current_password: &str,
        new_password: &str,
    ) -> AppResult<()> {
        let user = self.current_user(ctx).await?;

        if !self
            .hasher
            .verify_password(current_password, &user.password_hash)?
        {
            let mut errors = ValidationErrors::new();
            errors.add("current_password", invalid("mismatch", "Current password is incorrect"));
            return validation::check(errors);
        }

        self.validator.validate("newPassword", new_password)?;
        self.validator
            .validate_not_same(current_password, new_password)?;

        let hash = self.hasher.hash_password(new_password)?;
        if !self.users.update_password(ctx.user_id, &hash).await? {
            return Err(AppError::not_found("User not found"));
        }

        info!(user_id = %ctx.user_id, "Password changed");

        Ok(())
    }

    fn session_for(&self, user: &User) -> AppResult<AuthSession> {
        let issued = self.encoder.issue(user.id, &user.email)?;
        Ok(AuthSession {
            token: issued.token,
            token_type: "Bearer",
            expires_at: issued.expires_at,
            user: user.profile(),
        })
    }
}
