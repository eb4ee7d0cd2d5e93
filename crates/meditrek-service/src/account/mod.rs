//! Registration, login, bearer authentication, and profile management.

pub mod service;

pub use service::{AccountService, AuthSession, Dashboard, DashboardStats, UpdateProfileRequest};
