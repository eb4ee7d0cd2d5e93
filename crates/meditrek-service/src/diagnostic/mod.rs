//! Diagnostic test records.

pub mod service;

pub use service::{CreateTestRequest, DiagnosticListQuery, DiagnosticService, UpdateTestRequest};
