//! Diagnostic test domain entities.

pub mod model;
pub mod status;

pub use model::{DiagnosticTest, NewDiagnosticTest, UpdateDiagnosticTest};
pub use status::TestStatus;
