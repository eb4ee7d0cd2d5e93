//! Convenience result type alias for MediTrek.

use crate::error::AppError;

/// A specialized `Result` type for MediTrek operations.
pub type AppResult<T> = Result<T, AppError>;
