//! Convenience result type alias for GardenHub.

use crate::error::AppError;

/// A specialized `Result` type for GardenHub operations.
pub type AppResult<T> = Result<T, AppError>;
