//! Gardens and the records they contain.

pub mod location;
pub mod plant;
pub mod service;

pub use location::{CreateLocationRequest, LocationService};
pub use plant::{CreatePlantRequest, PlantService};
pub use service::{CreateGardenRequest, GardenDetail, GardenService};

use gardenhub_core::error::{AppError, ErrorKind};

/// Trim a required name, rejecting blank input.
pub(crate) fn required_name(value: &str, what: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("{what} name cannot be empty")));
    }
    Ok(trimmed.to_string())
}

/// Re-label an access refusal with the caller-facing entity name. Other
/// errors pass through untouched.
pub(crate) fn hidden_as(message: &'static str) -> impl FnOnce(AppError) -> AppError {
    move |err| {
        if err.is(ErrorKind::NotFound) {
            AppError::not_found(message)
        } else {
            err
        }
    }
}
