//! # gardenhub-auth
//!
//! Caller identity and garden-level authorization.
//!
//! ## Modules
//!
//! - `jwt` — bearer token claims, signing, and verification
//! - `gate` — resolves whether a user holds a capability on a garden

pub mod gate;
pub mod jwt;

pub use gate::{AuthorizationGate, GardenAccess};
pub use jwt::{Claims, JwtDecoder, JwtEncoder};
