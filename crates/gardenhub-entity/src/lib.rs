//! # gardenhub-entity
//!
//! Domain entity models for GardenHub. Every struct in this crate
//! represents a database table row or a domain value object. Row types
//! derive `sqlx::FromRow`; enums map onto PostgreSQL enum types.
//!
//! The role → capability table lives in [`membership::permissions`].

pub mod garden;
pub mod invitation;
pub mod membership;
pub mod user;
