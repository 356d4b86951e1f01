//! Route handlers organized by domain.

pub mod access_request;
pub mod garden;
pub mod health;
pub mod invitation;
pub mod location;
pub mod member;
pub mod plant;
pub mod public;
