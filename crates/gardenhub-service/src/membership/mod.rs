//! Garden membership management.

pub mod service;

pub use service::{MemberView, MembershipService};
