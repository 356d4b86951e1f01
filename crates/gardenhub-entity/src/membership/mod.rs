//! Garden membership entities and the role/permission table.

pub mod model;
pub mod permissions;
pub mod role;

pub use model::{GardenMembership, MembershipWithUser};
pub use permissions::{Capability, GardenPermissions};
pub use role::GardenRole;
