//! sqlx repositories for all GardenHub tables.
//!
//! Repositories are stateless; every function runs on the connection of
//! the caller's transaction so that one unit of work spans all of them.

pub mod garden;
pub mod invitation;
pub mod location;
pub mod membership;
pub mod plant;
pub mod user;

pub use garden::GardenRepository;
pub use invitation::InvitationRepository;
pub use location::LocationRepository;
pub use membership::MembershipRepository;
pub use plant::PlantRepository;
pub use user::UserRepository;
