//! Garden invitation entities.

pub mod model;
pub mod status;

pub use model::{CreateInvitation, GardenInvitation, InvitationDetails};
pub use status::InvitationStatus;
