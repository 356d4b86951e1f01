//! # gardenhub-service
//!
//! Use-case layer for GardenHub. Each service opens one unit of work per
//! operation, routes it through the authorization gate, and commits only
//! when every write succeeded.
//!
//! Services follow constructor injection: the store is provided at
//! construction time as an `Arc<dyn Store>`.

pub mod context;
pub mod garden;
pub mod invitation;
pub mod membership;

pub use context::RequestContext;
pub use garden::{GardenService, LocationService, PlantService};
pub use invitation::{AccessRequestService, InvitationService};
pub use membership::MembershipService;
