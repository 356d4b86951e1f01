//! Invitations and access requests.

pub mod access_request;
pub mod service;

pub use access_request::{AccessRequest, AccessRequestService};
pub use service::{
    CreateInvitationRequest, InvitationAction, InvitationResolution, InvitationService,
};
