//! Shared fixtures for service tests.

#![allow(dead_code)]

pub mod flaky;

use std::sync::Arc;

use gardenhub_core::config::InvitationConfig;
use gardenhub_database::{MemoryStore, Store};
use gardenhub_entity::garden::Garden;
use gardenhub_entity::membership::GardenRole;
use gardenhub_entity::user::CreateUser;
use gardenhub_service::garden::CreateGardenRequest;
use gardenhub_service::invitation::CreateInvitationRequest;
use gardenhub_service::{
    AccessRequestService, GardenService, InvitationService, LocationService, MembershipService,
    PlantService, RequestContext,
};

pub struct Harness {
    pub store: Arc<dyn Store>,
    pub gardens: GardenService,
    pub locations: LocationService,
    pub plants: PlantService,
    pub members: MembershipService,
    pub invitations: InvitationService,
    pub access: AccessRequestService,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    pub fn with_store(store: Arc<dyn Store>) -> Self {
        let config = InvitationConfig::default();
        Self {
            gardens: GardenService::new(Arc::clone(&store)),
            locations: LocationService::new(Arc::clone(&store)),
            plants: PlantService::new(Arc::clone(&store)),
            members: MembershipService::new(Arc::clone(&store)),
            invitations: InvitationService::new(Arc::clone(&store), &config),
            access: AccessRequestService::new(Arc::clone(&store), &config),
            store,
        }
    }

    /// Register a user and return a request context acting as them.
    pub async fn user(&self, username: &str) -> RequestContext {
        let email = format!("{username}@example.com");
        let mut uow = self.store.begin().await.unwrap();
        let user = uow
            .create_user(&CreateUser {
                username: username.to_string(),
                email: email.clone(),
            })
            .await
            .unwrap();
        uow.commit().await.unwrap();
        RequestContext::new(user.id, email, username)
    }

    pub async fn garden(&self, owner: &RequestContext, name: &str) -> Garden {
        self.gardens
            .create_garden(
                owner,
                CreateGardenRequest {
                    name: name.to_string(),
                    description: None,
                    notes: None,
                },
            )
            .await
            .unwrap()
    }

    /// Invite `invitee` as `role` and have them accept.
    pub async fn join(
        &self,
        inviter: &RequestContext,
        garden: &Garden,
        invitee: &RequestContext,
        role: &str,
    ) {
        let invitation = self
            .invitations
            .create_invitation(inviter, invite(garden, &invitee.email, role))
            .await
            .unwrap();
        self.invitations
            .accept_invitation(invitee, invitation.id)
            .await
            .unwrap();
    }

    /// Add a membership straight through the store, bypassing invitations.
    pub async fn join_direct(&self, garden: &Garden, user: &RequestContext, role: GardenRole) {
        let mut uow = self.store.begin().await.unwrap();
        uow.insert_membership(garden.id, user.user_id, role)
            .await
            .unwrap()
            .expect("not yet a member");
        uow.commit().await.unwrap();
    }
}

pub fn invite(garden: &Garden, email: &str, role: &str) -> CreateInvitationRequest {
    CreateInvitationRequest {
        garden_id: garden.id,
        email: email.to_string(),
        role: role.to_string(),
        message: None,
    }
}
