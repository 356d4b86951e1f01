//! In-memory [`Store`] used by the test suites and local experiments.
//!
//! Units of work are serialized behind one async mutex. Each unit of
//! work edits a private copy of the whole state and publishes it on
//! commit, which gives the same all-or-nothing behavior as a database
//! transaction. Uniqueness rules mirror the SQL schema.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use gardenhub_core::error::AppError;
use gardenhub_core::result::AppResult;
use gardenhub_entity::garden::{
    CreateGarden, CreateGardenLocation, CreatePlant, Garden, GardenLocation, Plant, UpdateGarden,
    UpdateGardenLocation, UpdatePlant,
};
use gardenhub_entity::invitation::{
    CreateInvitation, GardenInvitation, InvitationDetails, InvitationStatus,
};
use gardenhub_entity::membership::{GardenMembership, GardenRole, MembershipWithUser};
use gardenhub_entity::user::{CreateUser, User, emails_match};

use crate::store::{Store, UnitOfWork};

#[derive(Debug, Clone, Default)]
struct MemoryState {
    users: HashMap<Uuid, User>,
    gardens: HashMap<Uuid, Garden>,
    locations: HashMap<Uuid, GardenLocation>,
    plants: HashMap<Uuid, Plant>,
    memberships: HashMap<Uuid, GardenMembership>,
    invitations: HashMap<Uuid, GardenInvitation>,
}

impl MemoryState {
    fn location_name_taken(&self, garden_id: Uuid, name: &str, except: Option<Uuid>) -> bool {
        self.locations
            .values()
            .any(|l| l.garden_id == garden_id && l.name == name && Some(l.id) != except)
    }

    fn remove_location_cascade(&mut self, id: Uuid) -> bool {
        let removed = self.locations.remove(&id).is_some();
        if removed {
            self.plants.retain(|_, p| p.garden_location_id != id);
        }
        removed
    }

    fn details(&self, invitation: &GardenInvitation) -> InvitationDetails {
        InvitationDetails {
            invitation: invitation.clone(),
            garden_name: self
                .gardens
                .get(&invitation.garden_id)
                .map(|g| g.name.clone())
                .unwrap_or_default(),
            inviter_username: self
                .users
                .get(&invitation.invited_by_user_id)
                .map(|u| u.username.clone())
                .unwrap_or_default(),
        }
    }

    fn pending_details<F>(&self, now: DateTime<Utc>, filter: F) -> Vec<InvitationDetails>
    where
        F: Fn(&GardenInvitation) -> bool,
    {
        let mut rows: Vec<&GardenInvitation> = self
            .invitations
            .values()
            .filter(|i| i.status == InvitationStatus::Pending && i.expires_at > now)
            .filter(|i| filter(*i))
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        rows.into_iter().map(|i| self.details(i)).collect()
    }
}

/// Store that keeps every table in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn begin(&self) -> AppResult<Box<dyn UnitOfWork>> {
        let guard = self.state.clone().lock_owned().await;
        let working = guard.clone();
        Ok(Box::new(MemoryUnitOfWork { guard, working }))
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

/// Unit of work over a private copy of the store.
pub struct MemoryUnitOfWork {
    guard: OwnedMutexGuard<MemoryState>,
    working: MemoryState,
}

#[async_trait]
impl UnitOfWork for MemoryUnitOfWork {
    async fn find_user(&mut self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.working.users.get(&id).cloned())
    }

    async fn find_user_by_email(&mut self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .working
            .users
            .values()
            .find(|u| emails_match(&u.email, email))
            .cloned())
    }

    async fn create_user(&mut self, data: &CreateUser) -> AppResult<User> {
        if self.find_user_by_email(&data.email).await?.is_some() {
            return Err(AppError::conflict(format!(
                "Email '{}' is already registered",
                data.email
            )));
        }
        let user = User {
            id: Uuid::now_v7(),
            username: data.username.clone(),
            email: data.email.trim().to_string(),
            created_at: Utc::now(),
        };
        self.working.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn insert_garden(&mut self, data: &CreateGarden) -> AppResult<Garden> {
        let now = Utc::now();
        let garden = Garden {
            id: Uuid::now_v7(),
            owner_user_id: data.owner_user_id,
            name: data.name.clone(),
            description: data.description.clone(),
            notes: data.notes.clone(),
            created_at: now,
            updated_at: now,
        };
        self.working.gardens.insert(garden.id, garden.clone());
        Ok(garden)
    }

    async fn find_garden(&mut self, id: Uuid) -> AppResult<Option<Garden>> {
        Ok(self.working.gardens.get(&id).cloned())
    }

    async fn list_gardens_for_user(&mut self, user_id: Uuid) -> AppResult<Vec<Garden>> {
        let state = &self.working;
        let mut gardens: Vec<Garden> = state
            .gardens
            .values()
            .filter(|g| {
                g.owner_user_id == user_id
                    || state
                        .memberships
                        .values()
                        .any(|m| m.garden_id == g.id && m.user_id == user_id)
            })
            .cloned()
            .collect();
        gardens.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(gardens)
    }

    async fn update_garden(&mut self, id: Uuid, data: &UpdateGarden) -> AppResult<Option<Garden>> {
        Ok(self.working.gardens.get_mut(&id).map(|garden| {
            data.apply_to(garden);
            garden.updated_at = Utc::now();
            garden.clone()
        }))
    }

    async fn delete_garden(&mut self, id: Uuid) -> AppResult<bool> {
        let state = &mut self.working;
        if state.gardens.remove(&id).is_none() {
            return Ok(false);
        }
        let location_ids: Vec<Uuid> = state
            .locations
            .values()
            .filter(|l| l.garden_id == id)
            .map(|l| l.id)
            .collect();
        for location_id in location_ids {
            state.remove_location_cascade(location_id);
        }
        state.memberships.retain(|_, m| m.garden_id != id);
        state.invitations.retain(|_, i| i.garden_id != id);
        Ok(true)
    }

    async fn insert_location(&mut self, data: &CreateGardenLocation) -> AppResult<GardenLocation> {
        if self
            .working
            .location_name_taken(data.garden_id, &data.name, None)
        {
            return Err(AppError::conflict(format!(
                "A location named '{}' already exists in this garden",
                data.name
            )));
        }
        let now = Utc::now();
        let d = data.details.clone();
        let location = GardenLocation {
            id: Uuid::now_v7(),
            garden_id: data.garden_id,
            creator_user_id: data.creator_user_id,
            name: data.name.clone(),
            description: d.description,
            notes: d.notes,
            size: d.size,
            soil_type: d.soil_type,
            light_conditions: d.light_conditions,
            irrigation_type: d.irrigation_type,
            microclimate_notes: d.microclimate_notes,
            created_at: now,
            updated_at: now,
        };
        self.working.locations.insert(location.id, location.clone());
        Ok(location)
    }

    async fn find_location(&mut self, id: Uuid) -> AppResult<Option<GardenLocation>> {
        Ok(self.working.locations.get(&id).cloned())
    }

    async fn list_locations(&mut self, garden_id: Uuid) -> AppResult<Vec<GardenLocation>> {
        let mut locations: Vec<GardenLocation> = self
            .working
            .locations
            .values()
            .filter(|l| l.garden_id == garden_id)
            .cloned()
            .collect();
        locations.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(locations)
    }

    async fn update_location(
        &mut self,
        id: Uuid,
        data: &UpdateGardenLocation,
    ) -> AppResult<Option<GardenLocation>> {
        let Some(existing) = self.working.locations.get(&id) else {
            return Ok(None);
        };
        if let Some(name) = &data.name {
            if self
                .working
                .location_name_taken(existing.garden_id, name, Some(id))
            {
                return Err(AppError::conflict(
                    "A location with that name already exists in this garden",
                ));
            }
        }
        Ok(self.working.locations.get_mut(&id).map(|location| {
            data.apply_to(location);
            location.updated_at = Utc::now();
            location.clone()
        }))
    }

    async fn delete_location(&mut self, id: Uuid) -> AppResult<bool> {
        Ok(self.working.remove_location_cascade(id))
    }

    async fn insert_plant(&mut self, data: &CreatePlant) -> AppResult<Plant> {
        let now = Utc::now();
        let plant = Plant {
            id: Uuid::now_v7(),
            garden_location_id: data.garden_location_id,
            creator_user_id: data.creator_user_id,
            name: data.name.clone(),
            variety: data.variety.clone(),
            notes: data.notes.clone(),
            planted_at: data.planted_at,
            created_at: now,
            updated_at: now,
        };
        self.working.plants.insert(plant.id, plant.clone());
        Ok(plant)
    }

    async fn find_plant(&mut self, id: Uuid) -> AppResult<Option<Plant>> {
        Ok(self.working.plants.get(&id).cloned())
    }

    async fn list_plants(&mut self, location_id: Uuid) -> AppResult<Vec<Plant>> {
        let mut plants: Vec<Plant> = self
            .working
            .plants
            .values()
            .filter(|p| p.garden_location_id == location_id)
            .cloned()
            .collect();
        plants.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(plants)
    }

    async fn update_plant(&mut self, id: Uuid, data: &UpdatePlant) -> AppResult<Option<Plant>> {
        Ok(self.working.plants.get_mut(&id).map(|plant| {
            data.apply_to(plant);
            plant.updated_at = Utc::now();
            plant.clone()
        }))
    }

    async fn delete_plant(&mut self, id: Uuid) -> AppResult<bool> {
        Ok(self.working.plants.remove(&id).is_some())
    }

    async fn insert_membership(
        &mut self,
        garden_id: Uuid,
        user_id: Uuid,
        role: GardenRole,
    ) -> AppResult<Option<GardenMembership>> {
        let memberships = &mut self.working.memberships;
        if memberships
            .values()
            .any(|m| m.garden_id == garden_id && m.user_id == user_id)
        {
            return Ok(None);
        }
        if role == GardenRole::Owner
            && memberships
                .values()
                .any(|m| m.garden_id == garden_id && m.is_owner())
        {
            return Err(AppError::conflict("Garden already has an owner"));
        }
        let now = Utc::now();
        let membership = GardenMembership {
            id: Uuid::now_v7(),
            garden_id,
            user_id,
            role,
            joined_at: now,
            created_at: now,
            updated_at: None,
        };
        memberships.insert(membership.id, membership.clone());
        Ok(Some(membership))
    }

    async fn find_membership(
        &mut self,
        garden_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<GardenMembership>> {
        Ok(self
            .working
            .memberships
            .values()
            .find(|m| m.garden_id == garden_id && m.user_id == user_id)
            .cloned())
    }

    async fn find_membership_by_id(&mut self, id: Uuid) -> AppResult<Option<GardenMembership>> {
        Ok(self.working.memberships.get(&id).cloned())
    }

    async fn list_memberships(&mut self, garden_id: Uuid) -> AppResult<Vec<MembershipWithUser>> {
        let state = &self.working;
        let mut rows: Vec<MembershipWithUser> = state
            .memberships
            .values()
            .filter(|m| m.garden_id == garden_id)
            .filter_map(|m| {
                state.users.get(&m.user_id).map(|u| MembershipWithUser {
                    membership: m.clone(),
                    username: u.username.clone(),
                    email: u.email.clone(),
                })
            })
            .collect();
        rows.sort_by(|a, b| {
            let (a, b) = (&a.membership, &b.membership);
            a.role
                .listing_rank()
                .cmp(&b.role.listing_rank())
                .then(a.joined_at.cmp(&b.joined_at))
                .then(a.id.cmp(&b.id))
        });
        Ok(rows)
    }

    async fn update_membership_role(
        &mut self,
        id: Uuid,
        role: GardenRole,
    ) -> AppResult<Option<GardenMembership>> {
        Ok(self.working.memberships.get_mut(&id).map(|membership| {
            membership.role = role;
            membership.updated_at = Some(Utc::now());
            membership.clone()
        }))
    }

    async fn delete_membership(&mut self, id: Uuid) -> AppResult<bool> {
        Ok(self.working.memberships.remove(&id).is_some())
    }

    async fn insert_invitation(&mut self, data: &CreateInvitation) -> AppResult<GardenInvitation> {
        let invitation = GardenInvitation {
            id: Uuid::now_v7(),
            garden_id: data.garden_id,
            invited_by_user_id: data.invited_by_user_id,
            invited_user_email: data.invited_user_email.clone(),
            invited_user_id: data.invited_user_id,
            role: data.role,
            status: InvitationStatus::Pending,
            message: data.message.clone(),
            is_access_request: data.is_access_request,
            expires_at: data.expires_at,
            created_at: Utc::now(),
            updated_at: None,
        };
        self.working
            .invitations
            .insert(invitation.id, invitation.clone());
        Ok(invitation)
    }

    async fn find_invitation(&mut self, id: Uuid) -> AppResult<Option<GardenInvitation>> {
        Ok(self.working.invitations.get(&id).cloned())
    }

    async fn lock_invitation(&mut self, id: Uuid) -> AppResult<Option<GardenInvitation>> {
        // The whole store is already held by this unit of work.
        self.find_invitation(id).await
    }

    async fn find_live_invitation(
        &mut self,
        garden_id: Uuid,
        email: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Option<GardenInvitation>> {
        Ok(self
            .working
            .invitations
            .values()
            .filter(|i| {
                i.garden_id == garden_id
                    && i.is_addressed_to(email)
                    && i.status == InvitationStatus::Pending
                    && i.expires_at > now
            })
            .max_by_key(|i| i.created_at)
            .cloned())
    }

    async fn list_pending_for_email(
        &mut self,
        email: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<InvitationDetails>> {
        Ok(self
            .working
            .pending_details(now, |i| !i.is_access_request && i.is_addressed_to(email)))
    }

    async fn list_pending_for_garden(
        &mut self,
        garden_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<InvitationDetails>> {
        Ok(self
            .working
            .pending_details(now, |i| i.garden_id == garden_id))
    }

    async fn update_invitation_status(
        &mut self,
        id: Uuid,
        status: InvitationStatus,
        invited_user_id: Option<Uuid>,
    ) -> AppResult<Option<GardenInvitation>> {
        Ok(self.working.invitations.get_mut(&id).map(|invitation| {
            invitation.status = status;
            if invited_user_id.is_some() {
                invitation.invited_user_id = invited_user_id;
            }
            invitation.updated_at = Some(Utc::now());
            invitation.clone()
        }))
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        let MemoryUnitOfWork { mut guard, working } = *self;
        *guard = working;
        Ok(())
    }
}
