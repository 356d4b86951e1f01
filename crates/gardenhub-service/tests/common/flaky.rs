//! A store whose membership lookups can be made to fail on demand.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use gardenhub_core::{AppError, AppResult};
use gardenhub_database::{MemoryStore, Store, UnitOfWork};
use gardenhub_entity::garden::{
    CreateGarden, CreateGardenLocation, CreatePlant, Garden, GardenLocation, Plant, UpdateGarden,
    UpdateGardenLocation, UpdatePlant,
};
use gardenhub_entity::invitation::{
    CreateInvitation, GardenInvitation, InvitationDetails, InvitationStatus,
};
use gardenhub_entity::membership::{GardenMembership, GardenRole, MembershipWithUser};
use gardenhub_entity::user::{CreateUser, User};

#[derive(Debug, Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    fail_memberships: Arc<AtomicBool>,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// From now on every `find_membership` returns a database error.
    pub fn break_memberships(&self) {
        self.fail_memberships.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl Store for FlakyStore {
    async fn begin(&self) -> AppResult<Box<dyn UnitOfWork>> {
        Ok(Box::new(FlakyUnitOfWork {
            inner: self.inner.begin().await?,
            fail_memberships: Arc::clone(&self.fail_memberships),
        }))
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }
}

struct FlakyUnitOfWork {
    inner: Box<dyn UnitOfWork>,
    fail_memberships: Arc<AtomicBool>,
}

#[async_trait]
impl UnitOfWork for FlakyUnitOfWork {
    async fn find_user(&mut self, id: Uuid) -> AppResult<Option<User>> {
        self.inner.find_user(id).await
    }

    async fn find_user_by_email(&mut self, email: &str) -> AppResult<Option<User>> {
        self.inner.find_user_by_email(email).await
    }

    async fn create_user(&mut self, data: &CreateUser) -> AppResult<User> {
        self.inner.create_user(data).await
    }

    async fn insert_garden(&mut self, data: &CreateGarden) -> AppResult<Garden> {
        self.inner.insert_garden(data).await
    }

    async fn find_garden(&mut self, id: Uuid) -> AppResult<Option<Garden>> {
        self.inner.find_garden(id).await
    }

    async fn list_gardens_for_user(&mut self, user_id: Uuid) -> AppResult<Vec<Garden>> {
        self.inner.list_gardens_for_user(user_id).await
    }

    async fn update_garden(&mut self, id: Uuid, data: &UpdateGarden) -> AppResult<Option<Garden>> {
        self.inner.update_garden(id, data).await
    }

    async fn delete_garden(&mut self, id: Uuid) -> AppResult<bool> {
        self.inner.delete_garden(id).await
    }

    async fn insert_location(&mut self, data: &CreateGardenLocation) -> AppResult<GardenLocation> {
        self.inner.insert_location(data).await
    }

    async fn find_location(&mut self, id: Uuid) -> AppResult<Option<GardenLocation>> {
        self.inner.find_location(id).await
    }

    async fn list_locations(&mut self, garden_id: Uuid) -> AppResult<Vec<GardenLocation>> {
        self.inner.list_locations(garden_id).await
    }

    async fn update_location(
        &mut self,
        id: Uuid,
        data: &UpdateGardenLocation,
    ) -> AppResult<Option<GardenLocation>> {
        self.inner.update_location(id, data).await
    }

    async fn delete_location(&mut self, id: Uuid) -> AppResult<bool> {
        self.inner.delete_location(id).await
    }

    async fn insert_plant(&mut self, data: &CreatePlant) -> AppResult<Plant> {
        self.inner.insert_plant(data).await
    }

    async fn find_plant(&mut self, id: Uuid) -> AppResult<Option<Plant>> {
        self.inner.find_plant(id).await
    }

    async fn list_plants(&mut self, location_id: Uuid) -> AppResult<Vec<Plant>> {
        self.inner.list_plants(location_id).await
    }

    async fn update_plant(&mut self, id: Uuid, data: &UpdatePlant) -> AppResult<Option<Plant>> {
        self.inner.update_plant(id, data).await
    }

    async fn delete_plant(&mut self, id: Uuid) -> AppResult<bool> {
        self.inner.delete_plant(id).await
    }

    async fn insert_membership(
        &mut self,
        garden_id: Uuid,
        user_id: Uuid,
        role: GardenRole,
    ) -> AppResult<Option<GardenMembership>> {
        self.inner.insert_membership(garden_id, user_id, role).await
    }

    async fn find_membership(
        &mut self,
        garden_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<GardenMembership>> {
        if self.fail_memberships.load(Ordering::SeqCst) {
            return Err(AppError::database("connection reset by peer"));
        }
        self.inner.find_membership(garden_id, user_id).await
    }

    async fn find_membership_by_id(&mut self, id: Uuid) -> AppResult<Option<GardenMembership>> {
        self.inner.find_membership_by_id(id).await
    }

    async fn list_memberships(&mut self, garden_id: Uuid) -> AppResult<Vec<MembershipWithUser>> {
        self.inner.list_memberships(garden_id).await
    }

    async fn update_membership_role(
        &mut self,
        id: Uuid,
        role: GardenRole,
    ) -> AppResult<Option<GardenMembership>> {
        self.inner.update_membership_role(id, role).await
    }

    async fn delete_membership(&mut self, id: Uuid) -> AppResult<bool> {
        self.inner.delete_membership(id).await
    }

    async fn insert_invitation(&mut self, data: &CreateInvitation) -> AppResult<GardenInvitation> {
        self.inner.insert_invitation(data).await
    }

    async fn find_invitation(&mut self, id: Uuid) -> AppResult<Option<GardenInvitation>> {
        self.inner.find_invitation(id).await
    }

    async fn lock_invitation(&mut self, id: Uuid) -> AppResult<Option<GardenInvitation>> {
        self.inner.lock_invitation(id).await
    }

    async fn find_live_invitation(
        &mut self,
        garden_id: Uuid,
        email: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Option<GardenInvitation>> {
        self.inner.find_live_invitation(garden_id, email, now).await
    }

    async fn list_pending_for_email(
        &mut self,
        email: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<InvitationDetails>> {
        self.inner.list_pending_for_email(email, now).await
    }

    async fn list_pending_for_garden(
        &mut self,
        garden_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<InvitationDetails>> {
        self.inner.list_pending_for_garden(garden_id, now).await
    }

    async fn update_invitation_status(
        &mut self,
        id: Uuid,
        status: InvitationStatus,
        invited_user_id: Option<Uuid>,
    ) -> AppResult<Option<GardenInvitation>> {
        self.inner
            .update_invitation_status(id, status, invited_user_id)
            .await
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        self.inner.commit().await
    }
}
