//! PostgreSQL-backed [`Store`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use gardenhub_core::error::{AppError, ErrorKind};
use gardenhub_core::result::AppResult;
use gardenhub_entity::garden::{
    CreateGarden, CreateGardenLocation, CreatePlant, Garden, GardenLocation, Plant, UpdateGarden,
    UpdateGardenLocation, UpdatePlant,
};
use gardenhub_entity::invitation::{
    CreateInvitation, GardenInvitation, InvitationDetails, InvitationStatus,
};
use gardenhub_entity::membership::{GardenMembership, GardenRole, MembershipWithUser};
use gardenhub_entity::user::{CreateUser, User};

use crate::connection::DatabasePool;
use crate::repositories::{
    GardenRepository, InvitationRepository, LocationRepository, MembershipRepository,
    PlantRepository, UserRepository,
};
use crate::store::{Store, UnitOfWork};

/// Store that opens one database transaction per unit of work.
#[derive(Debug, Clone)]
pub struct PgStore {
    db: DatabasePool,
}

impl PgStore {
    /// Create a store over an established pool.
    pub fn new(db: DatabasePool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn begin(&self) -> AppResult<Box<dyn UnitOfWork>> {
        let tx = self.db.pool().begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;
        Ok(Box::new(PgUnitOfWork { tx }))
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.db.health_check().await
    }
}

/// A unit of work over a single sqlx transaction.
///
/// Dropping it without calling `commit` rolls the transaction back.
pub struct PgUnitOfWork {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl UnitOfWork for PgUnitOfWork {
    async fn find_user(&mut self, id: Uuid) -> AppResult<Option<User>> {
        UserRepository::find_by_id(&mut self.tx, id).await
    }

    async fn find_user_by_email(&mut self, email: &str) -> AppResult<Option<User>> {
        UserRepository::find_by_email(&mut self.tx, email).await
    }

    async fn create_user(&mut self, data: &CreateUser) -> AppResult<User> {
        UserRepository::create(&mut self.tx, data).await
    }

    async fn insert_garden(&mut self, data: &CreateGarden) -> AppResult<Garden> {
        GardenRepository::create(&mut self.tx, data).await
    }

    async fn find_garden(&mut self, id: Uuid) -> AppResult<Option<Garden>> {
        GardenRepository::find_by_id(&mut self.tx, id).await
    }

    async fn list_gardens_for_user(&mut self, user_id: Uuid) -> AppResult<Vec<Garden>> {
        GardenRepository::find_accessible(&mut self.tx, user_id).await
    }

    async fn update_garden(&mut self, id: Uuid, data: &UpdateGarden) -> AppResult<Option<Garden>> {
        GardenRepository::update(&mut self.tx, id, data).await
    }

    async fn delete_garden(&mut self, id: Uuid) -> AppResult<bool> {
        GardenRepository::delete(&mut self.tx, id).await
    }

    async fn insert_location(&mut self, data: &CreateGardenLocation) -> AppResult<GardenLocation> {
        LocationRepository::create(&mut self.tx, data).await
    }

    async fn find_location(&mut self, id: Uuid) -> AppResult<Option<GardenLocation>> {
        LocationRepository::find_by_id(&mut self.tx, id).await
    }

    async fn list_locations(&mut self, garden_id: Uuid) -> AppResult<Vec<GardenLocation>> {
        LocationRepository::find_by_garden(&mut self.tx, garden_id).await
    }

    async fn update_location(
        &mut self,
        id: Uuid,
        data: &UpdateGardenLocation,
    ) -> AppResult<Option<GardenLocation>> {
        LocationRepository::update(&mut self.tx, id, data).await
    }

    async fn delete_location(&mut self, id: Uuid) -> AppResult<bool> {
        LocationRepository::delete(&mut self.tx, id).await
    }

    async fn insert_plant(&mut self, data: &CreatePlant) -> AppResult<Plant> {
        PlantRepository::create(&mut self.tx, data).await
    }

    async fn find_plant(&mut self, id: Uuid) -> AppResult<Option<Plant>> {
        PlantRepository::find_by_id(&mut self.tx, id).await
    }

    async fn list_plants(&mut self, location_id: Uuid) -> AppResult<Vec<Plant>> {
        PlantRepository::find_by_location(&mut self.tx, location_id).await
    }

    async fn update_plant(&mut self, id: Uuid, data: &UpdatePlant) -> AppResult<Option<Plant>> {
        PlantRepository::update(&mut self.tx, id, data).await
    }

    async fn delete_plant(&mut self, id: Uuid) -> AppResult<bool> {
        PlantRepository::delete(&mut self.tx, id).await
    }

    async fn insert_membership(
        &mut self,
        garden_id: Uuid,
        user_id: Uuid,
        role: GardenRole,
    ) -> AppResult<Option<GardenMembership>> {
        MembershipRepository::insert_if_absent(&mut self.tx, garden_id, user_id, role).await
    }

    async fn find_membership(
        &mut self,
        garden_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<GardenMembership>> {
        MembershipRepository::find(&mut self.tx, garden_id, user_id).await
    }

    async fn find_membership_by_id(&mut self, id: Uuid) -> AppResult<Option<GardenMembership>> {
        MembershipRepository::find_by_id(&mut self.tx, id).await
    }

    async fn list_memberships(&mut self, garden_id: Uuid) -> AppResult<Vec<MembershipWithUser>> {
        MembershipRepository::find_by_garden(&mut self.tx, garden_id).await
    }

    async fn update_membership_role(
        &mut self,
        id: Uuid,
        role: GardenRole,
    ) -> AppResult<Option<GardenMembership>> {
        MembershipRepository::update_role(&mut self.tx, id, role).await
    }

    async fn delete_membership(&mut self, id: Uuid) -> AppResult<bool> {
        MembershipRepository::delete(&mut self.tx, id).await
    }

    async fn insert_invitation(&mut self, data: &CreateInvitation) -> AppResult<GardenInvitation> {
        InvitationRepository::create(&mut self.tx, data).await
    }

    async fn find_invitation(&mut self, id: Uuid) -> AppResult<Option<GardenInvitation>> {
        InvitationRepository::find_by_id(&mut self.tx, id).await
    }

    async fn lock_invitation(&mut self, id: Uuid) -> AppResult<Option<GardenInvitation>> {
        InvitationRepository::find_for_update(&mut self.tx, id).await
    }

    async fn find_live_invitation(
        &mut self,
        garden_id: Uuid,
        email: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Option<GardenInvitation>> {
        InvitationRepository::find_live(&mut self.tx, garden_id, email, now).await
    }

    async fn list_pending_for_email(
        &mut self,
        email: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<InvitationDetails>> {
        InvitationRepository::find_pending_for_email(&mut self.tx, email, now).await
    }

    async fn list_pending_for_garden(
        &mut self,
        garden_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<InvitationDetails>> {
        InvitationRepository::find_pending_for_garden(&mut self.tx, garden_id, now).await
    }

    async fn update_invitation_status(
        &mut self,
        id: Uuid,
        status: InvitationStatus,
        invited_user_id: Option<Uuid>,
    ) -> AppResult<Option<GardenInvitation>> {
        InvitationRepository::update_status(&mut self.tx, id, status, invited_user_id).await
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        self.tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })
    }
}
