//! Storage abstraction shared by every service.
//!
//! A [`Store`] hands out [`UnitOfWork`] values. Each service operation
//! opens exactly one unit of work, performs all of its reads and writes
//! through it, and calls [`UnitOfWork::commit`] once everything
//! succeeded. A unit of work that is dropped without being committed is
//! rolled back, so an early `?` return can never leave half an operation
//! behind.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use gardenhub_core::AppResult;
use gardenhub_entity::garden::{
    CreateGarden, CreateGardenLocation, CreatePlant, Garden, GardenLocation, Plant, UpdateGarden,
    UpdateGardenLocation, UpdatePlant,
};
use gardenhub_entity::invitation::{
    CreateInvitation, GardenInvitation, InvitationDetails, InvitationStatus,
};
use gardenhub_entity::membership::{GardenMembership, GardenRole, MembershipWithUser};
use gardenhub_entity::user::{CreateUser, User};

/// Factory for units of work.
#[async_trait]
pub trait Store: Send + Sync + std::fmt::Debug + 'static {
    /// Open a new unit of work.
    async fn begin(&self) -> AppResult<Box<dyn UnitOfWork>>;

    /// Check that the backing storage is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}

/// A scoped transaction over all GardenHub tables.
#[async_trait]
pub trait UnitOfWork: Send {
    // -- users --------------------------------------------------------------

    async fn find_user(&mut self, id: Uuid) -> AppResult<Option<User>>;

    /// Case-insensitive lookup.
    async fn find_user_by_email(&mut self, email: &str) -> AppResult<Option<User>>;

    /// Fails with `Conflict` when the email is already registered.
    async fn create_user(&mut self, data: &CreateUser) -> AppResult<User>;

    // -- gardens ------------------------------------------------------------

    async fn insert_garden(&mut self, data: &CreateGarden) -> AppResult<Garden>;

    async fn find_garden(&mut self, id: Uuid) -> AppResult<Option<Garden>>;

    /// Gardens the user owns or holds a membership in, newest first.
    async fn list_gardens_for_user(&mut self, user_id: Uuid) -> AppResult<Vec<Garden>>;

    async fn update_garden(&mut self, id: Uuid, data: &UpdateGarden) -> AppResult<Option<Garden>>;

    /// Delete a garden together with its locations, plants, memberships
    /// and invitations. Returns `false` when the garden did not exist.
    async fn delete_garden(&mut self, id: Uuid) -> AppResult<bool>;

    // -- locations ----------------------------------------------------------

    /// Fails with `Conflict` when the garden already has a location with that name.
    async fn insert_location(&mut self, data: &CreateGardenLocation) -> AppResult<GardenLocation>;

    async fn find_location(&mut self, id: Uuid) -> AppResult<Option<GardenLocation>>;

    /// Locations of one garden ordered by name.
    async fn list_locations(&mut self, garden_id: Uuid) -> AppResult<Vec<GardenLocation>>;

    /// Fails with `Conflict` when renaming onto a name already used in the garden.
    async fn update_location(
        &mut self,
        id: Uuid,
        data: &UpdateGardenLocation,
    ) -> AppResult<Option<GardenLocation>>;

    /// Delete a location and its plants.
    async fn delete_location(&mut self, id: Uuid) -> AppResult<bool>;

    // -- plants -------------------------------------------------------------

    async fn insert_plant(&mut self, data: &CreatePlant) -> AppResult<Plant>;

    async fn find_plant(&mut self, id: Uuid) -> AppResult<Option<Plant>>;

    async fn list_plants(&mut self, location_id: Uuid) -> AppResult<Vec<Plant>>;

    async fn update_plant(&mut self, id: Uuid, data: &UpdatePlant) -> AppResult<Option<Plant>>;

    async fn delete_plant(&mut self, id: Uuid) -> AppResult<bool>;

    // -- memberships --------------------------------------------------------

    /// Insert a membership unless the `(garden, user)` pair already has one.
    ///
    /// Returns `None` when a membership already existed; the existing row
    /// is left untouched.
    async fn insert_membership(
        &mut self,
        garden_id: Uuid,
        user_id: Uuid,
        role: GardenRole,
    ) -> AppResult<Option<GardenMembership>>;

    async fn find_membership(
        &mut self,
        garden_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<GardenMembership>>;

    async fn find_membership_by_id(&mut self, id: Uuid) -> AppResult<Option<GardenMembership>>;

    /// Memberships joined with user identity: owner first, then admins,
    /// then everyone else by join time.
    async fn list_memberships(&mut self, garden_id: Uuid) -> AppResult<Vec<MembershipWithUser>>;

    async fn update_membership_role(
        &mut self,
        id: Uuid,
        role: GardenRole,
    ) -> AppResult<Option<GardenMembership>>;

    async fn delete_membership(&mut self, id: Uuid) -> AppResult<bool>;

    // -- invitations --------------------------------------------------------

    async fn insert_invitation(&mut self, data: &CreateInvitation) -> AppResult<GardenInvitation>;

    async fn find_invitation(&mut self, id: Uuid) -> AppResult<Option<GardenInvitation>>;

    /// Load an invitation and hold it against concurrent resolution until
    /// this unit of work ends.
    async fn lock_invitation(&mut self, id: Uuid) -> AppResult<Option<GardenInvitation>>;

    /// A pending, unexpired invitation or access request for `email` on
    /// `garden_id`, if any.
    async fn find_live_invitation(
        &mut self,
        garden_id: Uuid,
        email: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Option<GardenInvitation>>;

    /// Pending, unexpired invitations addressed to `email`. Access requests
    /// are not included.
    async fn list_pending_for_email(
        &mut self,
        email: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<InvitationDetails>>;

    /// Pending, unexpired invitations and access requests of one garden.
    async fn list_pending_for_garden(
        &mut self,
        garden_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<InvitationDetails>>;

    async fn update_invitation_status(
        &mut self,
        id: Uuid,
        status: InvitationStatus,
        invited_user_id: Option<Uuid>,
    ) -> AppResult<Option<GardenInvitation>>;

    // -- lifecycle ----------------------------------------------------------

    /// Make every write of this unit of work durable.
    async fn commit(self: Box<Self>) -> AppResult<()>;
}
