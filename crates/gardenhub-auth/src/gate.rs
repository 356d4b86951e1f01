//! The authorization gate.
//!
//! A user holds a capability on a garden when they own it, or when their
//! membership's role grants it in the permission table. Reads only need
//! some relationship to the garden. Refusals on read paths surface as
//! `NotFound` so that callers cannot probe for garden ids; refusals on
//! write paths surface as `Forbidden`.

use tracing::debug;
use uuid::Uuid;

use gardenhub_core::error::AppError;
use gardenhub_core::result::AppResult;
use gardenhub_database::UnitOfWork;
use gardenhub_entity::garden::Garden;
use gardenhub_entity::membership::{Capability, GardenMembership, GardenPermissions, GardenRole};

/// What one user may do on one garden.
#[derive(Debug, Clone)]
pub struct GardenAccess {
    pub user_id: Uuid,
    pub garden: Garden,
    pub membership: Option<GardenMembership>,
}

impl GardenAccess {
    pub fn is_owner(&self) -> bool {
        self.garden.is_owned_by(self.user_id)
    }

    /// Owner or any membership.
    pub fn can_view(&self) -> bool {
        self.is_owner() || self.membership.is_some()
    }

    /// Effective capability set; `None` when the user has no relationship
    /// to the garden at all.
    pub fn permissions(&self) -> Option<GardenPermissions> {
        if self.is_owner() {
            return Some(GardenRole::Owner.permissions());
        }
        self.membership.as_ref().map(GardenMembership::permissions)
    }

    pub fn can(&self, capability: Capability) -> bool {
        self.permissions().is_some_and(|p| p.allows(capability))
    }
}

/// Resolves garden access for a user inside a unit of work.
#[derive(Debug, Clone, Copy)]
pub struct AuthorizationGate;

impl AuthorizationGate {
    /// Load the garden and the user's membership in it.
    ///
    /// Returns `None` when the garden does not exist.
    pub async fn resolve(
        uow: &mut dyn UnitOfWork,
        user_id: Uuid,
        garden_id: Uuid,
    ) -> AppResult<Option<GardenAccess>> {
        let Some(garden) = uow.find_garden(garden_id).await? else {
            return Ok(None);
        };
        let membership = uow.find_membership(garden_id, user_id).await?;
        Ok(Some(GardenAccess {
            user_id,
            garden,
            membership,
        }))
    }

    /// Does `user_id` hold `capability` on `garden_id`?
    pub async fn authorize(
        uow: &mut dyn UnitOfWork,
        user_id: Uuid,
        garden_id: Uuid,
        capability: Capability,
    ) -> AppResult<bool> {
        Ok(Self::resolve(uow, user_id, garden_id)
            .await?
            .is_some_and(|access| access.can(capability)))
    }

    /// Read-path check: the garden must exist and the user must own it or
    /// be a member. Both failures read as `NotFound`.
    pub async fn require_view(
        uow: &mut dyn UnitOfWork,
        user_id: Uuid,
        garden_id: Uuid,
    ) -> AppResult<GardenAccess> {
        match Self::resolve(uow, user_id, garden_id).await? {
            Some(access) if access.can_view() => Ok(access),
            _ => {
                debug!(user_id = %user_id, garden_id = %garden_id, "Garden hidden from caller");
                Err(AppError::not_found("Garden not found"))
            }
        }
    }

    /// Write-path check for one capability.
    pub async fn require(
        uow: &mut dyn UnitOfWork,
        user_id: Uuid,
        garden_id: Uuid,
        capability: Capability,
    ) -> AppResult<GardenAccess> {
        let access = Self::resolve(uow, user_id, garden_id)
            .await?
            .ok_or_else(|| AppError::not_found("Garden not found"))?;
        if !access.can(capability) {
            debug!(
                user_id = %user_id,
                garden_id = %garden_id,
                capability = %capability,
                "Capability refused"
            );
            return Err(AppError::forbidden(format!(
                "Missing permission {capability} on this garden"
            )));
        }
        Ok(access)
    }

    /// Write-path check that only the garden owner passes.
    pub async fn require_owner(
        uow: &mut dyn UnitOfWork,
        user_id: Uuid,
        garden_id: Uuid,
    ) -> AppResult<GardenAccess> {
        let access = Self::resolve(uow, user_id, garden_id)
            .await?
            .ok_or_else(|| AppError::not_found("Garden not found"))?;
        if !access.is_owner() {
            debug!(user_id = %user_id, garden_id = %garden_id, "Owner-only action refused");
            return Err(AppError::forbidden("Only the garden owner can do this"));
        }
        Ok(access)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gardenhub_core::ErrorKind;
    use gardenhub_database::{MemoryStore, Store};
    use gardenhub_entity::garden::CreateGarden;
    use gardenhub_entity::user::CreateUser;

    struct Fixture {
        store: MemoryStore,
        owner: Uuid,
        garden: Uuid,
    }

    async fn fixture(members: &[(&str, GardenRole)]) -> (Fixture, Vec<Uuid>) {
        let store = MemoryStore::new();
        let mut uow = store.begin().await.unwrap();
        let owner = uow
            .create_user(&CreateUser {
                username: "owner".into(),
                email: "owner@example.com".into(),
            })
            .await
            .unwrap();
        let garden = uow
            .insert_garden(&CreateGarden {
                owner_user_id: owner.id,
                name: "Backyard".into(),
                description: None,
                notes: None,
            })
            .await
            .unwrap();
        uow.insert_membership(garden.id, owner.id, GardenRole::Owner)
            .await
            .unwrap();

        let mut ids = Vec::new();
        for (name, role) in members {
            let user = uow
                .create_user(&CreateUser {
                    username: name.to_string(),
                    email: format!("{name}@example.com"),
                })
                .await
                .unwrap();
            uow.insert_membership(garden.id, user.id, *role)
                .await
                .unwrap();
            ids.push(user.id);
        }
        uow.commit().await.unwrap();

        (
            Fixture {
                store,
                owner: owner.id,
                garden: garden.id,
            },
            ids,
        )
    }

    #[tokio::test]
    async fn test_owner_holds_every_capability() {
        let (fx, _) = fixture(&[]).await;
        let mut uow = fx.store.begin().await.unwrap();
        for cap in Capability::ALL {
            assert!(
                AuthorizationGate::authorize(uow.as_mut(), fx.owner, fx.garden, cap)
                    .await
                    .unwrap()
            );
        }
    }

    #[tokio::test]
    async fn test_member_capabilities_follow_role() {
        let (fx, ids) =
            fixture(&[("bob", GardenRole::Member), ("vic", GardenRole::Viewer)]).await;
        let (bob, vic) = (ids[0], ids[1]);
        let mut uow = fx.store.begin().await.unwrap();

        let uow = uow.as_mut();
        for (user, cap, expected) in [
            (bob, Capability::AddPlants, true),
            (bob, Capability::EditGarden, false),
            (vic, Capability::AddPlants, false),
        ] {
            let allowed = AuthorizationGate::authorize(uow, user, fx.garden, cap)
                .await
                .unwrap();
            assert_eq!(allowed, expected, "{cap}");
        }

        let access = AuthorizationGate::require_view(uow, vic, fx.garden).await.unwrap();
        assert_eq!(access.permissions(), Some(GardenRole::Viewer.permissions()));
    }

    #[tokio::test]
    async fn test_strangers_get_not_found_on_reads_and_forbidden_on_writes() {
        let (fx, _) = fixture(&[]).await;
        let stranger = Uuid::new_v4();
        let mut uow = fx.store.begin().await.unwrap();
        let uow = uow.as_mut();

        let err = AuthorizationGate::require_view(uow, stranger, fx.garden)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        let err = AuthorizationGate::require(uow, stranger, fx.garden, Capability::EditGarden)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);

        let missing = Uuid::new_v4();
        let err = AuthorizationGate::require(uow, stranger, missing, Capability::EditGarden)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_admin_is_not_owner() {
        let (fx, ids) = fixture(&[("ada", GardenRole::Admin)]).await;
        let mut uow = fx.store.begin().await.unwrap();
        let uow = uow.as_mut();

        AuthorizationGate::require(uow, ids[0], fx.garden, Capability::ManageMembers)
            .await
            .unwrap();
        let err = AuthorizationGate::require_owner(uow, ids[0], fx.garden)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
        AuthorizationGate::require_owner(uow, fx.owner, fx.garden)
            .await
            .unwrap();
    }
}
