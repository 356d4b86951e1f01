//! Membership entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::permissions::GardenPermissions;
use super::role::GardenRole;

/// A user's membership in a garden. At most one per `(garden_id, user_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct GardenMembership {
    /// Unique membership identifier.
    pub id: Uuid,
    /// The garden.
    pub garden_id: Uuid,
    /// The member.
    pub user_id: Uuid,
    /// Role within the garden.
    pub role: GardenRole,
    /// When the user joined.
    pub joined_at: DateTime<Utc>,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
    /// Last role change.
    pub updated_at: Option<DateTime<Utc>>,
}

impl GardenMembership {
    /// Capabilities derived from the current role.
    pub fn permissions(&self) -> GardenPermissions {
        self.role.permissions()
    }

    /// Whether this is the garden owner's membership.
    pub fn is_owner(&self) -> bool {
        self.role == GardenRole::Owner
    }
}

/// A membership joined with the member's identity, for listings.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MembershipWithUser {
    /// The membership row.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub membership: GardenMembership,
    /// Member's username.
    pub username: String,
    /// Member's email.
    pub email: String,
}
