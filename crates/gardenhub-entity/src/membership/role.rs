//! Garden role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use gardenhub_core::AppError;

/// Role a user holds inside one garden.
///
/// Ordered by privilege: Owner > Admin > Member > Viewer. Exactly one
/// membership per garden carries [`GardenRole::Owner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "garden_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum GardenRole {
    /// The garden's creator.
    Owner,
    /// Full collaborator, can manage members.
    Admin,
    /// Can work with plants.
    Member,
    /// Read-only access.
    Viewer,
}

impl GardenRole {
    /// Roles an invitation may grant.
    pub const INVITABLE: [GardenRole; 3] = [Self::Admin, Self::Member, Self::Viewer];

    /// Sort rank used when listing members (owner first, then admins).
    pub fn listing_rank(&self) -> u8 {
        match self {
            Self::Owner => 0,
            Self::Admin => 1,
            Self::Member | Self::Viewer => 2,
        }
    }

    /// Whether an invitation or role change may grant this role.
    pub fn is_assignable(&self) -> bool {
        !matches!(self, Self::Owner)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::Member => "member",
            Self::Viewer => "viewer",
        }
    }
}

impl fmt::Display for GardenRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GardenRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "owner" => Ok(Self::Owner),
            "admin" => Ok(Self::Admin),
            "member" => Ok(Self::Member),
            "viewer" => Ok(Self::Viewer),
            _ => Err(AppError::invalid_role(format!(
                "Invalid garden role: '{s}'. Expected one of: owner, admin, member, viewer"
            ))),
        }
    }
}
