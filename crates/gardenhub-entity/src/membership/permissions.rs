//! The permission table: a fixed mapping from garden role to capabilities.
//!
//! Memberships only persist their role; capabilities are always derived
//! from this table when read, so there is no stored snapshot to go stale.

use serde::{Deserialize, Serialize};

use gardenhub_core::AppResult;

use super::role::GardenRole;

/// A single capability that can be checked on a garden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Update the garden and its locations.
    EditGarden,
    /// Add plants to locations.
    AddPlants,
    /// Edit existing plants.
    EditPlants,
    /// Delete plants.
    DeletePlants,
    /// Send invitations.
    InviteUsers,
    /// Change roles and remove members.
    ManageMembers,
}

impl Capability {
    /// Every capability, in table order.
    pub const ALL: [Capability; 6] = [
        Self::EditGarden,
        Self::AddPlants,
        Self::EditPlants,
        Self::DeletePlants,
        Self::InviteUsers,
        Self::ManageMembers,
    ];

    /// Return the column-style name (`can_edit_garden`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EditGarden => "can_edit_garden",
            Self::AddPlants => "can_add_plants",
            Self::EditPlants => "can_edit_plants",
            Self::DeletePlants => "can_delete_plants",
            Self::InviteUsers => "can_invite_users",
            Self::ManageMembers => "can_manage_members",
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The six capability flags a role grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GardenPermissions {
    pub can_edit_garden: bool,
    pub can_add_plants: bool,
    pub can_edit_plants: bool,
    pub can_delete_plants: bool,
    pub can_invite_users: bool,
    pub can_manage_members: bool,
}

const FULL: GardenPermissions = GardenPermissions {
    can_edit_garden: true,
    can_add_plants: true,
    can_edit_plants: true,
    can_delete_plants: true,
    can_invite_users: true,
    can_manage_members: true,
};

const MEMBER: GardenPermissions = GardenPermissions {
    can_edit_garden: false,
    can_add_plants: true,
    can_edit_plants: true,
    can_delete_plants: false,
    can_invite_users: false,
    can_manage_members: false,
};

const NONE: GardenPermissions = GardenPermissions {
    can_edit_garden: false,
    can_add_plants: false,
    can_edit_plants: false,
    can_delete_plants: false,
    can_invite_users: false,
    can_manage_members: false,
};

impl GardenPermissions {
    /// Look up the fixed capability set for a role.
    pub const fn for_role(role: GardenRole) -> Self {
        match role {
            GardenRole::Owner | GardenRole::Admin => FULL,
            GardenRole::Member => MEMBER,
            GardenRole::Viewer => NONE,
        }
    }

    /// Look up the capability set for a role name.
    ///
    /// Fails with `InvalidRole` for names outside the table.
    pub fn for_role_name(role: &str) -> AppResult<Self> {
        role.parse::<GardenRole>().map(Self::for_role)
    }

    /// Whether this set grants `capability`.
    pub fn allows(&self, capability: Capability) -> bool {
        match capability {
            Capability::EditGarden => self.can_edit_garden,
            Capability::AddPlants => self.can_add_plants,
            Capability::EditPlants => self.can_edit_plants,
            Capability::DeletePlants => self.can_delete_plants,
            Capability::InviteUsers => self.can_invite_users,
            Capability::ManageMembers => self.can_manage_members,
        }
    }
}

impl GardenRole {
    /// Shorthand for [`GardenPermissions::for_role`].
    pub fn permissions(self) -> GardenPermissions {
        GardenPermissions::for_role(self)
    }
}
