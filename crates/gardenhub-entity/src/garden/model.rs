//! Garden entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A garden, owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Garden {
    /// Unique garden identifier.
    pub id: Uuid,
    /// The creator and sole owner.
    pub owner_user_id: Uuid,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Owner notes.
    pub notes: Option<String>,
    /// When the garden was created.
    pub created_at: DateTime<Utc>,
    /// When the garden was last modified.
    pub updated_at: DateTime<Utc>,
}

impl Garden {
    /// Whether `user_id` owns this garden.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_user_id == user_id
    }
}

/// Data required to create a garden.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGarden {
    /// Owner (the acting user).
    pub owner_user_id: Uuid,
    /// Display name.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Notes.
    pub notes: Option<String>,
}

/// Partial garden update; `None` keeps the current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateGarden {
    pub name: Option<String>,
    pub description: Option<String>,
    pub notes: Option<String>,
}

impl UpdateGarden {
    /// Returns `true` if no field would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.notes.is_none()
    }

    /// Apply the update to an in-memory row.
    pub fn apply_to(&self, garden: &mut Garden) {
        if let Some(name) = &self.name {
            garden.name = name.clone();
        }
        if let Some(description) = &self.description {
            garden.description = Some(description.clone());
        }
        if let Some(notes) = &self.notes {
            garden.notes = Some(notes.clone());
        }
    }
}

/// The subset of a garden exposed through shareable links.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicGarden {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

impl From<Garden> for PublicGarden {
    fn from(garden: Garden) -> Self {
        Self {
            id: garden.id,
            name: garden.name,
            description: garden.description,
        }
    }
}
