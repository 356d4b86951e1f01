//! Plant entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A plant growing in a garden location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Plant {
    pub id: Uuid,
    /// Location the plant grows in.
    pub garden_location_id: Uuid,
    pub creator_user_id: Uuid,
    pub name: String,
    pub variety: Option<String>,
    pub notes: Option<String>,
    pub planted_at: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a plant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlant {
    pub garden_location_id: Uuid,
    pub creator_user_id: Uuid,
    pub name: String,
    pub variety: Option<String>,
    pub notes: Option<String>,
    pub planted_at: Option<NaiveDate>,
}

/// Partial plant update; `None` keeps the current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePlant {
    pub name: Option<String>,
    pub variety: Option<String>,
    pub notes: Option<String>,
    pub planted_at: Option<NaiveDate>,
}

impl UpdatePlant {
    /// Apply the update to an in-memory row.
    pub fn apply_to(&self, plant: &mut Plant) {
        if let Some(name) = &self.name {
            plant.name = name.clone();
        }
        if let Some(variety) = &self.variety {
            plant.variety = Some(variety.clone());
        }
        if let Some(notes) = &self.notes {
            plant.notes = Some(notes.clone());
        }
        if let Some(planted_at) = self.planted_at {
            plant.planted_at = Some(planted_at);
        }
    }
}
