//! Garden location entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A named area inside a garden. Names are unique per garden.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct GardenLocation {
    /// Unique location identifier.
    pub id: Uuid,
    /// Parent garden.
    pub garden_id: Uuid,
    /// User who created the location.
    pub creator_user_id: Uuid,
    /// Name, unique within the garden.
    pub name: String,
    pub description: Option<String>,
    pub notes: Option<String>,
    /// Free-form size, e.g. "2x4 m".
    pub size: Option<String>,
    pub soil_type: Option<String>,
    pub light_conditions: Option<String>,
    pub irrigation_type: Option<String>,
    pub microclimate_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Descriptive attributes shared by create and update requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationDetails {
    pub description: Option<String>,
    pub notes: Option<String>,
    pub size: Option<String>,
    pub soil_type: Option<String>,
    pub light_conditions: Option<String>,
    pub irrigation_type: Option<String>,
    pub microclimate_notes: Option<String>,
}

/// Data required to create a location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGardenLocation {
    pub garden_id: Uuid,
    pub creator_user_id: Uuid,
    pub name: String,
    #[serde(flatten)]
    pub details: LocationDetails,
}

/// Partial location update; `None` keeps the current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateGardenLocation {
    pub name: Option<String>,
    #[serde(flatten)]
    pub details: LocationDetails,
}

impl UpdateGardenLocation {
    /// Apply the update to an in-memory row.
    pub fn apply_to(&self, location: &mut GardenLocation) {
        fn set(target: &mut Option<String>, value: &Option<String>) {
            if let Some(v) = value {
                *target = Some(v.clone());
            }
        }

        if let Some(name) = &self.name {
            location.name = name.clone();
        }
        let d = &self.details;
        set(&mut location.description, &d.description);
        set(&mut location.notes, &d.notes);
        set(&mut location.size, &d.size);
        set(&mut location.soil_type, &d.soil_type);
        set(&mut location.light_conditions, &d.light_conditions);
        set(&mut location.irrigation_type, &d.irrigation_type);
        set(&mut location.microclimate_notes, &d.microclimate_notes);
    }
}
