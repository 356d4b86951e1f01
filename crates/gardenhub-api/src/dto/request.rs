//! Request DTOs with validation.
//!
//! Bodies use camelCase field names.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use gardenhub_entity::garden::{LocationDetails, UpdateGarden, UpdateGardenLocation, UpdatePlant};
use gardenhub_service::garden::{
    CreateGardenRequest as SvcCreateGarden, CreateLocationRequest as SvcCreateLocation,
    CreatePlantRequest as SvcCreatePlant,
};

/// Create garden request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateGardenRequest {
    #[validate(length(min = 1, max = 200, message = "Garden name is required"))]
    pub name: String,
    pub description: Option<String>,
    pub notes: Option<String>,
}

impl From<CreateGardenRequest> for SvcCreateGarden {
    fn from(req: CreateGardenRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            notes: req.notes,
        }
    }
}

/// Partial garden update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGardenRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub notes: Option<String>,
}

impl From<UpdateGardenRequest> for UpdateGarden {
    fn from(req: UpdateGardenRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            notes: req.notes,
        }
    }
}

/// Descriptive location fields shared by create and update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationFields {
    pub description: Option<String>,
    pub notes: Option<String>,
    pub size: Option<String>,
    pub soil_type: Option<String>,
    pub light_conditions: Option<String>,
    pub irrigation_type: Option<String>,
    pub microclimate_notes: Option<String>,
}

impl From<LocationFields> for LocationDetails {
    fn from(f: LocationFields) -> Self {
        Self {
            description: f.description,
            notes: f.notes,
            size: f.size,
            soil_type: f.soil_type,
            light_conditions: f.light_conditions,
            irrigation_type: f.irrigation_type,
            microclimate_notes: f.microclimate_notes,
        }
    }
}

/// Create location request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLocationRequest {
    #[validate(length(min = 1, max = 200, message = "Location name is required"))]
    pub name: String,
    #[serde(flatten)]
    pub fields: LocationFields,
}

impl From<CreateLocationRequest> for SvcCreateLocation {
    fn from(req: CreateLocationRequest) -> Self {
        Self {
            name: req.name,
            details: req.fields.into(),
        }
    }
}

/// Partial location update. Absent descriptive fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLocationRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[serde(flatten)]
    pub fields: LocationFields,
}

impl From<UpdateLocationRequest> for UpdateGardenLocation {
    fn from(req: UpdateLocationRequest) -> Self {
        Self {
            name: req.name,
            details: req.fields.into(),
        }
    }
}

/// Create plant request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlantRequest {
    #[validate(length(min = 1, max = 200, message = "Plant name is required"))]
    pub name: String,
    pub variety: Option<String>,
    pub notes: Option<String>,
    pub planted_at: Option<NaiveDate>,
}

impl From<CreatePlantRequest> for SvcCreatePlant {
    fn from(req: CreatePlantRequest) -> Self {
        Self {
            name: req.name,
            variety: req.variety,
            notes: req.notes,
            planted_at: req.planted_at,
        }
    }
}

/// Partial plant update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlantRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub variety: Option<String>,
    pub notes: Option<String>,
    pub planted_at: Option<NaiveDate>,
}

impl From<UpdatePlantRequest> for UpdatePlant {
    fn from(req: UpdatePlantRequest) -> Self {
        Self {
            name: req.name,
            variety: req.variety,
            notes: req.notes,
            planted_at: req.planted_at,
        }
    }
}

/// `?gardenId=` filter for member listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembersQuery {
    pub garden_id: Uuid,
}

/// Role change request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangeRoleRequest {
    #[validate(length(min = 1, message = "Role is required"))]
    pub role: String,
}

/// Create invitation request.
///
/// `gardenLocationId` is accepted by the parser only so that clients still
/// sending location-scoped invitations get a clear error.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvitationRequest {
    pub garden_id: Option<Uuid>,
    pub garden_location_id: Option<Uuid>,
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Role is required"))]
    pub role: String,
    #[validate(length(max = 2000))]
    pub message: Option<String>,
}

/// Accept/decline body for `PATCH /garden-invitations/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RespondInvitationRequest {
    #[validate(length(min = 1, message = "Action is required"))]
    pub action: String,
}

/// Access request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AccessRequestRequest {
    pub garden_id: Uuid,
    #[validate(length(max = 2000))]
    pub message: Option<String>,
}
