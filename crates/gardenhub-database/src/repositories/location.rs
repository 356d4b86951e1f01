//! Garden location repository implementation.

use sqlx::PgConnection;
use uuid::Uuid;

use gardenhub_core::error::{AppError, ErrorKind};
use gardenhub_core::result::AppResult;
use gardenhub_entity::garden::{CreateGardenLocation, GardenLocation, UpdateGardenLocation};

const NAME_CONSTRAINT: &str = "uq_garden_locations_name";

/// Repository for garden locations.
#[derive(Debug, Clone, Copy)]
pub struct LocationRepository;

impl LocationRepository {
    /// Create a location; a name already used in the garden is a conflict.
    pub async fn create(
        conn: &mut PgConnection,
        data: &CreateGardenLocation,
    ) -> AppResult<GardenLocation> {
        let d = &data.details;
        sqlx::query_as::<_, GardenLocation>(
            "INSERT INTO garden_locations \
                (id, garden_id, creator_user_id, name, description, notes, size, \
                 soil_type, light_conditions, irrigation_type, microclimate_notes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING *",
        )
        .bind(Uuid::now_v7())
        .bind(data.garden_id)
        .bind(data.creator_user_id)
        .bind(&data.name)
        .bind(&d.description)
        .bind(&d.notes)
        .bind(&d.size)
        .bind(&d.soil_type)
        .bind(&d.light_conditions)
        .bind(&d.irrigation_type)
        .bind(&d.microclimate_notes)
        .fetch_one(conn)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some(NAME_CONSTRAINT) => {
                AppError::conflict(format!(
                    "A location named '{}' already exists in this garden",
                    data.name
                ))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create location", e),
        })
    }

    /// Find a location by primary key.
    pub async fn find_by_id(conn: &mut PgConnection, id: Uuid) -> AppResult<Option<GardenLocation>> {
        sqlx::query_as::<_, GardenLocation>("SELECT * FROM garden_locations WHERE id = $1")
            .bind(id)
            .fetch_optional(conn)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find location", e))
    }

    /// List the locations of a garden.
    pub async fn find_by_garden(
        conn: &mut PgConnection,
        garden_id: Uuid,
    ) -> AppResult<Vec<GardenLocation>> {
        sqlx::query_as::<_, GardenLocation>(
            "SELECT * FROM garden_locations WHERE garden_id = $1 ORDER BY name ASC",
        )
        .bind(garden_id)
        .fetch_all(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list locations", e))
    }

    /// Apply a partial update.
    pub async fn update(
        conn: &mut PgConnection,
        id: Uuid,
        data: &UpdateGardenLocation,
    ) -> AppResult<Option<GardenLocation>> {
        let d = &data.details;
        sqlx::query_as::<_, GardenLocation>(
            "UPDATE garden_locations SET \
                name = COALESCE($2, name), \
                description = COALESCE($3, description), \
                notes = COALESCE($4, notes), \
                size = COALESCE($5, size), \
                soil_type = COALESCE($6, soil_type), \
                light_conditions = COALESCE($7, light_conditions), \
                irrigation_type = COALESCE($8, irrigation_type), \
                microclimate_notes = COALESCE($9, microclimate_notes), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(&d.description)
        .bind(&d.notes)
        .bind(&d.size)
        .bind(&d.soil_type)
        .bind(&d.light_conditions)
        .bind(&d.irrigation_type)
        .bind(&d.microclimate_notes)
        .fetch_optional(conn)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some(NAME_CONSTRAINT) => {
                AppError::conflict("A location with that name already exists in this garden")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to update location", e),
        })
    }

    /// Delete a location; its plants cascade.
    pub async fn delete(conn: &mut PgConnection, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM garden_locations WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete location", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
