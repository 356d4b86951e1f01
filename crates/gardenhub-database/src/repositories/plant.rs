//! Plant repository implementation.

use sqlx::PgConnection;
use uuid::Uuid;

use gardenhub_core::error::{AppError, ErrorKind};
use gardenhub_core::result::AppResult;
use gardenhub_entity::garden::{CreatePlant, Plant, UpdatePlant};

#[derive(Debug, Clone, Copy)]
pub struct PlantRepository;

impl PlantRepository {
    pub async fn create(conn: &mut PgConnection, data: &CreatePlant) -> AppResult<Plant> {
        sqlx::query_as::<_, Plant>(
            "INSERT INTO plants \
                (id, garden_location_id, creator_user_id, name, variety, notes, planted_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING *",
        )
        .bind(Uuid::now_v7())
        .bind(data.garden_location_id)
        .bind(data.creator_user_id)
        .bind(&data.name)
        .bind(&data.variety)
        .bind(&data.notes)
        .bind(data.planted_at)
        .fetch_one(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create plant", e))
    }

    pub async fn find_by_id(conn: &mut PgConnection, id: Uuid) -> AppResult<Option<Plant>> {
        sqlx::query_as::<_, Plant>("SELECT * FROM plants WHERE id = $1")
            .bind(id)
            .fetch_optional(conn)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find plant", e))
    }

    pub async fn find_by_location(
        conn: &mut PgConnection,
        location_id: Uuid,
    ) -> AppResult<Vec<Plant>> {
        sqlx::query_as::<_, Plant>(
            "SELECT * FROM plants WHERE garden_location_id = $1 ORDER BY created_at ASC, id ASC",
        )
        .bind(location_id)
        .fetch_all(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list plants", e))
    }

    pub async fn update(
        conn: &mut PgConnection,
        id: Uuid,
        data: &UpdatePlant,
    ) -> AppResult<Option<Plant>> {
        sqlx::query_as::<_, Plant>(
            "UPDATE plants SET \
                name = COALESCE($2, name), \
                variety = COALESCE($3, variety), \
                notes = COALESCE($4, notes), \
                planted_at = COALESCE($5, planted_at), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.variety)
        .bind(&data.notes)
        .bind(data.planted_at)
        .fetch_optional(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update plant", e))
    }

    pub async fn delete(conn: &mut PgConnection, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM plants WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete plant", e))?;
        Ok(result.rows_affected() > 0)
    }
}
