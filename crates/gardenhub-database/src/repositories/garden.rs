//! Garden repository implementation.

use sqlx::PgConnection;
use uuid::Uuid;

use gardenhub_core::error::{AppError, ErrorKind};
use gardenhub_core::result::AppResult;
use gardenhub_entity::garden::{CreateGarden, Garden, UpdateGarden};

/// Repository for garden rows.
#[derive(Debug, Clone, Copy)]
pub struct GardenRepository;

impl GardenRepository {
    /// Insert a garden row. The owner membership is written separately
    /// within the same transaction.
    pub async fn create(conn: &mut PgConnection, data: &CreateGarden) -> AppResult<Garden> {
        sqlx::query_as::<_, Garden>(
            "INSERT INTO gardens (id, owner_user_id, name, description, notes) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING *",
        )
        .bind(Uuid::now_v7())
        .bind(data.owner_user_id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(&data.notes)
        .fetch_one(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create garden", e))
    }

    /// Find a garden by primary key.
    pub async fn find_by_id(conn: &mut PgConnection, id: Uuid) -> AppResult<Option<Garden>> {
        sqlx::query_as::<_, Garden>("SELECT * FROM gardens WHERE id = $1")
            .bind(id)
            .fetch_optional(conn)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find garden", e))
    }

    /// List gardens the user owns or is a member of.
    pub async fn find_accessible(conn: &mut PgConnection, user_id: Uuid) -> AppResult<Vec<Garden>> {
        sqlx::query_as::<_, Garden>(
            "SELECT g.* FROM gardens g \
             WHERE g.owner_user_id = $1 \
                OR EXISTS (SELECT 1 FROM garden_memberships m \
                           WHERE m.garden_id = g.id AND m.user_id = $1) \
             ORDER BY g.created_at DESC, g.id DESC",
        )
        .bind(user_id)
        .fetch_all(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list gardens", e))
    }

    /// Apply a partial update; absent fields keep their value.
    pub async fn update(
        conn: &mut PgConnection,
        id: Uuid,
        data: &UpdateGarden,
    ) -> AppResult<Option<Garden>> {
        sqlx::query_as::<_, Garden>(
            "UPDATE gardens SET \
                name = COALESCE($2, name), \
                description = COALESCE($3, description), \
                notes = COALESCE($4, notes), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(&data.notes)
        .fetch_optional(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update garden", e))
    }

    /// Delete a garden. Locations, plants, memberships and invitations
    /// follow through `ON DELETE CASCADE`.
    pub async fn delete(conn: &mut PgConnection, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM gardens WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete garden", e))?;
        Ok(result.rows_affected() > 0)
    }
}
