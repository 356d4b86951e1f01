//! Garden membership repository implementation.

use sqlx::PgConnection;
use uuid::Uuid;

use gardenhub_core::error::{AppError, ErrorKind};
use gardenhub_core::result::AppResult;
use gardenhub_entity::membership::{GardenMembership, GardenRole, MembershipWithUser};

/// Repository for garden memberships.
///
/// Rows carry only the role; capabilities come from the permission table.
#[derive(Debug, Clone, Copy)]
pub struct MembershipRepository;

impl MembershipRepository {
    /// Insert a membership, leaving an existing `(garden, user)` row alone.
    ///
    /// Returns `None` if the pair was already a member.
    pub async fn insert_if_absent(
        conn: &mut PgConnection,
        garden_id: Uuid,
        user_id: Uuid,
        role: GardenRole,
    ) -> AppResult<Option<GardenMembership>> {
        sqlx::query_as::<_, GardenMembership>(
            "INSERT INTO garden_memberships (id, garden_id, user_id, role) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (garden_id, user_id) DO NOTHING \
             RETURNING *",
        )
        .bind(Uuid::now_v7())
        .bind(garden_id)
        .bind(user_id)
        .bind(role)
        .fetch_optional(conn)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("uq_garden_memberships_owner") =>
            {
                AppError::conflict("Garden already has an owner")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create membership", e),
        })
    }

    /// Find the membership of a user in a garden.
    pub async fn find(
        conn: &mut PgConnection,
        garden_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<GardenMembership>> {
        sqlx::query_as::<_, GardenMembership>(
            "SELECT * FROM garden_memberships WHERE garden_id = $1 AND user_id = $2",
        )
        .bind(garden_id)
        .bind(user_id)
        .fetch_optional(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find membership", e))
    }

    /// Find a membership by primary key.
    pub async fn find_by_id(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> AppResult<Option<GardenMembership>> {
        sqlx::query_as::<_, GardenMembership>("SELECT * FROM garden_memberships WHERE id = $1")
            .bind(id)
            .fetch_optional(conn)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find membership by id", e)
            })
    }

    /// List memberships of a garden with usernames and emails.
    pub async fn find_by_garden(
        conn: &mut PgConnection,
        garden_id: Uuid,
    ) -> AppResult<Vec<MembershipWithUser>> {
        sqlx::query_as::<_, MembershipWithUser>(
            "SELECT m.*, u.username, u.email \
             FROM garden_memberships m \
             JOIN users u ON u.id = m.user_id \
             WHERE m.garden_id = $1 \
             ORDER BY CASE m.role WHEN 'owner' THEN 0 WHEN 'admin' THEN 1 ELSE 2 END, \
                      m.joined_at ASC, m.id ASC",
        )
        .bind(garden_id)
        .fetch_all(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list memberships", e))
    }

    /// Overwrite the role of a membership.
    pub async fn update_role(
        conn: &mut PgConnection,
        id: Uuid,
        role: GardenRole,
    ) -> AppResult<Option<GardenMembership>> {
        sqlx::query_as::<_, GardenMembership>(
            "UPDATE garden_memberships SET role = $2, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING *",
        )
        .bind(id)
        .bind(role)
        .fetch_optional(conn)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update membership role", e)
        })
    }

    /// Hard-delete a membership.
    pub async fn delete(conn: &mut PgConnection, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM garden_memberships WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete membership", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
