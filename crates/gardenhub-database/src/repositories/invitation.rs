//! Garden invitation repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgConnection;
use uuid::Uuid;

use gardenhub_core::error::{AppError, ErrorKind};
use gardenhub_core::result::AppResult;
use gardenhub_entity::invitation::{
    CreateInvitation, GardenInvitation, InvitationDetails, InvitationStatus,
};

const DETAILS_SELECT: &str = "SELECT i.*, g.name AS garden_name, u.username AS inviter_username \
     FROM garden_invitations i \
     JOIN gardens g ON g.id = i.garden_id \
     JOIN users u ON u.id = i.invited_by_user_id";

/// Repository for garden invitations and access requests.
#[derive(Debug, Clone, Copy)]
pub struct InvitationRepository;

impl InvitationRepository {
    /// Insert a pending invitation.
    pub async fn create(
        conn: &mut PgConnection,
        data: &CreateInvitation,
    ) -> AppResult<GardenInvitation> {
        sqlx::query_as::<_, GardenInvitation>(
            "INSERT INTO garden_invitations \
                (id, garden_id, invited_by_user_id, invited_user_email, invited_user_id, \
                 role, status, message, is_access_request, expires_at) \
             VALUES ($1, $2, $3, $4, $5, $6, 'pending', $7, $8, $9) \
             RETURNING *",
        )
        .bind(Uuid::now_v7())
        .bind(data.garden_id)
        .bind(data.invited_by_user_id)
        .bind(&data.invited_user_email)
        .bind(data.invited_user_id)
        .bind(data.role)
        .bind(&data.message)
        .bind(data.is_access_request)
        .bind(data.expires_at)
        .fetch_one(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create invitation", e))
    }

    /// Find an invitation by primary key.
    pub async fn find_by_id(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> AppResult<Option<GardenInvitation>> {
        sqlx::query_as::<_, GardenInvitation>("SELECT * FROM garden_invitations WHERE id = $1")
            .bind(id)
            .fetch_optional(conn)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find invitation", e))
    }

    /// Find an invitation and take a row lock for the rest of the transaction.
    pub async fn find_for_update(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> AppResult<Option<GardenInvitation>> {
        sqlx::query_as::<_, GardenInvitation>(
            "SELECT * FROM garden_invitations WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock invitation", e))
    }

    /// Find a live invitation or access request for an email on a garden.
    pub async fn find_live(
        conn: &mut PgConnection,
        garden_id: Uuid,
        email: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Option<GardenInvitation>> {
        sqlx::query_as::<_, GardenInvitation>(
            "SELECT * FROM garden_invitations \
             WHERE garden_id = $1 \
               AND LOWER(invited_user_email) = LOWER($2) \
               AND status = 'pending' \
               AND expires_at > $3 \
             ORDER BY created_at DESC \
             LIMIT 1",
        )
        .bind(garden_id)
        .bind(email.trim())
        .bind(now)
        .fetch_optional(conn)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find live invitation", e)
        })
    }

    /// List live invitations addressed to an email, excluding access requests.
    pub async fn find_pending_for_email(
        conn: &mut PgConnection,
        email: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<InvitationDetails>> {
        let sql = format!(
            "{DETAILS_SELECT} \
             WHERE LOWER(i.invited_user_email) = LOWER($1) \
               AND i.status = 'pending' \
               AND i.expires_at > $2 \
               AND NOT i.is_access_request \
             ORDER BY i.created_at DESC, i.id DESC"
        );
        sqlx::query_as::<_, InvitationDetails>(&sql)
            .bind(email.trim())
            .bind(now)
            .fetch_all(conn)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list pending invitations", e)
            })
    }

    /// List live invitations and access requests of a garden.
    pub async fn find_pending_for_garden(
        conn: &mut PgConnection,
        garden_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<InvitationDetails>> {
        let sql = format!(
            "{DETAILS_SELECT} \
             WHERE i.garden_id = $1 \
               AND i.status = 'pending' \
               AND i.expires_at > $2 \
             ORDER BY i.created_at DESC, i.id DESC"
        );
        sqlx::query_as::<_, InvitationDetails>(&sql)
            .bind(garden_id)
            .bind(now)
            .fetch_all(conn)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    "Failed to list garden invitations",
                    e,
                )
            })
    }

    /// Record a status transition, stamping the resolving user when given.
    pub async fn update_status(
        conn: &mut PgConnection,
        id: Uuid,
        status: InvitationStatus,
        invited_user_id: Option<Uuid>,
    ) -> AppResult<Option<GardenInvitation>> {
        sqlx::query_as::<_, GardenInvitation>(
            "UPDATE garden_invitations SET \
                status = $2, \
                invited_user_id = COALESCE($3, invited_user_id), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING *",
        )
        .bind(id)
        .bind(status)
        .bind(invited_user_id)
        .fetch_optional(conn)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update invitation status", e)
        })
    }
}
