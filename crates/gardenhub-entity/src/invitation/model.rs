//! Invitation entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::InvitationStatus;
use crate::membership::GardenRole;
use crate::user::emails_match;

/// An invitation to join a garden, addressed to an email.
///
/// Access requests reuse this shape: the requester is both the inviter
/// and the addressee, and `is_access_request` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct GardenInvitation {
    pub id: Uuid,
    pub garden_id: Uuid,
    /// Sender, or the requester for access requests.
    pub invited_by_user_id: Uuid,
    pub invited_user_email: String,
    /// Stamped on acceptance; known up front for access requests.
    pub invited_user_id: Option<Uuid>,
    /// Role granted on acceptance. Never `owner`.
    pub role: GardenRole,
    pub status: InvitationStatus,
    pub message: Option<String>,
    pub is_access_request: bool,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl GardenInvitation {
    /// Whether the deadline has passed at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Stored status, with `Pending` reported as `Expired` past the deadline.
    pub fn effective_status(&self, now: DateTime<Utc>) -> InvitationStatus {
        match self.status {
            InvitationStatus::Pending if self.is_expired_at(now) => InvitationStatus::Expired,
            status => status,
        }
    }

    /// Pending and not yet expired.
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.effective_status(now) == InvitationStatus::Pending
    }

    /// Whether the invitation targets `email` (case-insensitive).
    pub fn is_addressed_to(&self, email: &str) -> bool {
        emails_match(&self.invited_user_email, email)
    }

    /// The user a membership is provisioned for when accepted by `acting_user_id`.
    pub fn beneficiary(&self, acting_user_id: Uuid) -> Uuid {
        if self.is_access_request {
            self.invited_by_user_id
        } else {
            acting_user_id
        }
    }
}

/// Data required to create an invitation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInvitation {
    pub garden_id: Uuid,
    pub invited_by_user_id: Uuid,
    pub invited_user_email: String,
    pub invited_user_id: Option<Uuid>,
    pub role: GardenRole,
    pub message: Option<String>,
    pub is_access_request: bool,
    pub expires_at: DateTime<Utc>,
}

/// An invitation joined with display data for listings.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InvitationDetails {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub invitation: GardenInvitation,
    pub garden_name: String,
    pub inviter_username: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn invitation(status: InvitationStatus, expires_in: Duration) -> GardenInvitation {
        let now = Utc::now();
        GardenInvitation {
            id: Uuid::new_v4(),
            garden_id: Uuid::new_v4(),
            invited_by_user_id: Uuid::new_v4(),
            invited_user_email: "b@example.com".to_string(),
            invited_user_id: None,
            role: GardenRole::Member,
            status,
            message: None,
            is_access_request: false,
            expires_at: now + expires_in,
            created_at: now,
            updated_at: None,
        }
    }

    #[test]
    fn test_pending_past_deadline_reads_as_expired() {
        let inv = invitation(InvitationStatus::Pending, Duration::days(-1));
        assert_eq!(inv.effective_status(Utc::now()), InvitationStatus::Expired);
        assert!(!inv.is_live(Utc::now()));
    }

    #[test]
    fn test_answered_invitations_keep_their_status() {
        let inv = invitation(InvitationStatus::Declined, Duration::days(-1));
        assert_eq!(inv.effective_status(Utc::now()), InvitationStatus::Declined);
    }

    #[test]
    fn test_addressee_match_ignores_case() {
        let inv = invitation(InvitationStatus::Pending, Duration::days(7));
        assert!(inv.is_addressed_to("B@Example.com"));
        assert!(!inv.is_addressed_to("c@example.com"));

        let mut accented = invitation(InvitationStatus::Pending, Duration::days(7));
        accented.invited_user_email = "éva@example.com".to_string();
        assert!(accented.is_addressed_to("ÉVA@example.com"));
    }

    #[test]
    fn test_access_request_benefits_requester() {
        let mut inv = invitation(InvitationStatus::Pending, Duration::days(7));
        let approver = Uuid::new_v4();
        assert_eq!(inv.beneficiary(approver), approver);

        inv.is_access_request = true;
        assert_eq!(inv.beneficiary(approver), inv.invited_by_user_id);
    }
}
