//! Invitation lifecycle states.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stored state of an invitation.
///
/// `Pending` moves to `Accepted` or `Declined`. `Expired` is derived from
/// `expires_at` at read time; no transition writes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "invitation_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InvitationStatus {
    /// Waiting for an answer.
    Pending,
    /// Answered positively; a membership exists.
    Accepted,
    /// Answered negatively.
    Declined,
    /// Past its deadline.
    Expired,
}

impl InvitationStatus {
    /// Whether no further transition is possible.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Declined => "declined",
            Self::Expired => "expired",
        }
    }
}

impl fmt::Display for InvitationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
