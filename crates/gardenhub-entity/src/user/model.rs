//! User entity model.
//!
//! Accounts are owned by the external authentication system; GardenHub
//! only reads them to resolve emails and display names.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A user account as seen by the collaboration domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Display handle.
    pub username: String,
    /// Email address, unique across users.
    pub email: String,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to register a user row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Display handle.
    pub username: String,
    /// Email address.
    pub email: String,
}

/// Case-insensitive email equality, folding the full Unicode range the way
/// PostgreSQL's `LOWER()` does.
pub fn emails_match(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emails_match_folds_non_ascii_case() {
        assert!(emails_match("ÉLODIE@Example.com", "élodie@example.com"));
        assert!(emails_match(" b@example.com", "B@EXAMPLE.COM "));
        assert!(!emails_match("elodie@example.com", "élodie@example.com"));
    }
}
