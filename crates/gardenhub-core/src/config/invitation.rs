//! Invitation workflow configuration.

use serde::{Deserialize, Serialize};

/// Invitation lifetime settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvitationConfig {
    /// Days an invitation stays acceptable after creation.
    #[serde(default = "default_ttl_days")]
    pub ttl_days: i64,
}

impl Default for InvitationConfig {
    fn default() -> Self {
        Self {
            ttl_days: default_ttl_days(),
        }
    }
}

fn default_ttl_days() -> i64 {
    7
}
