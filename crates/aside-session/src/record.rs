//! The session record itself.

use chrono::{DateTime, Duration, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Default session lifetime: five minutes.
pub const SESSION_TTL_SECS: i64 = 300;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: SessionUser,
}

impl SessionRecord {
    /// Mint a mock session for `username`: a random token, expiring
    /// `ttl_secs` after `now`.  No credential check happens anywhere.
    pub fn mock(username: &str, now: DateTime<Utc>, ttl_secs: i64) -> Self {
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(12)
            .map(char::from)
            .collect();
        Self {
            token: format!("mock_{}", suffix.to_lowercase()),
            expires_at: now + Duration::seconds(ttl_secs),
            user: SessionUser { username: username.to_string() },
        }
    }

    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

// ─── Unit tests ───────────────────────────────────────────────────────────────
