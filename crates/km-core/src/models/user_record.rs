//! Persistent per-user record backing the referral program.

use crate::{ChatUser, InvitedEntry};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One record per distinct user, created on first contact and never deleted.
///
/// `coin_balance` and `invited` only grow, and only through the referral
/// ledger; `coin_balance` always equals the per-invite award times
/// `invited.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// String form of the platform numeric id. Primary key, immutable.
    pub user_id: String,
    pub first_name: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
    /// Deterministic invite link derived from `user_id`. Immutable once set.
    pub referral_link: String,
    pub coin_balance: i64,
    /// Append-only invite history. Length defines the invite count.
    pub invited: Vec<InvitedEntry>,
    pub has_seen_intro: bool,
    /// Optimistic locking version
    pub version: i64,
}

impl UserRecord {
    /// Create a fresh record for a user making first contact.
    pub fn new(user: &ChatUser, referral_link: String) -> Self {
        Self {
            user_id: user.id.to_string(),
            first_name: user.first_name.clone(),
            username: user.username.clone().unwrap_or_default(),
            created_at: Utc::now(),
            referral_link,
            coin_balance: 0,
            invited: Vec::new(),
            has_seen_intro: false,
            version: 1,
        }
    }

    pub fn invited_count(&self) -> usize {
        self.invited.len()
    }

    /// Whether this user has already been credited for the given invitee.
    pub fn has_invited(&self, invitee_id: i64) -> bool {
        self.invited.iter().any(|entry| entry.user_id == invitee_id)
    }
}
