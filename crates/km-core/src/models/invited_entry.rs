use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One successful referral credit, appended to the referrer's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvitedEntry {
    /// Platform id of the invited user
    pub user_id: i64,
    /// Display name of the invited user at credit time
    pub name: String,
    pub date: DateTime<Utc>,
}
