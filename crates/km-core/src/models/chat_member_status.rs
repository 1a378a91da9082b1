use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Membership status of a user in the gating channel, as reported by the
/// chat transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ChatMemberStatus {
    Member,
    Administrator,
    Creator,
    Left,
    Kicked,
    /// Any status the transport reports that we do not model
    #[default]
    #[serde(other)]
    Unknown,
}

impl ChatMemberStatus {
    /// Whether the status counts as having joined the gating channel.
    pub fn is_joined(&self) -> bool {
        matches!(self, Self::Member | Self::Administrator | Self::Creator)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Administrator => "administrator",
            Self::Creator => "creator",
            Self::Left => "left",
            Self::Kicked => "kicked",
            Self::Unknown => "unknown",
        }
    }
}

impl FromStr for ChatMemberStatus {
    type Err = ();

    // Unrecognized statuses map to Unknown rather than failing; the
    // transport vocabulary is wider than the gate cares about.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "member" => Ok(Self::Member),
            "administrator" => Ok(Self::Administrator),
            "creator" => Ok(Self::Creator),
            "left" => Ok(Self::Left),
            "kicked" => Ok(Self::Kicked),
            _ => Ok(Self::Unknown),
        }
    }
}

impl std::fmt::Display for ChatMemberStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
