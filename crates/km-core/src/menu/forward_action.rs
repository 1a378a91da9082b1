use serde::{Deserialize, Serialize};

/// Re-delivery of one stored piece of content: a logical channel key plus a
/// message identifier inside the source it resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForwardAction {
    pub channel_key: String,
    pub message_id: i64,
}

impl ForwardAction {
    pub fn new(channel_key: impl Into<String>, message_id: i64) -> Self {
        Self {
            channel_key: channel_key.into(),
            message_id,
        }
    }
}
