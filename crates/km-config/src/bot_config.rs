use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct BotConfig {
    /// Bot API token. Required; never logged.
    pub token: String,
    /// Username of the gating channel users must join, with or without
    /// a leading '@'.
    pub channel_username: String,
}

impl BotConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.token.trim().is_empty() {
            return Err(ConfigError::bot("bot.token is required"));
        }

        if self.channel_username.trim().is_empty() {
            return Err(ConfigError::bot("bot.channel_username is required"));
        }

        Ok(())
    }

    /// Channel username without the leading '@', for join URLs.
    pub fn channel_slug(&self) -> &str {
        self.channel_username.trim_start_matches('@')
    }

    /// Channel identifier with the leading '@', for membership lookups.
    pub fn channel_id(&self) -> String {
        if self.channel_username.starts_with('@') {
            self.channel_username.clone()
        } else {
            format!("@{}", self.channel_username)
        }
    }
}
