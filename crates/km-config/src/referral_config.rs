use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_BOT_USERNAME, DEFAULT_COINS_PER_INVITE,
    DEFAULT_DEVELOPER_CHANNEL_URL,
};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReferralConfig {
    /// Bot username used to derive referral links
    pub bot_username: String,
    /// Coins awarded per distinct successful invite
    pub coins_per_invite: i64,
    /// URL offered on the referral screen
    pub developer_channel_url: String,
}

impl Default for ReferralConfig {
    fn default() -> Self {
        Self {
            bot_username: String::from(DEFAULT_BOT_USERNAME),
            coins_per_invite: DEFAULT_COINS_PER_INVITE,
            developer_channel_url: String::from(DEFAULT_DEVELOPER_CHANNEL_URL),
        }
    }
}

impl ReferralConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.bot_username.trim().is_empty() {
            return Err(ConfigError::referral("referral.bot_username is required"));
        }

        if self.coins_per_invite < 1 {
            return Err(ConfigError::referral(format!(
                "referral.coins_per_invite must be >= 1, got {}",
                self.coins_per_invite
            )));
        }

        Ok(())
    }

    /// Deterministic invite link for a user id.
    pub fn referral_link(&self, user_id: i64) -> String {
        format!("https://t.me/{}?start={}", self.bot_username, user_id)
    }
}
