use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_HANDLER_TIMEOUT_SECS, DEFAULT_POLL_TIMEOUT_SECS,
    MAX_HANDLER_TIMEOUT_SECS, MAX_POLL_TIMEOUT_SECS,
};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    /// Long-poll wait for inbound updates
    pub timeout_secs: u64,
    /// Bound on handling one inbound event
    pub handler_timeout_secs: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_POLL_TIMEOUT_SECS,
            handler_timeout_secs: DEFAULT_HANDLER_TIMEOUT_SECS,
        }
    }
}

impl PollingConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.timeout_secs == 0 || self.timeout_secs > MAX_POLL_TIMEOUT_SECS {
            return Err(ConfigError::polling(format!(
                "polling.timeout_secs must be 1-{}, got {}",
                MAX_POLL_TIMEOUT_SECS, self.timeout_secs
            )));
        }

        if self.handler_timeout_secs == 0 || self.handler_timeout_secs > MAX_HANDLER_TIMEOUT_SECS {
            return Err(ConfigError::polling(format!(
                "polling.handler_timeout_secs must be 1-{}, got {}",
                MAX_HANDLER_TIMEOUT_SECS, self.handler_timeout_secs
            )));
        }

        Ok(())
    }
}
