use crate::{ConfigError, ConfigErrorResult, DEFAULT_CREDIT_RETRY_ATTEMPTS,
    DEFAULT_STORE_TIMEOUT_SECS, MAX_STORE_TIMEOUT_SECS};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Bound on every store call; elapsed calls fail as unavailable
    pub timeout_secs: u64,
    /// Attempts for the optimistic referral-credit update
    pub credit_retry_attempts: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_STORE_TIMEOUT_SECS,
            credit_retry_attempts: DEFAULT_CREDIT_RETRY_ATTEMPTS,
        }
    }
}

impl StorageConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.timeout_secs == 0 || self.timeout_secs > MAX_STORE_TIMEOUT_SECS {
            return Err(ConfigError::storage(format!(
                "storage.timeout_secs must be 1-{}, got {}",
                MAX_STORE_TIMEOUT_SECS, self.timeout_secs
            )));
        }

        if self.credit_retry_attempts == 0 {
            return Err(ConfigError::storage(
                "storage.credit_retry_attempts must be >= 1",
            ));
        }

        Ok(())
    }
}
