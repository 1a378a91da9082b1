use crate::{
    AssetsConfig, BotConfig, ConfigError, ConfigErrorResult, DatabaseConfig, ForwardingConfig,
    LoggingConfig, PollingConfig, ReferralConfig, StorageConfig,
};

use std::path::PathBuf;

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub bot: BotConfig,
    pub database: DatabaseConfig,
    pub forwarding: ForwardingConfig,
    pub referral: ReferralConfig,
    pub assets: AssetsConfig,
    pub logging: LoggingConfig,
    pub storage: StorageConfig,
    pub polling: PollingConfig,
}

impl Config {
    /// Load config with full production error handling.
    ///
    /// Loading order:
    /// 1. Check for KM_CONFIG_DIR env var, else use ./.km/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply KM_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        // Auto-create config directory
        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join("config.toml");

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Load and parse TOML file with detailed error context.
    fn load_toml(path: &PathBuf) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.clone(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: KM_CONFIG_DIR env var > ./.km/ (relative to cwd)
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        if let Ok(dir) = std::env::var("KM_CONFIG_DIR") {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(".km"))
    }

    /// Validate all configuration.
    /// Call after load() to catch all fatal errors at startup. Missing
    /// forwarding sources are deliberately NOT fatal; they only disable
    /// their triggers.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.bot.validate()?;
        self.referral.validate()?;
        self.storage.validate()?;
        self.polling.validate()?;

        // Validate database path doesn't escape config dir
        let db_path = std::path::Path::new(&self.database.path);
        if db_path.is_absolute() || self.database.path.contains("..") {
            return Err(ConfigError::database(
                "database.path must be relative and cannot contain '..'",
            ));
        }

        Ok(())
    }

    /// Get absolute path to database file.
    pub fn database_path(&self) -> Result<PathBuf, ConfigError> {
        let config_dir = Self::config_dir()?;
        Ok(config_dir.join(&self.database.path))
    }

    /// Log configuration summary (NEVER logs the token).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  bot: token=<redacted>, gating channel {}",
            self.bot.channel_id()
        );
        info!("  database: {}", self.database.path);
        info!(
            "  forwarding: {} source(s) configured",
            self.forwarding.channels.len()
        );
        info!(
            "  referral: {} coins/invite, links via @{}",
            self.referral.coins_per_invite, self.referral.bot_username
        );
        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
        info!(
            "  storage: timeout={}s, credit retries={}",
            self.storage.timeout_secs, self.storage.credit_retry_attempts
        );
        info!(
            "  polling: wait={}s, handler timeout={}s",
            self.polling.timeout_secs, self.polling.handler_timeout_secs
        );
    }

    fn apply_env_overrides(&mut self) {
        // Bot
        Self::apply_env_string("KM_BOT_TOKEN", &mut self.bot.token);
        Self::apply_env_string("KM_CHANNEL_USERNAME", &mut self.bot.channel_username);

        // Database
        Self::apply_env_string("KM_DATABASE_PATH", &mut self.database.path);

        // Referral
        Self::apply_env_string("KM_REFERRAL_BOT_USERNAME", &mut self.referral.bot_username);
        Self::apply_env_parse(
            "KM_REFERRAL_COINS_PER_INVITE",
            &mut self.referral.coins_per_invite,
        );
        Self::apply_env_string(
            "KM_REFERRAL_DEVELOPER_CHANNEL_URL",
            &mut self.referral.developer_channel_url,
        );

        // Assets
        Self::apply_env_string("KM_COVER_PHOTO", &mut self.assets.cover_photo);
        Self::apply_env_string("KM_REFERRAL_PHOTO", &mut self.assets.referral_photo);

        // Logging
        Self::apply_env_parse("KM_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("KM_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("KM_LOG_FILE", &mut self.logging.file);

        // Storage
        Self::apply_env_parse("KM_STORAGE_TIMEOUT_SECS", &mut self.storage.timeout_secs);
        Self::apply_env_parse(
            "KM_STORAGE_CREDIT_RETRY_ATTEMPTS",
            &mut self.storage.credit_retry_attempts,
        );

        // Polling
        Self::apply_env_parse("KM_POLL_TIMEOUT_SECS", &mut self.polling.timeout_secs);
        Self::apply_env_parse(
            "KM_HANDLER_TIMEOUT_SECS",
            &mut self.polling.handler_timeout_secs,
        );

        // Forwarding sources: KM_FORWARD_<KEY> adds or replaces one entry,
        // e.g. KM_FORWARD_MAIN=@kimem_db_main
        for (key, value) in std::env::vars() {
            if let Some(channel_key) = key.strip_prefix("KM_FORWARD_")
                && !channel_key.is_empty()
                && !value.is_empty()
            {
                self.forwarding
                    .channels
                    .insert(channel_key.to_string(), value);
            }
        }
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = if val.is_empty() { None } else { Some(val) };
        }
    }
}
