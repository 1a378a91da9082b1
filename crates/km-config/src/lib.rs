mod assets_config;
mod bot_config;
mod config;
mod database_config;
mod error;
mod forwarding_config;
mod log_level;
mod logging_config;
mod polling_config;
mod referral_config;
mod storage_config;

pub use assets_config::AssetsConfig;
pub use bot_config::BotConfig;
pub use config::Config;
pub use database_config::DatabaseConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use forwarding_config::ForwardingConfig;
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use polling_config::PollingConfig;
pub use referral_config::ReferralConfig;
pub use storage_config::StorageConfig;

const DEFAULT_DATABASE_FILENAME: &str = "kimem.db";
const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
const DEFAULT_BOT_USERNAME: &str = "kimemuatbot";
const DEFAULT_DEVELOPER_CHANNEL_URL: &str = "https://t.me/yosdevhub";
const DEFAULT_COINS_PER_INVITE: i64 = 10;
const DEFAULT_STORE_TIMEOUT_SECS: u64 = 5;
const DEFAULT_CREDIT_RETRY_ATTEMPTS: u32 = 3;
const DEFAULT_POLL_TIMEOUT_SECS: u64 = 30;
const DEFAULT_HANDLER_TIMEOUT_SECS: u64 = 30;
const MAX_POLL_TIMEOUT_SECS: u64 = 50;
const MAX_STORE_TIMEOUT_SECS: u64 = 60;
const MAX_HANDLER_TIMEOUT_SECS: u64 = 300;

#[cfg(test)]
mod tests;
