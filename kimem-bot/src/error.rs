use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Config error: {0}")]
    Config(#[from] km_config::ConfigError),

    #[error("Database error: {0}")]
    Db(#[from] km_db::DbError),

    #[error("Menu catalog error: {0}")]
    Catalog(#[from] km_core::CoreError),

    #[error("Transport error: {0}")]
    Transport(#[from] km_engine::TransportError),

    #[error("Logger error: {message}")]
    Logger { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BotError>;
