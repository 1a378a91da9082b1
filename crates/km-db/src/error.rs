use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLx error: {source} {location}")]
    Sqlx {
        source: sqlx::Error,
        location: ErrorLocation,
    },

    #[error("Store unavailable: {operation} timed out after {timeout_secs}s {location}")]
    StorageUnavailable {
        operation: &'static str,
        timeout_secs: u64,
        location: ErrorLocation,
    },

    #[error("Stored record is malformed: {message} {location}")]
    Decode {
        message: String,
        location: ErrorLocation,
    },

    #[error("Migration error: {message} {location}")]
    Migration {
        message: String,
        location: ErrorLocation,
    },
}

impl From<sqlx::Error> for DbError {
    #[track_caller]
    fn from(source: sqlx::Error) -> Self {
        Self::Sqlx {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl DbError {
    /// Whether this failure is a primary-key collision, i.e. the record was
    /// created by a concurrent call.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            Self::Sqlx {
                source: sqlx::Error::Database(db),
                ..
            } => db.is_unique_violation(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, DbError>;
