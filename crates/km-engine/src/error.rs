use crate::TransportError;

use std::panic::Location;

use error_location::ErrorLocation;
use km_db::DbError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Store unavailable: {source} {location}")]
    StorageUnavailable {
        #[source]
        source: DbError,
        location: ErrorLocation,
    },

    #[error("Membership check failed: {source} {location}")]
    MembershipCheckFailed {
        #[source]
        source: TransportError,
        location: ErrorLocation,
    },

    #[error("Forward of {channel_key}/{message_id} failed: {message} {location}")]
    ForwardDeliveryFailed {
        channel_key: String,
        message_id: i64,
        message: String,
        location: ErrorLocation,
    },

    #[error("Credit for referrer {referrer_id} conflicted {attempts} times {location}")]
    CreditConflict {
        referrer_id: String,
        attempts: u32,
        location: ErrorLocation,
    },

    #[error("Transport error: {source} {location}")]
    Transport {
        #[source]
        source: TransportError,
        location: ErrorLocation,
    },
}

impl From<DbError> for EngineError {
    #[track_caller]
    fn from(source: DbError) -> Self {
        Self::StorageUnavailable {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<TransportError> for EngineError {
    #[track_caller]
    fn from(source: TransportError) -> Self {
        Self::Transport {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
