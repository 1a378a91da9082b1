use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },

    #[error("Duplicate trigger label registered: {label} {location}")]
    DuplicateTrigger {
        label: String,
        location: ErrorLocation,
    },

    #[error("Duplicate menu layout registered: {menu} {location}")]
    DuplicateLayout {
        menu: String,
        location: ErrorLocation,
    },

    #[error("Trigger {label} targets unknown menu {menu} {location}")]
    UnknownMenuTarget {
        label: String,
        menu: String,
        location: ErrorLocation,
    },

    #[error("Menu {menu} names unknown back target {target} {location}")]
    UnknownBackTarget {
        menu: String,
        target: String,
        location: ErrorLocation,
    },

    #[error("Home menu {menu} has no layout {location}")]
    MissingHomeLayout {
        menu: String,
        location: ErrorLocation,
    },
}

pub type Result<T> = StdResult<T, CoreError>;
