use thiserror::Error;

use crate::booking::BookingStatus;

/// Errors from calls to the booking backend (used by the port trait in carcare-core).
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("backend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode response: {0}")]
    Decode(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Errors from mutating a booking draft.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("unknown add-on code '{0}'")]
    UnknownAddon(String),
}

/// A status change the transition policy does not permit.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("cannot move booking from '{from}' to '{to}'")]
    NotAllowed {
        from: BookingStatus,
        to: BookingStatus,
    },
}

/// Errors loading client configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {message}")]
    Read { path: String, message: String },

    #[error("failed to parse config file {path}: {message}")]
    Parse { path: String, message: String },

    #[error("invalid backend url '{0}'")]
    InvalidBackendUrl(String),
}
