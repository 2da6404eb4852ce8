//! Error types for the playback and tracking library

use thiserror::Error;

/// Result type alias for the playback library
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that end a playback session.
///
/// A tracker losing its object is not an error, see [`crate::registry`].
/// Neither is the user pressing ESC, see [`crate::session::PlaybackOutcome`].
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to open {path}")]
    OpenFailed { path: String },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("backend error: {0}")]
    Backend(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn open_failed<S: Into<String>>(path: S) -> Self {
        Self::OpenFailed { path: path.into() }
    }

    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    pub fn backend<S: Into<String>>(msg: S) -> Self {
        Self::Backend(msg.into())
    }
}
