//! Error types shared by settings, tables and game logic

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Malformed configuration or a table that does not match the round
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Operation called out of order (e.g. before `init`)
    #[error("Illegal state: {0}")]
    IllegalState(String),

    /// A matrix entry needed for a computation is not an integer.
    /// Expected while the player is editing an entry.
    #[error("Entry ({row}, {col}) is not an integer: {text:?}")]
    Format { row: usize, col: usize, text: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    pub(crate) fn illegal(msg: impl Into<String>) -> Self {
        Error::IllegalState(msg.into())
    }

    /// True for transient non-numeric entries
    pub fn is_format(&self) -> bool {
        matches!(self, Error::Format { .. })
    }
}
