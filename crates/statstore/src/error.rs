//! Error types for statstore

use std::fmt;

/// Result type alias for statstore operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for statistics operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Input does not satisfy the operation's precondition
    InvalidArgument(String),
}

impl Error {
    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
        }
    }
}

impl std::error::Error for Error {}
