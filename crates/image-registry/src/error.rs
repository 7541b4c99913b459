//! Image registry errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("No image named {0}")]
    NotFound(String),

    #[error("Registry is empty")]
    Empty,

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Registry busy for longer than {0:?}")]
    Busy(std::time::Duration),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Blocking task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl RegistryError {
    /// Whether this is an expected lookup miss rather than an infrastructure fault.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RegistryError::NotFound(_) | RegistryError::Empty)
    }
}

/// Result type alias for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
