//! Error types for regionkit-region

use thiserror::Error;

/// Errors that can occur during region labeling
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] regionkit_core::Error),

    /// More components were accepted than the caller allowed
    #[error("capacity exceeded: more than {capacity} objects")]
    CapacityExceeded { capacity: usize },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

impl From<std::collections::TryReserveError> for RegionError {
    fn from(e: std::collections::TryReserveError) -> Self {
        RegionError::Core(e.into())
    }
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;
