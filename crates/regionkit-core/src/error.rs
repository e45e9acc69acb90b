//! Error types for regionkit-core
//!
//! Provides a unified error type for domain construction, the interval
//! primitives and the object model. Each variant captures enough context
//! for diagnostics without exposing internal representation details.

use std::collections::TryReserveError;

use thiserror::Error;

/// Regionkit error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Missing or empty input where a value is required
    #[error("null or empty input: {0}")]
    NullInput(&'static str),

    /// Domain or object variant not handled by the operation
    #[error("bad domain type: {0}")]
    BadDomainType(&'static str),

    /// Connectivity outside the permitted set for the input's dimensionality
    #[error("bad connectivity: {connectivity} is not valid for {context}")]
    BadConnectivity {
        connectivity: u32,
        context: &'static str,
    },

    /// Pool or buffer growth failed
    #[error("memory allocation failed")]
    AllocationFailed,

    /// Interval data violates the sorted, coalesced line invariant
    #[error("malformed domain at line {line}: {reason}")]
    MalformedDomain { line: i32, reason: &'static str },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Operation not supported for this input
    #[error("operation not supported: {0}")]
    NotSupported(&'static str),
}

impl From<TryReserveError> for Error {
    fn from(_: TryReserveError) -> Self {
        Error::AllocationFailed
    }
}

/// Result type alias for regionkit operations
pub type Result<T> = std::result::Result<T, Error>;
