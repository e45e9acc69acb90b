//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur during regression testing
#[derive(Debug, Error)]
pub enum TestError {
    /// Failed to load a domain fixture
    #[error("failed to load fixture '{path}': {message}")]
    FixtureLoad { path: String, message: String },

    /// Fixture text could not be parsed
    #[error("bad fixture text at row {row}: {message}")]
    FixtureParse { row: usize, message: String },

    /// Building a domain from fixture data failed
    #[error("domain construction failed: {0}")]
    Domain(#[from] regionkit_core::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
