//! regionkit-test - Regression test framework for regionkit
//!
//! This crate provides a small regression test framework, supporting two
//! modes:
//!
//! - **Compare**: Compare results with expected values and domains
//! - **Display**: Compare, and print every compared domain as ASCII art
//!
//! It also provides domain fixtures: ASCII-art parsing and rendering,
//! pixel sets, and seeded random domains.
//!
//! # Usage
//!
//! ```ignore
//! use regionkit_test::{RegParams, load_test_domain};
//!
//! let mut rp = RegParams::new("label");
//! let domain = load_test_domain("blobs.txt").unwrap();
//! rp.compare_values(3.0, count as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" or "display"

mod error;
mod fixtures;
mod params;

pub use error::{TestError, TestResult};
pub use fixtures::{
    domain_from_ascii, domain_from_pixels, domain_to_ascii, pixel_set, random_domain,
    random_planes, voxel_set,
};
pub use params::{RegParams, RegTestMode};

/// Load a domain fixture from the test data directory
///
/// # Arguments
///
/// * `name` - Fixture filename (e.g., "blobs.txt")
///
/// # Returns
///
/// The parsed domain, or an error if loading or parsing fails.
pub fn load_test_domain(name: &str) -> TestResult<regionkit_core::IntervalDomain> {
    let path = test_data_path(name);
    let text = std::fs::read_to_string(&path).map_err(|e| TestError::FixtureLoad {
        path: path.clone(),
        message: e.to_string(),
    })?;
    domain_from_ascii(&text)
}

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // regionkit-test is at crates/regionkit-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to a test data file
pub fn test_data_path(name: &str) -> String {
    format!("{}/tests/data/domains/{}", workspace_root(), name)
}
