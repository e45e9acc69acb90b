//! Regression test parameters and operations

use crate::fixtures::domain_to_ascii;
use regionkit_core::{IntervalDomain, PlaneDomain};

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Compare results against expectations (default)
    #[default]
    Compare,
    /// Compare, and also print every compared domain as ASCII art
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("REGTEST_MODE").unwrap_or_default())
    }

    /// Parse mode from a string; anything but "display" means compare
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// This structure tracks the state of a regression test, including
/// the test name, current index, mode, and success status.
pub struct RegParams {
    /// Name of the test (e.g., "label")
    pub test_name: String,
    /// Current test index (incremented before each test)
    index: usize,
    /// Test mode (compare or display)
    pub mode: RegTestMode,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// # Arguments
    ///
    /// * `test_name` - Name of the test (e.g., "label")
    ///
    /// # Returns
    ///
    /// A new `RegParams` instance configured based on the `REGTEST_MODE`
    /// environment variable.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn fail(&mut self, msg: String) {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Compare two floating-point values
    ///
    /// # Arguments
    ///
    /// * `expected` - Expected value
    /// * `actual` - Actual computed value
    /// * `delta` - Maximum allowed difference
    ///
    /// # Returns
    ///
    /// `true` if values match within delta, `false` otherwise.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            let msg = format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            );
            self.fail(msg);
            false
        } else {
            true
        }
    }

    /// Compare two domains by their pixel sets
    ///
    /// The representation (`Rect` vs `Intvl`, slack in the bounding box)
    /// is ignored. In display mode both domains are printed.
    ///
    /// # Returns
    ///
    /// `true` if both domains hold the same pixels, `false` otherwise.
    pub fn compare_domains(&mut self, expected: &IntervalDomain, actual: &IntervalDomain) -> bool {
        self.index += 1;

        if self.display() {
            eprintln!("index {} expected:\n{}", self.index, domain_to_ascii(expected));
            eprintln!("index {} actual:\n{}", self.index, domain_to_ascii(actual));
        }

        if expected.same_pixels(actual) {
            true
        } else {
            let msg = format!(
                "Failure in {}_reg: domain comparison for index {}\n\
                 expected:\n{}\nactual:\n{}",
                self.test_name,
                self.index,
                domain_to_ascii(expected),
                domain_to_ascii(actual)
            );
            self.fail(msg);
            false
        }
    }

    /// Compare two plane domains by their voxel sets
    ///
    /// # Returns
    ///
    /// `true` if both hold the same voxels, `false` otherwise.
    pub fn compare_plane_domains(&mut self, expected: &PlaneDomain, actual: &PlaneDomain) -> bool {
        self.index += 1;

        if expected.same_voxels(actual) {
            true
        } else {
            let msg = format!(
                "Failure in {}_reg: plane domain comparison for index {}\n\
                 expected volume = {}, actual volume = {}",
                self.test_name,
                self.index,
                expected.volume(),
                actual.volume()
            );
            self.fail(msg);
            false
        }
    }

    /// Compare two strings, typically ASCII renderings of domains
    ///
    /// # Returns
    ///
    /// `true` if the strings are identical, `false` otherwise.
    pub fn compare_strings(&mut self, expected: &str, actual: &str) -> bool {
        self.index += 1;

        if expected != actual {
            let msg = format!(
                "Failure in {}_reg: string comparison for index {}\n\
                 expected:\n{}\nactual:\n{}",
                self.test_name, self.index, expected, actual
            );
            self.fail(msg);
            false
        } else {
            true
        }
    }

    /// Record a boolean check
    ///
    /// # Arguments
    ///
    /// * `condition` - Result of the check
    /// * `what` - Description used in the failure message
    pub fn check(&mut self, condition: bool, what: &str) -> bool {
        self.index += 1;
        if !condition {
            let msg = format!(
                "Failure in {}_reg: check for index {} failed: {}",
                self.test_name, self.index, what
            );
            self.fail(msg);
        }
        condition
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all tests passed, `false` if any failed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all tests have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parse() {
        assert_eq!(RegTestMode::parse("display"), RegTestMode::Display);
        assert_eq!(RegTestMode::parse("DISPLAY"), RegTestMode::Display);
        assert_eq!(RegTestMode::parse(""), RegTestMode::Compare);
        assert_eq!(RegTestMode::parse("compare"), RegTestMode::Compare);
    }

    #[test]
    fn test_compare_values() {
        let mut rp = RegParams::new("test");
        assert!(rp.compare_values(100.0, 100.0, 0.0));
        assert!(rp.compare_values(100.0, 100.5, 1.0));
        assert!(rp.is_success());
        assert!(!rp.compare_values(100.0, 200.0, 0.0));
        assert!(!rp.is_success());
        assert_eq!(rp.index(), 3);
        assert_eq!(rp.failures().len(), 1);
    }

    #[test]
    fn test_compare_domains_ignores_representation() {
        let mut rp = RegParams::new("test");
        let rect = IntervalDomain::rect(0, 1, 0, 1).unwrap();
        let intvl = rect.to_intervals().unwrap();
        assert!(rp.compare_domains(&rect, &intvl));
        assert!(!rp.compare_domains(&rect, &IntervalDomain::Empty));
        assert!(!rp.cleanup());
    }
}
