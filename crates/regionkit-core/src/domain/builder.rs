//! Coalescing domain builder

use std::collections::BTreeMap;

use log::trace;

use super::{IntervalDomain, IntvlDomain};
use crate::bounds::DomainBounds;
use crate::error::Result;
use crate::interval::IntervalLine;

/// Accumulates column ranges per line and builds a standard domain
///
/// Ranges are in absolute coordinates and may overlap, touch or arrive in
/// any order. [`DomainBuilder::build`] coalesces them.
///
/// # Examples
///
/// ```
/// use regionkit_core::DomainBuilder;
///
/// let mut builder = DomainBuilder::new();
/// builder.add_range(3, 0, 4).add_range(3, 5, 9).add_pixel(4, 2);
/// let domain = builder.build().unwrap();
/// assert_eq!(domain.interval_count(), 2);
/// assert_eq!(domain.area(), 11);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DomainBuilder {
    ranges: BTreeMap<i32, Vec<(i32, i32)>>,
}

impl DomainBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the columns `[left, right]` of `line` (endpoints in either order)
    pub fn add_range(&mut self, line: i32, left: i32, right: i32) -> &mut Self {
        self.ranges.entry(line).or_default().push((left, right));
        self
    }

    /// Add a single pixel
    pub fn add_pixel(&mut self, line: i32, col: i32) -> &mut Self {
        self.add_range(line, col, col)
    }

    /// Add every interval of an existing domain
    pub fn add_domain(&mut self, domain: &IntervalDomain) -> &mut Self {
        for s in domain.scan() {
            self.add_range(s.line, s.left, s.right);
        }
        self
    }

    /// Check if no range has been added
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Build the standard domain covering every added range.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::AllocationFailed`] if storage cannot be
    /// reserved.
    pub fn build(self) -> Result<IntervalDomain> {
        let (first, last) = match (
            self.ranges.first_key_value(),
            self.ranges.last_key_value(),
        ) {
            (Some((&first, _)), Some((&last, _))) => (first, last),
            _ => return Ok(IntervalDomain::Empty),
        };

        let lines: Vec<(i32, IntervalLine)> = self
            .ranges
            .into_iter()
            .map(|(line, ranges)| (line, IntervalLine::from_ranges(ranges)))
            .collect();

        let (col1, last_col) = lines
            .iter()
            .filter_map(|(_, l)| l.span())
            .fold((i32::MAX, i32::MIN), |(lo, hi), (l, r)| (lo.min(l), hi.max(r)));

        let bounds = DomainBounds::new_unchecked(first, last, col1, last_col);
        let mut domain = IntvlDomain::new(bounds)?;
        for (line, intervals) in &lines {
            domain.set_line_absolute(*line, intervals)?;
        }
        trace!(
            "built domain: {} lines, {} intervals",
            bounds.height(),
            domain.lines().iter().map(IntervalLine::len).sum::<usize>()
        );
        Ok(IntervalDomain::Intvl(domain))
    }
}
