//! Line-by-line interval iteration
//!
//! [`IntervalScan`] walks a domain top to bottom and, within each line,
//! left to right. Empty lines are skipped. Every item carries absolute
//! coordinates.

use super::IntervalDomain;
use crate::interval::Interval;

/// One interval produced by [`IntervalScan`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanInterval {
    /// Absolute line number
    pub line: i32,
    /// First column (absolute)
    pub left: i32,
    /// Last column (absolute, inclusive)
    pub right: i32,
}

impl ScanInterval {
    /// Column range as an [`Interval`]
    pub fn interval(&self) -> Interval {
        Interval::new_unchecked(self.left, self.right)
    }

    /// Number of pixels in the interval
    pub fn len(&self) -> i64 {
        self.interval().len()
    }

    /// Always false: a scanned interval covers at least one pixel
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Iterator over the intervals of a domain
#[derive(Debug, Clone)]
pub struct IntervalScan<'a> {
    domain: &'a IntervalDomain,
    line: i32,
    index: usize,
}

impl<'a> IntervalScan<'a> {
    pub(crate) fn new(domain: &'a IntervalDomain) -> Self {
        let line = domain.bounds().map_or(0, |b| b.line1);
        Self {
            domain,
            line,
            index: 0,
        }
    }
}

impl Iterator for IntervalScan<'_> {
    type Item = ScanInterval;

    fn next(&mut self) -> Option<ScanInterval> {
        match self.domain {
            IntervalDomain::Empty => None,
            IntervalDomain::Rect(b) => {
                if self.line > b.last_line {
                    return None;
                }
                let item = ScanInterval {
                    line: self.line,
                    left: b.col1,
                    right: b.last_col,
                };
                self.line += 1;
                Some(item)
            }
            IntervalDomain::Intvl(d) => {
                let bounds = d.bounds();
                while self.line <= bounds.last_line {
                    let intervals = d.lines()[(self.line - bounds.line1) as usize].intervals();
                    if let Some(iv) = intervals.get(self.index) {
                        self.index += 1;
                        return Some(ScanInterval {
                            line: self.line,
                            left: iv.left + bounds.col1,
                            right: iv.right + bounds.col1,
                        });
                    }
                    self.line += 1;
                    self.index = 0;
                }
                None
            }
        }
    }
}
