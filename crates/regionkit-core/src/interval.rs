//! Interval, IntervalLine - Run-length rows of a domain
//!
//! An [`IntervalLine`] holds the intervals of one row, sorted by `left`,
//! non-overlapping and non-adjacent (a gap of at least one column between
//! consecutive intervals). Every constructor and primitive in this module
//! preserves that invariant.
//!
//! The free functions [`union_line`], [`shift_line`], [`expand_line`] and
//! [`intersect_line`] are the building blocks for labeling, dilation and
//! the domain-level set operators.

use crate::error::{Error, Result};

/// Inclusive column range `[left, right]` within one row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Interval {
    /// First column
    pub left: i32,
    /// Last column (inclusive)
    pub right: i32,
}

impl Interval {
    /// Create a new interval
    ///
    /// # Errors
    ///
    /// Returns an error if `left > right`.
    pub fn new(left: i32, right: i32) -> Result<Self> {
        if left > right {
            return Err(Error::InvalidParameter(format!(
                "interval must satisfy left <= right: [{}, {}]",
                left, right
            )));
        }
        Ok(Self { left, right })
    }

    /// Create an interval without validation
    pub const fn new_unchecked(left: i32, right: i32) -> Self {
        Self { left, right }
    }

    /// Number of columns covered
    #[inline]
    pub fn len(&self) -> i64 {
        self.right as i64 - self.left as i64 + 1
    }

    /// Always false: an interval covers at least one column
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Check if a column is inside the interval
    #[inline]
    pub fn contains(&self, col: i32) -> bool {
        col >= self.left && col <= self.right
    }

    /// Translate the interval by `dx` columns.
    ///
    /// Arithmetic wraps, so rebasing onto an origin with
    /// `shift(origin.wrapping_neg())` is exact whenever the offsets fit in
    /// `i32`, including an origin of `i32::MIN`.
    #[inline]
    pub fn shift(&self, dx: i32) -> Interval {
        Interval::new_unchecked(self.left.wrapping_add(dx), self.right.wrapping_add(dx))
    }

    /// Widen the interval by `n` columns on each side, clamped to the `i32`
    /// range
    #[inline]
    pub fn expand(&self, n: i32) -> Interval {
        Interval::new_unchecked(self.left.saturating_sub(n), self.right.saturating_add(n))
    }

    /// Check if the two intervals share a column
    #[inline]
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.left <= other.right && other.left <= self.right
    }

    /// Check if the two intervals overlap or are adjacent
    #[inline]
    pub fn touches(&self, other: &Interval) -> bool {
        self.left <= other.right.saturating_add(1) && other.left <= self.right.saturating_add(1)
    }
}

/// Sorted, maximally coalesced intervals of one row
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct IntervalLine {
    intervals: Vec<Interval>,
}

impl IntervalLine {
    /// Create an empty line
    pub fn new() -> Self {
        Self {
            intervals: Vec::new(),
        }
    }

    /// Create an empty line with pre-allocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            intervals: Vec::with_capacity(capacity),
        }
    }

    /// Line holding a single interval
    pub fn single(left: i32, right: i32) -> Self {
        Self {
            intervals: vec![Interval::new_unchecked(left, right)],
        }
    }

    /// Wrap intervals that are already sorted and coalesced.
    ///
    /// The invariant is trusted, not checked; see [`IntervalLine::validate`].
    pub fn from_sorted_unchecked(intervals: Vec<Interval>) -> Self {
        Self { intervals }
    }

    /// Wrap intervals, checking that they are sorted and coalesced.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedDomain`] (reported at line 0) if the
    /// invariant does not hold.
    pub fn from_sorted(intervals: Vec<Interval>) -> Result<Self> {
        let line = Self { intervals };
        line.validate(0)?;
        Ok(line)
    }

    /// Build a coalesced line from arbitrary column ranges.
    ///
    /// Ranges may overlap, touch, or arrive in any order; a range given as
    /// `(right, left)` is read as `(left, right)`.
    pub fn from_ranges<I>(ranges: I) -> Self
    where
        I: IntoIterator<Item = (i32, i32)>,
    {
        let mut intervals: Vec<Interval> = ranges
            .into_iter()
            .map(|(a, b)| Interval::new_unchecked(a.min(b), a.max(b)))
            .collect();
        intervals.sort_unstable();

        let mut line = IntervalLine::with_capacity(intervals.len());
        for interval in intervals {
            line.push_coalesce(interval);
        }
        line
    }

    /// Append an interval whose `left` is not smaller than the last one's,
    /// merging it into the last interval when they touch.
    pub fn push_coalesce(&mut self, interval: Interval) {
        if let Some(last) = self.intervals.last_mut() {
            if last.right.saturating_add(1) >= interval.left {
                last.right = last.right.max(interval.right);
                return;
            }
        }
        self.intervals.push(interval);
    }

    /// Check the sorted, non-adjacent invariant.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedDomain`] tagged with `line`.
    pub fn validate(&self, line: i32) -> Result<()> {
        let mut prev: Option<&Interval> = None;
        for interval in &self.intervals {
            if interval.left > interval.right {
                return Err(Error::MalformedDomain {
                    line,
                    reason: "interval with left > right",
                });
            }
            if let Some(p) = prev {
                if p.right.saturating_add(1) >= interval.left {
                    return Err(Error::MalformedDomain {
                        line,
                        reason: "intervals overlap, touch or are unsorted",
                    });
                }
            }
            prev = Some(interval);
        }
        Ok(())
    }

    /// Number of intervals
    #[inline]
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Check if the line has no intervals
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Intervals as a slice
    #[inline]
    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// Iterate over the intervals, left to right
    pub fn iter(&self) -> std::slice::Iter<'_, Interval> {
        self.intervals.iter()
    }

    /// Consume the line, returning its intervals
    pub fn into_vec(self) -> Vec<Interval> {
        self.intervals
    }

    /// Leftmost and rightmost covered columns
    pub fn span(&self) -> Option<(i32, i32)> {
        match (self.intervals.first(), self.intervals.last()) {
            (Some(first), Some(last)) => Some((first.left, last.right)),
            _ => None,
        }
    }

    /// Number of pixels covered by the line
    pub fn pixel_count(&self) -> i64 {
        self.intervals.iter().map(Interval::len).sum()
    }

    /// Check if a column is covered, by binary search
    pub fn contains(&self, col: i32) -> bool {
        let idx = self.intervals.partition_point(|iv| iv.right < col);
        self.intervals
            .get(idx)
            .is_some_and(|iv| iv.contains(col))
    }
}

impl<'a> IntoIterator for &'a IntervalLine {
    type Item = &'a Interval;
    type IntoIter = std::slice::Iter<'a, Interval>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.iter()
    }
}

/// Merge two coalesced lines into their coalesced union.
///
/// Linear in `a.len() + b.len()`: a merge sweep on leading `left` values
/// that extends the running interval whenever `right + 1 >= next.left`.
pub fn union_line(a: &IntervalLine, b: &IntervalLine) -> IntervalLine {
    let (a, b) = (a.intervals(), b.intervals());
    let mut out = IntervalLine::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);

    while i < a.len() || j < b.len() {
        let take_a = j >= b.len() || (i < a.len() && a[i].left <= b[j].left);
        let next = if take_a {
            i += 1;
            a[i - 1]
        } else {
            j += 1;
            b[j - 1]
        };
        out.push_coalesce(next);
    }

    out
}

/// Translate every interval of a line by `dx` columns.
pub fn shift_line(a: &IntervalLine, dx: i32) -> IntervalLine {
    IntervalLine::from_sorted_unchecked(a.iter().map(|iv| iv.shift(dx)).collect())
}

/// Widen every interval by `n >= 0` columns on each side, re-coalescing
/// intervals that come to touch.
pub fn expand_line(a: &IntervalLine, n: i32) -> IntervalLine {
    let mut out = IntervalLine::with_capacity(a.len());
    for iv in a {
        out.push_coalesce(iv.expand(n));
    }
    out
}

/// Intersection of two coalesced lines.
pub fn intersect_line(a: &IntervalLine, b: &IntervalLine) -> IntervalLine {
    let (a, b) = (a.intervals(), b.intervals());
    let mut out = IntervalLine::new();
    let (mut i, mut j) = (0, 0);

    while i < a.len() && j < b.len() {
        let left = a[i].left.max(b[j].left);
        let right = a[i].right.min(b[j].right);
        if left <= right {
            out.intervals.push(Interval::new_unchecked(left, right));
        }
        if a[i].right < b[j].right {
            i += 1;
        } else {
            j += 1;
        }
    }

    out
}

/// Check whether two coalesced lines share a column, without allocating.
pub fn lines_intersect(a: &IntervalLine, b: &IntervalLine) -> bool {
    let (a, b) = (a.intervals(), b.intervals());
    let (mut i, mut j) = (0, 0);

    while i < a.len() && j < b.len() {
        if a[i].overlaps(&b[j]) {
            return true;
        }
        if a[i].right < b[j].right {
            i += 1;
        } else {
            j += 1;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(ranges: &[(i32, i32)]) -> IntervalLine {
        IntervalLine::from_sorted(
            ranges
                .iter()
                .map(|&(l, r)| Interval::new_unchecked(l, r))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_interval_basics() {
        let iv = Interval::new(3, 7).unwrap();
        assert_eq!(iv.len(), 5);
        assert!(iv.contains(3) && iv.contains(7) && !iv.contains(8));
        assert_eq!(iv.shift(-3), Interval::new_unchecked(0, 4));
        let low = Interval::new_unchecked(i32::MIN, i32::MIN + 2);
        assert_eq!(low.shift(i32::MIN.wrapping_neg()), Interval::new_unchecked(0, 2));
        assert_eq!(iv.expand(1), Interval::new_unchecked(2, 8));
        assert!(iv.touches(&Interval::new_unchecked(8, 9)));
        assert!(!iv.overlaps(&Interval::new_unchecked(8, 9)));
        assert!(Interval::new(4, 3).is_err());
    }

    #[test]
    fn test_from_ranges_coalesces() {
        let l = IntervalLine::from_ranges([(10, 12), (0, 2), (3, 4), (11, 15), (20, 20)]);
        assert_eq!(l, line(&[(0, 4), (10, 15), (20, 20)]));
        assert_eq!(l.pixel_count(), 5 + 6 + 1);
        assert_eq!(l.span(), Some((0, 20)));
    }

    #[test]
    fn test_from_ranges_swapped_endpoints() {
        let l = IntervalLine::from_ranges([(5, 2)]);
        assert_eq!(l, line(&[(2, 5)]));
    }

    #[test]
    fn test_validate_rejects_adjacent() {
        let bad = IntervalLine::from_sorted_unchecked(vec![
            Interval::new_unchecked(0, 2),
            Interval::new_unchecked(3, 5),
        ]);
        assert!(matches!(
            bad.validate(7),
            Err(Error::MalformedDomain { line: 7, .. })
        ));
        assert!(IntervalLine::from_sorted(vec![Interval::new_unchecked(2, 1)]).is_err());
    }

    #[test]
    fn test_union_line() {
        let a = line(&[(0, 2), (8, 9)]);
        let b = line(&[(3, 4), (6, 6), (20, 22)]);
        assert_eq!(union_line(&a, &b), line(&[(0, 4), (6, 6), (8, 9), (20, 22)]));

        let empty = IntervalLine::new();
        assert_eq!(union_line(&a, &empty), a);
        assert_eq!(union_line(&empty, &b), b);
    }

    #[test]
    fn test_union_line_contained() {
        let a = line(&[(0, 100)]);
        let b = line(&[(5, 6), (50, 60)]);
        assert_eq!(union_line(&a, &b), a);
        assert_eq!(union_line(&b, &a), a);
    }

    #[test]
    fn test_shift_and_expand() {
        let a = line(&[(0, 2), (4, 5)]);
        assert_eq!(shift_line(&a, 3), line(&[(3, 5), (7, 8)]));
        // Gap of one column closes after expansion
        assert_eq!(expand_line(&a, 1), line(&[(-1, 6)]));
        assert_eq!(expand_line(&a, 0), a);

        let edge = line(&[(i32::MIN, i32::MIN + 1), (i32::MAX - 1, i32::MAX)]);
        assert_eq!(
            expand_line(&edge, 1),
            line(&[(i32::MIN, i32::MIN + 2), (i32::MAX - 2, i32::MAX)])
        );
    }

    #[test]
    fn test_intersect_line() {
        let a = line(&[(0, 5), (10, 20)]);
        let b = line(&[(3, 12), (15, 15), (19, 30)]);
        assert_eq!(
            intersect_line(&a, &b),
            line(&[(3, 5), (10, 12), (15, 15), (19, 20)])
        );
        assert!(lines_intersect(&a, &b));
        assert!(!lines_intersect(&line(&[(0, 1)]), &line(&[(2, 3)])));
        assert!(intersect_line(&a, &IntervalLine::new()).is_empty());
    }

    #[test]
    fn test_contains() {
        let a = line(&[(0, 2), (6, 9)]);
        assert!(a.contains(0));
        assert!(a.contains(7));
        assert!(!a.contains(4));
        assert!(!a.contains(10));
        assert!(!IntervalLine::new().contains(0));
    }
}
