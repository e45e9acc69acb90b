//! IntervalDomain - Run-length encoded binary regions
//!
//! An [`IntervalDomain`] describes a set of pixels on the integer grid.
//! It is one of three shapes:
//!
//! - `Empty` - no pixels at all
//! - `Rect` - a fully filled bounding box, with no interval storage
//! - `Intvl` - a bounding box plus one [`IntervalLine`] per row
//!
//! # Coordinates
//!
//! Lines and columns are signed and absolute. Inside an `Intvl` domain the
//! intervals of each line are stored relative to the domain's first column
//! (`bounds.col1`), so the stored interval `[0, 0]` is the pixel at column
//! `col1`. Accessors such as [`IntervalDomain::absolute_line`] and
//! [`IntervalDomain::scan`] translate back to absolute columns.
//!
//! # Ownership model
//!
//! A domain has a single owner. Objects that pair a domain with pixel
//! values share the values through `Arc` (see [`crate::object`]).
//!
//! # See also
//!
//! - [`ops`] for union and intersection
//! - [`DomainBuilder`] for building a domain from arbitrary ranges

mod builder;
pub mod ops;
pub mod scan;

pub use builder::DomainBuilder;
pub use scan::{IntervalScan, ScanInterval};

use crate::bounds::DomainBounds;
use crate::error::{Error, Result};
use crate::interval::{IntervalLine, shift_line};

/// Interval storage of a non-rectangular domain
///
/// Holds exactly one [`IntervalLine`] per line of `bounds`, with intervals
/// relative to `bounds.col1`. Empty lines are legal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntvlDomain {
    bounds: DomainBounds,
    lines: Vec<IntervalLine>,
}

impl IntvlDomain {
    /// Create interval storage for `bounds` with every line empty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailed`] if the line table cannot be
    /// reserved.
    pub fn new(bounds: DomainBounds) -> Result<Self> {
        let height = bounds.height() as usize;
        let mut lines = Vec::new();
        lines.try_reserve_exact(height)?;
        lines.resize_with(height, IntervalLine::new);
        Ok(Self { bounds, lines })
    }

    /// Assemble interval storage from its parts, checking every invariant.
    ///
    /// # Arguments
    ///
    /// * `bounds` - Bounding box of the domain
    /// * `lines` - One line per row of `bounds`, relative to `bounds.col1`
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedDomain`] if the line count does not match
    /// the bounds, a line is not coalesced, or an interval leaves the
    /// column range.
    pub fn from_parts(bounds: DomainBounds, lines: Vec<IntervalLine>) -> Result<Self> {
        let domain = Self { bounds, lines };
        domain.validate()?;
        Ok(domain)
    }

    /// Bounding box
    #[inline]
    pub fn bounds(&self) -> DomainBounds {
        self.bounds
    }

    /// All lines, first line first, relative to `bounds.col1`
    #[inline]
    pub fn lines(&self) -> &[IntervalLine] {
        &self.lines
    }

    /// Relative intervals of an absolute line, `None` outside the bounds
    pub fn line(&self, line: i32) -> Option<&IntervalLine> {
        if line < self.bounds.line1 || line > self.bounds.last_line {
            return None;
        }
        self.lines.get((line - self.bounds.line1) as usize)
    }

    /// Replace the intervals of an absolute line.
    ///
    /// # Arguments
    ///
    /// * `line` - Absolute line number inside the bounds
    /// * `intervals` - Coalesced intervals relative to `bounds.col1`
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the line is outside the bounds
    /// and [`Error::MalformedDomain`] if the intervals are not coalesced or
    /// do not fit the column range.
    pub fn set_line(&mut self, line: i32, intervals: IntervalLine) -> Result<()> {
        if line < self.bounds.line1 || line > self.bounds.last_line {
            return Err(Error::InvalidParameter(format!(
                "line {} outside domain lines {}..={}",
                line, self.bounds.line1, self.bounds.last_line
            )));
        }
        intervals.validate(line)?;
        check_columns(&intervals, self.bounds.width(), line)?;
        self.lines[(line - self.bounds.line1) as usize] = intervals;
        Ok(())
    }

    /// Replace the intervals of an absolute line, given in absolute columns.
    ///
    /// # Errors
    ///
    /// Same as [`IntvlDomain::set_line`].
    pub fn set_line_absolute(&mut self, line: i32, intervals: &IntervalLine) -> Result<()> {
        self.set_line(line, shift_line(intervals, self.bounds.col1.wrapping_neg()))
    }

    /// Check the line table against the bounds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedDomain`] on the first violation found.
    pub fn validate(&self) -> Result<()> {
        if self.bounds.line1 > self.bounds.last_line || self.bounds.col1 > self.bounds.last_col {
            return Err(Error::MalformedDomain {
                line: self.bounds.line1,
                reason: "bounding box is not ordered",
            });
        }
        if self.lines.len() != self.bounds.height() as usize {
            return Err(Error::MalformedDomain {
                line: self.bounds.line1,
                reason: "line count does not match bounding box",
            });
        }
        let width = self.bounds.width();
        for (line, intervals) in (self.bounds.line1..=i32::MAX).zip(&self.lines) {
            intervals.validate(line)?;
            check_columns(intervals, width, line)?;
        }
        Ok(())
    }

    fn into_parts(self) -> (DomainBounds, Vec<IntervalLine>) {
        (self.bounds, self.lines)
    }
}

fn check_columns(intervals: &IntervalLine, width: i64, line: i32) -> Result<()> {
    match intervals.span() {
        Some((left, right)) if left < 0 || i64::from(right) >= width => Err(Error::MalformedDomain {
            line,
            reason: "interval outside column bounds",
        }),
        _ => Ok(()),
    }
}

/// A 2D binary region on the integer grid
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum IntervalDomain {
    /// No pixels
    #[default]
    Empty,
    /// Every pixel of the bounding box
    Rect(DomainBounds),
    /// Explicit intervals per line
    Intvl(IntvlDomain),
}

impl IntervalDomain {
    /// The empty domain
    pub fn empty() -> Self {
        IntervalDomain::Empty
    }

    /// Create a rectangular domain.
    ///
    /// # Errors
    ///
    /// Returns an error if the limits are not ordered.
    pub fn rect(line1: i32, last_line: i32, col1: i32, last_col: i32) -> Result<Self> {
        Ok(IntervalDomain::Rect(DomainBounds::new(
            line1, last_line, col1, last_col,
        )?))
    }

    /// Create an `Intvl` domain with every line empty, ready for
    /// [`IntervalDomain::set_line`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailed`] if the line table cannot be
    /// reserved.
    pub fn intvl(bounds: DomainBounds) -> Result<Self> {
        Ok(IntervalDomain::Intvl(IntvlDomain::new(bounds)?))
    }

    /// Build a domain from arbitrary `(line, left, right)` ranges in
    /// absolute coordinates.
    ///
    /// Ranges may overlap or arrive in any order. The result is standard:
    /// minimal bounds, coalesced lines, `Empty` when no range is given.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailed`] if storage cannot be reserved.
    pub fn from_ranges<I>(ranges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (i32, i32, i32)>,
    {
        let mut builder = DomainBuilder::new();
        for (line, left, right) in ranges {
            builder.add_range(line, left, right);
        }
        builder.build()
    }

    /// Short name of the variant, used in error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            IntervalDomain::Empty => "empty",
            IntervalDomain::Rect(_) => "rect",
            IntervalDomain::Intvl(_) => "intvl",
        }
    }

    /// Bounding box, `None` for `Empty`.
    ///
    /// For an `Intvl` domain this is the stored box, which may be larger
    /// than the pixels unless the domain is standard.
    pub fn bounds(&self) -> Option<DomainBounds> {
        match self {
            IntervalDomain::Empty => None,
            IntervalDomain::Rect(b) => Some(*b),
            IntervalDomain::Intvl(d) => Some(d.bounds),
        }
    }

    /// Check if the domain has no pixels (in any representation)
    pub fn is_empty(&self) -> bool {
        match self {
            IntervalDomain::Empty => true,
            IntervalDomain::Rect(_) => false,
            IntervalDomain::Intvl(d) => d.lines.iter().all(IntervalLine::is_empty),
        }
    }

    /// Check if the domain is stored as a filled rectangle
    pub fn is_rect(&self) -> bool {
        matches!(self, IntervalDomain::Rect(_))
    }

    /// Number of lines spanned by the bounds (0 for `Empty`)
    pub fn line_count(&self) -> usize {
        self.bounds().map_or(0, |b| b.height() as usize)
    }

    /// Intervals of an absolute line, in absolute columns.
    ///
    /// Lines outside the bounds are empty.
    pub fn absolute_line(&self, line: i32) -> IntervalLine {
        match self {
            IntervalDomain::Empty => IntervalLine::new(),
            IntervalDomain::Rect(b) => {
                if line >= b.line1 && line <= b.last_line {
                    IntervalLine::single(b.col1, b.last_col)
                } else {
                    IntervalLine::new()
                }
            }
            IntervalDomain::Intvl(d) => d
                .line(line)
                .map_or_else(IntervalLine::new, |l| shift_line(l, d.bounds.col1)),
        }
    }

    /// Replace the intervals of an absolute line of an `Intvl` domain.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BadDomainType`] unless the domain is `Intvl`, and
    /// the errors of [`IntvlDomain::set_line`] otherwise.
    pub fn set_line(&mut self, line: i32, intervals: IntervalLine) -> Result<()> {
        match self {
            IntervalDomain::Intvl(d) => d.set_line(line, intervals),
            other => Err(Error::BadDomainType(other.kind_name())),
        }
    }

    /// Total number of intervals (one per line for `Rect`)
    pub fn interval_count(&self) -> usize {
        match self {
            IntervalDomain::Empty => 0,
            IntervalDomain::Rect(b) => b.height() as usize,
            IntervalDomain::Intvl(d) => d.lines.iter().map(IntervalLine::len).sum(),
        }
    }

    /// Largest number of intervals found on a single line
    pub fn max_intervals_per_line(&self) -> usize {
        match self {
            IntervalDomain::Empty => 0,
            IntervalDomain::Rect(_) => 1,
            IntervalDomain::Intvl(d) => d.lines.iter().map(IntervalLine::len).max().unwrap_or(0),
        }
    }

    /// Number of pixels
    pub fn area(&self) -> i64 {
        match self {
            IntervalDomain::Empty => 0,
            IntervalDomain::Rect(b) => b.area(),
            IntervalDomain::Intvl(d) => d.lines.iter().map(IntervalLine::pixel_count).sum(),
        }
    }

    /// Check if the pixel `(line, col)` belongs to the domain
    pub fn contains(&self, line: i32, col: i32) -> bool {
        match self {
            IntervalDomain::Empty => false,
            IntervalDomain::Rect(b) => b.contains_point(line, col),
            IntervalDomain::Intvl(d) => {
                d.bounds.contains_point(line, col)
                    && d.line(line).is_some_and(|l| l.contains(col.wrapping_sub(d.bounds.col1)))
            }
        }
    }

    /// Iterate over every interval, line by line, left to right, in
    /// absolute coordinates
    pub fn scan(&self) -> IntervalScan<'_> {
        IntervalScan::new(self)
    }

    /// Reduce the domain to its standard form.
    ///
    /// Leading and trailing empty lines are removed, the column range is
    /// shrunk to the pixels and the intervals are rebased. A domain without
    /// pixels becomes `Empty`. `Rect` is already standard.
    pub fn standardize(&mut self) {
        let IntervalDomain::Intvl(d) = self else {
            return;
        };

        let first = d.lines.iter().position(|l| !l.is_empty());
        let last = d.lines.iter().rposition(|l| !l.is_empty());
        let (first, last) = match (first, last) {
            (Some(first), Some(last)) => (first, last),
            _ => {
                *self = IntervalDomain::Empty;
                return;
            }
        };

        let (min_left, max_right) = d.lines[first..=last]
            .iter()
            .filter_map(IntervalLine::span)
            .fold((i32::MAX, i32::MIN), |(lo, hi), (l, r)| (lo.min(l), hi.max(r)));

        let old = d.bounds;
        d.bounds = DomainBounds::new_unchecked(
            old.line1 + first as i32,
            old.line1 + last as i32,
            old.col1 + min_left,
            old.col1 + max_right,
        );
        d.lines.truncate(last + 1);
        d.lines = d.lines.split_off(first);
        if min_left != 0 {
            for line in &mut d.lines {
                *line = shift_line(line, -min_left);
            }
        }
    }

    /// Consume the domain, returning its standard form
    pub fn standardized(mut self) -> Self {
        self.standardize();
        self
    }

    /// Explicit `Intvl` form of the domain.
    ///
    /// A `Rect` becomes one full-width interval per line; other variants
    /// are cloned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] for a `Rect` too wide for
    /// column offsets relative to its first column, and
    /// [`Error::AllocationFailed`] if storage cannot be reserved.
    pub fn to_intervals(&self) -> Result<IntervalDomain> {
        match self {
            IntervalDomain::Rect(b) => {
                let last = i32::try_from(b.width() - 1).map_err(|_| {
                    Error::InvalidParameter(format!(
                        "rectangle of {} columns exceeds relative column range",
                        b.width()
                    ))
                })?;
                let mut d = IntvlDomain::new(*b)?;
                for line in &mut d.lines {
                    *line = IntervalLine::single(0, last);
                }
                Ok(IntervalDomain::Intvl(d))
            }
            other => Ok(other.clone()),
        }
    }

    /// Check the domain's structural invariants.
    ///
    /// Producers that hand domains to the engines are expected to supply
    /// coalesced lines; this check is offered for them and is not repeated
    /// by the engines.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedDomain`] on the first violation found.
    pub fn validate(&self) -> Result<()> {
        match self {
            IntervalDomain::Empty => Ok(()),
            IntervalDomain::Rect(b) => {
                if b.line1 > b.last_line || b.col1 > b.last_col {
                    Err(Error::MalformedDomain {
                        line: b.line1,
                        reason: "bounding box is not ordered",
                    })
                } else {
                    Ok(())
                }
            }
            IntervalDomain::Intvl(d) => d.validate(),
        }
    }

    /// Check if two domains hold the same pixels, whatever their
    /// representation
    pub fn same_pixels(&self, other: &IntervalDomain) -> bool {
        let (a, b) = match (self.bounds(), other.bounds()) {
            (None, None) => return true,
            (None, Some(_)) => return other.is_empty(),
            (Some(_), None) => return self.is_empty(),
            (Some(a), Some(b)) => (a, b),
        };
        let all = a.union(&b);
        (all.line1..=all.last_line)
            .all(|line| self.absolute_line(line) == other.absolute_line(line))
    }

    /// Iterate over `(line, intervals)` pairs of every line in the bounds,
    /// with intervals in absolute columns
    pub fn lines(&self) -> impl Iterator<Item = (i32, IntervalLine)> + '_ {
        let (first, last) = self.bounds().map_or((1, 0), |b| (b.line1, b.last_line));
        (first..=last).map(move |line| (line, self.absolute_line(line)))
    }

    /// Take the interval storage out of an `Intvl` domain.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BadDomainType`] for `Empty` and `Rect`.
    pub fn into_intvl(self) -> Result<(DomainBounds, Vec<IntervalLine>)> {
        match self {
            IntervalDomain::Intvl(d) => Ok(d.into_parts()),
            other => Err(Error::BadDomainType(other.kind_name())),
        }
    }
}

impl From<DomainBounds> for IntervalDomain {
    fn from(bounds: DomainBounds) -> Self {
        IntervalDomain::Rect(bounds)
    }
}

impl From<IntvlDomain> for IntervalDomain {
    fn from(d: IntvlDomain) -> Self {
        IntervalDomain::Intvl(d)
    }
}
