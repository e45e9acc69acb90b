//! DomainBounds - Inclusive bounding boxes of interval domains
//!
//! Lines run top to bottom, columns left to right. Both limits are
//! inclusive, so a single pixel at `(line, col)` has bounds
//! `(line, line, col, col)`.

use crate::error::{Error, Result};

/// Inclusive line/column bounding box
///
/// Small and frequently copied, so this is a plain `Copy` type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DomainBounds {
    /// First line
    pub line1: i32,
    /// Last line (inclusive)
    pub last_line: i32,
    /// First column
    pub col1: i32,
    /// Last column (inclusive)
    pub last_col: i32,
}

impl DomainBounds {
    /// Create new bounds
    ///
    /// # Errors
    ///
    /// Returns an error if `line1 > last_line` or `col1 > last_col`.
    pub fn new(line1: i32, last_line: i32, col1: i32, last_col: i32) -> Result<Self> {
        if line1 > last_line || col1 > last_col {
            return Err(Error::InvalidParameter(format!(
                "bounds must be ordered: lines {}..={}, columns {}..={}",
                line1, last_line, col1, last_col
            )));
        }
        Ok(Self {
            line1,
            last_line,
            col1,
            last_col,
        })
    }

    /// Create bounds without validation
    pub const fn new_unchecked(line1: i32, last_line: i32, col1: i32, last_col: i32) -> Self {
        Self {
            line1,
            last_line,
            col1,
            last_col,
        }
    }

    /// Bounds of a single pixel
    pub const fn point(line: i32, col: i32) -> Self {
        Self::new_unchecked(line, line, col, col)
    }

    /// Number of lines covered
    #[inline]
    pub fn height(&self) -> i64 {
        i64::from(self.last_line) - i64::from(self.line1) + 1
    }

    /// Number of columns covered
    #[inline]
    pub fn width(&self) -> i64 {
        i64::from(self.last_col) - i64::from(self.col1) + 1
    }

    /// Number of pixels in the box
    #[inline]
    pub fn area(&self) -> i64 {
        self.height().saturating_mul(self.width())
    }

    /// Check if a pixel is inside the box
    #[inline]
    pub fn contains_point(&self, line: i32, col: i32) -> bool {
        line >= self.line1 && line <= self.last_line && col >= self.col1 && col <= self.last_col
    }

    /// Check if these bounds contain another box entirely
    pub fn contains_bounds(&self, other: &DomainBounds) -> bool {
        other.line1 >= self.line1
            && other.last_line <= self.last_line
            && other.col1 >= self.col1
            && other.last_col <= self.last_col
    }

    /// Check if the two boxes share at least one pixel
    pub fn overlaps(&self, other: &DomainBounds) -> bool {
        self.line1 <= other.last_line
            && other.line1 <= self.last_line
            && self.col1 <= other.last_col
            && other.col1 <= self.last_col
    }

    /// Compute the intersection of two boxes
    pub fn intersect(&self, other: &DomainBounds) -> Option<DomainBounds> {
        let line1 = self.line1.max(other.line1);
        let last_line = self.last_line.min(other.last_line);
        let col1 = self.col1.max(other.col1);
        let last_col = self.last_col.min(other.last_col);

        if line1 <= last_line && col1 <= last_col {
            Some(DomainBounds::new_unchecked(line1, last_line, col1, last_col))
        } else {
            None
        }
    }

    /// Compute the union (enclosing box) of two boxes
    pub fn union(&self, other: &DomainBounds) -> DomainBounds {
        DomainBounds::new_unchecked(
            self.line1.min(other.line1),
            self.last_line.max(other.last_line),
            self.col1.min(other.col1),
            self.last_col.max(other.last_col),
        )
    }

    /// Grow the box by a margin on all sides, clamped to the `i32` range
    pub fn expand(&self, margin: i32) -> DomainBounds {
        DomainBounds::new_unchecked(
            self.line1.saturating_sub(margin),
            self.last_line.saturating_add(margin),
            self.col1.saturating_sub(margin),
            self.last_col.saturating_add(margin),
        )
    }

    /// Grow the box by a margin on all sides, `None` if a side would leave
    /// the `i32` range
    pub fn checked_expand(&self, margin: i32) -> Option<DomainBounds> {
        Some(DomainBounds::new_unchecked(
            self.line1.checked_sub(margin)?,
            self.last_line.checked_add(margin)?,
            self.col1.checked_sub(margin)?,
            self.last_col.checked_add(margin)?,
        ))
    }

    /// Translate the box by `(dline, dcol)`
    pub fn translate(&self, dline: i32, dcol: i32) -> DomainBounds {
        DomainBounds::new_unchecked(
            self.line1 + dline,
            self.last_line + dline,
            self.col1 + dcol,
            self.last_col + dcol,
        )
    }

    /// Enclosing box of a sequence of boxes, `None` when the sequence is empty
    pub fn enclosing<I>(boxes: I) -> Option<DomainBounds>
    where
        I: IntoIterator<Item = DomainBounds>,
    {
        boxes.into_iter().reduce(|acc, b| acc.union(&b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_creation() {
        let b = DomainBounds::new(10, 19, 5, 104).unwrap();
        assert_eq!(b.height(), 10);
        assert_eq!(b.width(), 100);
        assert_eq!(b.area(), 1000);

        assert!(DomainBounds::new(3, 2, 0, 0).is_err());

        let full = DomainBounds::new(i32::MIN, i32::MAX, i32::MIN, i32::MAX).unwrap();
        assert_eq!(full.height(), 1i64 << 32);
        assert_eq!(full.width(), 1i64 << 32);
        assert_eq!(full.area(), i64::MAX);
        assert!(DomainBounds::new(0, 0, 1, 0).is_err());
    }

    #[test]
    fn test_bounds_contains() {
        let b = DomainBounds::new_unchecked(10, 20, 10, 20);
        assert!(b.contains_point(10, 10));
        assert!(b.contains_point(20, 20)); // Inclusive boundary
        assert!(!b.contains_point(21, 20));
        assert!(b.contains_bounds(&DomainBounds::point(15, 15)));
    }

    #[test]
    fn test_bounds_intersect_and_union() {
        let b1 = DomainBounds::new_unchecked(0, 9, 0, 9);
        let b2 = DomainBounds::new_unchecked(5, 14, 9, 20);
        assert_eq!(
            b1.intersect(&b2),
            Some(DomainBounds::new_unchecked(5, 9, 9, 9))
        );
        assert_eq!(b1.union(&b2), DomainBounds::new_unchecked(0, 14, 0, 20));

        let far = DomainBounds::point(100, 100);
        assert!(!b1.overlaps(&far));
        assert_eq!(b1.intersect(&far), None);
    }

    #[test]
    fn test_bounds_expand_and_enclosing() {
        let b = DomainBounds::point(2, 2).expand(1);
        assert_eq!(b, DomainBounds::new_unchecked(1, 3, 1, 3));
        assert_eq!(DomainBounds::point(2, 2).checked_expand(1), Some(b));

        let edge = DomainBounds::point(0, i32::MAX);
        assert_eq!(edge.checked_expand(1), None);
        assert_eq!(edge.expand(1), DomainBounds::new_unchecked(-1, 1, i32::MAX - 1, i32::MAX));

        let all = DomainBounds::enclosing([DomainBounds::point(2, 2), DomainBounds::point(7, 7)]);
        assert_eq!(all, Some(DomainBounds::new_unchecked(2, 7, 2, 7)));
        assert_eq!(DomainBounds::enclosing(Vec::new()), None);
    }
}
