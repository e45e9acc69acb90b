//! Domain-level set operators
//!
//! These combine whole domains line by line with the primitives of
//! [`crate::interval`]. Results are always standard.

use log::trace;

use super::{IntervalDomain, IntvlDomain};
use crate::bounds::DomainBounds;
use crate::error::Result;
use crate::interval::{IntervalLine, intersect_line, lines_intersect, union_line};

/// Union of two domains.
///
/// # Errors
///
/// Returns [`crate::Error::AllocationFailed`] if storage cannot be
/// reserved.
pub fn union(a: &IntervalDomain, b: &IntervalDomain) -> Result<IntervalDomain> {
    union_all([a, b])
}

/// Union of any number of domains.
///
/// An empty sequence, or one holding only empty domains, yields `Empty`.
///
/// # Errors
///
/// Returns [`crate::Error::AllocationFailed`] if storage cannot be
/// reserved.
pub fn union_all<'a, I>(domains: I) -> Result<IntervalDomain>
where
    I: IntoIterator<Item = &'a IntervalDomain>,
{
    let domains: Vec<&IntervalDomain> = domains.into_iter().filter(|d| !d.is_empty()).collect();

    let bounds = match DomainBounds::enclosing(domains.iter().filter_map(|d| d.bounds())) {
        Some(b) => b,
        None => return Ok(IntervalDomain::Empty),
    };
    if let [single] = domains.as_slice() {
        return Ok((*single).clone().standardized());
    }
    if let Some(rect) = covering_rect(&domains, bounds) {
        return Ok(rect);
    }

    trace!(
        "union of {} domains over {} lines",
        domains.len(),
        bounds.height()
    );
    let mut out = IntvlDomain::new(bounds)?;
    for line in bounds.line1..=bounds.last_line {
        let merged = domains
            .iter()
            .fold(IntervalLine::new(), |acc, d| union_line(&acc, &d.absolute_line(line)));
        out.set_line_absolute(line, &merged)?;
    }
    Ok(IntervalDomain::Intvl(out).standardized())
}

// A rectangle equal to the enclosing box swallows every other input.
fn covering_rect(domains: &[&IntervalDomain], bounds: DomainBounds) -> Option<IntervalDomain> {
    domains.iter().find_map(|d| match d {
        IntervalDomain::Rect(b) if *b == bounds => Some(IntervalDomain::Rect(*b)),
        _ => None,
    })
}

/// Intersection of two domains.
///
/// # Errors
///
/// Returns [`crate::Error::AllocationFailed`] if storage cannot be
/// reserved.
pub fn intersection(a: &IntervalDomain, b: &IntervalDomain) -> Result<IntervalDomain> {
    let bounds = match (a.bounds(), b.bounds()) {
        (Some(ba), Some(bb)) => match ba.intersect(&bb) {
            Some(bounds) => bounds,
            None => return Ok(IntervalDomain::Empty),
        },
        _ => return Ok(IntervalDomain::Empty),
    };

    if a.is_rect() && b.is_rect() {
        return Ok(IntervalDomain::Rect(bounds));
    }

    let mut out = IntvlDomain::new(bounds)?;
    for line in bounds.line1..=bounds.last_line {
        let common = intersect_line(&a.absolute_line(line), &b.absolute_line(line));
        out.set_line_absolute(line, &common)?;
    }
    Ok(IntervalDomain::Intvl(out).standardized())
}

/// Check whether two domains share at least one pixel, without building
/// the intersection.
pub fn has_intersection(a: &IntervalDomain, b: &IntervalDomain) -> bool {
    let bounds = match (a.bounds(), b.bounds()) {
        (Some(ba), Some(bb)) => match ba.intersect(&bb) {
            Some(bounds) => bounds,
            None => return false,
        },
        _ => return false,
    };
    (bounds.line1..=bounds.last_line)
        .any(|line| lines_intersect(&a.absolute_line(line), &b.absolute_line(line)))
}
