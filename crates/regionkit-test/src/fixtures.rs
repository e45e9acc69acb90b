//! Domain fixtures: ASCII art, pixel sets and random domains
//!
//! # Fixture format
//!
//! One text row per domain line. `#` or `x` marks a pixel in the domain,
//! `.` or a space marks a pixel outside it. An optional first row
//! `@ <line> <col>` sets the coordinates of the top-left character
//! (default `0 0`). Completely empty rows are ignored, so a domain line
//! without pixels must be written with dots.

use std::collections::BTreeSet;

use rand::RngExt;
use regionkit_core::{DomainBuilder, IntervalDomain, PlaneDomain};

use crate::error::{TestError, TestResult};

/// Parse an ASCII-art domain
///
/// # Errors
///
/// Returns [`TestError::FixtureParse`] on an unknown character or a bad
/// origin row.
pub fn domain_from_ascii(text: &str) -> TestResult<IntervalDomain> {
    let mut rows = text.lines().filter(|row| !row.trim_end().is_empty()).peekable();

    let (line0, col0) = match rows.peek() {
        Some(first) if first.starts_with('@') => {
            let origin = parse_origin(first)?;
            rows.next();
            origin
        }
        _ => (0, 0),
    };

    let mut builder = DomainBuilder::new();
    for (row_index, row) in rows.enumerate() {
        let line = line0 + row_index as i32;
        for (col_index, ch) in row.chars().enumerate() {
            match ch {
                '#' | 'x' => {
                    builder.add_pixel(line, col0 + col_index as i32);
                }
                '.' | ' ' => {}
                other => {
                    return Err(TestError::FixtureParse {
                        row: row_index,
                        message: format!("unexpected character {:?}", other),
                    });
                }
            }
        }
    }
    Ok(builder.build()?)
}

fn parse_origin(row: &str) -> TestResult<(i32, i32)> {
    let fields: Vec<&str> = row[1..].split_whitespace().collect();
    let parse = |s: &str| {
        s.parse::<i32>().map_err(|e| TestError::FixtureParse {
            row: 0,
            message: format!("bad origin {:?}: {}", row, e),
        })
    };
    match fields.as_slice() {
        [line, col] => Ok((parse(line)?, parse(col)?)),
        _ => Err(TestError::FixtureParse {
            row: 0,
            message: format!("origin row must be '@ <line> <col>', got {:?}", row),
        }),
    }
}

/// Render a domain as ASCII art over its bounding box
///
/// The output starts with the `@ <line> <col>` origin row, so it parses
/// back with [`domain_from_ascii`]. The empty domain renders as
/// `"(empty)\n"`.
pub fn domain_to_ascii(domain: &IntervalDomain) -> String {
    let Some(bounds) = domain.bounds() else {
        return "(empty)\n".to_string();
    };

    let mut out = format!("@ {} {}\n", bounds.line1, bounds.col1);
    for line in bounds.line1..=bounds.last_line {
        for col in bounds.col1..=bounds.last_col {
            out.push(if domain.contains(line, col) { '#' } else { '.' });
        }
        out.push('\n');
    }
    out
}

/// Every pixel of a domain as `(line, col)`
pub fn pixel_set(domain: &IntervalDomain) -> BTreeSet<(i32, i32)> {
    domain
        .scan()
        .flat_map(|s| (s.left..=s.right).map(move |col| (s.line, col)))
        .collect()
}

/// Every voxel of a plane domain as `(plane, line, col)`
pub fn voxel_set(planes: &PlaneDomain) -> BTreeSet<(i32, i32, i32)> {
    planes
        .iter()
        .flat_map(|(p, d)| pixel_set(d).into_iter().map(move |(l, c)| (p, l, c)))
        .collect()
}

/// Build a domain from a set of pixels
///
/// # Errors
///
/// Returns [`TestError::Domain`] if the domain cannot be built.
pub fn domain_from_pixels<I>(pixels: I) -> TestResult<IntervalDomain>
where
    I: IntoIterator<Item = (i32, i32)>,
{
    let mut builder = DomainBuilder::new();
    for (line, col) in pixels {
        builder.add_pixel(line, col);
    }
    Ok(builder.build()?)
}

/// Random domain on the grid `[0, lines) x [0, cols)`
///
/// Each pixel is set independently with probability `density`.
///
/// # Errors
///
/// Returns [`TestError::Domain`] if the domain cannot be built.
pub fn random_domain<R>(
    rng: &mut R,
    lines: i32,
    cols: i32,
    density: f64,
) -> TestResult<IntervalDomain>
where
    R: RngExt + ?Sized,
{
    let mut builder = DomainBuilder::new();
    for line in 0..lines {
        for col in 0..cols {
            if rng.random_bool(density) {
                builder.add_pixel(line, col);
            }
        }
    }
    Ok(builder.build()?)
}

/// Random plane domain of `planes` planes starting at plane 0
///
/// # Errors
///
/// Returns [`TestError::Domain`] if a plane cannot be built or `planes`
/// is not positive.
pub fn random_planes<R>(
    rng: &mut R,
    planes: i32,
    lines: i32,
    cols: i32,
    density: f64,
) -> TestResult<PlaneDomain>
where
    R: RngExt + ?Sized,
{
    let mut stack = Vec::new();
    for _ in 0..planes {
        stack.push(random_domain(rng, lines, cols, density)?);
    }
    Ok(PlaneDomain::new(0, stack)?)
}
