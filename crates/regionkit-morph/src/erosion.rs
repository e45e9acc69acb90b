//! Erosion by the unit neighborhood
//!
//! A pixel survives erosion iff it and all of its neighbors are in the
//! domain. With `shrink(x)` the intersection of `x` shifted by -1, 0 and +1
//! columns:
//!
//! - Cross element (4-connected): `out(L) = shrink(in(L)) ∩ in(L-1) ∩ in(L+1)`
//! - Square element (8-connected): `out(L) = shrink(in(L-1)) ∩ shrink(in(L)) ∩ shrink(in(L+1))`

use log::debug;
use regionkit_core::{
    ConnectivityType, DomainObject, Error, Interval, IntervalDomain, IntervalLine, IntvlDomain,
    RegionObject, TransformedObject, intersect_line,
};

use crate::MorphResult;

/// Drop one column from both ends of every interval
fn shrink_line(line: &IntervalLine) -> IntervalLine {
    IntervalLine::from_sorted_unchecked(
        line.iter()
            .filter(|iv| iv.len() >= 3)
            .map(|iv| Interval::new_unchecked(iv.left + 1, iv.right - 1))
            .collect(),
    )
}

fn erode_line(
    connectivity: ConnectivityType,
    above: &IntervalLine,
    own: &IntervalLine,
    below: &IntervalLine,
) -> IntervalLine {
    match connectivity {
        ConnectivityType::FourWay => {
            intersect_line(&intersect_line(&shrink_line(own), above), below)
        }
        _ => intersect_line(
            &intersect_line(&shrink_line(above), &shrink_line(own)),
            &shrink_line(below),
        ),
    }
}

/// Erode a 2D domain by the unit cross (4) or square (8).
///
/// # Arguments
///
/// * `domain` - Domain to erode
/// * `connectivity` - `FourWay` (cross) or `EightWay` (square)
///
/// # Returns
///
/// The standard form of the eroded domain; `Empty` when nothing survives.
///
/// # Errors
///
/// Returns a core `BadConnectivity` error for 3D connectivities.
pub fn erode_domain(
    domain: &IntervalDomain,
    connectivity: ConnectivityType,
) -> MorphResult<IntervalDomain> {
    let connectivity = connectivity.require_planar()?;
    let bounds = match domain.bounds() {
        Some(b) if !domain.is_empty() => b,
        _ => return Ok(IntervalDomain::Empty),
    };

    // Both elements reduce a box to its interior
    if let IntervalDomain::Rect(b) = domain {
        return Ok(if b.height() > 2 && b.width() > 2 {
            IntervalDomain::Rect(b.expand(-1))
        } else {
            IntervalDomain::Empty
        });
    }

    let mut out = IntvlDomain::new(bounds)?;
    let mut above = IntervalLine::new();
    let mut own = domain.absolute_line(bounds.line1);
    let line_after = |line: i32, step: i32| {
        line.checked_add(step).map_or_else(IntervalLine::new, |next| domain.absolute_line(next))
    };
    let mut below = line_after(bounds.line1, 1);
    for line in bounds.line1..=bounds.last_line {
        out.set_line_absolute(line, &erode_line(connectivity, &above, &own, &below))?;
        above = own;
        own = below;
        below = line_after(line, 2);
    }

    let out = IntervalDomain::Intvl(out).standardized();
    debug!(
        "erosion ({}-connected): area {} -> {}",
        connectivity.value(),
        domain.area(),
        out.area()
    );
    Ok(out)
}

/// Erode a region object.
///
/// The result shares the input's value table; a transformed object is
/// eroded underneath and re-wrapped with the same transform.
///
/// # Errors
///
/// Returns a core `BadConnectivity` error for 3D connectivities and a core
/// `NotSupported` error for 3D objects.
pub fn erode<V>(
    object: &RegionObject<V>,
    connectivity: ConnectivityType,
) -> MorphResult<RegionObject<V>> {
    Ok(match object {
        RegionObject::Empty => RegionObject::Empty,
        RegionObject::Domain2D(o) => {
            DomainObject::sharing_values_of(erode_domain(o.domain(), connectivity)?, o).into()
        }
        RegionObject::Domain3D(_) => {
            return Err(Error::NotSupported("erosion of 3D objects").into());
        }
        RegionObject::Transformed(t) => {
            TransformedObject::new(*t.transform(), erode(t.inner(), connectivity)?).into()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MorphError;
    use regionkit_core::{PlaneDomain, VolumeObject};

    fn plus() -> IntervalDomain {
        IntervalDomain::from_ranges([(-1, 0, 0), (0, -1, 1), (1, 0, 0)]).unwrap()
    }

    #[test]
    fn test_shrink_line() {
        let line = IntervalLine::from_ranges([(0, 4), (7, 8), (10, 12)]);
        let shrunk = shrink_line(&line);
        assert_eq!(shrunk, IntervalLine::from_ranges([(1, 3), (11, 11)]));
    }

    #[test]
    fn test_erode_rect() {
        let r = IntervalDomain::rect(0, 4, 0, 4).unwrap();
        for conn in [ConnectivityType::FourWay, ConnectivityType::EightWay] {
            let out = erode_domain(&r, conn).unwrap();
            assert_eq!(out, IntervalDomain::rect(1, 3, 1, 3).unwrap());
        }
        let thin = IntervalDomain::rect(0, 1, 0, 9).unwrap();
        assert_eq!(
            erode_domain(&thin, ConnectivityType::FourWay).unwrap(),
            IntervalDomain::Empty
        );
    }

    #[test]
    fn test_erode_plus() {
        let out = erode_domain(&plus(), ConnectivityType::FourWay).unwrap();
        assert_eq!(out, IntervalDomain::rect(0, 0, 0, 0).unwrap().to_intervals().unwrap());
        assert_eq!(out.area(), 1);

        let out = erode_domain(&plus(), ConnectivityType::EightWay).unwrap();
        assert_eq!(out, IntervalDomain::Empty);
    }

    #[test]
    fn test_erode_at_coordinate_limits() {
        let d = IntervalDomain::from_ranges([
            (i32::MAX - 2, i32::MAX - 2, i32::MAX),
            (i32::MAX - 1, i32::MAX - 2, i32::MAX),
            (i32::MAX, i32::MAX - 2, i32::MAX),
        ])
        .unwrap();
        let out = erode_domain(&d, ConnectivityType::EightWay).unwrap();
        assert_eq!(out.area(), 1);
        assert!(out.contains(i32::MAX - 1, i32::MAX - 1));
    }

    #[test]
    fn test_erode_object() {
        let object: RegionObject = DomainObject::new(plus()).into();
        let out = erode(&object, ConnectivityType::FourWay).unwrap();
        assert!(matches!(out, RegionObject::Domain2D(ref d) if d.domain().area() == 1));

        let planes = PlaneDomain::new(0, vec![plus()]).unwrap();
        let volume: RegionObject = VolumeObject::new(planes).into();
        assert!(matches!(
            erode(&volume, ConnectivityType::FourWay),
            Err(MorphError::Core(Error::NotSupported(_)))
        ));
    }
}
