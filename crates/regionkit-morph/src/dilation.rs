//! Dilation by the unit neighborhood
//!
//! Dilation works line by line over a three-line window `(L-1, L, L+1)` of
//! the input. Lines outside the input bounds are empty.
//!
//! - Cross element (4-connected): `out(L) = grow(in(L)) ∪ in(L-1) ∪ in(L+1)`
//! - Square element (8-connected): `out(L) = grow(in(L-1)) ∪ grow(in(L)) ∪ grow(in(L+1))`
//!
//! where `grow` widens every interval by one column on each side. The output
//! bounding box is the input's grown by one on every side.
//!
//! Plane domains are dilated plane by plane, combining a same-plane element
//! with an element applied to the two adjacent planes:
//!
//! | connectivity | same plane | adjacent planes |
//! |---|---|---|
//! | 6  | cross  | copy   |
//! | 18 | square | cross  |
//! | 26 | square | square |

use log::debug;
use regionkit_core::{
    ConnectivityType, DomainObject, Error, IntervalDomain, IntervalLine, IntvlDomain, PlaneDomain,
    RegionObject, TransformedObject, VolumeObject, expand_line, union_all, union_line,
};

use crate::MorphResult;

/// Dilated line `L` from the input lines `L-1`, `L` and `L+1`, all in
/// absolute columns
fn dilate_line(
    connectivity: ConnectivityType,
    above: &IntervalLine,
    own: &IntervalLine,
    below: &IntervalLine,
) -> IntervalLine {
    match connectivity {
        ConnectivityType::FourWay => union_line(&union_line(&expand_line(own, 1), above), below),
        _ => union_line(
            &union_line(&expand_line(above, 1), &expand_line(own, 1)),
            &expand_line(below, 1),
        ),
    }
}

/// Dilate a 2D domain by the unit cross (4) or square (8).
///
/// A pixel belongs to the result iff it is the input pixel itself or one
/// of its `connectivity`-neighbors is.
///
/// # Arguments
///
/// * `domain` - Domain to dilate
/// * `connectivity` - `FourWay` (cross) or `EightWay` (square)
///
/// # Returns
///
/// `Empty` for an empty input. A `Rect` dilated by the square stays a
/// `Rect`; every other case yields an `Intvl` domain whose bounds are the
/// input's grown by one.
///
/// # Errors
///
/// Returns a core `BadConnectivity` error for 3D connectivities, and a
/// core `InvalidParameter` error when the grown bounds leave the `i32`
/// coordinate range.
pub fn dilate_domain(
    domain: &IntervalDomain,
    connectivity: ConnectivityType,
) -> MorphResult<IntervalDomain> {
    let connectivity = connectivity.require_planar()?;
    let bounds = match domain.bounds() {
        Some(b) if !domain.is_empty() => b,
        _ => return Ok(IntervalDomain::Empty),
    };

    let out_bounds = bounds.checked_expand(1).ok_or_else(|| {
        Error::InvalidParameter(format!(
            "dilating lines {}..={}, columns {}..={} leaves the coordinate range",
            bounds.line1, bounds.last_line, bounds.col1, bounds.last_col
        ))
    })?;

    if let (IntervalDomain::Rect(_), ConnectivityType::EightWay) = (domain, connectivity) {
        return Ok(IntervalDomain::Rect(out_bounds));
    }

    let mut out = IntvlDomain::new(out_bounds)?;

    let mut above = IntervalLine::new();
    let mut own = domain.absolute_line(out_bounds.line1);
    let mut below = domain.absolute_line(out_bounds.line1 + 1);
    for line in out_bounds.line1..=out_bounds.last_line {
        out.set_line_absolute(line, &dilate_line(connectivity, &above, &own, &below))?;
        above = own;
        own = below;
        below = line
            .checked_add(2)
            .map_or_else(IntervalLine::new, |next| domain.absolute_line(next));
    }

    let out = IntervalDomain::Intvl(out);
    debug!(
        "dilation ({}-connected): {} intervals in, {} out",
        connectivity.value(),
        domain.interval_count(),
        out.interval_count()
    );
    Ok(out)
}

/// Dilate a plane domain by the unit 6-, 18- or 26-neighborhood.
///
/// Output plane `p` is the union of the same-plane dilation of input plane
/// `p` and the adjacent-plane operation on input planes `p-1` and `p+1`.
///
/// # Returns
///
/// The standard form of the result, spanning at most one more plane on
/// each side than the input.
///
/// # Errors
///
/// Returns a core `BadConnectivity` error for 2D connectivities, and a
/// core `InvalidParameter` error when the grown planes, lines or columns
/// leave the `i32` coordinate range.
pub fn dilate_planes(
    planes: &PlaneDomain,
    connectivity: ConnectivityType,
) -> MorphResult<PlaneDomain> {
    let connectivity = connectivity.require_volumetric()?;
    if planes.is_empty() {
        return Ok(PlaneDomain::empty());
    }

    let same_plane = connectivity.in_plane();
    let across = connectivity.across_planes();

    let first_out = planes
        .plane1()
        .checked_sub(1)
        .filter(|_| planes.last_plane().is_some_and(|last| last < i32::MAX))
        .ok_or_else(|| {
            Error::InvalidParameter("dilated planes leave the coordinate range".to_string())
        })?;

    let depth = planes.depth();
    let mut own = Vec::with_capacity(depth);
    let mut adjacent = Vec::with_capacity(depth);
    for (_, domain) in planes.iter() {
        own.push(dilate_domain(domain, same_plane)?);
        adjacent.push(match across {
            Some(element) => dilate_domain(domain, element)?,
            None => domain.clone(),
        });
    }

    // Output index k is plane `plane1 - 1 + k`, fed by input planes k-2..=k
    let mut out = Vec::with_capacity(depth + 2);
    for k in 0..depth + 2 {
        let parts = [
            k.checked_sub(1).and_then(|i| own.get(i)),
            k.checked_sub(2).and_then(|i| adjacent.get(i)),
            adjacent.get(k),
        ];
        out.push(union_all(parts.into_iter().flatten())?);
    }

    let out = PlaneDomain::new(first_out, out)?.standardized();
    debug!(
        "dilation ({}-connected): {} planes in, {} out",
        connectivity.value(),
        depth,
        out.depth()
    );
    Ok(out)
}

/// Dilate any region object.
///
/// 2D objects use [`dilate_domain`], 3D objects [`dilate_planes`]. The
/// result shares the input's value table. A transformed object is dilated
/// underneath and re-wrapped with the same transform.
///
/// # Errors
///
/// Returns a core `BadConnectivity` error when the connectivity does not
/// match the dimension of the object.
pub fn dilate<V>(
    object: &RegionObject<V>,
    connectivity: ConnectivityType,
) -> MorphResult<RegionObject<V>> {
    Ok(match object {
        RegionObject::Empty => RegionObject::Empty,
        RegionObject::Domain2D(o) => {
            DomainObject::sharing_values_of(dilate_domain(o.domain(), connectivity)?, o).into()
        }
        RegionObject::Domain3D(o) => {
            VolumeObject::sharing_values_of(dilate_planes(o.planes(), connectivity)?, o).into()
        }
        RegionObject::Transformed(t) => {
            TransformedObject::new(*t.transform(), dilate(t.inner(), connectivity)?).into()
        }
    })
}
