//! Connected-component labeling of plane domains
//!
//! Each plane is labeled on its own with the in-plane connectivity
//! (6 → 4, 18 and 26 → 8). Fragments on adjacent planes are then joined
//! with a disjoint-set forest when they touch across the plane boundary:
//!
//! | connectivity | reach into the adjacent plane |
//! |---|---|
//! | 6  | same pixel only |
//! | 18 | 4-neighborhood |
//! | 26 | 8-neighborhood |

use log::debug;
use regionkit_core::{
    ConnectivityType, IntervalDomain, IntervalLine, PlaneDomain, expand_line, lines_intersect,
    union_all,
};

use crate::error::RegionResult;
use crate::label::{LabelOptions, label_domain};

/// A labeled piece of one plane
#[derive(Debug)]
struct Fragment {
    plane: i32,
    domain: IntervalDomain,
}

/// Find the root of a set, halving the path on the way
fn find_root(parents: &mut [usize], mut node: usize) -> usize {
    while parents[node] != node {
        parents[node] = parents[parents[node]];
        node = parents[node];
    }
    node
}

/// Join two sets; the smaller root index becomes the parent
fn union_sets(parents: &mut [usize], a: usize, b: usize) {
    let ra = find_root(parents, a);
    let rb = find_root(parents, b);
    if ra < rb {
        parents[rb] = ra;
    } else if rb < ra {
        parents[ra] = rb;
    }
}

/// Check whether `upper` on one plane reaches `lower` on the adjacent plane
///
/// `reach` is the in-plane neighborhood into the adjacent plane, `None`
/// for the voxel directly across only.
fn fragments_touch(
    upper: &IntervalDomain,
    lower: &IntervalDomain,
    reach: Option<ConnectivityType>,
) -> bool {
    let (Some(a), Some(b)) = (upper.bounds(), lower.bounds()) else {
        return false;
    };
    if !a.expand(1).overlaps(&b) {
        return false;
    }

    (a.line1..=a.last_line).any(|line| {
        let own = upper.absolute_line(line);
        if own.is_empty() {
            return false;
        }
        match reach {
            None => lines_intersect(&own, &lower.absolute_line(line)),
            Some(ConnectivityType::FourWay) => {
                lines_intersect(&expand_line(&own, 1), &lower.absolute_line(line))
                    || lines_intersect(&own, &lower.absolute_line(line.saturating_sub(1)))
                    || lines_intersect(&own, &lower.absolute_line(line.saturating_add(1)))
            }
            Some(_) => {
                let grown: IntervalLine = expand_line(&own, 1);
                (line.saturating_sub(1)..=line.saturating_add(1))
                    .any(|l| lines_intersect(&grown, &lower.absolute_line(l)))
            }
        }
    })
}

/// Partition a plane domain into its connected components.
///
/// # Arguments
///
/// * `planes` - Plane domain to label
/// * `options` - Connectivity (6, 18 or 26), minimum extent and optional
///   cap. The extent filter applies to the line and column extents of
///   each component.
///
/// # Returns
///
/// One standard plane domain per accepted component, ordered by the first
/// fragment of each component (lowest plane first, then scan order).
///
/// # Errors
///
/// Returns a core `BadConnectivity` error for 4 or 8, and the errors of
/// [`label_domain`] otherwise.
pub fn label_planes(
    planes: &PlaneDomain,
    options: &LabelOptions,
) -> RegionResult<Vec<PlaneDomain>> {
    let connectivity = options.connectivity.require_volumetric()?;
    options.validate()?;
    if planes.is_empty() {
        return Ok(Vec::new());
    }

    let in_plane = LabelOptions::new(connectivity.in_plane());
    let reach = connectivity.across_planes();

    let mut fragments: Vec<Fragment> = Vec::new();
    // Index range of each plane's fragments in `fragments`
    let mut plane_ranges: Vec<(usize, usize)> = Vec::with_capacity(planes.depth());
    for (plane, domain) in planes.iter() {
        let start = fragments.len();
        for piece in label_domain(domain, &in_plane)? {
            fragments.push(Fragment {
                plane,
                domain: piece,
            });
        }
        plane_ranges.push((start, fragments.len()));
    }

    let mut parents: Vec<usize> = (0..fragments.len()).collect();
    for pair in plane_ranges.windows(2) {
        let (lower, upper) = (pair[0], pair[1]);
        for u in upper.0..upper.1 {
            for l in lower.0..lower.1 {
                if fragments_touch(&fragments[u].domain, &fragments[l].domain, reach) {
                    union_sets(&mut parents, u, l);
                }
            }
        }
    }

    // Group fragments by root; roots are the smallest index of each group
    let mut groups: Vec<Vec<usize>> = Vec::new();
    let mut group_of_root: Vec<Option<usize>> = vec![None; fragments.len()];
    for index in 0..fragments.len() {
        let root = find_root(&mut parents, index);
        let group = match group_of_root[root] {
            Some(g) => g,
            None => {
                groups.push(Vec::new());
                group_of_root[root] = Some(groups.len() - 1);
                groups.len() - 1
            }
        };
        groups[group].push(index);
    }

    let mut accepted = Vec::new();
    let mut rejected = 0;
    for members in &groups {
        let component = assemble(&fragments, members)?;
        let Some(bounds) = component.bounds() else {
            continue;
        };
        if options.accepts(bounds.planar.height(), bounds.planar.width()) {
            options.check_capacity(accepted.len())?;
            accepted.push(component);
        } else {
            rejected += 1;
        }
    }

    debug!(
        "3D labeling: {} planes, {} fragments, {} components accepted, {} rejected",
        planes.depth(),
        fragments.len(),
        accepted.len(),
        rejected
    );
    Ok(accepted)
}

// Union the fragments of one group plane by plane.
fn assemble(fragments: &[Fragment], members: &[usize]) -> RegionResult<PlaneDomain> {
    let first = members.iter().map(|&i| fragments[i].plane).min();
    let last = members.iter().map(|&i| fragments[i].plane).max();
    let (Some(first), Some(last)) = (first, last) else {
        return Ok(PlaneDomain::empty());
    };

    let mut stack = Vec::with_capacity((last - first + 1) as usize);
    for plane in first..=last {
        let on_plane = members
            .iter()
            .filter(|&&i| fragments[i].plane == plane)
            .map(|&i| &fragments[i].domain);
        stack.push(union_all(on_plane)?);
    }
    Ok(PlaneDomain::new(first, stack)?.standardized())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RegionError;

    fn pixel(line: i32, col: i32) -> IntervalDomain {
        IntervalDomain::rect(line, line, col, col).unwrap()
    }

    fn stack(planes: Vec<IntervalDomain>) -> PlaneDomain {
        PlaneDomain::new(0, planes).unwrap()
    }

    #[test]
    fn test_disjoint_set() {
        let mut parents: Vec<usize> = (0..6).collect();
        union_sets(&mut parents, 4, 2);
        union_sets(&mut parents, 2, 5);
        union_sets(&mut parents, 1, 3);
        assert_eq!(find_root(&mut parents, 5), 2);
        assert_eq!(find_root(&mut parents, 4), 2);
        assert_eq!(find_root(&mut parents, 3), 1);
        assert_eq!(find_root(&mut parents, 0), 0);
    }

    #[test]
    fn test_face_neighbors_join_under_six() {
        let d = stack(vec![pixel(0, 0), pixel(0, 0)]);
        let out = label_planes(&d, &LabelOptions::new(ConnectivityType::SixWay)).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].volume(), 2);
    }

    #[test]
    fn test_edge_neighbors_need_eighteen() {
        // Shifted by one column on the next plane: an edge neighbor
        let d = stack(vec![pixel(0, 0), pixel(0, 1)]);
        let six = label_planes(&d, &LabelOptions::new(ConnectivityType::SixWay)).unwrap();
        let eighteen = label_planes(&d, &LabelOptions::new(ConnectivityType::EighteenWay)).unwrap();
        assert_eq!(six.len(), 2);
        assert_eq!(eighteen.len(), 1);
    }

    #[test]
    fn test_corner_neighbors_need_twenty_six() {
        // Shifted diagonally on the next plane: a corner neighbor
        let d = stack(vec![pixel(0, 0), pixel(1, 1)]);
        let eighteen = label_planes(&d, &LabelOptions::new(ConnectivityType::EighteenWay)).unwrap();
        let twenty_six =
            label_planes(&d, &LabelOptions::new(ConnectivityType::TwentySixWay)).unwrap();
        assert_eq!(eighteen.len(), 2);
        assert_eq!(twenty_six.len(), 1);
        assert_eq!(twenty_six[0].depth(), 2);
    }

    #[test]
    fn test_fragments_joined_through_another_plane() {
        // Two pixels apart on plane 0, bridged by a bar on plane 1
        let bar = IntervalDomain::rect(0, 0, 0, 4).unwrap();
        let d = stack(vec![
            IntervalDomain::from_ranges([(0, 0, 0), (0, 4, 4)]).unwrap(),
            bar,
        ]);
        let out = label_planes(&d, &LabelOptions::new(ConnectivityType::SixWay)).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].volume(), 7);
        assert_eq!(out[0].plane(0).map(IntervalDomain::area), Some(2));
    }

    #[test]
    fn test_rejects_planar_connectivity() {
        let d = stack(vec![pixel(0, 0)]);
        assert!(matches!(
            label_planes(&d, &LabelOptions::new(ConnectivityType::EightWay)),
            Err(RegionError::Core(_))
        ));
    }

    #[test]
    fn test_extent_filter_and_cap() {
        let d = stack(vec![
            IntervalDomain::from_ranges([(0, 0, 0), (5, 0, 3), (6, 0, 3)]).unwrap(),
        ]);
        let opts = LabelOptions::new(ConnectivityType::SixWay).with_min_extent(1);
        let out = label_planes(&d, &opts).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].volume(), 8);

        let capped = LabelOptions::new(ConnectivityType::SixWay).with_max_objects(1);
        assert!(matches!(
            label_planes(&d, &capped),
            Err(RegionError::CapacityExceeded { capacity: 1 })
        ));
    }
}
