//! PlaneDomain - Plane-stacked 3D domains
//!
//! A [`PlaneDomain`] is a stack of 2D [`IntervalDomain`]s, one per plane
//! in `[plane1, last_plane]`. Individual planes may be empty. A plane
//! domain with no planes at all is the empty 3D domain.

use crate::bounds::DomainBounds;
use crate::domain::IntervalDomain;
use crate::error::{Error, Result};

/// Inclusive 3D bounding box of a [`PlaneDomain`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VolumeBounds {
    /// First plane
    pub plane1: i32,
    /// Last plane (inclusive)
    pub last_plane: i32,
    /// Line/column box enclosing every plane
    pub planar: DomainBounds,
}

impl VolumeBounds {
    /// Number of planes covered
    pub fn depth(&self) -> i64 {
        i64::from(self.last_plane) - i64::from(self.plane1) + 1
    }
}

/// Stack of 2D domains
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlaneDomain {
    plane1: i32,
    planes: Vec<IntervalDomain>,
    bounds: Option<VolumeBounds>,
}

impl PlaneDomain {
    /// The empty 3D domain
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a plane domain from its planes.
    ///
    /// # Arguments
    ///
    /// * `plane1` - Index of the first plane
    /// * `planes` - One domain per plane, starting at `plane1`
    ///
    /// # Errors
    ///
    /// Returns [`Error::NullInput`] if `planes` is empty; use
    /// [`PlaneDomain::empty`] for the empty 3D domain.
    pub fn new(plane1: i32, planes: Vec<IntervalDomain>) -> Result<Self> {
        if planes.is_empty() {
            return Err(Error::NullInput("plane domain needs at least one plane"));
        }
        let mut domain = Self {
            plane1,
            planes,
            bounds: None,
        };
        domain.update_bounds();
        Ok(domain)
    }

    /// Create a plane domain of `depth` empty planes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `depth` is zero or negative,
    /// and [`Error::AllocationFailed`] if the plane table cannot be
    /// reserved.
    pub fn with_empty_planes(plane1: i32, depth: i32) -> Result<Self> {
        if depth <= 0 {
            return Err(Error::InvalidParameter(format!(
                "plane count must be positive, got {}",
                depth
            )));
        }
        let mut planes = Vec::new();
        planes.try_reserve_exact(depth as usize)?;
        planes.resize_with(depth as usize, IntervalDomain::default);
        Self::new(plane1, planes)
    }

    /// Index of the first plane (meaningless when there are no planes)
    pub fn plane1(&self) -> i32 {
        self.plane1
    }

    /// Index of the last plane, `None` when there are no planes
    pub fn last_plane(&self) -> Option<i32> {
        if self.planes.is_empty() {
            None
        } else {
            Some(self.plane1 + (self.planes.len() as i32 - 1))
        }
    }

    /// Number of planes
    pub fn depth(&self) -> usize {
        self.planes.len()
    }

    /// All planes, first plane first
    pub fn planes(&self) -> &[IntervalDomain] {
        &self.planes
    }

    /// Domain of a plane, `None` outside the plane range
    pub fn plane(&self, plane: i32) -> Option<&IntervalDomain> {
        self.index_of(plane).map(|i| &self.planes[i])
    }

    fn index_of(&self, plane: i32) -> Option<usize> {
        usize::try_from(i64::from(plane) - i64::from(self.plane1))
            .ok()
            .filter(|&i| i < self.planes.len())
    }

    /// Replace the domain of a plane and refresh the bounding box.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `plane` is out of range.
    pub fn set_plane(&mut self, plane: i32, domain: IntervalDomain) -> Result<()> {
        let index = self.index_of(plane).ok_or_else(|| {
            Error::InvalidParameter(format!("plane {} outside plane domain", plane))
        })?;
        self.planes[index] = domain;
        self.update_bounds();
        Ok(())
    }

    /// Iterate over `(plane index, domain)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (i32, &IntervalDomain)> + '_ {
        (self.plane1..=i32::MAX).zip(self.planes.iter())
    }

    /// Cached 3D bounding box over the non-empty planes
    pub fn bounds(&self) -> Option<VolumeBounds> {
        self.bounds
    }

    /// Check if no plane holds a pixel
    pub fn is_empty(&self) -> bool {
        self.planes.iter().all(IntervalDomain::is_empty)
    }

    /// Number of voxels
    pub fn volume(&self) -> i64 {
        self.planes.iter().map(IntervalDomain::area).sum()
    }

    /// Check if the voxel `(plane, line, col)` belongs to the domain
    pub fn contains(&self, plane: i32, line: i32, col: i32) -> bool {
        self.plane(plane).is_some_and(|d| d.contains(line, col))
    }

    /// Reduce every plane to its standard form and strip leading and
    /// trailing empty planes.
    ///
    /// A plane domain without voxels loses all its planes.
    pub fn standardize(&mut self) {
        for plane in &mut self.planes {
            plane.standardize();
        }
        let first = self.planes.iter().position(|d| !d.is_empty());
        let last = self.planes.iter().rposition(|d| !d.is_empty());
        match (first, last) {
            (Some(first), Some(last)) => {
                self.planes.truncate(last + 1);
                self.planes = self.planes.split_off(first);
                self.plane1 += first as i32;
            }
            _ => {
                self.planes.clear();
                self.plane1 = 0;
            }
        }
        self.update_bounds();
    }

    /// Consume the plane domain, returning its standard form
    pub fn standardized(mut self) -> Self {
        self.standardize();
        self
    }

    /// Check if two plane domains hold the same voxels
    pub fn same_voxels(&self, other: &PlaneDomain) -> bool {
        let empty = IntervalDomain::Empty;
        let mut planes = self.iter().map(|(p, _)| p).chain(other.iter().map(|(p, _)| p));
        planes.all(|p| {
            let a = self.plane(p).unwrap_or(&empty);
            let b = other.plane(p).unwrap_or(&empty);
            a.same_pixels(b)
        })
    }

    /// Check every plane's structural invariants.
    ///
    /// # Errors
    ///
    /// Returns the first [`Error::MalformedDomain`] found.
    pub fn validate(&self) -> Result<()> {
        self.planes.iter().try_for_each(IntervalDomain::validate)
    }

    fn update_bounds(&mut self) {
        let mut bounds: Option<VolumeBounds> = None;
        for (p, d) in (self.plane1..=i32::MAX).zip(&self.planes) {
            let Some(b) = d.bounds().filter(|_| !d.is_empty()) else {
                continue;
            };
            bounds = Some(match bounds {
                None => VolumeBounds {
                    plane1: p,
                    last_plane: p,
                    planar: b,
                },
                Some(acc) => VolumeBounds {
                    last_plane: p,
                    planar: acc.planar.union(&b),
                    ..acc
                },
            });
        }
        self.bounds = bounds;
    }
}
