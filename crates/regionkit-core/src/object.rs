//! Region objects - Domains paired with shared pixel values
//!
//! A [`RegionObject`] is what the labeling and morphology engines accept
//! and return at the object level. Pixel values are owned elsewhere and
//! only ever shared: every object derived from an input holds a clone of
//! the input's `Arc`, never a copy of the values.
//!
//! The value type `V` is opaque to this crate. It defaults to `()` for
//! objects that carry no values.

use std::sync::Arc;

use crate::bounds::DomainBounds;
use crate::domain::IntervalDomain;
use crate::plane::PlaneDomain;

/// 2D affine transform carried by [`TransformedObject`]
///
/// Stored as a row-major 3x3 matrix. The engines never apply it; it is
/// preserved as data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
    matrix: [[f64; 3]; 3],
}

impl AffineTransform {
    /// Identity transform
    pub fn identity() -> Self {
        Self {
            matrix: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    /// Pure translation
    pub fn translation(tx: f64, ty: f64) -> Self {
        Self {
            matrix: [[1.0, 0.0, tx], [0.0, 1.0, ty], [0.0, 0.0, 1.0]],
        }
    }

    /// Transform from an explicit row-major matrix
    pub fn from_matrix(matrix: [[f64; 3]; 3]) -> Self {
        Self { matrix }
    }

    /// Row-major matrix
    pub fn matrix(&self) -> &[[f64; 3]; 3] {
        &self.matrix
    }
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::identity()
    }
}

/// 2D domain with optional shared values
#[derive(Debug)]
pub struct DomainObject<V = ()> {
    domain: IntervalDomain,
    values: Option<Arc<V>>,
}

impl<V> DomainObject<V> {
    /// Object without values
    pub fn new(domain: IntervalDomain) -> Self {
        Self {
            domain,
            values: None,
        }
    }

    /// Object sharing `values`
    pub fn with_values(domain: IntervalDomain, values: Arc<V>) -> Self {
        Self {
            domain,
            values: Some(values),
        }
    }

    /// Object sharing the same values as `other` (if any)
    pub fn sharing_values_of(domain: IntervalDomain, other: &DomainObject<V>) -> Self {
        Self {
            domain,
            values: other.values.clone(),
        }
    }

    /// Domain of the object
    pub fn domain(&self) -> &IntervalDomain {
        &self.domain
    }

    /// Shared values, if any
    pub fn values(&self) -> Option<&Arc<V>> {
        self.values.as_ref()
    }

    /// Bounding box of the domain
    pub fn bounds(&self) -> Option<DomainBounds> {
        self.domain.bounds()
    }

    /// Check if the pixel `(line, col)` belongs to the object
    pub fn contains(&self, line: i32, col: i32) -> bool {
        self.domain.contains(line, col)
    }

    /// Check if both objects point at the same value storage
    pub fn shares_values_with(&self, other: &DomainObject<V>) -> bool {
        match (&self.values, &other.values) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Consume the object, returning its domain
    pub fn into_domain(self) -> IntervalDomain {
        self.domain
    }
}

impl<V> Clone for DomainObject<V> {
    fn clone(&self) -> Self {
        Self {
            domain: self.domain.clone(),
            values: self.values.clone(),
        }
    }
}

/// Plane-stacked 3D domain with optional shared values
#[derive(Debug)]
pub struct VolumeObject<V = ()> {
    planes: PlaneDomain,
    values: Option<Arc<V>>,
}

impl<V> VolumeObject<V> {
    /// Object without values
    pub fn new(planes: PlaneDomain) -> Self {
        Self {
            planes,
            values: None,
        }
    }

    /// Object sharing `values`
    pub fn with_values(planes: PlaneDomain, values: Arc<V>) -> Self {
        Self {
            planes,
            values: Some(values),
        }
    }

    /// Object sharing the same values as `other` (if any)
    pub fn sharing_values_of(planes: PlaneDomain, other: &VolumeObject<V>) -> Self {
        Self {
            planes,
            values: other.values.clone(),
        }
    }

    /// Plane domain of the object
    pub fn planes(&self) -> &PlaneDomain {
        &self.planes
    }

    /// Shared values, if any
    pub fn values(&self) -> Option<&Arc<V>> {
        self.values.as_ref()
    }

    /// Check if the voxel `(plane, line, col)` belongs to the object
    pub fn contains(&self, plane: i32, line: i32, col: i32) -> bool {
        self.planes.contains(plane, line, col)
    }

    /// Check if both objects point at the same value storage
    pub fn shares_values_with(&self, other: &VolumeObject<V>) -> bool {
        match (&self.values, &other.values) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Consume the object, returning its plane domain
    pub fn into_planes(self) -> PlaneDomain {
        self.planes
    }
}

impl<V> Clone for VolumeObject<V> {
    fn clone(&self) -> Self {
        Self {
            planes: self.planes.clone(),
            values: self.values.clone(),
        }
    }
}

/// An object viewed through an affine transform
#[derive(Debug)]
pub struct TransformedObject<V = ()> {
    transform: AffineTransform,
    inner: Box<RegionObject<V>>,
}

impl<V> TransformedObject<V> {
    /// Wrap `inner` with `transform`
    pub fn new(transform: AffineTransform, inner: RegionObject<V>) -> Self {
        Self {
            transform,
            inner: Box::new(inner),
        }
    }

    /// The transform
    pub fn transform(&self) -> &AffineTransform {
        &self.transform
    }

    /// The wrapped object
    pub fn inner(&self) -> &RegionObject<V> {
        &self.inner
    }

    /// Consume the wrapper, returning the wrapped object
    pub fn into_inner(self) -> RegionObject<V> {
        *self.inner
    }
}

impl<V> Clone for TransformedObject<V> {
    fn clone(&self) -> Self {
        Self {
            transform: self.transform,
            inner: self.inner.clone(),
        }
    }
}

/// Any object accepted by the region engines
#[derive(Debug)]
pub enum RegionObject<V = ()> {
    /// No domain
    Empty,
    /// 2D domain
    Domain2D(DomainObject<V>),
    /// 3D plane domain
    Domain3D(VolumeObject<V>),
    /// Transformed object
    Transformed(TransformedObject<V>),
}

impl<V> RegionObject<V> {
    /// Short name of the variant, used in error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            RegionObject::Empty => "empty object",
            RegionObject::Domain2D(_) => "2D domain object",
            RegionObject::Domain3D(_) => "3D domain object",
            RegionObject::Transformed(_) => "transformed object",
        }
    }

    /// Check if the object holds no pixels.
    ///
    /// A transformed object is empty when its wrapped object is.
    pub fn is_empty(&self) -> bool {
        match self {
            RegionObject::Empty => true,
            RegionObject::Domain2D(o) => o.domain.is_empty(),
            RegionObject::Domain3D(o) => o.planes.is_empty(),
            RegionObject::Transformed(t) => t.inner.is_empty(),
        }
    }
}

impl<V> Default for RegionObject<V> {
    fn default() -> Self {
        RegionObject::Empty
    }
}

impl<V> Clone for RegionObject<V> {
    fn clone(&self) -> Self {
        match self {
            RegionObject::Empty => RegionObject::Empty,
            RegionObject::Domain2D(o) => RegionObject::Domain2D(o.clone()),
            RegionObject::Domain3D(o) => RegionObject::Domain3D(o.clone()),
            RegionObject::Transformed(t) => RegionObject::Transformed(t.clone()),
        }
    }
}

impl<V> From<DomainObject<V>> for RegionObject<V> {
    fn from(o: DomainObject<V>) -> Self {
        RegionObject::Domain2D(o)
    }
}

impl<V> From<VolumeObject<V>> for RegionObject<V> {
    fn from(o: VolumeObject<V>) -> Self {
        RegionObject::Domain3D(o)
    }
}

impl<V> From<TransformedObject<V>> for RegionObject<V> {
    fn from(t: TransformedObject<V>) -> Self {
        RegionObject::Transformed(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_are_shared_not_copied() {
        let values = Arc::new(vec![1u8, 2, 3]);
        let a =
            DomainObject::with_values(IntervalDomain::rect(0, 0, 0, 2).unwrap(), values.clone());
        let b = DomainObject::sharing_values_of(IntervalDomain::rect(1, 1, 0, 0).unwrap(), &a);

        assert!(a.shares_values_with(&b));
        assert!(Arc::ptr_eq(b.values().unwrap(), &values));
        assert_eq!(Arc::strong_count(&values), 3);

        let c: DomainObject<Vec<u8>> = DomainObject::new(IntervalDomain::Empty);
        assert!(!c.shares_values_with(&a));
    }

    #[test]
    fn test_region_object_emptiness() {
        let empty: RegionObject = RegionObject::default();
        assert!(empty.is_empty());

        let obj: RegionObject = DomainObject::new(IntervalDomain::rect(0, 1, 0, 1).unwrap()).into();
        assert!(!obj.is_empty());
        assert_eq!(obj.kind_name(), "2D domain object");

        let wrapped: RegionObject =
            TransformedObject::new(AffineTransform::translation(2.0, 3.0), obj.clone()).into();
        assert!(!wrapped.is_empty());
        let RegionObject::Transformed(t) = &wrapped else {
            panic!("expected a transformed object");
        };
        assert_eq!(t.transform().matrix()[0][2], 2.0);
        assert!(!t.inner().is_empty());
    }

    #[test]
    fn test_object_membership() {
        let o: DomainObject = DomainObject::new(IntervalDomain::rect(2, 3, 4, 5).unwrap());
        assert!(o.contains(3, 5));
        assert!(!o.contains(1, 5));
        assert_eq!(o.bounds(), Some(DomainBounds::new_unchecked(2, 3, 4, 5)));
    }
}
