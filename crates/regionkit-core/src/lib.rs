//! Regionkit Core - Run-length interval domains
//!
//! This crate provides the data model shared by the regionkit engines:
//!
//! - [`Interval`] / [`IntervalLine`] - Column ranges of one row and the
//!   line-level union, shift, expansion and intersection primitives
//! - [`IntervalDomain`] - Empty, rectangular or interval-encoded 2D regions
//! - [`PlaneDomain`] - Plane-stacked 3D regions
//! - [`RegionObject`] - Domains paired with shared pixel values
//! - [`DomainBounds`] - Inclusive bounding boxes
//! - [`ConnectivityType`] - 4/8 (2D) and 6/18/26 (3D) neighbor relations
//!
//! Labeling lives in `regionkit-region`, dilation and erosion in
//! `regionkit-morph`.

pub mod bounds;
pub mod connectivity;
pub mod domain;
pub mod error;
pub mod interval;
pub mod object;
pub mod plane;

pub use bounds::DomainBounds;
pub use connectivity::ConnectivityType;
pub use domain::ops::{has_intersection, intersection, union, union_all};
pub use domain::{DomainBuilder, IntervalDomain, IntervalScan, IntvlDomain, ScanInterval};
pub use error::{Error, Result};
pub use interval::{
    Interval, IntervalLine, expand_line, intersect_line, lines_intersect, shift_line, union_line,
};
pub use object::{AffineTransform, DomainObject, RegionObject, TransformedObject, VolumeObject};
pub use plane::{PlaneDomain, VolumeBounds};
