//! regionkit - Region engine over run-length interval domains
//!
//! # Overview
//!
//! A region is stored as one list of column intervals per line, which
//! keeps memory proportional to its boundary rather than its area.
//! regionkit provides:
//!
//! - Interval domains in 2D and plane-stacked 3D, with union and
//!   intersection
//! - Connected-component labeling with an optional small-object filter
//! - Dilation and erosion by the unit cross and square
//!
//! # Example
//!
//! ```
//! use regionkit::region::{LabelOptions, label_domain};
//! use regionkit::{ConnectivityType, IntervalDomain};
//!
//! let domain = IntervalDomain::from_ranges([(0, 0, 3), (1, 6, 9), (2, 3, 6)]).unwrap();
//! let parts = label_domain(&domain, &LabelOptions::new(ConnectivityType::FourWay)).unwrap();
//! assert_eq!(parts.len(), 2);
//!
//! let grown = regionkit::morph::dilate_domain(&domain, ConnectivityType::EightWay).unwrap();
//! assert!(grown.contains(-1, -1));
//! ```

// Re-export core types (primary data structures used everywhere)
pub use regionkit_core::*;

// Re-export engine crates as modules to avoid name conflicts
pub use regionkit_morph as morph;
pub use regionkit_region as region;
