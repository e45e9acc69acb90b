//! regionkit-region - Connected-component labeling for regionkit
//!
//! This crate partitions interval domains into their connected components:
//!
//! - **2D labeling** - A single top-to-bottom scan with 4- or 8-connectivity
//! - **3D labeling** - Per-plane labeling joined across planes with 6-, 18-
//!   or 26-connectivity
//! - **Chain arena** - The pooled node store behind the 2D scan
//!
//! # Examples
//!
//! ```
//! use regionkit_core::{ConnectivityType, DomainBuilder};
//! use regionkit_region::{LabelOptions, label_domain};
//!
//! let mut builder = DomainBuilder::new();
//! builder.add_pixel(2, 2).add_pixel(3, 3).add_pixel(7, 7);
//! let domain = builder.build().unwrap();
//!
//! let eight = label_domain(&domain, &LabelOptions::new(ConnectivityType::EightWay)).unwrap();
//! assert_eq!(eight.len(), 2);
//!
//! let four = label_domain(&domain, &LabelOptions::new(ConnectivityType::FourWay)).unwrap();
//! assert_eq!(four.len(), 3);
//! ```

pub mod arena;
pub mod error;
pub mod label;
pub mod label3d;

// Re-export core types
pub use regionkit_core;
pub use regionkit_core::ConnectivityType;

// Re-export error types
pub use error::{RegionError, RegionResult};

pub use arena::{ChainArena, NodeId, RecordExtent};
pub use label::{
    LabelOptions, component_bounds, count_components, label, label_domain, label_object,
};
pub use label3d::label_planes;
