//! regionkit-morph - Morphological operations on interval domains
//!
//! This crate grows and shrinks domains by their unit neighborhood,
//! working directly on the run-length lines:
//!
//! - **2D dilation** - Cross (4-connected) and square (8-connected)
//!   elements over a three-line sliding window
//! - **3D dilation** - Plane-by-plane composition for 6-, 18- and
//!   26-connectivity
//! - **Erosion** - The dual of 2D dilation
//!
//! # Examples
//!
//! ```
//! use regionkit_core::{ConnectivityType, IntervalDomain};
//! use regionkit_morph::dilate_domain;
//!
//! let pixel = IntervalDomain::rect(5, 5, 5, 5).unwrap();
//! let square = dilate_domain(&pixel, ConnectivityType::EightWay).unwrap();
//! assert_eq!(square.area(), 9);
//!
//! let cross = dilate_domain(&pixel, ConnectivityType::FourWay).unwrap();
//! assert_eq!(cross.area(), 5);
//! assert!(!cross.contains(4, 4));
//! ```

pub mod dilation;
mod error;
pub mod erosion;

pub use error::{MorphError, MorphResult};

pub use dilation::{dilate, dilate_domain, dilate_planes};
pub use erosion::{erode, erode_domain};
