//! Neighbor relations used by labeling and morphology
//!
//! 2D domains use 4- or 8-connectivity, plane-stacked 3D domains use 6-,
//! 18- or 26-connectivity.

use crate::error::{Error, Result};

/// Connectivity type for component analysis and structuring elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConnectivityType {
    /// 4-way connectivity (up, down, left, right)
    #[default]
    FourWay,
    /// 8-way connectivity (includes diagonals)
    EightWay,
    /// 6-way connectivity (face neighbors in 3D)
    SixWay,
    /// 18-way connectivity (face and edge neighbors in 3D)
    EighteenWay,
    /// 26-way connectivity (face, edge and corner neighbors in 3D)
    TwentySixWay,
}

impl ConnectivityType {
    /// Create a connectivity from its neighbor count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BadConnectivity`] if `value` is not one of
    /// 4, 8, 6, 18 or 26.
    pub fn from_value(value: u32) -> Result<Self> {
        match value {
            4 => Ok(Self::FourWay),
            8 => Ok(Self::EightWay),
            6 => Ok(Self::SixWay),
            18 => Ok(Self::EighteenWay),
            26 => Ok(Self::TwentySixWay),
            _ => Err(Error::BadConnectivity {
                connectivity: value,
                context: "any domain",
            }),
        }
    }

    /// Number of neighbors of a pixel (or voxel).
    pub fn value(self) -> u32 {
        match self {
            Self::FourWay => 4,
            Self::EightWay => 8,
            Self::SixWay => 6,
            Self::EighteenWay => 18,
            Self::TwentySixWay => 26,
        }
    }

    /// Whether this connectivity applies to 2D domains.
    pub fn is_planar(self) -> bool {
        matches!(self, Self::FourWay | Self::EightWay)
    }

    /// Check that this connectivity is usable on a 2D domain.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BadConnectivity`] for 6, 18 or 26.
    pub fn require_planar(self) -> Result<Self> {
        if self.is_planar() {
            Ok(self)
        } else {
            Err(Error::BadConnectivity {
                connectivity: self.value(),
                context: "2D domains",
            })
        }
    }

    /// Check that this connectivity is usable on a plane-stacked domain.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BadConnectivity`] for 4 or 8.
    pub fn require_volumetric(self) -> Result<Self> {
        if self.is_planar() {
            Err(Error::BadConnectivity {
                connectivity: self.value(),
                context: "3D domains",
            })
        } else {
            Ok(self)
        }
    }

    /// In-plane connectivity used for each plane of a 3D operation.
    ///
    /// 6 → 4, 18 → 8, 26 → 8. 2D connectivities map to themselves.
    pub fn in_plane(self) -> Self {
        match self {
            Self::FourWay | Self::SixWay => Self::FourWay,
            Self::EightWay | Self::EighteenWay | Self::TwentySixWay => Self::EightWay,
        }
    }

    /// In-plane reach into an adjacent plane of a 3D neighborhood.
    ///
    /// `None` means only the voxel directly above or below is a neighbor
    /// (6-connectivity). 2D connectivities have no adjacent planes and
    /// return `None` as well.
    pub fn across_planes(self) -> Option<Self> {
        match self {
            Self::EighteenWay => Some(Self::FourWay),
            Self::TwentySixWay => Some(Self::EightWay),
            _ => None,
        }
    }

    /// Check whether two pixel offsets are neighbors in 2D.
    ///
    /// `(0, 0)` counts as a neighbor of itself.
    pub fn is_neighbor_offset(self, dline: i32, dcol: i32) -> bool {
        match self.in_plane() {
            Self::FourWay => dline.abs() + dcol.abs() <= 1,
            _ => dline.abs() <= 1 && dcol.abs() <= 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_value() {
        assert_eq!(ConnectivityType::from_value(4), Ok(ConnectivityType::FourWay));
        assert_eq!(
            ConnectivityType::from_value(26),
            Ok(ConnectivityType::TwentySixWay)
        );
        assert!(matches!(
            ConnectivityType::from_value(5),
            Err(Error::BadConnectivity { connectivity: 5, .. })
        ));
    }

    #[test]
    fn test_planar_checks() {
        assert!(ConnectivityType::EightWay.require_planar().is_ok());
        assert!(ConnectivityType::SixWay.require_planar().is_err());
        assert!(ConnectivityType::EighteenWay.require_volumetric().is_ok());
        assert!(ConnectivityType::FourWay.require_volumetric().is_err());
    }

    #[test]
    fn test_plane_decomposition() {
        use ConnectivityType::*;
        assert_eq!(SixWay.in_plane(), FourWay);
        assert_eq!(SixWay.across_planes(), None);
        assert_eq!(EighteenWay.in_plane(), EightWay);
        assert_eq!(EighteenWay.across_planes(), Some(FourWay));
        assert_eq!(TwentySixWay.in_plane(), EightWay);
        assert_eq!(TwentySixWay.across_planes(), Some(EightWay));
    }

    #[test]
    fn test_neighbor_offsets() {
        assert!(ConnectivityType::FourWay.is_neighbor_offset(0, 1));
        assert!(!ConnectivityType::FourWay.is_neighbor_offset(1, 1));
        assert!(ConnectivityType::EightWay.is_neighbor_offset(-1, 1));
        assert!(!ConnectivityType::EightWay.is_neighbor_offset(2, 0));
    }
}
