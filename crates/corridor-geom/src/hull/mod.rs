//! 3D convex hulls as triangle index buffers.
//!
//! Purpose
//! - Turn the dual point cloud of a half-space system into facets
//!   (`geom3::enumerate`), behind a trait so another backend can be plugged in.
//! - `ParryHull` wraps parry's quickhull; its errors become `HullError`.
//!
//! Conventions
//! - Output triangles index the caller's point slice; interior and
//!   coplanar-within-tolerance points simply do not appear.
//! - `ccw = true`: counter-clockwise seen from outside (right-hand normal
//!   points out). `ccw = false`: the reverse winding.
//! - The plane tolerance is `eps` scaled by the largest absolute coordinate.

mod parry;

pub use self::parry::ParryHull;

use std::fmt;

use nalgebra::Vector3;

/// Library floor for the merge tolerance; callers use `min(eps, DEFAULT_EPS)`.
pub const DEFAULT_EPS: f64 = 1e-7;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HullError {
    /// Fewer than four input points.
    TooFewPoints { got: usize },
    /// Points are coincident, collinear, or coplanar within tolerance.
    Degenerate,
    /// A coordinate is NaN or infinite.
    NonFinite,
    /// The backend failed internally or returned an inconsistent mesh.
    Topology,
}

impl fmt::Display for HullError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HullError::TooFewPoints { got } => {
                write!(f, "need at least 4 points for a 3D hull, got {got}")
            }
            HullError::Degenerate => write!(f, "points do not span a 3D volume"),
            HullError::NonFinite => write!(f, "point cloud contains NaN or infinite coordinates"),
            HullError::Topology => write!(f, "hull backend produced an inconsistent mesh"),
        }
    }
}

impl std::error::Error for HullError {}

/// Convex-hull backend used by vertex enumeration.
///
/// Implementations must be reentrant: independent calls may run concurrently.
pub trait HullOracle: Sync {
    fn hull(&self, points: &[Vector3<f64>], ccw: bool, eps: f64)
        -> Result<Vec<[usize; 3]>, HullError>;
}
