//! Convex polyhedra in R^3 for safe-flight corridors.
//!
//! Half-space systems in, interior points, overlap verdicts, and vertex lists
//! out. LP and convex-hull work sit behind `lp::LpOracle` and
//! `hull::HullOracle`; the defaults are a Seidel LP and parry's convex hull.
//!
//! API Policy
//! - All operations are synchronous pure functions over caller-owned data.
//! - Failures are values (`GeomError`, `false`, `None`), never panics.

pub mod geom3;
pub mod hull;
pub mod lp;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use geom3::{GeomError, HPoly3, Hs3, Poly3};
pub use nalgebra::Vector3 as Vec3;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::geom3::rand::random_polytope;
    pub use crate::geom3::special::{axis_box, tetrahedron_corner, unit_cube};
    pub use crate::geom3::{
        enumerate_vertices, enumerate_vertices_with, filter_vertices, find_interior,
        find_interior_with, overlap_margin, overlap_margin_with, overlaps, overlaps_with,
        Enumeration, GeomError, HPoly3, Hs3, InteriorSource, Poly3, DEFAULT_EPS,
    };
    pub use crate::hull::{HullError, HullOracle, ParryHull};
    pub use crate::lp::{
        DenseSimplex, LpOracle, LpSolution, LpStatus, SeidelCfg, SeidelLp, SimplexCfg,
    };
    pub use nalgebra::Vector3 as Vec3;
}
