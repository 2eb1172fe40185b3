//! Core 3D types: half-spaces, H-rep systems, and polyhedra with lazy H/V caches.

use std::fmt;

use nalgebra::{Matrix3xX, MatrixXx4, RowVector4, Vector3};

use super::cfg::{DEFAULT_EPS, FEAS_EPS};
use super::enumerate::enumerate_vertices;
use crate::hull::HullError;

/// Closed half-space `n · x + d <= 0` in R^3.
///
/// Invariants:
/// - `n` is not normalized; `d` is any finite real.
/// - Dense row layout is `(a, b, c, d)` = `(n.x, n.y, n.z, d)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hs3 {
    pub n: Vector3<f64>,
    pub d: f64,
}

impl Hs3 {
    #[inline]
    pub fn new(n: Vector3<f64>, d: f64) -> Self {
        Self { n, d }
    }
    /// Signed residual `n·p + d` (negative strictly inside).
    #[inline]
    pub fn value(&self, p: Vector3<f64>) -> f64 {
        self.n.dot(&p) + self.d
    }
    #[inline]
    pub fn satisfies_eps(&self, p: Vector3<f64>, eps: f64) -> bool {
        self.value(p) <= eps
    }
    #[inline]
    pub fn row(&self) -> RowVector4<f64> {
        RowVector4::new(self.n.x, self.n.y, self.n.z, self.d)
    }
}

/// Ordered half-space system (H-representation).
///
/// The system may describe an empty, unbounded, or bounded region; nothing
/// here checks which. Row order is preserved for reproducibility.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HPoly3 {
    pub hs: Vec<Hs3>,
}

impl HPoly3 {
    #[inline]
    pub fn new(hs: Vec<Hs3>) -> Self {
        Self { hs }
    }

    /// Build from rows `(a, b, c, d)`.
    pub fn from_rows(rows: &[[f64; 4]]) -> Self {
        let hs = rows
            .iter()
            .map(|r| Hs3::new(Vector3::new(r[0], r[1], r[2]), r[3]))
            .collect();
        Self { hs }
    }

    /// Build from a dense `m×4` matrix, one half-space per row.
    pub fn from_matrix(m: &MatrixXx4<f64>) -> Self {
        let hs = m
            .row_iter()
            .map(|r| Hs3::new(Vector3::new(r[0], r[1], r[2]), r[3]))
            .collect();
        Self { hs }
    }

    pub fn to_matrix(&self) -> MatrixXx4<f64> {
        MatrixXx4::from_fn(self.hs.len(), |i, j| self.hs[i].row()[j])
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.hs.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.hs.is_empty()
    }

    /// Append inequality (intersection).
    #[inline]
    pub fn push(&mut self, hs: Hs3) {
        self.hs.push(hs);
    }

    /// Stacked system whose solutions are the intersection of both regions.
    pub fn intersect(&self, other: &HPoly3) -> HPoly3 {
        let mut hs = Vec::with_capacity(self.hs.len() + other.hs.len());
        hs.extend_from_slice(&self.hs);
        hs.extend_from_slice(&other.hs);
        HPoly3 { hs }
    }

    pub fn contains_eps(&self, p: Vector3<f64>, eps: f64) -> bool {
        self.hs.iter().all(|h| h.satisfies_eps(p, eps))
    }

    /// Strict membership with positive margin on every row.
    pub fn contains_strictly(&self, p: Vector3<f64>) -> bool {
        self.hs.iter().all(|h| h.value(p) < 0.0)
    }
}

/// Points as a dense `3×n` buffer, one column per point.
pub fn points_to_matrix(points: &[Vector3<f64>]) -> Matrix3xX<f64> {
    Matrix3xX::from_fn(points.len(), |i, j| points[j][i])
}

pub fn points_from_matrix(m: &Matrix3xX<f64>) -> Vec<Vector3<f64>> {
    m.column_iter().map(|c| Vector3::new(c[0], c[1], c[2])).collect()
}

/// Polyhedron in R^3; either representation may be empty, compute on demand.
///
/// Invariants:
/// - `h` and `v` are caches; `v` is derived from `h` and cleared when `h` changes.
/// - `interior`, when set, is strictly inside `h`.
#[derive(Clone, Debug, Default)]
pub struct Poly3 {
    pub h: HPoly3,
    pub v: Vec<Vector3<f64>>,
    pub interior: Option<Vector3<f64>>,
}

impl Poly3 {
    #[inline]
    pub fn from_h(h: HPoly3) -> Self {
        Self {
            h,
            v: Vec::new(),
            interior: None,
        }
    }

    /// Append inequality (intersection).
    #[inline]
    pub fn intersect_halfspace(&mut self, hs: Hs3) {
        self.h.push(hs);
        // Both caches depend on the full system.
        self.v.clear();
        self.interior = None;
    }

    /// H→V via polar duality; caches the interior point it used.
    pub fn ensure_vertices_from_h(&mut self) -> Result<&[Vector3<f64>], GeomError> {
        if self.v.is_empty() {
            let out = enumerate_vertices(&self.h, self.interior, DEFAULT_EPS)?;
            self.interior = Some(out.interior);
            self.v = out.vertices;
        }
        Ok(&self.v)
    }

    /// Every cached vertex satisfies every inequality (with `FEAS_EPS` slack).
    pub fn is_consistent(&self) -> bool {
        self.v.iter().all(|&x| self.h.contains_eps(x, FEAS_EPS))
    }
}

/// Failures surfaced by interior search and vertex enumeration.
#[derive(Clone, Debug, PartialEq)]
pub enum GeomError {
    /// Shift LP optimum is non-negative: no point with positive margin.
    EmptyOrDegenerateRegion { objective: f64 },
    /// LP oracle returned a non-finite objective (infeasible or unbounded).
    InfeasibleOrUnboundedLp { objective: f64 },
    /// Supplied interior point is not strictly inside row `row`.
    InteriorNotStrict { row: usize },
    /// The dual hull does not enclose the origin: the region is unbounded.
    UnboundedRegion,
    /// Convex hull of the dual point cloud could not be built.
    HullConstruction(HullError),
}

impl fmt::Display for GeomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeomError::EmptyOrDegenerateRegion { objective } => write!(
                f,
                "half-space system has no interior (shift LP optimum {objective} >= 0)"
            ),
            GeomError::InfeasibleOrUnboundedLp { objective } => {
                write!(f, "shift LP is infeasible or unbounded (objective {objective})")
            }
            GeomError::InteriorNotStrict { row } => {
                write!(f, "interior point is not strictly inside half-space {row}")
            }
            GeomError::UnboundedRegion => write!(f, "half-space system is unbounded"),
            GeomError::HullConstruction(e) => write!(f, "dual convex hull failed: {e}"),
        }
    }
}

impl std::error::Error for GeomError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GeomError::HullConstruction(e) => Some(e),
            _ => None,
        }
    }
}

impl From<HullError> for GeomError {
    fn from(e: HullError) -> Self {
        GeomError::HullConstruction(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn matrix_roundtrip_keeps_row_order() {
        let p = HPoly3::from_rows(&[[1.0, 0.0, 0.0, -1.0], [0.0, -2.0, 0.0, 0.5]]);
        let m = p.to_matrix();
        assert_eq!(m.nrows(), 2);
        assert_eq!(m[(1, 1)], -2.0);
        assert_eq!(HPoly3::from_matrix(&m), p);
    }

    #[test]
    fn halfspace_sign_convention() {
        // x - 1 <= 0
        let h = Hs3::new(vector![1.0, 0.0, 0.0], -1.0);
        assert!(h.satisfies_eps(vector![0.5, 3.0, -7.0], 0.0));
        assert!(!h.satisfies_eps(vector![1.5, 0.0, 0.0], 0.0));
        assert!((h.value(vector![1.0, 0.0, 0.0])).abs() < 1e-15);
    }

    #[test]
    fn intersect_stacks_rows() {
        let a = HPoly3::from_rows(&[[1.0, 0.0, 0.0, -1.0]]);
        let b = HPoly3::from_rows(&[[-1.0, 0.0, 0.0, 0.0], [0.0, 1.0, 0.0, -1.0]]);
        let ab = a.intersect(&b);
        assert_eq!(ab.len(), 3);
        assert_eq!(ab.hs[0], a.hs[0]);
        assert_eq!(ab.hs[2], b.hs[1]);
    }

    #[test]
    fn points_matrix_columns() {
        let pts = vec![vector![1.0, 2.0, 3.0], vector![4.0, 5.0, 6.0]];
        let m = points_to_matrix(&pts);
        assert_eq!(m.ncols(), 2);
        assert_eq!(m[(2, 1)], 6.0);
        assert_eq!(points_from_matrix(&m), pts);
    }
}
