//! H→V by polar duality around an interior point.
//!
//! Translate so the interior point is the origin, map each face `nᵢ·y <= bᵢ`
//! (with `bᵢ > 0`) to the dual point `nᵢ / bᵢ`, hull the dual cloud, and map
//! every hull facet back to the primal vertex it is polar to. Coplanar dual
//! points produce several facets for the same primal vertex; the lattice
//! filter removes those copies.

use nalgebra::Vector3;

use super::filter::filter_vertices;
use super::interior::find_interior_with;
use super::types::{GeomError, HPoly3};
use crate::hull::{HullOracle, ParryHull, DEFAULT_EPS as HULL_EPS};
use crate::lp::{LpOracle, SeidelLp};

/// Where the enumeration's interior point came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InteriorSource {
    Supplied,
    Computed,
}

#[derive(Clone, Debug)]
pub struct Enumeration {
    pub vertices: Vec<Vector3<f64>>,
    /// Point the duality was taken around; strictly inside every row.
    pub interior: Vector3<f64>,
    pub source: InteriorSource,
}

/// Vertices of a bounded `poly` with the default LP and hull backends.
///
/// `interior`, when given, must be strictly inside every row; otherwise one
/// is computed with [`find_interior`](super::find_interior).
pub fn enumerate_vertices(
    poly: &HPoly3,
    interior: Option<Vector3<f64>>,
    eps: f64,
) -> Result<Enumeration, GeomError> {
    enumerate_vertices_with(&SeidelLp::default(), &ParryHull, poly, interior, eps)
}

pub fn enumerate_vertices_with<L, H>(
    lp: &L,
    hull: &H,
    poly: &HPoly3,
    interior: Option<Vector3<f64>>,
    eps: f64,
) -> Result<Enumeration, GeomError>
where
    L: LpOracle + ?Sized,
    H: HullOracle + ?Sized,
{
    let (interior, source) = match interior {
        Some(p) => (p, InteriorSource::Supplied),
        None => (find_interior_with(lp, poly)?, InteriorSource::Computed),
    };
    let vertices = vertices_around(hull, poly, interior, eps)?;
    Ok(Enumeration {
        vertices,
        interior,
        source,
    })
}

fn vertices_around<H: HullOracle + ?Sized>(
    hull: &H,
    poly: &HPoly3,
    interior: Vector3<f64>,
    eps: f64,
) -> Result<Vec<Vector3<f64>>, GeomError> {
    let mut dual = Vec::with_capacity(poly.len());
    for (row, h) in poly.hs.iter().enumerate() {
        let b = -h.d - h.n.dot(&interior);
        if !(b > 0.0) {
            tracing::debug!(row, b, "interior point on or outside half-space");
            return Err(GeomError::InteriorNotStrict { row });
        }
        dual.push(h.n / b);
    }

    let tris = hull.hull(&dual, false, eps.abs().min(HULL_EPS))?;

    let mut raw = Vec::with_capacity(tris.len());
    for &[i0, i1, i2] in &tris {
        let (p0, p1, p2) = (dual[i0], dual[i1], dual[i2]);
        // Clockwise winding: `normal` points towards the origin when the
        // origin is strictly inside the dual hull.
        let normal = (p1 - p0).cross(&(p2 - p1));
        let denom = normal.dot(&p1);
        if !(denom < 0.0) {
            tracing::debug!(denom, "dual facet does not enclose the origin");
            return Err(GeomError::UnboundedRegion);
        }
        raw.push(normal / denom);
    }

    Ok(filter_vertices(&raw, eps)
        .into_iter()
        .map(|v| v + interior)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom3::cfg::DEFAULT_EPS;
    use crate::geom3::special::{tetrahedron_corner, unit_cube};
    use crate::hull::HullError;
    use nalgebra::vector;

    /// Same point set up to order, each point matched within `tol`.
    fn same_points(a: &[Vector3<f64>], b: &[Vector3<f64>], tol: f64) -> bool {
        let covered = |x: &[Vector3<f64>], y: &[Vector3<f64>]| {
            x.iter().all(|p| y.iter().any(|q| (p - q).norm() < tol))
        };
        a.len() == b.len() && covered(a, b) && covered(b, a)
    }

    #[test]
    fn cube_has_eight_corners() {
        let out = enumerate_vertices(&unit_cube(), None, DEFAULT_EPS).unwrap();
        assert_eq!(out.source, InteriorSource::Computed);
        assert_eq!(out.vertices.len(), 8);
        for v in &out.vertices {
            for c in v.iter() {
                assert!(c.abs() < 1e-9 || (c - 1.0).abs() < 1e-9, "{v:?}");
            }
        }
    }

    #[test]
    fn supplied_interior_matches_computed() {
        let cube = unit_cube();
        let auto = enumerate_vertices(&cube, None, DEFAULT_EPS).unwrap();
        let given =
            enumerate_vertices(&cube, Some(vector![0.2, 0.7, 0.4]), DEFAULT_EPS).unwrap();
        assert_eq!(given.source, InteriorSource::Supplied);
        assert_eq!(given.interior, vector![0.2, 0.7, 0.4]);
        assert!(
            same_points(&auto.vertices, &given.vertices, 1e-9),
            "{:?} vs {:?}",
            auto.vertices,
            given.vertices
        );
    }

    #[test]
    fn tetrahedron_corners() {
        let out = enumerate_vertices(&tetrahedron_corner(2.0), None, DEFAULT_EPS).unwrap();
        let want = [
            vector![0.0, 0.0, 0.0],
            vector![0.0, 0.0, 2.0],
            vector![0.0, 2.0, 0.0],
            vector![2.0, 0.0, 0.0],
        ];
        assert!(same_points(&out.vertices, &want, 1e-9), "{:?}", out.vertices);
    }

    #[test]
    fn near_zero_coordinates_still_match() {
        // -5.55e-17 and 0.0 are the same corner for matching purposes.
        let a = [vector![-5.55e-17, 1.0, 0.0], vector![0.0, 0.0, 1.0]];
        let b = [vector![0.0, 0.0, 1.0], vector![0.0, 1.0, 0.0]];
        assert!(same_points(&a, &b, 1e-9));
        assert!(!same_points(&a, &b[..1], 1e-9));
    }

    #[test]
    fn interior_on_boundary_is_rejected() {
        let err = enumerate_vertices(&unit_cube(), Some(vector![0.0, 0.5, 0.5]), DEFAULT_EPS)
            .unwrap_err();
        assert!(matches!(err, GeomError::InteriorNotStrict { .. }));
        let err = enumerate_vertices(&unit_cube(), Some(vector![2.0, 0.5, 0.5]), DEFAULT_EPS)
            .unwrap_err();
        assert!(matches!(err, GeomError::InteriorNotStrict { .. }));
    }

    #[test]
    fn redundant_rows_do_not_add_vertices() {
        let mut cube = unit_cube();
        // x <= 5 and x + y + z <= 10 never touch the cube.
        cube.push(crate::geom3::Hs3::new(vector![1.0, 0.0, 0.0], -5.0));
        cube.push(crate::geom3::Hs3::new(vector![1.0, 1.0, 1.0], -10.0));
        let out = enumerate_vertices(&cube, None, DEFAULT_EPS).unwrap();
        assert_eq!(out.vertices.len(), 8);
    }

    #[test]
    fn open_box_with_supplied_interior_is_unbounded() {
        // Four walls and a floor, no ceiling in z.
        let poly = HPoly3::from_rows(&[
            [1.0, 0.0, 0.0, -1.0],
            [-1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, -1.0],
            [0.0, -1.0, 0.0, 0.0],
            [0.0, 0.0, -1.0, 0.0],
        ]);
        let res = enumerate_vertices(&poly, Some(vector![0.5, 0.5, 0.5]), DEFAULT_EPS);
        assert!(matches!(res, Err(GeomError::UnboundedRegion)), "{res:?}");
    }

    #[test]
    fn octant_has_too_few_faces_for_a_hull() {
        let poly = HPoly3::from_rows(&[
            [-1.0, 0.0, 0.0, 0.0],
            [0.0, -1.0, 0.0, 0.0],
            [0.0, 0.0, -1.0, 0.0],
        ]);
        let res = enumerate_vertices(&poly, Some(vector![1.0, 1.0, 1.0]), DEFAULT_EPS);
        assert!(
            matches!(
                res,
                Err(GeomError::HullConstruction(HullError::TooFewPoints { got: 3 }))
            ),
            "{res:?}"
        );
    }

    #[test]
    fn infinite_prism_has_a_flat_dual() {
        // Unit square column along z: every dual point lies in z = 0.
        let poly = HPoly3::from_rows(&[
            [1.0, 0.0, 0.0, -1.0],
            [-1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, -1.0],
            [0.0, -1.0, 0.0, 0.0],
        ]);
        let res = enumerate_vertices(&poly, Some(vector![0.5, 0.5, 0.0]), DEFAULT_EPS);
        assert!(
            matches!(res, Err(GeomError::HullConstruction(HullError::Degenerate))),
            "{res:?}"
        );
    }
}
