//! `HullOracle` backed by parry's 3D convex hull.
//!
//! parry returns its own compacted vertex list; vertices are mapped back to
//! caller indices by exact coordinate bits, which is sound because the hull
//! vertices are copies of input points. Winding is recomputed against the
//! hull centroid so the `ccw` flag does not depend on parry's convention.

use std::collections::HashMap;

use nalgebra::Vector3;
use parry3d_f64::math::Point;
use parry3d_f64::transformation::{try_convex_hull, ConvexHullError};

use super::{HullError, HullOracle};

#[derive(Clone, Copy, Debug, Default)]
pub struct ParryHull;

impl HullOracle for ParryHull {
    fn hull(
        &self,
        points: &[Vector3<f64>],
        ccw: bool,
        eps: f64,
    ) -> Result<Vec<[usize; 3]>, HullError> {
        if points.len() < 4 {
            return Err(HullError::TooFewPoints { got: points.len() });
        }
        if points.iter().any(|p| !p.iter().all(|c| c.is_finite())) {
            return Err(HullError::NonFinite);
        }

        let mut index: HashMap<[u64; 3], usize> = HashMap::with_capacity(points.len());
        let mut unique = Vec::with_capacity(points.len());
        for (i, p) in points.iter().enumerate() {
            index.entry(bits(p.x, p.y, p.z)).or_insert_with(|| {
                unique.push(*p);
                i
            });
        }
        let scale = points.iter().map(|p| p.amax()).fold(0.0, f64::max);
        let tol = eps.abs() * scale;
        if unique.len() < 4 || !spans_volume(&unique, tol) {
            return Err(HullError::Degenerate);
        }

        let cloud: Vec<Point<f64>> = unique.iter().map(|p| Point::new(p.x, p.y, p.z)).collect();
        let (verts, faces) = try_convex_hull(&cloud).map_err(|e| {
            tracing::debug!(error = ?e, points = cloud.len(), "parry hull failed");
            map_error(e, cloud.len())
        })?;

        let mut ids = Vec::with_capacity(verts.len());
        for v in &verts {
            ids.push(*index.get(&bits(v.x, v.y, v.z)).ok_or(HullError::Topology)?);
        }
        let centroid = ids.iter().map(|&i| points[i]).sum::<Vector3<f64>>() / ids.len() as f64;

        let mut tris = Vec::with_capacity(faces.len());
        let mut height = 0.0_f64;
        for f in &faces {
            let t = [
                *ids.get(f[0] as usize).ok_or(HullError::Topology)?,
                *ids.get(f[1] as usize).ok_or(HullError::Topology)?,
                *ids.get(f[2] as usize).ok_or(HullError::Topology)?,
            ];
            let (p0, p1, p2) = (points[t[0]], points[t[1]], points[t[2]]);
            let n = (p1 - p0).cross(&(p2 - p0));
            let area = n.norm();
            if area <= f64::EPSILON * scale * scale {
                continue;
            }
            let h = n.dot(&(p0 - centroid)) / area;
            height = height.max(h.abs());
            let outward = h > 0.0;
            tris.push(if outward == ccw { t } else { [t[0], t[2], t[1]] });
        }
        if tris.is_empty() || height <= tol {
            return Err(HullError::Degenerate);
        }
        Ok(tris)
    }
}

/// Hash key with `-0.0` folded into `0.0`.
#[inline]
fn bits(x: f64, y: f64, z: f64) -> [u64; 3] {
    [(x + 0.0).to_bits(), (y + 0.0).to_bits(), (z + 0.0).to_bits()]
}

fn map_error(e: ConvexHullError, got: usize) -> HullError {
    match e {
        ConvexHullError::MissingSupportPoint => HullError::Degenerate,
        ConvexHullError::IncompleteInput => HullError::TooFewPoints { got },
        _ => HullError::Topology,
    }
}

/// Whether some tetrahedron of `pts` is taller than `tol`.
fn spans_volume(pts: &[Vector3<f64>], tol: f64) -> bool {
    let p0 = pts[0];
    let far = |score: &dyn Fn(&Vector3<f64>) -> f64| {
        pts.iter()
            .map(|p| (score(p), *p))
            .fold((0.0, p0), |best, cur| if cur.0 > best.0 { cur } else { best })
    };
    let (d1, p1) = far(&|p| (p - p0).norm());
    if d1 <= tol {
        return false;
    }
    let axis = (p1 - p0) / d1;
    let (d2, p2) = far(&|p| (p - p0).cross(&axis).norm());
    if d2 <= tol {
        return false;
    }
    let normal = (p1 - p0).cross(&(p2 - p0)).normalize();
    let (d3, _) = far(&|p| (p - p0).dot(&normal).abs());
    d3 > tol
}
