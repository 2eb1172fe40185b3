//! Near-duplicate removal on a scale-relative lattice.

use std::collections::BTreeSet;

use nalgebra::Vector3;

/// Drop points that land on the same lattice cell as an earlier point.
///
/// The cell size is `mag * max(|eps| / mag, f64::EPSILON)` with `mag` the
/// largest absolute coordinate, so tolerance tracks the data's scale. Input
/// order is kept and the first representative of each cell wins.
pub fn filter_vertices(points: &[Vector3<f64>], eps: f64) -> Vec<Vector3<f64>> {
    let Some(first) = points.first() else {
        return Vec::new();
    };
    let mag = points.iter().map(|p| p.amax()).fold(0.0, f64::max);
    if mag == 0.0 {
        return vec![*first];
    }
    let res = mag * (eps.abs() / mag).max(f64::EPSILON);

    let mut seen = BTreeSet::new();
    let mut out = Vec::with_capacity(points.len());
    for p in points {
        if seen.insert(cell(p, res)) {
            out.push(*p);
        }
    }
    out
}

#[inline]
fn cell(p: &Vector3<f64>, res: f64) -> (i64, i64, i64) {
    (
        (p.x / res).round() as i64,
        (p.y / res).round() as i64,
        (p.z / res).round() as i64,
    )
}
