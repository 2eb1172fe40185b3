//! Named polyhedra for tests, benches, and the CLI.

use nalgebra::Vector3;

use super::types::{HPoly3, Hs3};

/// Axis-aligned box `min <= x <= max`, two rows per axis (upper then lower).
pub fn axis_box(min: Vector3<f64>, max: Vector3<f64>) -> HPoly3 {
    let mut hs = Vec::with_capacity(6);
    for axis in 0..3 {
        let e = Vector3::ith(axis, 1.0);
        hs.push(Hs3::new(e, -max[axis]));
        hs.push(Hs3::new(-e, min[axis]));
    }
    HPoly3::new(hs)
}

/// `[0, 1]^3`.
pub fn unit_cube() -> HPoly3 {
    axis_box(Vector3::zeros(), Vector3::repeat(1.0))
}

/// Corner simplex `x, y, z >= 0`, `x + y + z <= s`.
pub fn tetrahedron_corner(s: f64) -> HPoly3 {
    HPoly3::from_rows(&[
        [-1.0, 0.0, 0.0, 0.0],
        [0.0, -1.0, 0.0, 0.0],
        [0.0, 0.0, -1.0, 0.0],
        [1.0, 1.0, 1.0, -s],
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn box_membership() {
        let b = axis_box(vector![-1.0, 0.0, 2.0], vector![1.0, 3.0, 4.0]);
        assert_eq!(b.len(), 6);
        assert!(b.contains_strictly(vector![0.0, 1.5, 3.0]));
        assert!(b.contains_eps(vector![1.0, 3.0, 4.0], 0.0));
        assert!(!b.contains_eps(vector![0.0, 1.5, 4.5], 0.0));
    }

    #[test]
    fn tetrahedron_membership() {
        let t = tetrahedron_corner(1.0);
        assert!(t.contains_strictly(vector![0.2, 0.2, 0.2]));
        assert!(!t.contains_eps(vector![0.5, 0.5, 0.5], 0.0));
    }
}
