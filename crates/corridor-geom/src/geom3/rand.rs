//! Seeded random bounded polytopes.
//!
//! Model
//! - A random centre in `[-5, 5]^3` and `m` tangent planes of a sphere of
//!   radius in `[0.5, 1.5]` per plane, plus four tetrahedral caps at radius 2
//!   so the result is always bounded and contains the centre strictly.

use nalgebra::Vector3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::types::{HPoly3, Hs3};

/// `m` random faces plus four bounding caps; same `(m, seed)`, same output.
pub fn random_polytope(m: usize, seed: u64) -> HPoly3 {
    let mut rng = StdRng::seed_from_u64(seed);
    let centre = Vector3::from_fn(|_, _| rng.gen_range(-5.0..5.0));

    let caps = [
        Vector3::new(1.0, 1.0, 1.0),
        Vector3::new(1.0, -1.0, -1.0),
        Vector3::new(-1.0, 1.0, -1.0),
        Vector3::new(-1.0, -1.0, 1.0),
    ];
    let mut hs: Vec<Hs3> = caps
        .iter()
        .map(|c| tangent(c.normalize(), 2.0, centre))
        .collect();
    for _ in 0..m {
        let n = unit_direction(&mut rng);
        let r = rng.gen_range(0.5..1.5);
        hs.push(tangent(n, r, centre));
    }
    HPoly3::new(hs)
}

/// `n·(x - centre) <= r` as `n·x + d <= 0`.
fn tangent(n: Vector3<f64>, r: f64, centre: Vector3<f64>) -> Hs3 {
    Hs3::new(n, -r - n.dot(&centre))
}

fn unit_direction<R: Rng>(rng: &mut R) -> Vector3<f64> {
    loop {
        let v = Vector3::from_fn(|_, _| rng.gen_range(-1.0..1.0));
        let len = v.norm();
        if len > 0.1 && len <= 1.0 {
            return v / len;
        }
    }
}
