//! Strictly interior points via the uniform-shift LP.
//!
//! With unit-normal rows, `maximize w s.t. nᵢ·x + w <= -dᵢ` pushes every
//! face inward by the same distance `w`; the optimum is the point the system
//! collapses to. A positive optimal `w` means a non-degenerate interior.

use nalgebra::{DVector, MatrixXx4, Vector3, Vector4};

use super::types::{GeomError, HPoly3, Hs3};
use crate::lp::{LpOracle, LpSolution, SeidelLp};

/// Point strictly inside `poly`, using the default LP backend.
pub fn find_interior(poly: &HPoly3) -> Result<Vector3<f64>, GeomError> {
    find_interior_with(&SeidelLp::default(), poly)
}

/// Point strictly inside `poly`.
///
/// Errors
/// - `EmptyOrDegenerateRegion` when the best uniform shift is not positive.
/// - `InfeasibleOrUnboundedLp` when the LP objective is not finite
///   (e.g. an unbounded region lets `w` grow without limit).
pub fn find_interior_with<L: LpOracle + ?Sized>(
    lp: &L,
    poly: &HPoly3,
) -> Result<Vector3<f64>, GeomError> {
    let mut rows = Vec::with_capacity(poly.len());
    for h in &poly.hs {
        let norm = h.n.norm();
        if norm == 0.0 {
            // `0·x + d <= 0`: vacuous when d <= 0, empty otherwise.
            if h.d > 0.0 {
                return Err(GeomError::EmptyOrDegenerateRegion { objective: h.d });
            }
            continue;
        }
        rows.push(Hs3::new(h.n / norm, h.d / norm));
    }

    let sol = shift_lp(lp, &rows);
    if !sol.objective.is_finite() {
        tracing::debug!(objective = sol.objective, status = ?sol.status, "interior LP failed");
        return Err(GeomError::InfeasibleOrUnboundedLp {
            objective: sol.objective,
        });
    }
    if sol.objective >= 0.0 {
        tracing::debug!(objective = sol.objective, "no positive interior margin");
        return Err(GeomError::EmptyOrDegenerateRegion {
            objective: sol.objective,
        });
    }
    Ok(sol.x.xyz())
}

/// `minimize -w s.t. nᵢ·x + w <= -dᵢ` over `(x, y, z, w)`, rows used as given.
pub(crate) fn shift_lp<L: LpOracle + ?Sized>(lp: &L, hs: &[Hs3]) -> LpSolution {
    let a = MatrixXx4::from_fn(hs.len(), |i, j| if j < 3 { hs[i].n[j] } else { 1.0 });
    let b = DVector::from_fn(hs.len(), |i, _| -hs[i].d);
    let c = Vector4::new(0.0, 0.0, 0.0, -1.0);
    lp.solve(&c, &a, &b)
}
