//! Volumetric overlap of two H-rep polyhedra.
//!
//! Rows of both systems are stacked as given (no normalization) and the same
//! uniform-shift LP as interior search decides whether the intersection keeps
//! a margin above `eps`. Touching boundaries do not count.

use super::interior::shift_lp;
use super::types::HPoly3;
use crate::lp::{LpOracle, SeidelLp};

/// `true` iff `a ∩ b` has interior margin larger than `eps`.
pub fn overlaps(a: &HPoly3, b: &HPoly3, eps: f64) -> bool {
    overlaps_with(&SeidelLp::default(), a, b, eps)
}

pub fn overlaps_with<L: LpOracle + ?Sized>(lp: &L, a: &HPoly3, b: &HPoly3, eps: f64) -> bool {
    overlap_margin_with(lp, a, b).is_some_and(|w| -w < -eps)
}

/// Optimal uniform shift `w` of the stacked system, or `None` when the LP
/// is infeasible or unbounded. Positive means overlapping interiors.
pub fn overlap_margin(a: &HPoly3, b: &HPoly3) -> Option<f64> {
    overlap_margin_with(&SeidelLp::default(), a, b)
}

pub fn overlap_margin_with<L: LpOracle + ?Sized>(lp: &L, a: &HPoly3, b: &HPoly3) -> Option<f64> {
    let stacked = a.intersect(b);
    let sol = shift_lp(lp, &stacked.hs);
    if sol.objective.is_finite() {
        Some(-sol.objective)
    } else {
        tracing::debug!(objective = sol.objective, rows = stacked.len(), "overlap LP failed");
        None
    }
}
