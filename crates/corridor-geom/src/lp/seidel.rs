//! Seidel's randomized incremental LP for `min cᵀx s.t. A x <= b`, `x ∈ R^4` free.
//!
//! Algorithm
//! - Rows are scaled to unit normal and visited in a seeded random order.
//! - The running optimum starts at the corner of the box `|xᵢ| <= bound` that
//!   minimizes `c`. A row the optimum violates must be tight at the new
//!   optimum, so the problem is restricted to that hyperplane: one variable
//!   is eliminated, the earlier rows (plus that variable's box sides) are
//!   projected, and the same procedure runs one dimension lower.
//! - Expected work is linear in the row count for fixed dimension.
//! - The problem is solved for `bound` and `2·bound`; an objective that keeps
//!   improving with the box is reported as unbounded.

use nalgebra::{DVector, MatrixXx4, Vector4};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::{LpOracle, LpSolution, LpStatus};

#[derive(Clone, Copy, Debug)]
pub struct SeidelCfg {
    /// Relative violation threshold for the incremental step.
    pub tol: f64,
    /// Half-width of the bounding box that keeps every subproblem bounded.
    pub bound: f64,
    /// Seed of the row permutation; fixed so results are reproducible.
    pub seed: u64,
}

impl Default for SeidelCfg {
    fn default() -> Self {
        Self {
            tol: 1e-12,
            bound: 1e8,
            seed: 0x5eed_1d,
        }
    }
}

/// Default `LpOracle`: expected linear time in the number of rows.
#[derive(Clone, Copy, Debug, Default)]
pub struct SeidelLp {
    pub cfg: SeidelCfg,
}

impl SeidelLp {
    #[inline]
    pub fn new(cfg: SeidelCfg) -> Self {
        Self { cfg }
    }
}

impl LpOracle for SeidelLp {
    fn solve(&self, c: &Vector4<f64>, a: &MatrixXx4<f64>, b: &DVector<f64>) -> LpSolution {
        let sol = solve_seidel(c, a, b, &self.cfg);
        if sol.status != LpStatus::Optimal {
            tracing::debug!(status = ?sol.status, rows = a.nrows(), "seidel LP did not reach an optimum");
        }
        sol
    }
}

/// `a·x <= b` in the current (possibly reduced) coordinates.
#[derive(Clone, Debug)]
struct Row {
    a: DVector<f64>,
    b: f64,
}

/// Coefficients at or below this are treated as exact zeros after projection.
const COEF_EPS: f64 = 1e-12;
/// Absolute slack for rows that reduce to `0 <= b`.
const FEAS_EPS: f64 = 1e-9;

pub(crate) fn solve_seidel(
    c: &Vector4<f64>,
    a: &MatrixXx4<f64>,
    b: &DVector<f64>,
    cfg: &SeidelCfg,
) -> LpSolution {
    let m = a.nrows();
    if b.len() != m
        || !c.iter().all(|v| v.is_finite())
        || !a.iter().all(|v| v.is_finite())
        || !b.iter().all(|v| v.is_finite())
    {
        return LpSolution::failed(LpStatus::InvalidInput);
    }

    let mut rows = Vec::with_capacity(m);
    for (i, r) in a.row_iter().enumerate() {
        let norm = r.norm();
        if norm == 0.0 {
            if b[i] < -FEAS_EPS {
                return LpSolution::failed(LpStatus::Infeasible);
            }
            continue;
        }
        rows.push(Row {
            a: DVector::from_iterator(4, r.iter().map(|v| v / norm)),
            b: b[i] / norm,
        });
    }
    rows.shuffle(&mut StdRng::seed_from_u64(cfg.seed));

    let cost = DVector::from_column_slice(c.as_slice());
    let Some(x) = incremental(&rows, &cost, cfg) else {
        return LpSolution::failed(LpStatus::Infeasible);
    };
    let objective = cost.dot(&x);
    // A bounded optimum does not move when the box grows.
    let wide = SeidelCfg {
        bound: 2.0 * cfg.bound,
        ..*cfg
    };
    let Some(far) = incremental(&rows, &cost, &wide) else {
        return LpSolution::failed(LpStatus::Infeasible);
    };
    if cost.dot(&far) < objective - 1e-6 * (1.0 + objective.abs()) {
        return LpSolution::failed(LpStatus::Unbounded);
    }
    let x = Vector4::new(x[0], x[1], x[2], x[3]);
    LpSolution {
        x,
        objective,
        status: LpStatus::Optimal,
    }
}

/// Optimum over `rows` and the implicit box, or `None` if empty.
fn incremental(rows: &[Row], c: &DVector<f64>, cfg: &SeidelCfg) -> Option<DVector<f64>> {
    if c.len() == 1 {
        return interval(rows, c[0], cfg.bound);
    }
    let mut x = DVector::from_fn(c.len(), |k, _| {
        if c[k] > 0.0 {
            -cfg.bound
        } else if c[k] < 0.0 {
            cfg.bound
        } else {
            0.0
        }
    });
    for (i, h) in rows.iter().enumerate() {
        let lhs = h.a.dot(&x);
        if lhs - h.b <= cfg.tol * (1.0 + h.b.abs() + lhs.abs()) {
            continue;
        }
        x = on_hyperplane(&rows[..i], h, c, cfg)?;
    }
    Some(x)
}

/// Optimum over `prev` and the box, restricted to `h.a·x = h.b`.
fn on_hyperplane(
    prev: &[Row],
    h: &Row,
    c: &DVector<f64>,
    cfg: &SeidelCfg,
) -> Option<DVector<f64>> {
    let d = c.len();
    let j = h.a.iamax();
    let p = h.a[j];
    if p.abs() <= COEF_EPS {
        return None;
    }
    // x_j = (h.b - Σ_{k≠j} h.a_k y_k) / p
    let reduce = |v: &DVector<f64>| {
        DVector::from_fn(d - 1, |k, _| {
            let k = lift_index(k, j);
            v[k] - v[j] * h.a[k] / p
        })
    };

    let mut sub = Vec::with_capacity(prev.len() + 2);
    for r in prev {
        sub.push(Row {
            a: reduce(&r.a),
            b: r.b - r.a[j] * h.b / p,
        });
    }
    for s in [1.0, -1.0] {
        let e = DVector::from_fn(d, |k, _| if k == j { s } else { 0.0 });
        sub.push(Row {
            a: reduce(&e),
            b: cfg.bound - s * h.b / p,
        });
    }

    let y = incremental(&sub, &reduce(c), cfg)?;
    let mut x = DVector::zeros(d);
    let mut dot = 0.0;
    for k in 0..d - 1 {
        let kk = lift_index(k, j);
        x[kk] = y[k];
        dot += h.a[kk] * y[k];
    }
    x[j] = (h.b - dot) / p;
    Some(x)
}

#[inline]
fn lift_index(k: usize, skipped: usize) -> usize {
    if k < skipped {
        k
    } else {
        k + 1
    }
}

/// One-dimensional base case: clip `[-bound, bound]` by every row.
fn interval(rows: &[Row], c: f64, bound: f64) -> Option<DVector<f64>> {
    let (mut lo, mut hi) = (-bound, bound);
    for r in rows {
        let a = r.a[0];
        if a.abs() <= COEF_EPS {
            if r.b < -FEAS_EPS {
                return None;
            }
            continue;
        }
        let v = r.b / a;
        if a > 0.0 {
            hi = hi.min(v);
        } else {
            lo = lo.max(v);
        }
    }
    if lo > hi {
        if lo - hi > FEAS_EPS * (1.0 + lo.abs() + hi.abs()) {
            return None;
        }
        return Some(DVector::from_element(1, 0.5 * (lo + hi)));
    }
    let x = if c > 0.0 {
        lo
    } else if c < 0.0 {
        hi
    } else {
        0.0_f64.clamp(lo, hi)
    };
    Some(DVector::from_element(1, x))
}
