//! Dense two-phase tableau simplex for `min cᵀx s.t. A x <= b`, `x ∈ R^4` free.
//!
//! Standard form
//! - Free variables are split `x = u - v` with `u, v >= 0`.
//! - Each row gets a slack; rows with `b_i < 0` are negated and get an
//!   artificial column so the starting basis is feasible.
//! - Phase I minimizes the sum of artificials; Phase II the real cost with
//!   artificial columns barred from entering.
//! - Bland's rule (lowest index enters, lowest basic index leaves on ties)
//!   keeps degenerate problems from cycling; every choice is deterministic.

use nalgebra::{DMatrix, DVector, MatrixXx4, Vector4};

use super::{LpOracle, LpSolution, LpStatus};

const NVAR: usize = 4;

/// Solver tolerances.
#[derive(Clone, Copy, Debug)]
pub struct SimplexCfg {
    /// Pivot, reduced-cost, and Phase I feasibility threshold.
    pub tol: f64,
    /// Cap on pivots across both phases.
    pub max_iter: usize,
}

impl Default for SimplexCfg {
    fn default() -> Self {
        Self {
            tol: 1e-9,
            max_iter: 10_000,
        }
    }
}

/// Default `LpOracle`: stateless, so a shared reference is safe across threads.
#[derive(Clone, Copy, Debug, Default)]
pub struct DenseSimplex {
    pub cfg: SimplexCfg,
}

impl DenseSimplex {
    #[inline]
    pub fn new(cfg: SimplexCfg) -> Self {
        Self { cfg }
    }
}

impl LpOracle for DenseSimplex {
    fn solve(&self, c: &Vector4<f64>, a: &MatrixXx4<f64>, b: &DVector<f64>) -> LpSolution {
        let sol = solve_dense(c, a, b, &self.cfg);
        if sol.status != LpStatus::Optimal {
            tracing::debug!(status = ?sol.status, rows = a.nrows(), "simplex did not reach an optimum");
        }
        sol
    }
}

enum Phase {
    Optimal,
    Unbounded,
    IterationLimit,
}

/// Tableau with constraint rows `0..m` and the reduced-cost row `m`.
///
/// Column `ncols` holds the right-hand side; `t[(m, ncols)]` is `-objective`.
struct Tableau {
    t: DMatrix<f64>,
    basis: Vec<usize>,
    m: usize,
    ncols: usize,
}

impl Tableau {
    fn objective(&self) -> f64 {
        -self.t[(self.m, self.ncols)]
    }

    /// Load `cost` and price out the current basis.
    fn set_objective(&mut self, cost: &[f64]) {
        let (m, rhs) = (self.m, self.ncols);
        for j in 0..rhs {
            self.t[(m, j)] = cost[j];
        }
        self.t[(m, rhs)] = 0.0;
        for i in 0..m {
            let cb = cost[self.basis[i]];
            if cb != 0.0 {
                for j in 0..=rhs {
                    let v = self.t[(i, j)];
                    self.t[(m, j)] -= cb * v;
                }
            }
        }
    }

    fn pivot(&mut self, r: usize, s: usize, tol: f64) {
        let rhs = self.ncols;
        let p = self.t[(r, s)];
        for j in 0..=rhs {
            self.t[(r, j)] /= p;
        }
        for i in 0..=self.m {
            if i == r {
                continue;
            }
            let f = self.t[(i, s)];
            if f != 0.0 {
                for j in 0..=rhs {
                    let v = self.t[(r, j)];
                    self.t[(i, j)] -= f * v;
                }
            }
        }
        // Round-off may push a degenerate basic value just below zero.
        for i in 0..self.m {
            let v = self.t[(i, rhs)];
            if v < 0.0 && v > -tol {
                self.t[(i, rhs)] = 0.0;
            }
        }
        self.basis[r] = s;
    }

    /// Iterate with entering candidates restricted to columns `0..allowed`.
    fn run(&mut self, allowed: usize, cfg: &SimplexCfg, iters: &mut usize) -> Phase {
        loop {
            if *iters >= cfg.max_iter {
                return Phase::IterationLimit;
            }
            let Some(s) = (0..allowed).find(|&j| self.t[(self.m, j)] < -cfg.tol) else {
                return Phase::Optimal;
            };
            let mut leave: Option<(usize, f64)> = None;
            for i in 0..self.m {
                let aij = self.t[(i, s)];
                if aij <= cfg.tol {
                    continue;
                }
                let ratio = self.t[(i, self.ncols)] / aij;
                let better = match leave {
                    None => true,
                    Some((r, best)) => {
                        ratio < best - cfg.tol
                            || (ratio <= best + cfg.tol && self.basis[i] < self.basis[r])
                    }
                };
                if better {
                    leave = Some((i, ratio));
                }
            }
            let Some((r, _)) = leave else {
                return Phase::Unbounded;
            };
            self.pivot(r, s, cfg.tol);
            *iters += 1;
        }
    }

    /// After Phase I, swap zero-level artificials out of the basis where possible.
    /// Rows with no usable pivot are redundant and keep their artificial at zero.
    fn drive_out_artificials(&mut self, art_start: usize, tol: f64) {
        for i in 0..self.m {
            if self.basis[i] < art_start {
                continue;
            }
            if let Some(j) = (0..art_start).find(|&j| self.t[(i, j)].abs() > tol) {
                self.pivot(i, j, tol);
            }
        }
    }
}

pub(crate) fn solve_dense(
    c: &Vector4<f64>,
    a: &MatrixXx4<f64>,
    b: &DVector<f64>,
    cfg: &SimplexCfg,
) -> LpSolution {
    let m = a.nrows();
    if b.len() != m
        || !c.iter().all(|v| v.is_finite())
        || !a.iter().all(|v| v.is_finite())
        || !b.iter().all(|v| v.is_finite())
    {
        return LpSolution::failed(LpStatus::InvalidInput);
    }

    let n_art = b.iter().filter(|&&bi| bi < 0.0).count();
    let art_start = 2 * NVAR + m;
    let ncols = art_start + n_art;
    let mut t = DMatrix::<f64>::zeros(m + 1, ncols + 1);
    let mut basis = vec![0usize; m];
    let mut art = art_start;
    for i in 0..m {
        let sign = if b[i] < 0.0 { -1.0 } else { 1.0 };
        for j in 0..NVAR {
            t[(i, j)] = sign * a[(i, j)];
            t[(i, j + NVAR)] = -sign * a[(i, j)];
        }
        t[(i, 2 * NVAR + i)] = sign;
        t[(i, ncols)] = sign * b[i];
        if b[i] < 0.0 {
            t[(i, art)] = 1.0;
            basis[i] = art;
            art += 1;
        } else {
            basis[i] = 2 * NVAR + i;
        }
    }
    let mut tab = Tableau { t, basis, m, ncols };
    let mut iters = 0usize;

    if n_art > 0 {
        let mut cost = vec![0.0; ncols];
        for v in cost.iter_mut().skip(art_start) {
            *v = 1.0;
        }
        tab.set_objective(&cost);
        match tab.run(ncols, cfg, &mut iters) {
            Phase::Optimal => {}
            // Phase I is bounded below by zero; reaching here means numerics broke down.
            Phase::Unbounded => return LpSolution::failed(LpStatus::Infeasible),
            Phase::IterationLimit => return LpSolution::failed(LpStatus::IterationLimit),
        }
        let scale = 1.0 + b.amax();
        if tab.objective() > cfg.tol * scale {
            return LpSolution::failed(LpStatus::Infeasible);
        }
        tab.drive_out_artificials(art_start, cfg.tol);
    }

    let mut cost = vec![0.0; ncols];
    for j in 0..NVAR {
        cost[j] = c[j];
        cost[j + NVAR] = -c[j];
    }
    tab.set_objective(&cost);
    match tab.run(art_start, cfg, &mut iters) {
        Phase::Optimal => {}
        Phase::Unbounded => return LpSolution::failed(LpStatus::Unbounded),
        Phase::IterationLimit => return LpSolution::failed(LpStatus::IterationLimit),
    }

    let mut values = vec![0.0; ncols];
    for (i, &bi) in tab.basis.iter().enumerate() {
        values[bi] = tab.t[(i, ncols)];
    }
    let x = Vector4::from_fn(|j, _| values[j] - values[j + NVAR]);
    LpSolution {
        x,
        objective: c.dot(&x),
        status: LpStatus::Optimal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{dvector, RowVector4};

    fn rows(r: &[[f64; 4]]) -> MatrixXx4<f64> {
        let rv: Vec<RowVector4<f64>> = r
            .iter()
            .map(|x| RowVector4::new(x[0], x[1], x[2], x[3]))
            .collect();
        MatrixXx4::from_rows(&rv)
    }

    /// Pins z and w to zero so 2D textbook problems fit the 4-variable solver.
    fn pin_zw(mut r: Vec<[f64; 4]>, mut b: Vec<f64>) -> (MatrixXx4<f64>, DVector<f64>) {
        r.push([0.0, 0.0, 1.0, 0.0]);
        r.push([0.0, 0.0, -1.0, 0.0]);
        r.push([0.0, 0.0, 0.0, 1.0]);
        r.push([0.0, 0.0, 0.0, -1.0]);
        b.extend([0.0, 0.0, 0.0, 0.0]);
        (rows(&r), DVector::from_vec(b))
    }

    #[test]
    fn textbook_maximization() {
        // max x + 2y s.t. x + y <= 4, x <= 2, y <= 3, x, y >= 0
        let (a, b) = pin_zw(
            vec![
                [1.0, 1.0, 0.0, 0.0],
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [-1.0, 0.0, 0.0, 0.0],
                [0.0, -1.0, 0.0, 0.0],
            ],
            vec![4.0, 2.0, 3.0, 0.0, 0.0],
        );
        let c = Vector4::new(-1.0, -2.0, 0.0, 0.0);
        let sol = DenseSimplex::default().solve(&c, &a, &b);
        assert_eq!(sol.status, LpStatus::Optimal);
        assert!((sol.objective + 7.0).abs() < 1e-9);
        assert!((sol.x.x - 1.0).abs() < 1e-9 && (sol.x.y - 3.0).abs() < 1e-9);
    }

    #[test]
    fn negative_rhs_needs_phase_one() {
        // min x s.t. x >= 1 (i.e. -x <= -1), x <= 5
        let (a, b) = pin_zw(
            vec![[-1.0, 0.0, 0.0, 0.0], [1.0, 0.0, 0.0, 0.0], [0.0, 1.0, 0.0, 0.0], [0.0, -1.0, 0.0, 0.0]],
            vec![-1.0, 5.0, 0.0, 0.0],
        );
        let c = Vector4::new(1.0, 0.0, 0.0, 0.0);
        let sol = DenseSimplex::default().solve(&c, &a, &b);
        assert_eq!(sol.status, LpStatus::Optimal);
        assert!((sol.objective - 1.0).abs() < 1e-9);
    }

    #[test]
    fn infeasible_reports_positive_infinity() {
        // x <= 0 and x >= 1
        let a = rows(&[[1.0, 0.0, 0.0, 0.0], [-1.0, 0.0, 0.0, 0.0]]);
        let b = dvector![0.0, -1.0];
        let sol = DenseSimplex::default().solve(&Vector4::new(1.0, 0.0, 0.0, 0.0), &a, &b);
        assert_eq!(sol.status, LpStatus::Infeasible);
        assert_eq!(sol.objective, f64::INFINITY);
    }

    #[test]
    fn unbounded_reports_negative_infinity() {
        // min -w s.t. x <= 1: w is unconstrained.
        let a = rows(&[[1.0, 0.0, 0.0, 0.0]]);
        let b = dvector![1.0];
        let sol = DenseSimplex::default().solve(&Vector4::new(0.0, 0.0, 0.0, -1.0), &a, &b);
        assert_eq!(sol.status, LpStatus::Unbounded);
        assert_eq!(sol.objective, f64::NEG_INFINITY);
    }

    #[test]
    fn no_rows_with_zero_cost_is_optimal_at_origin() {
        let a = MatrixXx4::<f64>::zeros(0);
        let b = DVector::<f64>::zeros(0);
        let sol = DenseSimplex::default().solve(&Vector4::zeros(), &a, &b);
        assert_eq!(sol.status, LpStatus::Optimal);
        assert_eq!(sol.objective, 0.0);
    }

    #[test]
    fn non_finite_input_is_rejected() {
        let a = rows(&[[f64::NAN, 0.0, 0.0, 1.0]]);
        let b = dvector![1.0];
        let sol = DenseSimplex::default().solve(&Vector4::new(0.0, 0.0, 0.0, -1.0), &a, &b);
        assert_eq!(sol.status, LpStatus::InvalidInput);
        assert!(!sol.objective.is_finite());
    }

    #[test]
    fn iteration_cap_yields_nan() {
        let cfg = SimplexCfg {
            max_iter: 0,
            ..SimplexCfg::default()
        };
        let a = rows(&[[1.0, 0.0, 0.0, 1.0], [-1.0, 0.0, 0.0, 1.0]]);
        let b = dvector![1.0, 1.0];
        let sol = DenseSimplex::new(cfg).solve(&Vector4::new(0.0, 0.0, 0.0, -1.0), &a, &b);
        assert_eq!(sol.status, LpStatus::IterationLimit);
        assert!(sol.objective.is_nan());
    }
}
