//! Small linear programs: `minimize cᵀx subject to A x <= b` with free `x ∈ R^4`.
//!
//! Purpose
//! - Back the "uniform shift" LP used by interior search and overlap tests
//!   (three geometric unknowns plus one slack).
//! - Keep the solver behind `LpOracle` so callers can swap in another backend.
//!
//! Backends
//! - `SeidelLp` (default): randomized incremental, expected linear time in
//!   the row count. Used by every geometric operation.
//! - `DenseSimplex`: two-phase tableau, about cubic in the row count. Kept as
//!   an independent cross-check and for small systems.
//!
//! Conventions
//! - Failure is reported through the objective, never by panicking:
//!   `+inf` infeasible, `-inf` unbounded, `NaN` when the iteration cap is hit
//!   or the input is malformed.
//!   Callers check `objective.is_finite()` before trusting `x`.

mod seidel;
mod simplex;

pub use seidel::{SeidelCfg, SeidelLp};
pub use simplex::{DenseSimplex, SimplexCfg};

use nalgebra::{DVector, MatrixXx4, Vector4};

/// Outcome class of an LP solve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LpStatus {
    Optimal,
    Infeasible,
    Unbounded,
    IterationLimit,
    /// `c`, `A` or `b` held NaN/inf, or `b` did not match the row count.
    InvalidInput,
}

/// Optimal point and objective (or a non-finite sentinel, see module docs).
#[derive(Clone, Copy, Debug)]
pub struct LpSolution {
    pub x: Vector4<f64>,
    pub objective: f64,
    pub status: LpStatus,
}

impl LpSolution {
    pub(crate) fn failed(status: LpStatus) -> Self {
        let objective = match status {
            LpStatus::Infeasible => f64::INFINITY,
            LpStatus::Unbounded => f64::NEG_INFINITY,
            _ => f64::NAN,
        };
        Self {
            x: Vector4::zeros(),
            objective,
            status,
        }
    }
}

/// LP backend used by the shift formulations.
///
/// Implementations must be reentrant: independent calls may run concurrently.
pub trait LpOracle: Sync {
    fn solve(&self, c: &Vector4<f64>, a: &MatrixXx4<f64>, b: &DVector<f64>) -> LpSolution;
}
