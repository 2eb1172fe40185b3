//! Tolerance defaults for 3D corridor geometry (internal).
//!
//! Policy
//! - A single `eps` travels with each call; these are only the defaults and
//!   the fixed thresholds that callers never tune.

/// Default tolerance: LP margin for overlap and grid size for vertex merging.
pub const DEFAULT_EPS: f64 = 1.0e-6;
/// Membership slack for `Hs3::satisfies` style checks in tests and helpers.
pub(crate) const FEAS_EPS: f64 = 1e-9;
