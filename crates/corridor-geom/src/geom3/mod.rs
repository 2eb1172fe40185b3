//! 3D convex polyhedra for corridor planning (H-rep in, V-rep out).
//!
//! Purpose
//! - Decide whether a half-space system has a non-degenerate interior and
//!   produce a point inside it (`find_interior`).
//! - Decide whether two systems overlap with positive volume (`overlaps`).
//! - Enumerate the vertices of a bounded system by polar duality and a 3D
//!   hull of the dual points (`enumerate_vertices`), with lattice-based
//!   deduplication (`filter_vertices`).
//!
//! Conventions
//! - A half-space is `n·x + d <= 0` with `n` not necessarily unit length.
//! - Every operation takes one `eps`; defaults live in `cfg`.
//! - LP and hull work go through `lp::LpOracle` and `hull::HullOracle`; the
//!   plain functions use the bundled backends, the `_with` variants take any.
//!
//! References
//! - Polar duality for H→V: Fukuda, "Frequently Asked Questions in Polyhedral
//!   Computation", section on vertex enumeration.
//! - Code cross-refs: `HPoly3`, `Hs3`, `Poly3`, `GeomError`

pub mod cfg;
mod enumerate;
mod filter;
mod interior;
mod overlap;
pub mod rand;
pub mod special;
mod types;

pub use cfg::DEFAULT_EPS;
pub use enumerate::{enumerate_vertices, enumerate_vertices_with, Enumeration, InteriorSource};
pub use filter::filter_vertices;
pub use interior::{find_interior, find_interior_with};
pub use overlap::{overlap_margin, overlap_margin_with, overlaps, overlaps_with};
pub use types::{points_from_matrix, points_to_matrix, GeomError, HPoly3, Hs3, Poly3};
