//! Backtracking wave function collapse for bordered grids of rotatable tiles
//!
//! The solver fills the interior of a grid whose outer ring holds a fixed border tile.
//! Each tile declares a category per side; touching sides must agree. Cells are chosen
//! by lowest remaining entropy, candidates are tried in randomized order, placements are
//! propagated to the four neighbors and undone on contradiction. An attempt budget
//! bounds the search on unsatisfiable catalogs.

#![forbid(unsafe_code)]

/// Core algorithm: domains, frontier, adjacency checks and the backtracking solver
pub mod algorithm;
/// Catalog files, exports, CLI, progress display and logging
pub mod io;
/// Grid state, tile catalog, signatures and rotations
pub mod spatial;

pub use algorithm::solver::{SolveOutcome, SolveReport, Solver, SolverConfig, solve};
pub use io::error::{AlgorithmError, Result};
