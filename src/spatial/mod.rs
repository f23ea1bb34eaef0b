//! Spatial data structures
//!
//! This module contains spatial-related functionality including:
//! - Bordered grid state and cell coordinates
//! - Tile catalog, side signatures and rotations

/// Bordered grid and cell assignment state
pub mod grid;
/// Tile catalog, side signatures and rotation handling
pub mod tiles;

pub use grid::{Grid, Position};
pub use tiles::{TileCatalog, TileId};
