//! Bordered tile grid and cell assignment state
//!
//! The grid is stored as an `ndarray` matrix indexed `[z, x]`. The outer ring is filled
//! with the border tile when the grid is created and is never mutated afterwards; every
//! other cell starts empty and is owned by the solver.

use ndarray::Array2;

use crate::io::configuration::{MAX_GRID_DIMENSION, MIN_GRID_DIMENSION};
use crate::io::error::{AlgorithmError, Result};
use crate::spatial::tiles::{Direction, Placement, SideSignature, TileCatalog};

/// Cell coordinates, `x` across and `z` down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Column
    pub x: usize,
    /// Row
    pub z: usize,
}

impl Position {
    /// Create a position
    pub const fn new(x: usize, z: usize) -> Self {
        Self { x, z }
    }

    /// Matrix index for this position
    pub const fn index(self) -> [usize; 2] {
        [self.z, self.x]
    }

    /// Neighboring position in a direction, if it does not underflow
    pub fn step(self, direction: Direction) -> Option<Self> {
        let [dx, dz] = direction.offset();
        let x = self.x.checked_add_signed(dx as isize)?;
        let z = self.z.checked_add_signed(dz as isize)?;
        Some(Self { x, z })
    }
}

/// Assignment state of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellState {
    /// Not yet assigned
    #[default]
    Empty,
    /// Part of the immutable outer ring
    Border,
    /// Assigned by the solver
    Assigned(Placement),
}

impl CellState {
    /// True for border and solver-assigned cells
    pub const fn is_assigned(&self) -> bool {
        !matches!(self, Self::Empty)
    }
}

/// Grid of cells surrounded by a fixed border ring
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Array2<CellState>,
    border: SideSignature,
}

impl Grid {
    /// Create a grid whose outer ring carries the border signature
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is below 3 or above the supported maximum
    pub fn new(width: usize, height: usize, border: SideSignature) -> Result<Self> {
        validate_dimensions(width, height)?;

        let cells = Array2::from_shape_fn((height, width), |(z, x)| {
            if x == 0 || z == 0 || x == width - 1 || z == height - 1 {
                CellState::Border
            } else {
                CellState::Empty
            }
        });

        Ok(Self { cells, border })
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// Signature shared by every border cell
    pub const fn border(&self) -> SideSignature {
        self.border
    }

    /// True when the position lies on the grid
    pub fn contains(&self, position: Position) -> bool {
        position.x < self.width() && position.z < self.height()
    }

    /// True when the position lies on the outer ring
    pub fn is_border(&self, position: Position) -> bool {
        self.contains(position)
            && (position.x == 0
                || position.z == 0
                || position.x == self.width() - 1
                || position.z == self.height() - 1)
    }

    /// State of a cell, `None` outside the grid
    pub fn state(&self, position: Position) -> Option<CellState> {
        self.cells.get(position.index()).copied()
    }

    /// Solver placement of a cell, `None` for empty, border or out-of-bounds cells
    pub fn placement(&self, position: Position) -> Option<Placement> {
        match self.state(position) {
            Some(CellState::Assigned(placement)) => Some(placement),
            _ => None,
        }
    }

    /// True when the cell is empty and inside the border
    pub fn is_unassigned_interior(&self, position: Position) -> bool {
        self.state(position) == Some(CellState::Empty)
    }

    /// Signature a cell presents to its neighbors once rotation is applied
    ///
    /// Returns `None` for empty or out-of-bounds cells; those constrain nothing.
    pub fn presented_signature(
        &self,
        position: Position,
        catalog: &TileCatalog,
    ) -> Option<SideSignature> {
        match self.state(position)? {
            CellState::Empty => None,
            CellState::Border => Some(self.border),
            CellState::Assigned(placement) => catalog.rotated_signature(placement),
        }
    }

    /// Neighbor of a position inside the grid
    pub fn neighbor(&self, position: Position, direction: Direction) -> Option<Position> {
        position
            .step(direction)
            .filter(|neighbor| self.contains(*neighbor))
    }

    /// Assign a placement to an interior cell
    ///
    /// Border cells are left untouched; the return value reports whether the write happened.
    pub fn assign(&mut self, position: Position, placement: Placement) -> bool {
        self.write(position, CellState::Assigned(placement))
    }

    /// Return an interior cell to the empty state
    pub fn clear(&mut self, position: Position) -> bool {
        self.write(position, CellState::Empty)
    }

    fn write(&mut self, position: Position, state: CellState) -> bool {
        if self.is_border(position) {
            return false;
        }
        self.cells.get_mut(position.index()).is_some_and(|cell| {
            *cell = state;
            true
        })
    }

    /// Interior positions in row-major order
    pub fn interior_positions(&self) -> impl Iterator<Item = Position> + '_ {
        let width = self.width();
        let height = self.height();
        (1..height - 1).flat_map(move |z| (1..width - 1).map(move |x| Position::new(x, z)))
    }

    /// Number of interior cells
    pub fn interior_count(&self) -> usize {
        (self.width() - 2) * (self.height() - 2)
    }

    /// Number of interior cells assigned by the solver
    pub fn assigned_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|state| matches!(state, CellState::Assigned(_)))
            .count()
    }

    /// True when every interior cell is assigned
    pub fn is_complete(&self) -> bool {
        self.assigned_count() == self.interior_count()
    }
}

/// Check grid dimensions against the supported range
///
/// # Errors
///
/// Returns an error if either dimension is below 3 or above `MAX_GRID_DIMENSION`
pub fn validate_dimensions(width: usize, height: usize) -> Result<()> {
    let reason = if width < MIN_GRID_DIMENSION || height < MIN_GRID_DIMENSION {
        Some(format!(
            "both dimensions must be at least {MIN_GRID_DIMENSION}"
        ))
    } else if width > MAX_GRID_DIMENSION || height > MAX_GRID_DIMENSION {
        Some(format!(
            "both dimensions must be at most {MAX_GRID_DIMENSION}"
        ))
    } else {
        None
    };

    reason.map_or(Ok(()), |reason| {
        Err(AlgorithmError::InvalidDimensions {
            width,
            height,
            reason,
        })
    })
}
