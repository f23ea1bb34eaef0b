//! Compatibility test between a candidate placement and the neighbors around it

use crate::spatial::grid::{Grid, Position};
use crate::spatial::tiles::{Direction, Placement, SideSignature, TileCatalog};

/// Decide whether a tile and rotation fit at a position given the current neighbors
///
/// Empty neighbors are wildcards. Assigned and border neighbors must present, on the
/// side facing `position`, the same category the candidate presents towards them.
/// Positions off the grid also act as wildcards. A tile missing from the catalog never fits.
pub fn can_place(
    catalog: &TileCatalog,
    grid: &Grid,
    placement: Placement,
    position: Position,
) -> bool {
    let Some(candidate) = catalog.rotated_signature(placement) else {
        return false;
    };
    fits_neighbors(catalog, grid, candidate, position)
}

/// Same test as [`can_place`] for an already rotated signature
pub fn fits_neighbors(
    catalog: &TileCatalog,
    grid: &Grid,
    candidate: SideSignature,
    position: Position,
) -> bool {
    Direction::ALL.iter().all(|&direction| {
        let Some(neighbor) = grid.neighbor(position, direction) else {
            return true;
        };
        grid.presented_signature(neighbor, catalog)
            .is_none_or(|presented| {
                presented.side(direction.opposite()) == candidate.side(direction)
            })
    })
}

/// True when none of the four neighbors of a position is assigned
pub fn has_no_assigned_neighbors(grid: &Grid, position: Position) -> bool {
    Direction::ALL.iter().all(|&direction| {
        grid.neighbor(position, direction)
            .and_then(|neighbor| grid.state(neighbor))
            .is_none_or(|state| !state.is_assigned())
    })
}

/// Check every assigned cell against every assigned neighbor
///
/// Returns the first pair of positions whose facing sides disagree.
pub fn find_conflict(catalog: &TileCatalog, grid: &Grid) -> Option<(Position, Position)> {
    for position in grid.interior_positions() {
        let Some(signature) = grid.presented_signature(position, catalog) else {
            continue;
        };
        for direction in Direction::ALL {
            let Some(neighbor) = grid.neighbor(position, direction) else {
                continue;
            };
            if grid
                .presented_signature(neighbor, catalog)
                .is_some_and(|presented| {
                    presented.side(direction.opposite()) != signature.side(direction)
                })
            {
                return Some((position, neighbor));
            }
        }
    }
    None
}
