//! Per-cell candidate domains and their sizes
//!
//! Domains are computed once for every interior cell when a solve starts and afterwards
//! only for the neighbors of a cell whose assignment changed. They are never recomputed
//! across the whole grid mid-solve.

use ndarray::Array2;

use crate::algorithm::adjacency::{fits_neighbors, has_no_assigned_neighbors};
use crate::algorithm::bitset::CandidateSet;
use crate::spatial::grid::{Grid, Position};
use crate::spatial::tiles::{Placement, Rotation, TileCatalog};

/// Saved domain of one cell, used to undo propagation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainSnapshot {
    /// Cell the domain belongs to
    pub position: Position,
    /// Domain contents at the time of the snapshot
    pub domain: CandidateSet,
}

impl DomainSnapshot {
    /// Number of candidates in the saved domain
    pub fn entropy(&self) -> usize {
        self.domain.count()
    }
}

/// Domain and entropy of every cell in the grid
///
/// Border cells keep an empty domain; they are never candidates for placement.
#[derive(Debug, Clone)]
pub struct EntropyIndex {
    domains: Array2<CandidateSet>,
    entropy: Array2<usize>,
    candidate_count: usize,
}

impl EntropyIndex {
    /// Build domains for every interior cell of the grid
    pub fn new(catalog: &TileCatalog, grid: &Grid) -> Self {
        let candidate_count = catalog.candidate_count();
        let shape = (grid.height(), grid.width());
        let mut index = Self {
            domains: Array2::from_elem(shape, CandidateSet::new(candidate_count)),
            entropy: Array2::zeros(shape),
            candidate_count,
        };

        for position in grid.interior_positions() {
            if grid.is_unassigned_interior(position) {
                index.compute_domain(position, catalog, grid);
            }
        }

        index
    }

    /// Recompute the domain of a cell from its current neighbors and return its entropy
    ///
    /// A cell with no assigned neighbor receives every candidate without evaluation.
    pub fn compute_domain(
        &mut self,
        position: Position,
        catalog: &TileCatalog,
        grid: &Grid,
    ) -> usize {
        let Some(domain) = self.domains.get_mut(position.index()) else {
            return 0;
        };

        if has_no_assigned_neighbors(grid, position) {
            domain.fill();
        } else {
            domain.clear();
            for tile in catalog.tiles() {
                for rotation in Rotation::ALL {
                    if fits_neighbors(catalog, grid, tile.signature.rotate(rotation), position) {
                        domain.insert(TileCatalog::candidate_index(Placement::new(
                            tile.id, rotation,
                        )));
                    }
                }
            }
        }

        let count = domain.count();
        if let Some(entropy) = self.entropy.get_mut(position.index()) {
            *entropy = count;
        }
        count
    }

    /// Number of candidates left for a cell
    pub fn entropy(&self, position: Position) -> usize {
        self.entropy.get(position.index()).copied().unwrap_or(0)
    }

    /// Candidate domain of a cell
    pub fn domain(&self, position: Position) -> Option<&CandidateSet> {
        self.domains.get(position.index())
    }

    /// Domain of a cell as placements in ascending candidate order
    pub fn placements(&self, position: Position) -> Vec<Placement> {
        self.domain(position)
            .map(|domain| domain.iter().map(TileCatalog::candidate).collect())
            .unwrap_or_default()
    }

    /// Size of the full candidate space
    pub const fn candidate_count(&self) -> usize {
        self.candidate_count
    }

    /// Save the domain of a cell
    pub fn snapshot(&self, position: Position) -> Option<DomainSnapshot> {
        self.domain(position).map(|domain| DomainSnapshot {
            position,
            domain: domain.clone(),
        })
    }

    /// Put a saved domain back in place
    pub fn restore(&mut self, snapshot: DomainSnapshot) {
        let count = snapshot.domain.count();
        if let Some(domain) = self.domains.get_mut(snapshot.position.index()) {
            *domain = snapshot.domain;
        }
        if let Some(entropy) = self.entropy.get_mut(snapshot.position.index()) {
            *entropy = count;
        }
    }
}
