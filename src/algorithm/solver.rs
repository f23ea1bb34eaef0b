//! Backtracking search over the bordered grid
//!
//! The solver repeatedly takes the lowest-entropy cell from the frontier, tries its
//! candidates in randomized order, propagates each placement to the four neighbors and
//! backtracks when a neighbor runs out of candidates or the search below it fails.
//! The search runs on an explicit stack of frames, so its depth is bounded by the
//! number of interior cells rather than the native call stack.

use std::fmt;
use std::time::{Duration, Instant};

use log::{debug, trace};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::algorithm::entropy::{DomainSnapshot, EntropyIndex};
use crate::algorithm::events::{NullSink, PlacementEvent, PlacementRecord, PlacementSink};
use crate::algorithm::frontier::{Frontier, FrontierEntry};
use crate::io::configuration::DEFAULT_MAX_ATTEMPTS;
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::grid::{Grid, Position, validate_dimensions};
use crate::spatial::tiles::{BorderTile, Direction, Placement, Rotation, TileCatalog, TileId};

/// Everything a solve needs to know before it starts
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Grid width including the border ring
    pub width: usize,
    /// Grid height including the border ring
    pub height: usize,
    /// Tile filling the outer ring
    pub border: BorderTile,
    /// Tiles available for interior cells
    pub catalog: TileCatalog,
    /// Placement attempts allowed before the solve is reported incomplete
    pub max_attempts: usize,
    /// Seed for the random generator; drawn from the OS when absent
    pub seed: Option<u64>,
    /// Optional wall-clock limit checked once per placement attempt
    pub deadline: Option<Duration>,
}

impl SolverConfig {
    /// Configuration with default attempt budget, random seed and no deadline
    pub fn new(width: usize, height: usize, border: BorderTile, catalog: TileCatalog) -> Self {
        Self {
            width,
            height,
            border,
            catalog,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            seed: None,
            deadline: None,
        }
    }

    /// Fix the random seed
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the attempt budget
    #[must_use]
    pub const fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Set a wall-clock limit
    #[must_use]
    pub const fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Check dimensions and the attempt budget
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is out of range or `max_attempts` is zero
    pub fn validate(&self) -> Result<()> {
        validate_dimensions(self.width, self.height)?;
        if self.max_attempts == 0 {
            return Err(invalid_parameter(
                "max_attempts",
                &self.max_attempts,
                &"must be a positive integer",
            ));
        }
        Ok(())
    }
}

/// How a solve ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveOutcome {
    /// Every interior cell is assigned
    Solved,
    /// The root cell ran out of candidates; the configuration is unsatisfiable under
    /// the randomness that was tried
    Failed,
    /// The attempt budget or deadline ran out; the grid is consistent but partial
    Incomplete,
}

impl fmt::Display for SolveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Solved => "solved",
            Self::Failed => "failed",
            Self::Incomplete => "incomplete",
        };
        f.write_str(label)
    }
}

/// Counters collected during a solve
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolveStats {
    /// Placements that survived propagation and were descended into
    pub attempts: usize,
    /// Placements undone because the search below them failed
    pub backtracks: usize,
    /// Deepest stack of simultaneously assigned cells
    pub max_depth: usize,
    /// Wall-clock duration of the search
    pub elapsed: Duration,
}

/// Result of one solve
#[derive(Debug, Clone)]
pub struct SolveReport {
    /// How the solve ended
    pub outcome: SolveOutcome,
    /// Final grid; complete when solved, consistent but partial when incomplete
    pub grid: Grid,
    /// Search counters
    pub stats: SolveStats,
    /// Seed the solve ran with
    pub seed: u64,
    /// Assigned interior cells in row-major order
    pub placements: Vec<PlacementRecord>,
}

impl SolveReport {
    /// True when every interior cell is assigned
    pub fn is_solved(&self) -> bool {
        self.outcome == SolveOutcome::Solved
    }
}

/// Saved state of one neighbor touched by a placement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborSnapshot {
    /// Domain before propagation
    pub domain: DomainSnapshot,
    /// Frontier key before propagation
    pub entry: Option<FrontierEntry>,
}

/// Everything needed to take one placement back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoRecord {
    /// Cell that was assigned
    pub position: Position,
    /// Frontier key of the cell if it was still in the frontier
    pub prior_entry: Option<FrontierEntry>,
    /// Unassigned interior neighbors whose domains were recomputed
    pub neighbors: Vec<NeighborSnapshot>,
}

/// Placement together with the outcome of propagating it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Propagation {
    /// Record that reverses the placement
    pub record: UndoRecord,
    /// True when some neighbor was left without candidates
    pub contradiction: bool,
}

// One level of the search: a selected cell and its remaining candidates
struct Frame {
    entry: FrontierEntry,
    candidates: Vec<Placement>,
    cursor: usize,
    pending: Option<UndoRecord>,
}

/// Backtracking tile-assignment solver
///
/// Owns the grid, the entropy index, the frontier and the random generator for the
/// duration of one solve. Nothing outside the solver can observe these until the
/// search returns.
pub struct Solver<S: PlacementSink = NullSink> {
    config: SolverConfig,
    grid: Grid,
    entropy: EntropyIndex,
    frontier: Frontier,
    rng: StdRng,
    seed: u64,
    stats: SolveStats,
    sink: S,
}

impl Solver<NullSink> {
    /// Prepare a solve without an event sink
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation
    pub fn new(config: SolverConfig) -> Result<Self> {
        Self::with_sink(config, NullSink)
    }
}

impl<S: PlacementSink> Solver<S> {
    /// Prepare a solve that reports every placement and undo to `sink`
    ///
    /// Builds the bordered grid, computes every interior domain and seeds the frontier.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation
    pub fn with_sink(config: SolverConfig, sink: S) -> Result<Self> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = StdRng::seed_from_u64(seed);
        let grid = Grid::new(config.width, config.height, config.border.signature)?;
        let entropy = EntropyIndex::new(&config.catalog, &grid);

        let mut frontier = Frontier::new(grid.width(), grid.height());
        for position in grid.interior_positions() {
            frontier.insert(position, entropy.entropy(position), &mut rng);
        }

        Ok(Self {
            config,
            grid,
            entropy,
            frontier,
            rng,
            seed,
            stats: SolveStats::default(),
            sink,
        })
    }

    /// Current grid
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Current domains
    pub const fn entropy_index(&self) -> &EntropyIndex {
        &self.entropy
    }

    /// Current frontier
    pub const fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    /// Configuration the solver was built from
    pub const fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Seed in use
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Counters so far
    pub const fn stats(&self) -> SolveStats {
        self.stats
    }

    /// Event sink
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Run the search to completion and hand back the final grid
    pub fn run(mut self) -> SolveReport {
        debug!(
            "Solving {}x{} grid with {} tile types (seed {}, budget {})",
            self.config.width,
            self.config.height,
            self.config.catalog.len(),
            self.seed,
            self.config.max_attempts
        );

        let started = Instant::now();
        let outcome = self.search(started);
        self.stats.elapsed = started.elapsed();

        debug!(
            "Solve {outcome} after {} attempts, {} backtracks, {} ms",
            self.stats.attempts,
            self.stats.backtracks,
            self.stats.elapsed.as_millis()
        );

        let placements = self.placement_records();
        SolveReport {
            outcome,
            grid: self.grid,
            stats: self.stats,
            seed: self.seed,
            placements,
        }
    }

    /// Assign a placement to an empty interior cell and propagate it to the neighbors
    ///
    /// The cell leaves the frontier if it was still there. The returned record restores
    /// the cell, its neighbors' domains and their frontier keys when passed to [`undo`].
    ///
    /// [`undo`]: Self::undo
    ///
    /// # Errors
    ///
    /// Returns an error if the position is not an empty interior cell or the tile is
    /// missing from the catalog
    pub fn place(&mut self, position: Position, placement: Placement) -> Result<Propagation> {
        if !self.grid.is_unassigned_interior(position) {
            return Err(invalid_parameter(
                "position",
                &format!("({}, {})", position.x, position.z),
                &"must be an empty interior cell",
            ));
        }
        if self.config.catalog.get(placement.tile).is_none() {
            return Err(invalid_parameter(
                "tile",
                &placement.tile,
                &"not present in the catalog",
            ));
        }
        Ok(self.apply(position, placement))
    }

    /// Take back a placement, restoring the exact pre-placement state
    pub fn undo(&mut self, record: UndoRecord) {
        self.grid.clear(record.position);

        for neighbor in record.neighbors.into_iter().rev() {
            let position = neighbor.domain.position;
            self.entropy.restore(neighbor.domain);
            match neighbor.entry {
                Some(entry) => self.frontier.restore(entry),
                None => {
                    self.frontier.remove(position);
                }
            }
        }

        if let Some(entry) = record.prior_entry {
            self.frontier.restore(entry);
        }

        trace!("Undo ({}, {})", record.position.x, record.position.z);
        self.sink.on_event(&PlacementEvent::Removed {
            x: record.position.x,
            z: record.position.z,
        });
    }

    fn apply(&mut self, position: Position, placement: Placement) -> Propagation {
        let prior_entry = self.frontier.remove(position);

        let neighbors: Vec<NeighborSnapshot> = Direction::ALL
            .iter()
            .filter_map(|&direction| self.grid.neighbor(position, direction))
            .filter(|&neighbor| self.grid.is_unassigned_interior(neighbor))
            .filter_map(|neighbor| {
                self.entropy
                    .snapshot(neighbor)
                    .map(|domain| NeighborSnapshot {
                        domain,
                        entry: self.frontier.entry(neighbor),
                    })
            })
            .collect();

        self.grid.assign(position, placement);
        trace!(
            "Place tile {} at ({}, {}) rotated {}",
            placement.tile,
            position.x,
            position.z,
            placement.rotation.degrees()
        );
        self.sink.on_event(&PlacementEvent::Placed(PlacementRecord::new(
            position,
            placement,
            &self.config.catalog,
        )));

        let mut contradiction = false;
        for snapshot in &neighbors {
            let neighbor = snapshot.domain.position;
            let entropy = self
                .entropy
                .compute_domain(neighbor, &self.config.catalog, &self.grid);
            self.frontier
                .update_entropy(neighbor, entropy, &mut self.rng);
            contradiction |= entropy == 0;
        }

        Propagation {
            record: UndoRecord {
                position,
                prior_entry,
                neighbors,
            },
            contradiction,
        }
    }

    // Depth-first search on an explicit stack of frames
    fn search(&mut self, started: Instant) -> SolveOutcome {
        let mut stack: Vec<Frame> = Vec::with_capacity(self.grid.interior_count());

        'select: loop {
            let Some(entry) = self.frontier.pop_min_entropy() else {
                return SolveOutcome::Solved;
            };

            if entry.entropy == 0 {
                // Known dead end: hand it back and let the level above undo
                self.frontier.restore(entry);
                if stack.is_empty() {
                    return SolveOutcome::Failed;
                }
            } else {
                let candidates = self.ordered_candidates(entry.position);
                stack.push(Frame {
                    entry,
                    candidates,
                    cursor: 0,
                    pending: None,
                });
                self.stats.max_depth = self.stats.max_depth.max(stack.len());
            }

            loop {
                let Some(frame) = stack.last_mut() else {
                    return SolveOutcome::Failed;
                };

                if let Some(record) = frame.pending.take() {
                    self.undo(record);
                    self.stats.backtracks += 1;
                }

                let Some(&placement) = frame.candidates.get(frame.cursor) else {
                    let exhausted = frame.entry;
                    stack.pop();
                    self.frontier.restore(exhausted);
                    if stack.is_empty() {
                        return SolveOutcome::Failed;
                    }
                    continue;
                };
                frame.cursor += 1;

                let propagation = self.apply(frame.entry.position, placement);
                if propagation.contradiction {
                    // Rejected before descending, so it does not count as a backtrack
                    self.undo(propagation.record);
                    continue;
                }
                frame.pending = Some(propagation.record);

                self.stats.attempts += 1;
                if self.budget_exhausted(started) {
                    return SolveOutcome::Incomplete;
                }
                continue 'select;
            }
        }
    }

    // Group the domain by tile, shuffle tile order and each tile's rotations
    fn ordered_candidates(&mut self, position: Position) -> Vec<Placement> {
        let mut groups: Vec<(TileId, Vec<Rotation>)> = Vec::new();
        for placement in self.entropy.placements(position) {
            match groups.last_mut() {
                Some((tile, rotations)) if *tile == placement.tile => {
                    rotations.push(placement.rotation);
                }
                _ => groups.push((placement.tile, vec![placement.rotation])),
            }
        }

        groups.shuffle(&mut self.rng);
        let mut candidates = Vec::with_capacity(self.entropy.entropy(position));
        for (tile, mut rotations) in groups {
            rotations.shuffle(&mut self.rng);
            candidates.extend(
                rotations
                    .into_iter()
                    .map(|rotation| Placement::new(tile, rotation)),
            );
        }
        candidates
    }

    fn budget_exhausted(&self, started: Instant) -> bool {
        self.stats.attempts > self.config.max_attempts
            || self
                .config
                .deadline
                .is_some_and(|deadline| started.elapsed() >= deadline)
    }

    fn placement_records(&self) -> Vec<PlacementRecord> {
        self.grid
            .interior_positions()
            .filter_map(|position| {
                self.grid.placement(position).map(|placement| {
                    PlacementRecord::new(position, placement, &self.config.catalog)
                })
            })
            .collect()
    }
}

/// Solve once without observing events
///
/// # Errors
///
/// Returns an error if the configuration fails validation
pub fn solve(config: SolverConfig) -> Result<SolveReport> {
    Ok(Solver::new(config)?.run())
}

/// Solve, retrying with fresh seeds after an unsatisfiable run
///
/// Run `k` uses the base seed plus `k`. Returns the first solved or incomplete report,
/// or the report of the last failed run once `restarts` retries are used up.
///
/// # Errors
///
/// Returns an error if the configuration fails validation
pub fn solve_with_restarts<S: PlacementSink>(
    config: &SolverConfig,
    restarts: usize,
    sink: &mut S,
) -> Result<SolveReport> {
    config.validate()?;
    let base_seed = config.seed.unwrap_or_else(|| rand::rng().random());

    let mut run = 0;
    loop {
        let seed = base_seed.wrapping_add(run as u64);
        let report = Solver::with_sink(config.clone().with_seed(seed), &mut *sink)?.run();
        if report.outcome != SolveOutcome::Failed || run >= restarts {
            return Ok(report);
        }
        debug!("Run {run} with seed {seed} failed, restarting");
        run += 1;
    }
}
