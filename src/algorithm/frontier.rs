//! Working set of unassigned interior cells ordered by ascending entropy
//!
//! The frontier is a lazy-deletion binary heap. Each live cell owns one current key,
//! `(entropy, tie)`, where `tie` is a random draw taken whenever the entropy changes.
//! Heap entries that no longer match their cell's current key are skipped on pop, so
//! updates cost one push instead of a full re-sort. Ordering is a pure function of
//! the live keys, which makes restoring saved keys restore the ordering exactly.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use ndarray::Array2;
use rand::Rng;

use crate::io::configuration::FRONTIER_COMPACTION_FACTOR;
use crate::spatial::grid::Position;

/// A cell's position together with its ordering key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrontierEntry {
    /// Cell position
    pub position: Position,
    /// Domain size at the time the key was drawn
    pub entropy: usize,
    /// Random tie-break among cells of equal entropy
    pub tie: u64,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.entropy
            .cmp(&other.entropy)
            .then_with(|| self.tie.cmp(&other.tie))
            .then_with(|| self.position.cmp(&other.position))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Priority structure over unassigned interior cells
#[derive(Debug, Clone)]
pub struct Frontier {
    heap: BinaryHeap<Reverse<FrontierEntry>>,
    live: Array2<Option<FrontierEntry>>,
    len: usize,
}

impl Frontier {
    /// Create an empty frontier sized for a `width` by `height` grid
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            heap: BinaryHeap::new(),
            live: Array2::from_elem((height, width), None),
            len: 0,
        }
    }

    /// Number of cells in the frontier
    pub const fn len(&self) -> usize {
        self.len
    }

    /// True when no cells remain, meaning the grid is solved
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True when the cell is currently in the frontier
    pub fn contains(&self, position: Position) -> bool {
        self.entry(position).is_some()
    }

    /// Current key of a cell in the frontier
    pub fn entry(&self, position: Position) -> Option<FrontierEntry> {
        self.live.get(position.index()).copied().flatten()
    }

    /// Add a cell with a freshly drawn tie-break, replacing any existing key
    pub fn insert<R: Rng>(&mut self, position: Position, entropy: usize, rng: &mut R) {
        let entry = FrontierEntry {
            position,
            entropy,
            tie: rng.random(),
        };
        self.restore(entry);
    }

    /// Record a new entropy for a cell already in the frontier
    ///
    /// The cell draws a fresh tie-break, reshuffling it among cells of equal entropy.
    /// Cells not in the frontier are ignored.
    pub fn update_entropy<R: Rng>(&mut self, position: Position, entropy: usize, rng: &mut R) {
        if self.contains(position) {
            self.insert(position, entropy, rng);
        }
    }

    /// Reinsert a cell with a previously saved key
    pub fn restore(&mut self, entry: FrontierEntry) {
        let Some(slot) = self.live.get_mut(entry.position.index()) else {
            return;
        };
        if slot.is_none() {
            self.len += 1;
        }
        *slot = Some(entry);
        self.heap.push(Reverse(entry));
        self.compact_if_stale();
    }

    /// Take a cell out of the frontier, returning its key
    pub fn remove(&mut self, position: Position) -> Option<FrontierEntry> {
        let entry = self.live.get_mut(position.index())?.take()?;
        self.len -= 1;
        Some(entry)
    }

    /// Remove and return the cell with the lowest entropy, `None` when the frontier is empty
    pub fn pop_min_entropy(&mut self) -> Option<FrontierEntry> {
        while let Some(Reverse(entry)) = self.heap.pop() {
            if self.entry(entry.position) == Some(entry) {
                if let Some(slot) = self.live.get_mut(entry.position.index()) {
                    *slot = None;
                }
                self.len -= 1;
                return Some(entry);
            }
        }
        None
    }

    /// Lowest-entropy cell without removing it
    pub fn peek_min_entropy(&self) -> Option<FrontierEntry> {
        self.live.iter().flatten().min().copied()
    }

    /// Every live entry in the order it would be popped
    pub fn ordered(&self) -> Vec<FrontierEntry> {
        let mut entries: Vec<FrontierEntry> = self.live.iter().flatten().copied().collect();
        entries.sort_unstable();
        entries
    }

    // Rebuild from live keys when stale heap entries dominate
    fn compact_if_stale(&mut self) {
        if self.heap.len() > (self.len + 1) * FRONTIER_COMPACTION_FACTOR {
            self.heap = self.live.iter().flatten().copied().map(Reverse).collect();
        }
    }
}
