use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset over dense candidate indices
///
/// Bit `tile * 4 + rotation` is set when that tile and rotation pair is still
/// admissible. Provides O(1) membership testing and cheap cloning for undo snapshots.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CandidateSet {
    bits: BitVec,
}

impl CandidateSet {
    /// Create a set with no candidates present
    pub fn new(capacity: usize) -> Self {
        Self {
            bits: bitvec![0; capacity],
        }
    }

    /// Create a set containing every candidate
    pub fn all(capacity: usize) -> Self {
        Self {
            bits: bitvec![1; capacity],
        }
    }

    /// Number of addressable candidates
    pub fn capacity(&self) -> usize {
        self.bits.len()
    }

    /// Insert a candidate index, ignoring indices past the capacity
    pub fn insert(&mut self, index: usize) {
        if index < self.bits.len() {
            self.bits.set(index, true);
        }
    }

    /// Test candidate membership
    pub fn contains(&self, index: usize) -> bool {
        self.bits.get(index).as_deref() == Some(&true)
    }

    /// Remove every candidate
    pub fn clear(&mut self) {
        self.bits.fill(false);
    }

    /// Mark every candidate present
    pub fn fill(&mut self) {
        self.bits.fill(true);
    }

    /// Test if no candidates are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count candidates in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Iterate candidate indices in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// True when every candidate of `self` is also in `other`
    pub fn is_subset(&self, other: &Self) -> bool {
        self.iter().all(|index| other.contains(index))
    }
}

impl fmt::Display for CandidateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let indices: Vec<usize> = self.iter().collect();
        write!(f, "CandidateSet({} candidates: {indices:?})", self.count())
    }
}
