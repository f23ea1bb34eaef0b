/// Neighbor compatibility checks for candidate placements
pub mod adjacency;
/// Fixed-size bitset for candidate domains
pub mod bitset;
/// Per-cell domains and entropy
pub mod entropy;
/// Placement records and the incremental event stream
pub mod events;
/// Entropy-ordered working set of unassigned cells
pub mod frontier;
/// Backtracking search with bounded attempts
pub mod solver;
