//! Placement records and the incremental event stream consumed by renderers

use serde::{Deserialize, Serialize};

use crate::spatial::grid::Position;
use crate::spatial::tiles::{Placement, TileCatalog};

/// One assigned cell as handed to a renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementRecord {
    /// Column
    pub x: usize,
    /// Row
    pub z: usize,
    /// Catalog identifier of the tile
    pub tile_id: usize,
    /// Tile display name
    pub tile: String,
    /// Clockwise rotation, one of 0, 90, 180 or 270
    pub rotation_degrees: u16,
}

impl PlacementRecord {
    /// Build a record for a placement, resolving the tile name through the catalog
    pub fn new(position: Position, placement: Placement, catalog: &TileCatalog) -> Self {
        let tile = catalog
            .get(placement.tile)
            .map(|tile_type| tile_type.name.clone())
            .unwrap_or_default();
        Self {
            x: position.x,
            z: position.z,
            tile_id: placement.tile.0,
            tile,
            rotation_degrees: placement.rotation.degrees(),
        }
    }

    /// Cell the record refers to
    pub const fn position(&self) -> Position {
        Position::new(self.x, self.z)
    }
}

/// Incremental change emitted for every placement and every undo
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementEvent {
    /// A candidate was assigned to a cell
    Placed(PlacementRecord),
    /// A cell was returned to the empty state during backtracking
    Removed {
        /// Column
        x: usize,
        /// Row
        z: usize,
    },
}

/// Receiver of the solver's placement stream
///
/// The solver calls the sink exactly once per placement and once per undo, and for
/// nothing else. Implementations must not assume the stream ends in a solved grid.
pub trait PlacementSink {
    /// Handle one event
    fn on_event(&mut self, event: &PlacementEvent);
}

/// Sink that discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl PlacementSink for NullSink {
    fn on_event(&mut self, _event: &PlacementEvent) {}
}

/// Sink that keeps every event in memory
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    /// Events in emission order
    pub events: Vec<PlacementEvent>,
}

impl EventLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of placements recorded
    pub fn placed_count(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, PlacementEvent::Placed(_)))
            .count()
    }

    /// Number of removals recorded
    pub fn removed_count(&self) -> usize {
        self.events.len() - self.placed_count()
    }
}

impl PlacementSink for EventLog {
    fn on_event(&mut self, event: &PlacementEvent) {
        self.events.push(event.clone());
    }
}

impl<S: PlacementSink + ?Sized> PlacementSink for &mut S {
    fn on_event(&mut self, event: &PlacementEvent) {
        (**self).on_event(event);
    }
}

impl<S: PlacementSink> PlacementSink for Option<S> {
    fn on_event(&mut self, event: &PlacementEvent) {
        if let Some(sink) = self {
            sink.on_event(event);
        }
    }
}

impl<A: PlacementSink, B: PlacementSink> PlacementSink for (A, B) {
    fn on_event(&mut self, event: &PlacementEvent) {
        self.0.on_event(event);
        self.1.on_event(event);
    }
}
