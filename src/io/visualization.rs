//! Frame capture and GIF generation for the placement stream

use image::{Frame, codecs::gif::GifEncoder};
use std::path::Path;

use crate::algorithm::events::{PlacementEvent, PlacementSink};
use crate::io::configuration::VIEWER_MIN_FRAME_DELAY_MS;
use crate::io::error::{AlgorithmError, Result, file_system_error};
use crate::io::image::render_grid;
use crate::spatial::grid::{Grid, Position};
use crate::spatial::tiles::{Placement, Rotation, TileCatalog, TileId};

/// Records placement events during a solve to replay them as an animation
///
/// Frames are rendered only at export time, so capturing costs one event clone per step.
pub struct VisualizationCapture {
    pub(crate) events: Vec<PlacementEvent>,
    initial: Grid,
    catalog: TileCatalog,
}

impl VisualizationCapture {
    /// Start a capture for a solve over `initial`, normally the freshly bordered grid
    pub fn new(initial: Grid, catalog: TileCatalog) -> Self {
        Self {
            events: Vec::new(),
            initial,
            catalog,
        }
    }

    /// Returns all recorded events
    pub fn events(&self) -> &[PlacementEvent] {
        &self.events
    }

    /// Returns the total number of recorded events
    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Export the captured events as a GIF with automatic frame skipping
    ///
    /// If the requested delay is below what viewers reliably honor, consecutive events
    /// are merged into one frame so the apparent animation speed is preserved.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No events were captured
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &Path, frame_delay_ms: u32) -> Result<()> {
        if self.events.is_empty() {
            return Err(AlgorithmError::InvalidParameter {
                parameter: "events",
                value: "0".to_string(),
                reason: "no placement events captured for visualization".to_string(),
            });
        }

        let frame_delay_ms = frame_delay_ms.max(1);
        let effective_delay_ms = frame_delay_ms.max(VIEWER_MIN_FRAME_DELAY_MS);
        let skip_factor = VIEWER_MIN_FRAME_DELAY_MS.div_ceil(frame_delay_ms).max(1) as usize;

        let frames = self.generate_frames(effective_delay_ms, skip_factor);

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(file_system_error(parent, "create directory"))?;
        }

        let file = std::fs::File::create(output_path)
            .map_err(file_system_error(output_path, "create file"))?;

        let mut encoder = GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| AlgorithmError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    fn generate_frames(&self, delay_ms: u32, skip_factor: usize) -> Vec<Frame> {
        let mut grid = self.initial.clone();
        let mut frames = vec![self.render_frame(&grid, delay_ms)];

        for (index, event) in self.events.iter().enumerate() {
            match event {
                PlacementEvent::Placed(record) => {
                    let rotation =
                        Rotation::from_degrees(record.rotation_degrees).unwrap_or(Rotation::R0);
                    grid.assign(
                        record.position(),
                        Placement::new(TileId(record.tile_id), rotation),
                    );
                }
                PlacementEvent::Removed { x, z } => {
                    grid.clear(Position::new(*x, *z));
                }
            }

            if (index + 1) % skip_factor == 0 {
                frames.push(self.render_frame(&grid, delay_ms));
            }
        }

        if self.events.len() % skip_factor != 0 {
            frames.push(self.render_frame(&grid, delay_ms));
        }

        // Final frame displays longer for better visibility
        frames.push(self.render_frame(&grid, delay_ms * 25));

        frames
    }

    fn render_frame(&self, grid: &Grid, delay_ms: u32) -> Frame {
        Frame::from_parts(
            render_grid(grid, &self.catalog),
            0,
            0,
            image::Delay::from_numer_denom_ms(delay_ms, 1),
        )
    }
}

impl PlacementSink for VisualizationCapture {
    fn on_event(&mut self, event: &PlacementEvent) {
        self.events.push(event.clone());
    }
}
