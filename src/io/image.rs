//! PNG preview of a grid with open sides drawn as connectors

use image::{ImageBuffer, Rgba, RgbaImage};
use std::path::Path;

use crate::io::configuration::PIXELS_PER_CELL;
use crate::io::error::{AlgorithmError, Result, file_system_error};
use crate::spatial::grid::{CellState, Grid, Position};
use crate::spatial::tiles::{CLOSED, Category, Direction, SideSignature, TileCatalog, TileId};

const EMPTY_COLOR: [u8; 4] = [0, 0, 0, 0];
const BORDER_COLOR: [u8; 4] = [96, 96, 96, 255];

/// Fill color for a tile's center pixel
///
/// Hues are spread by the golden angle so neighboring identifiers stay distinguishable.
pub fn tile_color(tile: TileId) -> [u8; 4] {
    let hue = (tile.0 as f64 * 137.508) % 360.0;
    let [r, g, b] = hue_to_rgb(hue, 0.45, 0.75);
    [r, g, b, 255]
}

/// Color used for an open side of the given category
pub fn category_color(category: Category) -> [u8; 4] {
    if category == CLOSED {
        return EMPTY_COLOR;
    }
    let shade = 40u8.saturating_add((category.unsigned_abs() as u8).wrapping_mul(53));
    [shade, shade, shade, 255]
}

// Fixed-saturation HSV conversion, enough for a preview palette
fn hue_to_rgb(hue: f64, saturation: f64, value: f64) -> [u8; 3] {
    let chroma = value * saturation;
    let sector = hue / 60.0;
    let x = chroma * (1.0 - ((sector % 2.0) - 1.0).abs());
    let (r, g, b) = match sector as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = value - chroma;
    [
        ((r + m) * 255.0).round() as u8,
        ((g + m) * 255.0).round() as u8,
        ((b + m) * 255.0).round() as u8,
    ]
}

/// Draw every cell as a small block: the center shows the tile, the edge pixels show
/// which sides are open after rotation
pub fn render_grid(grid: &Grid, catalog: &TileCatalog) -> RgbaImage {
    let scale = PIXELS_PER_CELL;
    let mut img: RgbaImage =
        ImageBuffer::new(grid.width() as u32 * scale, grid.height() as u32 * scale);

    for z in 0..grid.height() {
        for x in 0..grid.width() {
            let position = Position::new(x, z);
            let (fill, signature) = match grid.state(position) {
                Some(CellState::Border) => (BORDER_COLOR, Some(grid.border())),
                Some(CellState::Assigned(placement)) => (
                    tile_color(placement.tile),
                    catalog.rotated_signature(placement),
                ),
                _ => (EMPTY_COLOR, None),
            };
            draw_cell(&mut img, position, fill, signature);
        }
    }

    img
}

fn draw_cell(
    img: &mut RgbaImage,
    position: Position,
    fill: [u8; 4],
    signature: Option<SideSignature>,
) {
    let scale = PIXELS_PER_CELL;
    let origin_x = position.x as u32 * scale;
    let origin_y = position.z as u32 * scale;
    let mid = scale / 2;

    for dy in 0..scale {
        for dx in 0..scale {
            img.put_pixel(origin_x + dx, origin_y + dy, Rgba(fill));
        }
    }

    let Some(signature) = signature else {
        return;
    };
    for direction in Direction::ALL {
        let category = signature.side(direction);
        if category == CLOSED {
            continue;
        }
        let (dx, dy) = match direction {
            Direction::North => (mid, 0),
            Direction::East => (scale - 1, mid),
            Direction::South => (mid, scale - 1),
            Direction::West => (0, mid),
        };
        img.put_pixel(origin_x + dx, origin_y + dy, Rgba(category_color(category)));
    }
}

/// Export a grid preview as PNG
///
/// # Errors
///
/// Returns an error if:
/// - No interior cell has been assigned
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_grid_as_png(grid: &Grid, catalog: &TileCatalog, output_path: &Path) -> Result<()> {
    if grid.assigned_count() == 0 {
        return Err(AlgorithmError::InvalidParameter {
            parameter: "grid",
            value: format!("{}x{}", grid.width(), grid.height()),
            reason: "no interior cell has been assigned".to_string(),
        });
    }

    let img = render_grid(grid, catalog);

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(file_system_error(parent, "create directory"))?;
    }

    img.save(output_path)
        .map_err(|e| AlgorithmError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
