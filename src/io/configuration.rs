//! Solver constants and runtime configuration defaults

/// Smallest grid dimension that still leaves an interior inside the border ring
pub const MIN_GRID_DIMENSION: usize = 3;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 10_000;

// Default values for configurable parameters
/// Default grid width including the border ring
pub const DEFAULT_WIDTH: usize = 10;

/// Default grid height including the border ring
pub const DEFAULT_HEIGHT: usize = 10;

/// Default maximum placement attempts before a solve is reported incomplete
pub const DEFAULT_MAX_ATTEMPTS: usize = 10_000;

/// Default number of reseeded retries after an unsatisfiable run
pub const DEFAULT_RESTARTS: usize = 0;

// Frontier heap is rebuilt once stale entries outnumber live ones by this factor
/// Stale entry ratio that triggers frontier compaction
pub const FRONTIER_COMPACTION_FACTOR: usize = 4;

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

/// Placement events between progress bar refreshes
pub const PROGRESS_REFRESH_EVENTS: usize = 64;

// Output settings
/// Suffix added to placement export filenames
pub const OUTPUT_SUFFIX: &str = "_placements";

/// Edge length in pixels of one cell in preview images
pub const PIXELS_PER_CELL: u32 = 3;

/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 5;

/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 50;
