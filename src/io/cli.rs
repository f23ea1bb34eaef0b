//! Command-line interface for solving a grid and exporting the placements

use crate::algorithm::solver::{SolveOutcome, SolverConfig, solve_with_restarts};
use crate::io::catalog::{LoadedCatalog, builtin_catalog, load_catalog};
use crate::io::configuration::{
    DEFAULT_HEIGHT, DEFAULT_MAX_ATTEMPTS, DEFAULT_RESTARTS, DEFAULT_WIDTH, GIF_FRAME_DELAY_MS,
    OUTPUT_SUFFIX,
};
use crate::io::error::Result;
use crate::io::export::export_placements;
use crate::io::image::export_grid_as_png;
use crate::io::logging;
use crate::io::progress::ProgressManager;
use crate::io::visualization::VisualizationCapture;
use crate::spatial::grid::Grid;
use clap::Parser;
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Stem used for output files when the built-in catalog is in use
const BUILTIN_STEM: &str = "roads";

#[derive(Parser)]
#[command(name = "roadtiles")]
#[command(
    author,
    version,
    about = "Fill a bordered grid with rotated road tiles using backtracking wave function collapse"
)]
/// Command-line arguments for the solver
pub struct Cli {
    /// Catalog TOML file; the built-in road catalog is used when omitted
    #[arg(short, long, value_name = "CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Placement export path (defaults to <catalog>_placements.toml)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Grid width including the border ring
    #[arg(short = 'w', long, default_value_t = DEFAULT_WIDTH)]
    pub width: usize,

    /// Grid height including the border ring
    #[arg(short = 'H', long, default_value_t = DEFAULT_HEIGHT)]
    pub height: usize,

    /// Random seed for reproducible solves
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Maximum placement attempts before reporting an incomplete grid
    #[arg(short = 'a', long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: usize,

    /// Wall-clock limit for a single solve, in milliseconds
    #[arg(short, long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Retries with fresh seeds after an unsatisfiable run
    #[arg(short, long, default_value_t = DEFAULT_RESTARTS)]
    pub restarts: usize,

    /// Write a PNG preview next to the placement export
    #[arg(short, long)]
    pub preview: bool,

    /// Write an animated GIF replaying every placement and undo
    #[arg(short = 'g', long)]
    pub visualize: bool,

    /// Suppress progress output and all logging except errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase logging detail (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Path of the placement export
    pub fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            let (parent, stem) = self.output_base();
            parent.join(format!("{stem}{OUTPUT_SUFFIX}.toml"))
        })
    }

    /// Path of the PNG preview
    pub fn preview_path(&self) -> PathBuf {
        self.output_path().with_extension("png")
    }

    /// Path of the GIF replay
    pub fn visualization_path(&self) -> PathBuf {
        let output = self.output_path();
        let stem = output.file_stem().unwrap_or_default().to_string_lossy();
        output.with_file_name(format!("{stem}_visualization.gif"))
    }

    fn output_base(&self) -> (PathBuf, String) {
        self.catalog.as_ref().map_or_else(
            || (PathBuf::new(), BUILTIN_STEM.to_string()),
            |catalog| {
                (
                    catalog
                        .parent()
                        .map(Path::to_path_buf)
                        .unwrap_or_default(),
                    catalog
                        .file_stem()
                        .unwrap_or_default()
                        .to_string_lossy()
                        .to_string(),
                )
            },
        )
    }
}

/// Runs one solve as described by the command line and writes its outputs
pub struct SolveRunner {
    cli: Cli,
    progress: ProgressManager,
}

impl SolveRunner {
    /// Create a runner for the given arguments
    pub fn new(cli: Cli) -> Self {
        Self {
            cli,
            progress: ProgressManager::new(),
        }
    }

    /// Route `log` output through the progress display
    ///
    /// # Errors
    ///
    /// Returns an error if a logger is already installed
    pub fn install_logger(&self) -> Result<()> {
        logging::init(
            logging::level_for(self.cli.verbose, self.cli.quiet),
            self.progress.multi_progress(),
        )
    }

    /// Load the catalog named on the command line, or the built-in one
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be read or fails validation
    pub fn load_catalog(&self) -> Result<LoadedCatalog> {
        self.cli
            .catalog
            .as_deref()
            .map_or_else(builtin_catalog, load_catalog)
    }

    /// Build the solver configuration from the arguments and a catalog
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions or attempt budget are invalid
    pub fn config(&self, loaded: &LoadedCatalog) -> Result<SolverConfig> {
        let mut config = SolverConfig::new(
            self.cli.width,
            self.cli.height,
            loaded.border.clone(),
            loaded.catalog.clone(),
        )
        .with_max_attempts(self.cli.max_attempts);

        if let Some(seed) = self.cli.seed {
            config = config.with_seed(seed);
        }
        if let Some(timeout_ms) = self.cli.timeout_ms {
            config = config.with_deadline(Duration::from_millis(timeout_ms));
        }

        config.validate()?;
        Ok(config)
    }

    /// Solve and write the placement export plus any requested previews
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, catalog loading or any export fails
    pub fn run(&mut self) -> Result<SolveOutcome> {
        let loaded = self.load_catalog()?;
        let config = self.config(&loaded)?;
        info!(
            "Loaded {} tile types, border '{}'",
            loaded.catalog.len(),
            loaded.border.name
        );

        let mut capture = if self.cli.visualize {
            let initial = Grid::new(config.width, config.height, loaded.border.signature)?;
            Some(VisualizationCapture::new(initial, loaded.catalog.clone()))
        } else {
            None
        };

        let show_progress = self.cli.should_show_progress();
        if show_progress {
            let label = format!("{}x{}", config.width, config.height);
            self.progress
                .start(&label, (config.width - 2) * (config.height - 2));
        }

        let report = {
            let mut sink = (show_progress.then_some(&mut self.progress), capture.as_mut());
            solve_with_restarts(&config, self.cli.restarts, &mut sink)?
        };

        if show_progress {
            self.progress.finish(report.outcome, &report.stats);
        }

        match report.outcome {
            SolveOutcome::Solved => info!(
                "Solved with seed {} after {} attempts and {} backtracks",
                report.seed, report.stats.attempts, report.stats.backtracks
            ),
            SolveOutcome::Failed => warn!(
                "No arrangement exists for seed {} (last run); consider more restarts",
                report.seed
            ),
            SolveOutcome::Incomplete => warn!(
                "Stopped after {} attempts with {} of {} cells assigned",
                report.stats.attempts,
                report.grid.assigned_count(),
                report.grid.interior_count()
            ),
        }

        let output_path = self.cli.output_path();
        export_placements(&report, &loaded.border.name, &output_path)?;
        info!("Wrote placements to {}", output_path.display());

        if self.cli.preview {
            if report.grid.assigned_count() > 0 {
                export_grid_as_png(&report.grid, &config.catalog, &self.cli.preview_path())?;
            } else {
                warn!("Skipping preview: no cell was assigned");
            }
        }

        if let Some(capture) = capture {
            if capture.event_count() > 0 {
                capture.export_gif(&self.cli.visualization_path(), GIF_FRAME_DELAY_MS)?;
            } else {
                warn!("Skipping visualization: no placement events were captured");
            }
        }

        Ok(report.outcome)
    }
}
