//! TOML export of solved placements for downstream renderers

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::algorithm::events::PlacementRecord;
use crate::algorithm::solver::SolveReport;
use crate::io::error::{AlgorithmError, Result, file_system_error};

/// File layout of a placement export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementExport {
    /// `solved`, `failed` or `incomplete`
    pub outcome: String,
    // TOML integers are signed 64-bit, seeds are not
    /// Seed of the run, written as a decimal string
    pub seed: String,
    /// Placement attempts used
    pub attempts: usize,
    /// Placements undone
    pub backtracks: usize,
    /// Grid width including the border
    pub width: usize,
    /// Grid height including the border
    pub height: usize,
    /// Border tile name
    pub border: String,
    /// Assigned interior cells in row-major order
    pub placements: Vec<PlacementRecord>,
}

impl PlacementExport {
    /// Build the export layout for a finished solve
    pub fn from_report(report: &SolveReport, border: &str) -> Self {
        Self {
            outcome: report.outcome.to_string(),
            seed: report.seed.to_string(),
            attempts: report.stats.attempts,
            backtracks: report.stats.backtracks,
            width: report.grid.width(),
            height: report.grid.height(),
            border: border.to_string(),
            placements: report.placements.clone(),
        }
    }
}

/// Write a solve report as TOML
///
/// # Errors
///
/// Returns an error if serialization fails, the parent directory cannot be created or
/// the file cannot be written
pub fn export_placements(report: &SolveReport, border: &str, output_path: &Path) -> Result<()> {
    let export = PlacementExport::from_report(report, border);
    let text =
        toml::to_string_pretty(&export).map_err(|source| AlgorithmError::Serialization {
            path: output_path.to_path_buf(),
            source,
        })?;

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(file_system_error(parent, "create directory"))?;
    }

    std::fs::write(output_path, text).map_err(file_system_error(output_path, "write placements"))
}

/// Read a placement export back
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a placement export
pub fn read_placements(path: &Path) -> Result<PlacementExport> {
    let content =
        std::fs::read_to_string(path).map_err(file_system_error(path, "read placements"))?;
    toml::from_str(&content).map_err(|source| AlgorithmError::TomlParse {
        path: path.to_path_buf(),
        source,
    })
}
