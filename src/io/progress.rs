//! Progress display for solve runs

use crate::algorithm::events::{PlacementEvent, PlacementSink};
use crate::algorithm::solver::{SolveOutcome, SolveStats};
use crate::io::configuration::{PROGRESS_BAR_WIDTH, PROGRESS_REFRESH_EVENTS};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template =
        format!("[{{elapsed_precise}}] {{prefix}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{msg}}");
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Shows how many interior cells are currently assigned while a solve runs
///
/// The bar follows the search as it backtracks, so it moves both ways. It listens to
/// the solver's event stream and redraws every few events to keep overhead low.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    bar: Option<ProgressBar>,
    assigned: usize,
    interior: usize,
    events: usize,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a progress manager with no bar yet
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            bar: None,
            assigned: 0,
            interior: 0,
            events: 0,
        }
    }

    /// Shared output handle, used by the logger to print above the bars
    pub fn multi_progress(&self) -> MultiProgress {
        self.multi_progress.clone()
    }

    /// Number of cells assigned according to the events seen so far
    pub const fn assigned(&self) -> usize {
        self.assigned
    }

    /// Add a bar for a solve over `interior` cells
    pub fn start(&mut self, label: &str, interior: usize) {
        let bar = ProgressBar::new(interior as u64);
        bar.set_style(PROGRESS_STYLE.clone());
        bar.set_prefix(label.to_string());
        self.bar = Some(self.multi_progress.add(bar));
        self.assigned = 0;
        self.interior = interior;
        self.events = 0;
        self.refresh();
    }

    /// Close the bar with the outcome of the solve
    pub fn finish(&mut self, outcome: SolveOutcome, stats: &SolveStats) {
        if let Some(bar) = self.bar.take() {
            bar.set_position(self.assigned as u64);
            bar.finish_with_message(format!(
                "{outcome}: {} attempts, {} backtracks",
                stats.attempts, stats.backtracks
            ));
        }
    }

    fn refresh(&self) {
        if let Some(ref bar) = self.bar {
            bar.set_position(self.assigned as u64);
            let max_width = self.interior.to_string().len();
            bar.set_message(format!(
                "{:>max_width$}/{} cells",
                self.assigned, self.interior
            ));
        }
    }
}

impl PlacementSink for ProgressManager {
    fn on_event(&mut self, event: &PlacementEvent) {
        match event {
            PlacementEvent::Placed(_) => self.assigned += 1,
            PlacementEvent::Removed { .. } => self.assigned = self.assigned.saturating_sub(1),
        }
        self.events += 1;
        if self.events % PROGRESS_REFRESH_EVENTS == 0 {
            self.refresh();
        }
    }
}
