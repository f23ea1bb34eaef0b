//! Input/output: catalog files, exports, CLI, progress display and logging

/// Catalog file loading and the built-in road catalog
pub mod catalog;
/// Command-line interface
pub mod cli;
/// Solver constants and runtime defaults
pub mod configuration;
/// Error types
pub mod error;
/// Placement export
pub mod export;
/// PNG preview of a grid
pub mod image;
/// `log` backend that cooperates with progress bars
pub mod logging;
/// Progress display for solve runs
pub mod progress;
/// Animated replay of the placement stream
pub mod visualization;
