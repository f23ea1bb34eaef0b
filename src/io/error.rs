//! Error types for catalog validation, solver configuration and file output

use std::fmt;
use std::path::PathBuf;

use crate::spatial::tiles::{Category, Direction};

/// Main error type for all crate operations
///
/// Every variant describes a configuration or I/O problem detected before or after a
/// solve. Contradictions and exhausted attempt budgets are search outcomes, not errors.
#[derive(Debug)]
pub enum AlgorithmError {
    /// Catalog contents are malformed
    InvalidCatalog {
        /// Tile or category the problem was found on
        subject: String,
        /// Description of what's wrong
        reason: String,
    },

    /// A tile side references a category the catalog never declared
    UndefinedCategory {
        /// Tile name
        tile: String,
        /// Offending side
        side: Direction,
        /// Category value found on that side
        category: Category,
    },

    /// A tile does not carry exactly four side entries
    SignatureLength {
        /// Tile name
        tile: String,
        /// Number of entries provided
        len: usize,
    },

    /// Grid dimensions are outside the supported range
    InvalidDimensions {
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
        /// Explanation of the accepted range
        reason: String,
    },

    /// Solver parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// A TOML file is malformed or does not match the expected layout
    TomlParse {
        /// Path of the file
        path: PathBuf,
        /// Underlying parse error
        source: toml::de::Error,
    },

    /// Placement export could not be serialized
    Serialization {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying serialization error
        source: toml::ser::Error,
    },

    /// Failed to save a preview image or animation
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for AlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCatalog { subject, reason } => {
                write!(f, "Invalid catalog entry '{subject}': {reason}")
            }
            Self::UndefinedCategory {
                tile,
                side,
                category,
            } => {
                write!(
                    f,
                    "Tile '{tile}' references undefined category {category} on its {side:?} side"
                )
            }
            Self::SignatureLength { tile, len } => {
                write!(f, "Tile '{tile}' has {len} side entries, expected 4")
            }
            Self::InvalidDimensions {
                width,
                height,
                reason,
            } => {
                write!(f, "Invalid grid size {width}x{height}: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::TomlParse { path, source } => {
                write!(f, "Failed to parse '{}': {source}", path.display())
            }
            Self::Serialization { path, source } => {
                write!(
                    f,
                    "Failed to serialize placements for '{}': {source}",
                    path.display()
                )
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for AlgorithmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Serialization { source, .. } => Some(source),
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for crate results
pub type Result<T> = std::result::Result<T, AlgorithmError>;

impl From<std::io::Error> for AlgorithmError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> AlgorithmError {
    AlgorithmError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid catalog error
pub fn invalid_catalog(subject: &impl ToString, reason: &impl ToString) -> AlgorithmError {
    AlgorithmError::InvalidCatalog {
        subject: subject.to_string(),
        reason: reason.to_string(),
    }
}

/// Attach a path and operation to an I/O error
pub fn file_system_error(
    path: impl Into<PathBuf>,
    operation: &'static str,
) -> impl FnOnce(std::io::Error) -> AlgorithmError {
    let path = path.into();
    move |source| AlgorithmError::FileSystem {
        path,
        operation,
        source,
    }
}
