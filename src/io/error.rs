//! Error types and context management for grid, routing and export operations

use std::fmt;
use std::path::PathBuf;

use crate::routing::route::RouteId;
use crate::spatial::coordinate::Coordinate;

/// Main error type for all path tile operations
#[derive(Debug)]
pub enum PathError {
    /// Coordinate lies outside the current grid
    OutOfBounds {
        /// The rejected coordinate
        coordinate: Coordinate,
        /// Grid width at the time of the call
        width: usize,
        /// Grid height at the time of the call
        height: usize,
    },

    /// Grid resize request with a non-positive or oversized dimension
    ///
    /// The grid is left unchanged when this is returned.
    InvalidDimension {
        /// Requested width
        width: i32,
        /// Requested height
        height: i32,
    },

    /// Route is too short or contains a non-adjacent consecutive pair
    InvalidRoute {
        /// Identity of the rejected route
        route: RouteId,
        /// Description of the first problem found
        reason: String,
    },

    /// Route was connected twice without an intervening disconnect
    AlreadyConnected {
        /// Identity of the route
        route: RouteId,
    },

    /// Route was disconnected without being connected
    RouteNotConnected {
        /// Identity of the route
        route: RouteId,
    },

    /// Cell is claimed by at least one route and cannot host a building
    CellOccupied {
        /// The claimed coordinate
        coordinate: Coordinate,
        /// Number of route legs currently passing through the cell
        claims: u32,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Scenario file line could not be parsed
    ScenarioParse {
        /// Scenario file
        path: PathBuf,
        /// 1-based line number
        line: usize,
        /// Description of the syntax problem
        reason: String,
    },

    /// Scenario command parsed but failed when applied to the network
    ScenarioStep {
        /// Scenario file
        path: PathBuf,
        /// 1-based line number
        line: usize,
        /// Underlying grid or routing error
        source: Box<PathError>,
    },

    /// Failed to save a rendered image to disk
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

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds {
                coordinate,
                width,
                height,
            } => {
                write!(
                    f,
                    "Coordinate {coordinate} is outside the {width}x{height} grid"
                )
            }
            Self::InvalidDimension { width, height } => {
                write!(f, "Invalid grid dimensions {width}x{height}")
            }
            Self::InvalidRoute { route, reason } => {
                write!(f, "Invalid route {route}: {reason}")
            }
            Self::AlreadyConnected { route } => {
                write!(f, "Route {route} is already connected")
            }
            Self::RouteNotConnected { route } => {
                write!(f, "Route {route} is not connected")
            }
            Self::CellOccupied { coordinate, claims } => {
                write!(
                    f,
                    "Cell {coordinate} is occupied by {claims} route leg(s)"
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ScenarioParse { path, line, reason } => {
                write!(f, "{}:{line}: {reason}", path.display())
            }
            Self::ScenarioStep { path, line, source } => {
                write!(f, "{}:{line}: {source}", path.display())
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

impl std::error::Error for PathError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            Self::ScenarioStep { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

/// Convenience type alias for path tile results
pub type Result<T> = std::result::Result<T, PathError>;

/// Scenario location attached to errors raised while replaying a file
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Scenario file being replayed
    pub path: Option<PathBuf>,
    /// 1-based line of the command being applied
    pub line: Option<usize>,
}

/// Enriches errors with the scenario location that triggered them
pub trait WithContext<T> {
    /// Add error context to a Result
    ///
    /// # Errors
    ///
    /// Propagates the original error, wrapped in `ScenarioStep` when a line is known
    fn with_context(self, context: ErrorContext) -> Result<T>;

    /// Attach a scenario file and line
    ///
    /// # Errors
    ///
    /// Propagates the original error with the location applied
    fn at_line(self, path: &std::path::Path, line: usize) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<PathError>,
{
    fn with_context(self, context: ErrorContext) -> Result<T> {
        self.map_err(|e| {
            let error = e.into();
            match (context.line, error) {
                // Already located errors keep their original position
                (_, located @ (PathError::ScenarioStep { .. } | PathError::ScenarioParse { .. })) => {
                    located
                }
                (Some(line), inner) => PathError::ScenarioStep {
                    path: context.path.unwrap_or_else(|| PathBuf::from("<unknown>")),
                    line,
                    source: Box::new(inner),
                },
                (None, inner) => inner,
            }
        })
    }

    fn at_line(self, path: &std::path::Path, line: usize) -> Result<T> {
        self.with_context(ErrorContext {
            path: Some(path.to_path_buf()),
            line: Some(line),
        })
    }
}

impl From<std::io::Error> for PathError {
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
) -> PathError {
    PathError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid route error
pub fn invalid_route(route: RouteId, reason: &impl ToString) -> PathError {
    PathError::InvalidRoute {
        route,
        reason: reason.to_string(),
    }
}
