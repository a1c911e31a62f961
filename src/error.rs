//! Error types for the miniplot library.

use std::fmt;
use std::io;

/// The main error type for miniplot operations.
#[derive(Debug)]
pub enum PlotError {
    /// Error during IO operations (file writing, etc.)
    Io(io::Error),
    /// Invalid data provided for plotting
    InvalidData(String),
    /// Invalid configuration or parameters
    InvalidConfig(String),
    /// Empty data provided where non-empty data is required
    EmptyData,
    /// A source range with zero extent reached the coordinate transform.
    /// Callers are expected to expand degenerate ranges before mapping.
    DegenerateRange { axis: Axis, lo: f64, hi: f64 },
    /// A logarithmic axis was requested over a range that is not strictly
    /// positive.
    NonPositiveLogRange { axis: Axis, lo: f64, hi: f64 },
    /// The interior-region layout iteration did not meet tolerance within
    /// the configured iteration cap.
    LayoutDidNotConverge { iterations: usize },
}

/// Axis identifier used in error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

impl fmt::Display for PlotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlotError::Io(err) => write!(f, "IO error: {}", err),
            PlotError::InvalidData(msg) => write!(f, "Invalid data: {}", msg),
            PlotError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            PlotError::EmptyData => write!(f, "Empty data provided"),
            PlotError::DegenerateRange { axis, lo, hi } => write!(
                f,
                "Degenerate {} range [{}, {}]: zero extent cannot be mapped",
                axis, lo, hi
            ),
            PlotError::NonPositiveLogRange { axis, lo, hi } => write!(
                f,
                "Logarithmic {} axis requires a strictly positive range, got [{}, {}]",
                axis, lo, hi
            ),
            PlotError::LayoutDidNotConverge { iterations } => write!(
                f,
                "Plot layout did not converge after {} iterations",
                iterations
            ),
        }
    }
}

impl std::error::Error for PlotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlotError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for PlotError {
    fn from(err: io::Error) -> Self {
        PlotError::Io(err)
    }
}

/// Result type alias for miniplot operations.
pub type PlotResult<T> = Result<T, PlotError>;
