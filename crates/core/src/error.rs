//! Error types for grid validation, model configuration, and scenario parsing.
//!
//! Every failure in the core is deterministic given the same inputs; none is
//! transient or worth retrying. Malformed grids and bad parameters are
//! rejected before the first step runs.

use std::fmt;

/// Structural problems in a grid of cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Grid has no rows or no columns
    Empty,
    /// A row's length differs from the first row's
    NotRectangular {
        /// Offending row index
        row: usize,
        /// Length of the first row
        expected: usize,
        /// Length of the offending row
        found: usize,
    },
    /// A cell's stored position does not match its storage location
    PositionMismatch {
        /// Column of the offending slot
        x: usize,
        /// Row of the offending slot
        y: usize,
    },
    /// Vegetation and density disagree about the absence of fuel
    FuelMismatch {
        /// Column of the offending cell
        x: usize,
        /// Row of the offending cell
        y: usize,
    },
    /// Coordinates outside the grid
    OutOfBounds {
        /// Requested column
        x: usize,
        /// Requested row
        y: usize,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::Empty => write!(f, "Grid must have at least one row and one column"),
            GridError::NotRectangular {
                row,
                expected,
                found,
            } => write!(
                f,
                "Grid must be rectangular: row {row} has {found} cells, expected {expected}"
            ),
            GridError::PositionMismatch { x, y } => {
                write!(f, "Cell at ({x}, {y}) carries a different position")
            }
            GridError::FuelMismatch { x, y } => write!(
                f,
                "Cell at ({x}, {y}) pairs vegetation and density inconsistently"
            ),
            GridError::OutOfBounds { x, y } => {
                write!(f, "Position ({x}, {y}) is outside the grid")
            }
        }
    }
}

impl std::error::Error for GridError {}

/// Invalid ignition model configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Base ignition probability outside `(0, 1]`
    BaseProbabilityOutOfRange(f32),
    /// A model coefficient is NaN or infinite
    NonFiniteCoefficient(&'static str),
    /// Cell diameter must be finite and positive
    NonPositiveCellDiameter(f32),
    /// Wind speed must be finite and non-negative
    InvalidWindSpeed(f32),
    /// Zero-length wind direction with a nonzero speed
    DirectionlessWind,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::BaseProbabilityOutOfRange(p0) => {
                write!(f, "Base ignition probability must be in (0, 1], got {p0}")
            }
            ConfigError::NonFiniteCoefficient(name) => {
                write!(f, "Coefficient '{name}' must be finite")
            }
            ConfigError::NonPositiveCellDiameter(value) => {
                write!(f, "Cell diameter must be finite and positive, got {value}")
            }
            ConfigError::InvalidWindSpeed(speed) => {
                write!(f, "Wind speed must be finite and non-negative, got {speed}")
            }
            ConfigError::DirectionlessWind => {
                write!(f, "Wind direction must be non-zero when wind speed is nonzero")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Problems turning a scenario description into a runnable simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum ScenarioError {
    /// The JSON document could not be parsed
    Parse(String),
    /// Unrecognized burn state code
    UnknownStateCode(u8),
    /// Unrecognized vegetation code
    UnknownVegetationCode(String),
    /// Unrecognized density code
    UnknownDensityCode(String),
    /// The described grid failed structural validation
    Grid(GridError),
    /// The run parameters failed validation
    Config(ConfigError),
}

impl fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioError::Parse(msg) => write!(f, "Failed to parse scenario: {msg}"),
            ScenarioError::UnknownStateCode(code) => {
                write!(f, "Unknown state code {code}, expected 0-3")
            }
            ScenarioError::UnknownVegetationCode(code) => {
                write!(f, "Unknown vegetation code '{code}', expected for|agr|shr|nov")
            }
            ScenarioError::UnknownDensityCode(code) => {
                write!(f, "Unknown density code '{code}', expected den|nor|spa|nov")
            }
            ScenarioError::Grid(e) => write!(f, "Invalid grid: {e}"),
            ScenarioError::Config(e) => write!(f, "Invalid run parameters: {e}"),
        }
    }
}

impl std::error::Error for ScenarioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScenarioError::Grid(e) => Some(e),
            ScenarioError::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for ScenarioError {
    fn from(e: GridError) -> Self {
        ScenarioError::Grid(e)
    }
}

impl From<ConfigError> for ScenarioError {
    fn from(e: ConfigError) -> Self {
        ScenarioError::Config(e)
    }
}
