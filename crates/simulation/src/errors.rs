// ---------------------------------------------------------------------------
// Errors for scenario configuration and sensor lookups
// ---------------------------------------------------------------------------

use std::fmt;

/// Errors raised while configuring a scenario or wiring grids together.
///
/// All of these are fatal to the operation that raised them: the call leaves
/// no partial state behind and the caller decides whether to retry with a
/// fixed configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Region assignment was requested with an empty sensor registry.
    NoSensors,
    /// A floorplan axis is below the minimum (no interior would exist).
    GridTooSmall { width: usize, height: usize },
    /// Two grids that must share the floorplan's dimensions do not.
    DimensionMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
    /// A sensor was placed outside the floorplan bounds.
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    /// A sensor was placed on a wall or barrier cell.
    NotAir { x: usize, y: usize },
    /// A sensor was placed on a cell already claimed by another sensor.
    CellOccupied { x: usize, y: usize, occupant: u32 },
    /// A sensor id is already registered.
    DuplicateSensorId { id: u32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoSensors => write!(f, "no sensors registered"),
            ConfigError::GridTooSmall { width, height } => {
                write!(f, "floorplan {width}x{height} is too small for an interior")
            }
            ConfigError::DimensionMismatch { expected, found } => write!(
                f,
                "grid dimensions {}x{} do not match the floorplan's {}x{}",
                found.0, found.1, expected.0, expected.1
            ),
            ConfigError::OutOfBounds {
                x,
                y,
                width,
                height,
            } => write!(f, "({x},{y}) is outside the {width}x{height} floorplan"),
            ConfigError::NotAir { x, y } => {
                write!(f, "cell ({x},{y}) is not an air cell")
            }
            ConfigError::CellOccupied { x, y, occupant } => {
                write!(f, "cell ({x},{y}) is already occupied by sensor {occupant}")
            }
            ConfigError::DuplicateSensorId { id } => {
                write!(f, "sensor id {id} is already registered")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// A reading was submitted for a sensor id that was never registered.
///
/// Recoverable by design: reading lookups for such an id resolve to `None`
/// rather than failing, so a renderer can keep running while a sensor is
/// offline or misconfigured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownSensorError {
    pub id: u32,
}

impl fmt::Display for UnknownSensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown sensor id {}", self.id)
    }
}

impl std::error::Error for UnknownSensorError {}
