/// Dimensions of the built-in default floorplan (one empty room).
pub const DEFAULT_WIDTH: usize = 10;
pub const DEFAULT_HEIGHT: usize = 5;

/// Smallest legal floorplan axis. A 3x3 plan is the smallest that still has
/// an interior cell inside the bounding wall ring.
pub const MIN_AXIS: usize = 3;

/// Seed value for field cells not owned by any sensor. The expected average
/// value of the whole space gives the fastest settling.
pub const DEFAULT_SEED_VALUE: f32 = 100.0;

/// Display scale for legend values: a stored value of 2150 is shown as 21.5.
pub const LEGEND_SCALE: f32 = 100.0;
