use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_HEIGHT, DEFAULT_SEED_VALUE, DEFAULT_WIDTH};
use crate::errors::ConfigError;
use crate::floorplan::Floorplan;
use crate::regions::RegionMap;
use crate::sensors::{SensorReadings, SensorRegistry};

/// The estimated scalar field, one value per floorplan cell.
///
/// Values at non-air cells are 0.0 and unused. Advanced one smoothing pass
/// at a time; the caller owns the pacing.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldGrid {
    values: Vec<f32>,
    width: usize,
    height: usize,
}

impl Default for FieldGrid {
    fn default() -> Self {
        Self::filled(DEFAULT_WIDTH, DEFAULT_HEIGHT, DEFAULT_SEED_VALUE)
    }
}

impl FieldGrid {
    pub fn filled(width: usize, height: usize, value: f32) -> Self {
        Self {
            values: vec![value; width * height],
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.values[y * self.width + x]
    }

    pub fn set(&mut self, x: usize, y: usize, value: f32) {
        self.values[y * self.width + x] = value;
    }

    /// Largest absolute per-cell difference to another field, for caller-side
    /// fixed-point checks. Mismatched dimensions count as maximally
    /// different and return infinity.
    pub fn max_diff(&self, other: &FieldGrid) -> f32 {
        if self.width != other.width || self.height != other.height {
            return f32::INFINITY;
        }
        self.values
            .iter()
            .zip(other.values.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f32::max)
    }
}

/// Cells whose field value is pinned and never altered by relaxation:
/// the sensors' own measurement cells.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticMask {
    pinned: Vec<bool>,
    width: usize,
    height: usize,
}

impl Default for StaticMask {
    fn default() -> Self {
        Self::empty(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl StaticMask {
    pub fn empty(width: usize, height: usize) -> Self {
        Self {
            pinned: vec![false; width * height],
            width,
            height,
        }
    }

    /// Pin each registered sensor's cell. Sensors that fall outside the plan
    /// (a stale registry mid-reconfiguration) are skipped.
    pub fn from_sensors(plan: &Floorplan, registry: &SensorRegistry) -> Self {
        let mut mask = Self::empty(plan.width(), plan.height());
        for sensor in registry.iter() {
            if plan.in_bounds(sensor.x, sensor.y) {
                mask.pin(sensor.x, sensor.y);
            } else {
                debug!(
                    "sensor {} at ({},{}) is outside the current plan, not pinned",
                    sensor.id, sensor.x, sensor.y
                );
            }
        }
        mask
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pin(&mut self, x: usize, y: usize) {
        self.pinned[y * self.width + x] = true;
    }

    pub fn is_pinned(&self, x: usize, y: usize) -> bool {
        self.pinned[y * self.width + x]
    }
}

fn check_dimensions(
    plan: &Floorplan,
    width: usize,
    height: usize,
) -> Result<(), ConfigError> {
    if width != plan.width() || height != plan.height() {
        return Err(ConfigError::DimensionMismatch {
            expected: (plan.width(), plan.height()),
            found: (width, height),
        });
    }
    Ok(())
}

/// Seed the field from region ownership and the current readings.
///
/// Non-air cells get 0.0. Air cells owned by a sensor start at that sensor's
/// reading, falling back to `default_value` when no reading was recorded.
/// Unowned air cells start at `default_value`.
pub fn initialize_field(
    plan: &Floorplan,
    regions: &RegionMap,
    readings: &SensorReadings,
    default_value: f32,
) -> Result<FieldGrid, ConfigError> {
    check_dimensions(plan, regions.width(), regions.height())?;

    let mut field = FieldGrid::filled(plan.width(), plan.height(), 0.0);
    for y in 0..plan.height() {
        for x in 0..plan.width() {
            if !plan.get(x, y).is_air() {
                continue;
            }
            let value = match regions.get(x, y) {
                Some(id) => readings.get(id).unwrap_or(default_value),
                None => default_value,
            };
            field.set(x, y, value);
        }
    }
    Ok(field)
}

/// One Jacobi smoothing pass over the field.
///
/// Each interior, unpinned air cell takes the arithmetic mean of its air
/// Moore neighbors, read from the input field, summed once and divided once.
/// Barrier neighbors are missing edges: excluded from both sum and count. A
/// cell with no air neighbor keeps its value. Pinned cells, non-air cells,
/// and the outer ring are copied unchanged. The input field is not mutated,
/// so callers can diff successive fields to detect a fixed point; there is
/// no internal convergence check.
pub fn relax_step(
    plan: &Floorplan,
    field: &FieldGrid,
    mask: &StaticMask,
) -> Result<FieldGrid, ConfigError> {
    check_dimensions(plan, field.width(), field.height())?;
    check_dimensions(plan, mask.width(), mask.height())?;

    let mut next = field.clone();
    for y in 1..plan.height() - 1 {
        for x in 1..plan.width() - 1 {
            if !plan.get(x, y).is_air() || mask.is_pinned(x, y) {
                continue;
            }

            let mut sum = 0.0;
            let mut count = 0u32;
            let (neighbors, n) = plan.moore_neighbors(x, y);
            for &(nx, ny) in &neighbors[..n] {
                if plan.get(nx, ny).is_air() {
                    sum += field.get(nx, ny);
                    count += 1;
                }
            }

            if count > 0 {
                next.set(x, y, sum / count as f32);
            }
        }
    }
    Ok(next)
}

/// Seed value used when (re)initializing the field inside the schedule.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RelaxSettings {
    pub seed_value: f32,
}

impl Default for RelaxSettings {
    fn default() -> Self {
        Self {
            seed_value: DEFAULT_SEED_VALUE,
        }
    }
}

/// System: rebuild the static mask and reseed the field when the region map,
/// the readings, or the seed value change. Runs after region assignment so a
/// layout change reseeds from the fresh map in the same tick.
pub fn reseed_field(
    plan: Res<Floorplan>,
    regions: Res<RegionMap>,
    registry: Res<SensorRegistry>,
    readings: Res<SensorReadings>,
    settings: Res<RelaxSettings>,
    mut field: ResMut<FieldGrid>,
    mut mask: ResMut<StaticMask>,
) {
    if !regions.is_changed() && !readings.is_changed() && !settings.is_changed() {
        return;
    }
    *mask = StaticMask::from_sensors(&plan, &registry);
    match initialize_field(&plan, &regions, &readings, settings.seed_value) {
        Ok(seeded) => *field = seeded,
        Err(e) => warn!("cannot seed the field: {e}"),
    }
}

/// System: advance the field by exactly one smoothing pass per tick. The
/// schedule is the external pacemaker; nothing here loops to convergence.
pub fn relax_field(plan: Res<Floorplan>, mask: Res<StaticMask>, mut field: ResMut<FieldGrid>) {
    match relax_step(&plan, &field, &mask) {
        Ok(next) => *field = next,
        Err(e) => warn!("skipping relaxation pass: {e}"),
    }
}
