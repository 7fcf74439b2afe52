use std::collections::BTreeMap;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, UnknownSensorError};
use crate::floorplan::Floorplan;

/// A point measurement source occupying exactly one air cell.
///
/// Identity (id and position) is immutable after registration; the current
/// reading lives in [`SensorReadings`] and changes over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sensor {
    pub id: u32,
    pub x: usize,
    pub y: usize,
}

/// Registered sensors, keyed by id.
///
/// Replaced wholesale (together with the floorplan) when a scenario is
/// reconfigured; the region map is recomputed whenever this changes.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorRegistry {
    sensors: BTreeMap<u32, Sensor>,
}

impl SensorRegistry {
    /// Register a sensor at an air cell inside the plan.
    ///
    /// Fails without touching the registry when the id is taken, the cell is
    /// out of bounds or not air, or another sensor already claims the cell.
    pub fn add(
        &mut self,
        plan: &Floorplan,
        id: u32,
        x: usize,
        y: usize,
    ) -> Result<(), ConfigError> {
        if self.sensors.contains_key(&id) {
            return Err(ConfigError::DuplicateSensorId { id });
        }
        if !plan.in_bounds(x, y) {
            return Err(ConfigError::OutOfBounds {
                x,
                y,
                width: plan.width(),
                height: plan.height(),
            });
        }
        if !plan.get(x, y).is_air() {
            return Err(ConfigError::NotAir { x, y });
        }
        if let Some(occupant) = self.sensor_at(x, y) {
            return Err(ConfigError::CellOccupied {
                x,
                y,
                occupant: occupant.id,
            });
        }
        self.sensors.insert(id, Sensor { id, x, y });
        Ok(())
    }

    pub fn get(&self, id: u32) -> Option<&Sensor> {
        self.sensors.get(&id)
    }

    pub fn sensor_at(&self, x: usize, y: usize) -> Option<&Sensor> {
        self.sensors.values().find(|s| s.x == x && s.y == y)
    }

    /// Sensors in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Sensor> {
        self.sensors.values()
    }

    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }
}

/// Latest reading per sensor id, settable independently of registration.
///
/// An id with no recorded value reads as `None` ("unassigned") rather than a
/// sentinel number, so legitimate readings can never collide with "missing".
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorReadings {
    values: BTreeMap<u32, f32>,
}

impl SensorReadings {
    /// Record a reading for a registered sensor.
    ///
    /// Submitting for an unregistered id fails with [`UnknownSensorError`];
    /// the stored readings are unchanged.
    pub fn set(
        &mut self,
        registry: &SensorRegistry,
        id: u32,
        value: f32,
    ) -> Result<(), UnknownSensorError> {
        if registry.get(id).is_none() {
            return Err(UnknownSensorError { id });
        }
        self.values.insert(id, value);
        Ok(())
    }

    /// The latest reading for `id`, or `None` when nothing was recorded.
    pub fn get(&self, id: u32) -> Option<f32> {
        self.values.get(&id).copied()
    }
}
