//! Headless engine estimating a continuous scalar field (temperature, in
//! practice) over a 2D floorplan from sparse point sensors.
//!
//! The pipeline runs in three stages, each a pure function over explicit
//! grids with a thin system wrapper:
//!
//! 1. [`regions::assign_regions`] grows per-sensor ownership across air
//!    cells, recomputed only when the plan or sensor layout changes.
//! 2. [`field::initialize_field`] seeds the field from ownership + readings,
//!    then [`field::relax_step`] smooths it one Jacobi pass at a time with
//!    sensor cells pinned and barriers acting as missing edges.
//! 3. [`gradient::value_to_color`] maps field values onto the thermal ramp
//!    for whatever draws the result.
//!
//! All state lives in resources owned by the ECS world; the `FixedUpdate`
//! schedule is the external pacemaker driving one smoothing pass per tick.

use bevy::prelude::*;

pub mod ascii_map;
pub mod config;
pub mod errors;
pub mod field;
pub mod floorplan;
pub mod gradient;
pub mod regions;
pub mod sensors;

#[cfg(test)]
mod integration_tests;
#[cfg(test)]
pub mod test_harness;

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<floorplan::Floorplan>()
            .init_resource::<sensors::SensorRegistry>()
            .init_resource::<sensors::SensorReadings>()
            .init_resource::<regions::RegionMap>()
            .init_resource::<field::StaticMask>()
            .init_resource::<field::FieldGrid>()
            .init_resource::<field::RelaxSettings>()
            .add_systems(
                FixedUpdate,
                (
                    regions::update_regions,
                    field::reseed_field,
                    field::relax_field,
                )
                    .chain(),
            );
    }
}
