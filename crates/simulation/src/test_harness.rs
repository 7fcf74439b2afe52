//! # TestRoom — headless integration test harness
//!
//! Wraps `bevy::app::App` + [`SimulationPlugin`] so integration tests can
//! configure a scenario, drive `FixedUpdate` manually, and assert on the
//! resulting resources without a window or renderer.

use bevy::app::App;
use bevy::prelude::*;

use crate::field::{FieldGrid, StaticMask};
use crate::floorplan::Floorplan;
use crate::regions::RegionMap;
use crate::sensors::{SensorReadings, SensorRegistry};
use crate::SimulationPlugin;

pub struct TestRoom {
    app: App,
}

impl TestRoom {
    /// A scenario over the given plan with no sensors yet.
    pub fn new(plan: Floorplan) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(SimulationPlugin);
        app.insert_resource(plan);
        Self { app }
    }

    /// Register a sensor; panics on invalid placement (test setup bug).
    pub fn with_sensor(mut self, id: u32, x: usize, y: usize) -> Self {
        self.app
            .world_mut()
            .resource_scope(|world, mut registry: Mut<SensorRegistry>| {
                let plan = world.resource::<Floorplan>();
                registry.add(plan, id, x, y).expect("sensor placement");
            });
        self
    }

    /// Record a reading; panics on an unknown id (test setup bug).
    pub fn with_reading(mut self, id: u32, value: f32) -> Self {
        self.app
            .world_mut()
            .resource_scope(|world, mut readings: Mut<SensorReadings>| {
                let registry = world.resource::<SensorRegistry>();
                readings.set(registry, id, value).expect("known sensor id");
            });
        self
    }

    /// Advance the schedule by `n` ticks (one smoothing pass each).
    pub fn tick(&mut self, n: u32) {
        for _ in 0..n {
            self.app.world_mut().run_schedule(FixedUpdate);
        }
    }

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    pub fn resource<R: Resource>(&self) -> &R {
        self.app.world().resource::<R>()
    }

    pub fn plan(&self) -> &Floorplan {
        self.resource::<Floorplan>()
    }

    pub fn regions(&self) -> &RegionMap {
        self.resource::<RegionMap>()
    }

    pub fn field(&self) -> &FieldGrid {
        self.resource::<FieldGrid>()
    }

    pub fn mask(&self) -> &StaticMask {
        self.resource::<StaticMask>()
    }
}
