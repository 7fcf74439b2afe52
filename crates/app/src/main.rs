//! Headless demo: two rooms, two sensors, a doorway between them.
//!
//! Builds the scenario, drives the schedule for a fixed number of smoothing
//! passes, and prints the ASCII view plus the colors a renderer would use.

use bevy::prelude::*;

use simulation::ascii_map::render_ascii;
use simulation::field::FieldGrid;
use simulation::floorplan::{CellKind, Floorplan};
use simulation::gradient::{legend_stops, value_to_color};
use simulation::sensors::{SensorReadings, SensorRegistry};
use simulation::SimulationPlugin;

const PASSES: u32 = 200;

fn main() {
    let plan = match build_plan() {
        Ok(plan) => plan,
        Err(e) => {
            eprintln!("bad demo floorplan: {e}");
            return;
        }
    };

    let mut registry = SensorRegistry::default();
    let mut readings = SensorReadings::default();
    for &(id, x, y, value) in &[(0u32, 4usize, 5usize, 2150.0f32), (1, 19, 5, 1450.0)] {
        if let Err(e) = registry.add(&plan, id, x, y) {
            eprintln!("cannot place sensor {id}: {e}");
            return;
        }
        if let Err(e) = readings.set(&registry, id, value) {
            eprintln!("cannot record reading for sensor {id}: {e}");
            return;
        }
    }

    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(SimulationPlugin);
    app.insert_resource(plan);
    app.insert_resource(registry);
    app.insert_resource(readings);

    // One update so plugin setup completes, then drive the schedule by hand.
    app.update();
    for _ in 0..PASSES {
        app.world_mut().run_schedule(FixedUpdate);
    }

    let plan = app.world().resource::<Floorplan>();
    let field = app.world().resource::<FieldGrid>();

    println!("{}", render_ascii(plan, field));

    println!("sampled cells after {PASSES} passes:");
    for (x, y) in [(4, 5), (11, 5), (12, 6), (13, 5), (19, 5)] {
        let value = field.get(x, y);
        println!(
            "  ({x:>2},{y}) value {value:>7.1} color {}",
            value_to_color(value).to_hex()
        );
    }

    println!("legend:");
    for (display, color) in legend_stops(4000.0, 0.0, -500.0) {
        println!("  {display:>5.1} {}", color.to_hex());
    }
}

/// A 24x12 plan: bounding ring, a dividing wall at x=12 with a one-cell
/// doorway, and a window cell on the east wall for the classification demo.
fn build_plan() -> Result<Floorplan, simulation::errors::ConfigError> {
    let mut plan = Floorplan::new(24, 12)?;
    plan.place_wall(12, 0, 12, 11);
    plan.set_kind(12, 6, CellKind::Air);
    plan.set_kind(12, 2, CellKind::InternalDoor);
    plan.set_kind(23, 5, CellKind::ExternalBarrier);
    Ok(plan)
}
