//! ASCII rendering of the floorplan and field for headless inspection.
//!
//! One character per cell, built on demand from the grids. No systems; the
//! demo binary and debugging sessions call in directly.

use bevy::prelude::*;

use crate::field::FieldGrid;
use crate::floorplan::{CellKind, Floorplan};

/// Convert one cell to its ASCII representation. Barriers render by kind;
/// air cells render a density character for their field value.
pub fn cell_char(kind: CellKind, value: f32) -> char {
    match kind {
        CellKind::Wall => '#',
        CellKind::InternalDoor => '+',
        CellKind::ExternalBarrier => 'o',
        CellKind::Air => value_char(value),
    }
}

/// Bucket an air cell's value using the thermal ramp's anchor thresholds,
/// densest character hottest.
fn value_char(value: f32) -> char {
    if value >= 3500.0 {
        '@'
    } else if value >= 3000.0 {
        '%'
    } else if value >= 2600.0 {
        '*'
    } else if value >= 2000.0 {
        '='
    } else if value >= 1500.0 {
        '-'
    } else if value >= 1000.0 {
        ':'
    } else if value > 0.0 {
        '.'
    } else {
        ' '
    }
}

/// Render the whole plan with the field overlaid, one line per row.
/// Mismatched grids render nothing beyond a diagnostic.
pub fn render_ascii(plan: &Floorplan, field: &FieldGrid) -> String {
    if field.width() != plan.width() || field.height() != plan.height() {
        warn!(
            "field {}x{} does not match plan {}x{}, nothing to render",
            field.width(),
            field.height(),
            plan.width(),
            plan.height()
        );
        return String::new();
    }

    let mut out = String::with_capacity((plan.width() + 1) * plan.height());
    for y in 0..plan.height() {
        for x in 0..plan.width() {
            out.push(cell_char(plan.get(x, y), field.get(x, y)));
        }
        out.push('\n');
    }
    out
}
