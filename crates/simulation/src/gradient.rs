//! Value-to-color mapping for the field overlay.
//!
//! A fixed thermal ramp maps stored values (100x the displayed reading) onto
//! seven anchor colors with piecewise-linear interpolation in between. The
//! anchors live in an ordered (threshold, color) table so an alternate ramp
//! can be swapped in without touching the interpolation math.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::LEGEND_SCALE;

/// An sRGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb` form for canvas-style renderers.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

pub const WHITE_RED: Rgb = Rgb::new(255, 107, 107);
pub const RED: Rgb = Rgb::new(255, 17, 17);
pub const YELLOW: Rgb = Rgb::new(255, 233, 17);
pub const GREEN: Rgb = Rgb::new(14, 212, 14);
pub const BLUE: Rgb = Rgb::new(22, 41, 85);
pub const PURPLE: Rgb = Rgb::new(92, 28, 123);
pub const BLACK_GREEN: Rgb = Rgb::new(50, 83, 60);

/// A continuous ramp over an ascending (threshold, color) anchor table.
/// Values outside the table clamp to the end anchors.
pub struct GradientRamp {
    anchors: &'static [(f32, Rgb)],
}

impl GradientRamp {
    /// Map a value to its color.
    pub fn sample(&self, value: f32) -> Rgb {
        let Some(&(first_t, first_c)) = self.anchors.first() else {
            return Rgb::new(0, 0, 0);
        };
        let (last_t, last_c) = self.anchors[self.anchors.len() - 1];
        if value < first_t {
            return first_c;
        }
        if value >= last_t {
            return last_c;
        }
        for pair in self.anchors.windows(2) {
            let (lo_t, lo_c) = pair[0];
            let (hi_t, hi_c) = pair[1];
            if value < hi_t {
                return interpolate(lo_c, hi_c, (value - lo_t) / (hi_t - lo_t));
            }
        }
        last_c
    }
}

/// The thermal ramp: cold black-green through purple, blue, green, yellow
/// and red up to a washed-out hot red. Thresholds are stored values (divide
/// by [`LEGEND_SCALE`] for the displayed reading).
pub static THERMAL: GradientRamp = GradientRamp {
    anchors: &[
        (0.0, BLACK_GREEN),
        (1000.0, PURPLE),
        (1500.0, BLUE),
        (2000.0, GREEN),
        (2600.0, YELLOW),
        (3000.0, RED),
        (3500.0, WHITE_RED),
    ],
};

/// Map a field value onto the thermal ramp.
pub fn value_to_color(value: f32) -> Rgb {
    THERMAL.sample(value)
}

/// Blend two colors, channel by channel, rounding to the nearest integer.
///
/// The fraction is clamped to [0, 1] with a diagnostic; correct bucket math
/// never produces an out-of-range fraction, so a warning here points at a
/// broken anchor table.
pub fn interpolate(a: Rgb, b: Rgb, fraction: f32) -> Rgb {
    let f = if (0.0..=1.0).contains(&fraction) {
        fraction
    } else {
        warn!("invalid interpolation fraction: {fraction}");
        fraction.clamp(0.0, 1.0)
    };
    let mix = |ca: u8, cb: u8| (cb as f32 * f + ca as f32 * (1.0 - f)).round() as u8;
    Rgb::new(mix(a.r, b.r), mix(a.g, b.g), mix(a.b, b.b))
}

/// Rows for a legend strip: raw values from `start` toward `end` in `step`
/// increments, paired with the displayed reading (value / [`LEGEND_SCALE`])
/// and the ramp color. A step of zero or one pointing away from `end`
/// yields no rows.
pub fn legend_stops(start: f32, end: f32, step: f32) -> Vec<(f32, Rgb)> {
    if step == 0.0 || (end - start) * step < 0.0 {
        warn!("unusable legend step {step} for range {start}..{end}");
        return Vec::new();
    }
    let mut rows = Vec::new();
    let mut value = start;
    loop {
        rows.push((value / LEGEND_SCALE, THERMAL.sample(value)));
        value += step;
        if (step > 0.0 && value > end) || (step < 0.0 && value < end) {
            return rows;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_thresholds_map_to_exact_anchor_colors() {
        assert_eq!(value_to_color(0.0), BLACK_GREEN);
        assert_eq!(value_to_color(1000.0), PURPLE);
        assert_eq!(value_to_color(1500.0), BLUE);
        assert_eq!(value_to_color(2000.0), GREEN);
        assert_eq!(value_to_color(2600.0), YELLOW);
        assert_eq!(value_to_color(3000.0), RED);
        assert_eq!(value_to_color(3500.0), WHITE_RED);
    }

    #[test]
    fn test_out_of_range_values_clamp() {
        assert_eq!(value_to_color(4000.0), WHITE_RED);
        assert_eq!(value_to_color(-500.0), BLACK_GREEN);
    }

    #[test]
    fn test_midpoint_blends_channels_independently() {
        // Halfway between GREEN (14,212,14) and YELLOW (255,233,17).
        let c = value_to_color(2300.0);
        assert_eq!(c, Rgb::new(135, 223, 16));
    }

    #[test]
    fn test_steps_within_a_bucket_are_proportional() {
        // The [2000, 2600] bucket moves the red channel by 241 over 600
        // units, so equal value steps give equal channel steps (within
        // rounding).
        let r1 = value_to_color(2150.0).r as i32;
        let r2 = value_to_color(2300.0).r as i32;
        let r3 = value_to_color(2450.0).r as i32;
        assert!((r2 - r1 - (r3 - r2)).abs() <= 1, "got {r1}, {r2}, {r3}");
        assert!(r1 < r2 && r2 < r3);
    }

    #[test]
    fn test_continuity_at_bucket_edges() {
        // Approaching a threshold from below should land next to the anchor.
        let below = value_to_color(2999.0);
        assert!((below.r as i32 - RED.r as i32).abs() <= 1);
        assert!((below.g as i32 - RED.g as i32).abs() <= 2);
        assert!((below.b as i32 - RED.b as i32).abs() <= 1);
    }

    #[test]
    fn test_interpolate_endpoints() {
        assert_eq!(interpolate(BLUE, GREEN, 0.0), BLUE);
        assert_eq!(interpolate(BLUE, GREEN, 1.0), GREEN);
    }

    #[test]
    fn test_interpolate_clamps_bad_fraction() {
        assert_eq!(interpolate(BLUE, GREEN, -0.5), BLUE);
        assert_eq!(interpolate(BLUE, GREEN, 1.5), GREEN);
    }

    #[test]
    fn test_interpolate_rounds_to_nearest() {
        // 50% of 17 and 233 is 125.0 exactly; 50% of 255 and 14 is 134.5,
        // which must round up.
        let c = interpolate(GREEN, YELLOW, 0.5);
        assert_eq!(c.r, 135);
        assert_eq!(c.g, 223);
    }

    #[test]
    fn test_to_hex_is_lowercase_and_padded() {
        assert_eq!(Rgb::new(255, 17, 17).to_hex(), "#ff1111");
        assert_eq!(Rgb::new(0, 10, 0).to_hex(), "#000a00");
    }

    #[test]
    fn test_legend_stops_descending() {
        let rows = legend_stops(4000.0, 0.0, -500.0);
        assert_eq!(rows.len(), 9);
        assert_eq!(rows[0], (40.0, WHITE_RED));
        assert_eq!(rows[8], (0.0, BLACK_GREEN));
    }

    #[test]
    fn test_legend_stops_rejects_bad_step() {
        assert!(legend_stops(4000.0, 0.0, 500.0).is_empty());
        assert!(legend_stops(0.0, 1000.0, 0.0).is_empty());
    }

    #[test]
    fn test_nan_is_total() {
        // NaN falls through every comparison; the ramp still answers.
        let c = value_to_color(f32::NAN);
        assert_eq!(c, WHITE_RED);
    }
}
