use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_HEIGHT, DEFAULT_WIDTH, MIN_AXIS};
use crate::errors::ConfigError;

/// Per-cell classification of the floorplan. Immutable once a scenario runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CellKind {
    /// Air, or any other medium the measured field permeates.
    #[default]
    Air,
    /// Impenetrable barrier with no influence on the field.
    Wall,
    /// Door between rooms. Classified for later use; currently blocks
    /// propagation exactly like a wall.
    InternalDoor,
    /// Exterior door or window. Classified for later use; currently blocks
    /// propagation exactly like a wall.
    ExternalBarrier,
}

impl CellKind {
    /// Air is the only cell kind the field propagates through.
    pub fn is_air(self) -> bool {
        matches!(self, CellKind::Air)
    }
}

/// Static classification grid for one scenario.
///
/// Both axes are at least [`MIN_AXIS`] so an interior exists inside the
/// bounding wall ring. Every derived grid (region map, static mask, field)
/// must share these dimensions.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Floorplan {
    cells: Vec<CellKind>,
    width: usize,
    height: usize,
}

impl Default for Floorplan {
    fn default() -> Self {
        Self::bounded(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl Floorplan {
    /// An all-air plan of the given size with the bounding wall ring drawn.
    ///
    /// Fails with [`ConfigError::GridTooSmall`] when either axis is below
    /// [`MIN_AXIS`].
    pub fn new(width: usize, height: usize) -> Result<Self, ConfigError> {
        if width < MIN_AXIS || height < MIN_AXIS {
            return Err(ConfigError::GridTooSmall { width, height });
        }
        Ok(Self::bounded(width, height))
    }

    /// A plan from an explicit cell grid in row-major order.
    pub fn from_cells(
        width: usize,
        height: usize,
        cells: Vec<CellKind>,
    ) -> Result<Self, ConfigError> {
        if width < MIN_AXIS || height < MIN_AXIS {
            return Err(ConfigError::GridTooSmall { width, height });
        }
        if cells.len() != width * height {
            return Err(ConfigError::DimensionMismatch {
                expected: (width, height),
                found: (cells.len(), 1),
            });
        }
        Ok(Self {
            cells,
            width,
            height,
        })
    }

    fn bounded(width: usize, height: usize) -> Self {
        let mut plan = Self {
            cells: vec![CellKind::Air; width * height],
            width,
            height,
        };
        plan.place_wall(0, 0, width - 1, 0);
        plan.place_wall(0, height - 1, width - 1, height - 1);
        plan.place_wall(0, 0, 0, height - 1);
        plan.place_wall(width - 1, 0, width - 1, height - 1);
        plan
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    #[inline]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// True for cells inside the outermost ring. Region growth and
    /// relaxation only ever update interior cells.
    #[inline]
    pub fn is_interior(&self, x: usize, y: usize) -> bool {
        x >= 1 && y >= 1 && x + 1 < self.width && y + 1 < self.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> CellKind {
        self.cells[self.index(x, y)]
    }

    /// Reclassify a single cell, e.g. to carve a doorway out of a wall run.
    /// Out-of-bounds coordinates are skipped with a diagnostic.
    pub fn set_kind(&mut self, x: usize, y: usize, kind: CellKind) {
        if !self.in_bounds(x, y) {
            warn!(
                "set_kind out of range: 0..{}x0..{}, got ({x},{y})",
                self.width, self.height
            );
            return;
        }
        let idx = self.index(x, y);
        self.cells[idx] = kind;
    }

    /// Rasterize a straight wall segment between two cells.
    ///
    /// Endpoints outside the plan reject the whole call with a diagnostic;
    /// the rest of the configuration is unaffected.
    pub fn place_wall(&mut self, x1: usize, y1: usize, x2: usize, y2: usize) {
        for (label, x, y) in [("start", x1, y1), ("end", x2, y2)] {
            if !self.in_bounds(x, y) {
                warn!(
                    "wall {label} out of range: 0..{}x0..{}, got ({x},{y})",
                    self.width, self.height
                );
                return;
            }
        }

        let dx = x2 as f32 - x1 as f32;
        let dy = y2 as f32 - y1 as f32;
        let steps = dx.abs().max(dy.abs()) as usize;
        if steps == 0 {
            let idx = self.index(x1, y1);
            self.cells[idx] = CellKind::Wall;
            return;
        }

        // Step sizes scaled so the longer axis advances one cell per step.
        let step_x = dx / steps as f32;
        let step_y = dy / steps as f32;
        for i in 0..=steps {
            let x = (x1 as f32 + (i as f32 * step_x).round()) as usize;
            let y = (y1 as f32 + (i as f32 * step_y).round()) as usize;
            let idx = self.index(x, y);
            self.cells[idx] = CellKind::Wall;
        }
    }

    /// Returns up to 8 Moore neighbors and the count of valid entries.
    /// Use `&result[..count]` to iterate over valid neighbors.
    pub fn moore_neighbors(&self, x: usize, y: usize) -> ([(usize, usize); 8], usize) {
        let mut result = [(0, 0); 8];
        let mut count = 0;
        for dy in -1i32..=1 {
            for dx in -1i32..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let nx = x as i32 + dx;
                let ny = y as i32 + dy;
                if nx >= 0 && ny >= 0 && (nx as usize) < self.width && (ny as usize) < self.height {
                    result[count] = (nx as usize, ny as usize);
                    count += 1;
                }
            }
        }
        (result, count)
    }
}
