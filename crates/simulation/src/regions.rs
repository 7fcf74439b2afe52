use std::collections::BTreeMap;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::errors::ConfigError;
use crate::floorplan::Floorplan;
use crate::sensors::SensorRegistry;

/// Per-cell owning sensor id, `None` where no sensor's region reaches.
///
/// Recomputed when the floorplan or sensor positions change; reading updates
/// alone never invalidate it.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionMap {
    owners: Vec<Option<u32>>,
    width: usize,
    height: usize,
}

impl Default for RegionMap {
    fn default() -> Self {
        Self::unassigned(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl RegionMap {
    pub fn unassigned(width: usize, height: usize) -> Self {
        Self {
            owners: vec![None; width * height],
            width,
            height,
        }
    }

    /// Rebuild a map from its parts, e.g. when restoring a persisted map.
    pub fn from_owners(
        width: usize,
        height: usize,
        owners: Vec<Option<u32>>,
    ) -> Result<Self, ConfigError> {
        if owners.len() != width * height {
            return Err(ConfigError::DimensionMismatch {
                expected: (width, height),
                found: (owners.len(), 1),
            });
        }
        Ok(Self {
            owners,
            width,
            height,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<u32> {
        self.owners[y * self.width + x]
    }

    pub fn set(&mut self, x: usize, y: usize, owner: Option<u32>) {
        self.owners[y * self.width + x] = owner;
    }

    /// Owners in row-major order, for encoding or inspection.
    pub fn owners(&self) -> &[Option<u32>] {
        &self.owners
    }

    pub fn assigned_count(&self) -> usize {
        self.owners.iter().filter(|o| o.is_some()).count()
    }
}

/// Grow sensor regions across the plan's air cells.
///
/// Multi-source frontier growth: each sensor seeds its own cell, then
/// repeated passes over the interior assign every unowned air cell the id
/// held by most of its Moore neighbors. Passes are synchronous: each tallies
/// against the map as it stood when the pass began, and ties go to the
/// lowest id, so the result depends on neither scan order nor registry
/// order. A pass that assigns nothing ends the growth, which also bounds
/// sealed air pockets with no sensor inside: their cells simply stay
/// unassigned. A pass cap of `width * height` backstops the loop.
pub fn assign_regions(
    plan: &Floorplan,
    registry: &SensorRegistry,
) -> Result<RegionMap, ConfigError> {
    if registry.is_empty() {
        return Err(ConfigError::NoSensors);
    }

    let mut map = RegionMap::unassigned(plan.width(), plan.height());
    for sensor in registry.iter() {
        // First registrant keeps a contested cell; the registry already
        // rejects stacked sensors, so this only matters for hand-built maps.
        if map.get(sensor.x, sensor.y).is_none() {
            map.set(sensor.x, sensor.y, Some(sensor.id));
        }
    }

    let pass_cap = plan.width() * plan.height();
    for _ in 0..pass_cap {
        let mut grew = false;
        let frontier = map.clone();

        for y in 1..plan.height() - 1 {
            for x in 1..plan.width() - 1 {
                if !plan.get(x, y).is_air() || frontier.get(x, y).is_some() {
                    continue;
                }

                let mut tallies: BTreeMap<u32, u32> = BTreeMap::new();
                let (neighbors, count) = plan.moore_neighbors(x, y);
                for &(nx, ny) in &neighbors[..count] {
                    if let Some(id) = frontier.get(nx, ny) {
                        *tallies.entry(id).or_insert(0) += 1;
                    }
                }

                // Highest tally wins; ascending iteration makes the lowest
                // id win ties.
                let mut winner: Option<(u32, u32)> = None;
                for (&id, &tally) in &tallies {
                    if winner.is_none_or(|(_, best)| tally > best) {
                        winner = Some((id, tally));
                    }
                }

                if let Some((id, _)) = winner {
                    map.set(x, y, Some(id));
                    grew = true;
                }
            }
        }

        if !grew {
            return Ok(map);
        }
    }

    debug!(
        "region growth stopped at the pass cap with {} of {} cells assigned",
        map.assigned_count(),
        pass_cap
    );
    Ok(map)
}

/// System: recompute the region map when the floorplan or sensor layout
/// changes. Reading updates do not pass through here.
pub fn update_regions(
    plan: Res<Floorplan>,
    registry: Res<SensorRegistry>,
    mut regions: ResMut<RegionMap>,
) {
    if !plan.is_changed() && !registry.is_changed() {
        return;
    }
    match assign_regions(&plan, &registry) {
        Ok(map) => *regions = map,
        Err(e) => {
            warn!("cannot assign sensor regions: {e}");
            *regions = RegionMap::unassigned(plan.width(), plan.height());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::floorplan::CellKind;

    fn registry_with(plan: &Floorplan, sensors: &[(u32, usize, usize)]) -> SensorRegistry {
        let mut registry = SensorRegistry::default();
        for &(id, x, y) in sensors {
            registry.add(plan, id, x, y).expect("valid placement");
        }
        registry
    }

    #[test]
    fn test_no_sensors_fails() {
        let plan = Floorplan::new(10, 5).expect("valid dimensions");
        assert_eq!(
            assign_regions(&plan, &SensorRegistry::default()),
            Err(ConfigError::NoSensors)
        );
    }

    #[test]
    fn test_single_sensor_claims_whole_interior() {
        let plan = Floorplan::new(5, 5).expect("valid dimensions");
        let registry = registry_with(&plan, &[(0, 2, 2)]);
        let map = assign_regions(&plan, &registry).expect("growth succeeds");
        for y in 1..4 {
            for x in 1..4 {
                assert_eq!(map.get(x, y), Some(0), "cell ({x},{y}) unowned");
            }
        }
        assert_eq!(map.assigned_count(), 9);
    }

    #[test]
    fn test_two_sensor_split_is_deterministic() {
        let plan = Floorplan::new(10, 5).expect("valid dimensions");
        let registry = registry_with(&plan, &[(0, 2, 2), (1, 7, 2)]);
        let map = assign_regions(&plan, &registry).expect("growth succeeds");

        for y in 1..4 {
            for x in 1..9 {
                assert!(map.get(x, y).is_some(), "cell ({x},{y}) unowned");
            }
        }
        assert_eq!(map.get(4, 2), Some(0), "nearer sensor 0 by Moore distance");
        assert_eq!(map.get(5, 2), Some(1), "nearer sensor 1 by Moore distance");
    }

    #[test]
    fn test_registration_order_does_not_change_result() {
        let plan = Floorplan::new(10, 5).expect("valid dimensions");
        let forward = registry_with(&plan, &[(0, 2, 2), (1, 7, 2)]);
        let reverse = registry_with(&plan, &[(1, 7, 2), (0, 2, 2)]);
        assert_eq!(
            assign_regions(&plan, &forward).expect("growth succeeds"),
            assign_regions(&plan, &reverse).expect("growth succeeds")
        );
    }

    #[test]
    fn test_tie_breaks_to_lowest_id() {
        // Two sensors equidistant from the middle column; every contested
        // cell must fall to the lower id.
        let plan = Floorplan::new(9, 5).expect("valid dimensions");
        let registry = registry_with(&plan, &[(2, 2, 2), (5, 6, 2)]);
        let map = assign_regions(&plan, &registry).expect("growth succeeds");
        assert_eq!(map.get(4, 2), Some(2), "midpoint tie must go to id 2");
    }

    #[test]
    fn test_walls_are_never_assigned() {
        let plan = Floorplan::new(10, 5).expect("valid dimensions");
        let registry = registry_with(&plan, &[(0, 2, 2)]);
        let map = assign_regions(&plan, &registry).expect("growth succeeds");
        for x in 0..10 {
            assert_eq!(map.get(x, 0), None);
            assert_eq!(map.get(x, 4), None);
        }
    }

    #[test]
    fn test_growth_does_not_cross_walls() {
        // Full-height wall at x=4 splits the interior; the only sensor sits
        // on the left, so the right side stays unassigned.
        let mut plan = Floorplan::new(9, 5).expect("valid dimensions");
        plan.place_wall(4, 0, 4, 4);
        let registry = registry_with(&plan, &[(0, 2, 2)]);
        let map = assign_regions(&plan, &registry).expect("growth succeeds");
        assert_eq!(map.get(2, 2), Some(0));
        assert_eq!(map.get(6, 2), None, "sealed right half must stay unowned");
    }

    #[test]
    fn test_sealed_pocket_terminates_unassigned() {
        // A 3x3 walled pocket with one air cell inside and no sensor: no
        // pass can ever assign it, so growth must stop on its own.
        let mut plan = Floorplan::new(10, 7).expect("valid dimensions");
        plan.place_wall(5, 2, 7, 2);
        plan.place_wall(5, 4, 7, 4);
        plan.place_wall(5, 2, 5, 4);
        plan.place_wall(7, 2, 7, 4);
        assert_eq!(plan.get(6, 3), CellKind::Air);

        let registry = registry_with(&plan, &[(0, 2, 3)]);
        let map = assign_regions(&plan, &registry).expect("growth terminates");
        assert_eq!(map.get(6, 3), None, "pocket cell must stay unassigned");
        assert_eq!(map.get(2, 3), Some(0));
    }

    #[test]
    fn test_from_owners_validates_length() {
        assert!(RegionMap::from_owners(4, 4, vec![None; 15]).is_err());
        assert!(RegionMap::from_owners(4, 4, vec![None; 16]).is_ok());
    }
}
