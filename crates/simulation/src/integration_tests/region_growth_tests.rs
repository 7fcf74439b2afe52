//! Region assignment through the scheduled pipeline.

use crate::floorplan::Floorplan;
use crate::test_harness::TestRoom;

fn plan(width: usize, height: usize) -> Floorplan {
    Floorplan::new(width, height).expect("valid dimensions")
}

#[test]
fn test_two_sensor_plan_splits_on_first_tick() {
    let mut room = TestRoom::new(plan(10, 5))
        .with_sensor(0, 2, 2)
        .with_sensor(1, 7, 2);
    room.tick(1);

    let regions = room.regions();
    for y in 1..4 {
        for x in 1..9 {
            assert!(regions.get(x, y).is_some(), "cell ({x},{y}) unowned");
        }
    }
    assert_eq!(regions.get(4, 2), Some(0));
    assert_eq!(regions.get(5, 2), Some(1));
}

#[test]
fn test_no_sensors_leaves_map_unassigned() {
    let mut room = TestRoom::new(plan(10, 5));
    room.tick(1);
    assert_eq!(room.regions().assigned_count(), 0);
}

#[test]
fn test_sealed_pocket_never_hangs_the_schedule() {
    let mut walled = plan(10, 7);
    walled.place_wall(5, 2, 7, 2);
    walled.place_wall(5, 4, 7, 4);
    walled.place_wall(5, 2, 5, 4);
    walled.place_wall(7, 2, 7, 4);

    let mut room = TestRoom::new(walled).with_sensor(0, 2, 3);
    room.tick(3);

    assert_eq!(room.regions().get(6, 3), None, "pocket stays unowned");
    assert_eq!(room.regions().get(2, 3), Some(0));
}

#[test]
fn test_sensor_cells_are_pinned_in_the_mask() {
    let mut room = TestRoom::new(plan(10, 5))
        .with_sensor(0, 2, 2)
        .with_sensor(1, 7, 2);
    room.tick(1);

    let mask = room.mask();
    assert!(mask.is_pinned(2, 2));
    assert!(mask.is_pinned(7, 2));
    assert!(!mask.is_pinned(4, 2));
}
