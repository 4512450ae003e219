use floorsketch_core::{
    CardinalDirection, DamageSeverity, DamageType, LShapeConfig, NotchCorner, Point, RoomShape,
};
use floorsketch_designer::damage::new_damage_zone;
use floorsketch_designer::geometry::polygon_bounds;
use floorsketch_designer::manipulation::{create_room, rotate_room};
use floorsketch_designer::{damage_zone_area, damage_zone_plan_polygons, damage_zone_polygons};

fn kitchen() -> floorsketch_core::RoomGeometry {
    create_room("Kitchen", RoomShape::Rectangle, 10.0, 12.0, 8.0, None, None).unwrap()
}

#[test]
fn test_single_wall_strip() {
    let room = kitchen();
    let zone = new_damage_zone(
        DamageType::Water,
        DamageSeverity::Moderate,
        vec![CardinalDirection::South],
        2.0,
    );
    let polygons = damage_zone_polygons(&room, &zone);
    assert_eq!(polygons.len(), 1);
    let b = polygon_bounds(&polygons[0]);
    assert_eq!((b.min_x, b.min_y, b.max_x, b.max_y), (0.0, 10.0, 10.0, 12.0));
    assert_eq!(damage_zone_area(&room, &zone), 20.0);
}

#[test]
fn test_adjacent_strips_subtract_corner_overlap() {
    let room = kitchen();
    let zone = new_damage_zone(
        DamageType::Mold,
        DamageSeverity::Severe,
        vec![CardinalDirection::North, CardinalDirection::East],
        2.0,
    );
    // 10x2 + 2x12 minus the shared 2x2 corner.
    assert_eq!(damage_zone_area(&room, &zone), 40.0);
}

#[test]
fn test_extent_is_clamped_to_room() {
    let room = kitchen();
    let zone = new_damage_zone(
        DamageType::Fire,
        DamageSeverity::Severe,
        vec![CardinalDirection::West],
        50.0,
    );
    assert_eq!(damage_zone_area(&room, &zone), 120.0);
}

#[test]
fn test_outline_overrides_walls() {
    let room = kitchen();
    let mut zone = new_damage_zone(
        DamageType::Water,
        DamageSeverity::Minor,
        vec![CardinalDirection::North],
        1.0,
    );
    zone.polygon = Some(vec![
        Point::new(1.0, 1.0),
        Point::new(4.0, 1.0),
        Point::new(4.0, 3.0),
        Point::new(1.0, 3.0),
    ]);
    assert_eq!(damage_zone_polygons(&room, &zone).len(), 1);
    assert_eq!(damage_zone_area(&room, &zone), 6.0);
}

#[test]
fn test_plan_polygons_follow_origin() {
    let mut room = kitchen();
    room.origin_x_ft = 20.0;
    room.origin_y_ft = 5.0;
    let zone = new_damage_zone(
        DamageType::Smoke,
        DamageSeverity::Minor,
        vec![CardinalDirection::North],
        1.0,
    );
    let polygons = damage_zone_plan_polygons(&room, &zone);
    let b = polygon_bounds(&polygons[0]);
    assert_eq!((b.min_x, b.min_y), (20.0, 5.0));
}

#[test]
fn test_zero_extent_has_no_footprint() {
    let room = kitchen();
    let zone = new_damage_zone(
        DamageType::Water,
        DamageSeverity::Minor,
        vec![CardinalDirection::North],
        -3.0,
    );
    assert_eq!(zone.extent_ft, 0.0);
    assert!(damage_zone_polygons(&room, &zone).is_empty());
    assert_eq!(damage_zone_area(&room, &zone), 0.0);
}

#[test]
fn test_rotation_remaps_affected_walls() {
    let mut room = kitchen();
    room.damage_zones.push(new_damage_zone(
        DamageType::Water,
        DamageSeverity::Moderate,
        vec![CardinalDirection::North],
        2.0,
    ));
    let rotated = rotate_room(&room, 90).unwrap();
    assert_eq!(
        rotated.damage_zones[0].affected_walls,
        vec![CardinalDirection::East]
    );
}

#[test]
fn test_opposite_strips_count_overlap_once() {
    let room = kitchen();
    let zone = new_damage_zone(
        DamageType::Water,
        DamageSeverity::Moderate,
        vec![CardinalDirection::North, CardinalDirection::South],
        8.0,
    );
    // Both bands reach past the middle of the 12 ft room.
    assert_eq!(damage_zone_area(&room, &zone), 120.0);
}

#[test]
fn test_repeated_wall_counts_once() {
    let room = kitchen();
    let zone = new_damage_zone(
        DamageType::Water,
        DamageSeverity::Minor,
        vec![CardinalDirection::North, CardinalDirection::North],
        2.0,
    );
    assert_eq!(damage_zone_polygons(&room, &zone).len(), 1);
    assert_eq!(damage_zone_area(&room, &zone), 20.0);
}

fn l_room() -> floorsketch_core::RoomGeometry {
    let config = LShapeConfig {
        notch_corner: NotchCorner::NorthEast,
        notch_width_ft: 6.0,
        notch_length_ft: 5.0,
    };
    create_room("Den", RoomShape::LShape, 20.0, 14.0, 8.0, Some(config), None).unwrap()
}

#[test]
fn test_l_shape_north_strips_follow_notch() {
    let room = l_room();
    let zone = new_damage_zone(
        DamageType::Water,
        DamageSeverity::Moderate,
        vec![CardinalDirection::North],
        2.0,
    );
    // 14x2 along the outer north wall plus 6x2 below the notch.
    assert_eq!(damage_zone_polygons(&room, &zone).len(), 2);
    assert_eq!(damage_zone_area(&room, &zone), 40.0);
}

#[test]
fn test_l_shape_strip_excludes_notch() {
    let room = l_room();
    let zone = new_damage_zone(
        DamageType::Water,
        DamageSeverity::Severe,
        vec![CardinalDirection::South],
        10.0,
    );
    // 20x10 band minus the 6x1 slice that falls inside the notch.
    assert_eq!(damage_zone_area(&room, &zone), 194.0);
}
