use floorsketch_core::{CardinalDirection, ConnectionPoint, ConnectionType, RoomGeometry, RoomShape};
use floorsketch_designer::floor_plan::{new_floor_plan, plan_summary, relative_origin, total_area};
use floorsketch_designer::manipulation::create_room;
use floorsketch_designer::{
    add_room, add_room_relative, connect_rooms, disconnect_rooms, find_room, find_room_at_point,
    remove_room,
};

fn room(name: &str, width: f64, length: f64) -> RoomGeometry {
    create_room(name, RoomShape::Rectangle, width, length, 8.0, None, None).unwrap()
}

#[test]
fn test_room_east_of_reference_is_centered() {
    let mut plan = new_floor_plan("Main");
    add_room(&mut plan, room("A", 10.0, 12.0)).unwrap();
    add_room_relative(&mut plan, room("B", 8.0, 6.0), "A", CardinalDirection::East, 0.0).unwrap();

    let b = find_room(&plan.rooms, "B").unwrap();
    assert_eq!(b.origin_x_ft, 10.0);
    assert_eq!(b.origin_y_ft, 3.0);
    assert_eq!((plan.width_ft, plan.length_ft), (18.0, 12.0));
}

#[test]
fn test_relative_directions_with_gap() {
    let a = room("A", 10.0, 12.0);
    let b = room("B", 4.0, 4.0);
    let north = relative_origin(&a, &b, CardinalDirection::North, 1.0);
    assert_eq!((north.x, north.y), (3.0, -5.0));
    let west = relative_origin(&a, &b, CardinalDirection::West, 0.5);
    assert_eq!((west.x, west.y), (-4.5, 4.0));
    let south = relative_origin(&a, &b, CardinalDirection::South, 0.0);
    assert_eq!((south.x, south.y), (3.0, 12.0));
}

#[test]
fn test_unknown_reference_is_an_error() {
    let mut plan = new_floor_plan("Main");
    let err = add_room_relative(&mut plan, room("B", 8.0, 6.0), "A", CardinalDirection::East, 0.0)
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(plan.rooms.is_empty());
}

#[test]
fn test_duplicate_room_is_rejected() {
    let mut plan = new_floor_plan("Main");
    let a = room("A", 10.0, 12.0);
    add_room(&mut plan, a.clone()).unwrap();
    assert!(add_room(&mut plan, a).is_err());
}

#[test]
fn test_connections_follow_room_removal() {
    let mut plan = new_floor_plan("Main");
    add_room(&mut plan, room("A", 10.0, 12.0)).unwrap();
    add_room_relative(&mut plan, room("B", 10.0, 12.0), "A", CardinalDirection::East, 0.0).unwrap();

    let point = |room: &str, wall| ConnectionPoint {
        room_id: room.to_string(),
        wall,
        position_ft: 6.0,
    };
    let id = connect_rooms(
        &mut plan,
        point("A", CardinalDirection::East),
        point("B", CardinalDirection::West),
        ConnectionType::Door,
    )
    .unwrap();
    assert_eq!(plan.connections.len(), 1);
    assert!(plan.connection(&id).is_some());
    assert_ne!(plan.connections[0].from.room_id, "A");

    assert!(connect_rooms(
        &mut plan,
        point("A", CardinalDirection::East),
        point("A", CardinalDirection::West),
        ConnectionType::Opening,
    )
    .is_err());

    let removed = remove_room(&mut plan, "B").unwrap();
    assert_eq!(removed.name, "B");
    assert!(plan.connections.is_empty());
    assert!(disconnect_rooms(&mut plan, &id).is_err());
}

#[test]
fn test_room_lookup_at_point_and_summary() {
    let mut plan = new_floor_plan("Main");
    add_room(&mut plan, room("A", 10.0, 12.0)).unwrap();
    add_room_relative(&mut plan, room("B", 10.0, 12.0), "A", CardinalDirection::East, 0.0).unwrap();

    let hit = find_room_at_point(&plan.rooms, &floorsketch_core::Point::new(15.0, 6.0)).unwrap();
    assert_eq!(hit.name, "B");
    assert_eq!(total_area(&plan.rooms), 240.0);
    let summary = plan_summary(&plan);
    assert!(summary.contains("2 room(s)"));
    assert!(summary.contains("240 square feet"));
}
