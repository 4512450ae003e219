use floorsketch_core::{RoomGeometry, RoomShape, WallType};
use floorsketch_designer::manipulation::create_room;
use floorsketch_designer::walls::wall_id;
use floorsketch_designer::WallStore;
use floorsketch_settings::Config;

fn room_at(name: &str, width: f64, x: f64) -> RoomGeometry {
    let mut room = create_room(name, RoomShape::Rectangle, width, 12.0, 8.0, None, None).unwrap();
    room.origin_x_ft = x;
    room
}

fn pair() -> Vec<RoomGeometry> {
    vec![room_at("A", 10.0, 0.0), room_at("B", 10.0, 10.0)]
}

#[test]
fn test_shared_wall_move_updates_both_rooms() {
    let mut store = WallStore::from_config(&Config::default());
    let rooms = pair();
    let shared = wall_id(&rooms[0].id, 1);

    let moved = store.move_wall(&rooms, &shared, 12.0);
    let (a, b) = (&moved[0], &moved[1]);
    assert_eq!(a.width_ft, 12.0);
    assert_eq!(b.origin_x_ft, 12.0);
    assert_eq!(b.width_ft, 8.0);
    assert_eq!(a.plan_bounds().max_x, b.plan_bounds().min_x);

    let walls = store.walls(&moved);
    assert_eq!(walls.iter().filter(|w| w.is_shared()).count(), 1);
}

#[test]
fn test_wall_move_is_clamped_by_min_room_size() {
    let mut store = WallStore::from_config(&Config::default());
    let rooms = pair();
    let shared = wall_id(&rooms[0].id, 1);

    let constraint = store.constraints(&rooms, &shared).unwrap();
    assert_eq!((constraint.min, constraint.max), (2.0, 18.0));

    let moved = store.move_wall(&rooms, &shared, 25.0);
    assert_eq!(moved[1].width_ft, 2.0);
}

#[test]
fn test_wall_move_undo_restores_both_rooms() {
    let mut store = WallStore::from_config(&Config::default());
    let rooms = pair();
    let shared = wall_id(&rooms[0].id, 1);

    let moved = store.move_wall(&rooms, &shared, 7.0);
    assert!(store.can_undo());
    let undone = store.undo(&moved).unwrap();
    assert_eq!(undone, rooms);
    let redone = store.redo(&undone).unwrap();
    assert_eq!(redone, moved);
}

#[test]
fn test_move_to_same_coordinate_is_a_no_op() {
    let mut store = WallStore::from_config(&Config::default());
    let rooms = pair();
    let shared = wall_id(&rooms[0].id, 1);
    let op = store.plan_move_wall(&rooms, &shared, 10.1).unwrap();
    assert!(op.is_none());
}

#[test]
fn test_l_shape_becomes_irregular_after_wall_move() {
    let config = floorsketch_core::LShapeConfig {
        notch_corner: floorsketch_core::NotchCorner::NorthEast,
        notch_width_ft: 4.0,
        notch_length_ft: 4.0,
    };
    let room = create_room("L", RoomShape::LShape, 12.0, 12.0, 8.0, Some(config), None).unwrap();
    let rooms = vec![room];
    let mut store = WallStore::from_config(&Config::default());
    let west = store
        .walls(&rooms)
        .iter()
        .find(|w| w.direction == floorsketch_core::CardinalDirection::West)
        .map(|w| w.id.clone())
        .unwrap();

    let moved = store.move_wall(&rooms, &west, -2.0);
    assert_eq!(moved[0].shape, RoomShape::Irregular);
    assert!(moved[0].l_shape_config.is_none());
    assert_eq!(moved[0].width_ft, 14.0);
}

#[test]
fn test_wall_attribute_edits_apply_to_every_participant() {
    let mut store = WallStore::from_config(&Config::default());
    let rooms = pair();
    let shared = wall_id(&rooms[0].id, 1);

    let updated = store.update_wall_height(&rooms, &shared, 9.0);
    assert_eq!(updated[0].wall_attributes(1).height_ft, Some(9.0));
    assert_eq!(updated[1].wall_attributes(3).height_ft, Some(9.0));

    let typed = store.update_wall_type(&updated, &shared, Some(WallType::Exterior));
    let wall = store.find_wall(&typed, &shared).unwrap();
    assert_eq!(wall.wall_type, WallType::Exterior);

    let missing = store.set_wall_missing(&typed, &shared, true);
    assert!(store.find_wall(&missing, &shared).unwrap().missing);
    assert_eq!(store.history().undo_depth(), 3);
}

#[test]
fn test_unknown_wall_is_an_error() {
    let mut store = WallStore::from_config(&Config::default());
    let rooms = pair();
    assert!(store.find_wall(&rooms, "wall-nope-0").is_err());
    assert!(store.plan_move_wall(&rooms, "wall-nope-0", 3.0).is_err());
}
