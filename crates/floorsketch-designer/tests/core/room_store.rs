use floorsketch_core::{Point, RoomGeometry, RoomShape};
use floorsketch_designer::manipulation::create_room;
use floorsketch_designer::{RoomManipulationStore, RoomOperation};
use floorsketch_settings::Config;

fn room_at(name: &str, x: f64, y: f64) -> RoomGeometry {
    let mut room = create_room(name, RoomShape::Rectangle, 10.0, 12.0, 8.0, None, None).unwrap();
    room.origin_x_ft = x;
    room.origin_y_ft = y;
    room
}

fn store() -> RoomManipulationStore {
    RoomManipulationStore::from_config(&Config::default())
}

#[test]
fn test_move_and_undo() {
    let mut store = store();
    let rooms = vec![room_at("Kitchen", 0.0, 0.0)];
    let moved = store.move_room(&rooms, "Kitchen", 3.0, -2.0);
    assert_eq!(moved[0].origin(), Point::new(3.0, -2.0));
    assert!(store.can_undo());

    let undone = store.undo(&moved).unwrap();
    assert_eq!(undone[0].origin(), Point::new(0.0, 0.0));
    let redone = store.redo(&undone).unwrap();
    assert_eq!(redone[0].origin(), Point::new(3.0, -2.0));
}

#[test]
fn test_unknown_room_leaves_rooms_unchanged() {
    let mut store = store();
    let rooms = vec![room_at("Kitchen", 0.0, 0.0)];
    let same = store.move_room(&rooms, "Attic", 3.0, 0.0);
    assert_eq!(same, rooms);
    assert!(!store.can_undo());
    assert!(store.plan_move(&rooms, "Attic", 3.0, 0.0).is_err());
}

#[test]
fn test_copy_undo_removes_exactly_the_copy() {
    let mut store = store();
    let rooms = vec![room_at("Kitchen", 0.0, 0.0), room_at("Den", 20.0, 0.0)];
    let copied = store.copy_room(&rooms, "Kitchen");
    assert_eq!(copied.len(), 3);

    let copy = copied[2].clone();
    assert_ne!(copy.id, rooms[0].id);
    assert_eq!(copy.origin(), Point::new(2.0, 2.0));
    assert_eq!(store.selection().primary(), Some(copy.id.as_str()));

    let undone = store.undo(&copied).unwrap();
    assert_eq!(undone, rooms);
    assert!(!store.selection().is_selected(&copy.id));

    let redone = store.redo(&undone).unwrap();
    assert_eq!(redone.len(), 3);
    assert!(redone.iter().any(|r| r.id == copy.id));
}

#[test]
fn test_rotate_swaps_dimensions() {
    let mut store = store();
    let rooms = vec![room_at("Kitchen", 0.0, 0.0)];
    let rotated = store.rotate_room(&rooms, "Kitchen", 90);
    assert_eq!((rotated[0].width_ft, rotated[0].length_ft), (12.0, 10.0));
    let undone = store.undo(&rotated).unwrap();
    assert_eq!(undone[0], rooms[0]);
}

#[test]
fn test_resize_regenerates_polygon() {
    let mut store = store();
    let rooms = vec![room_at("Kitchen", 0.0, 0.0)];
    let resized = store.resize_room(&rooms, "Kitchen", 14.0, 9.0);
    let bounds = resized[0].local_bounds();
    assert_eq!((bounds.width(), bounds.height()), (14.0, 9.0));
}

#[test]
fn test_drag_records_single_move() {
    let mut store = store();
    let rooms = vec![room_at("Kitchen", 0.0, 0.0), room_at("Den", 40.0, 0.0)];
    store.start_drag(&rooms, "Kitchen", Point::new(5.0, 5.0)).unwrap();
    assert!(store.is_dragging());

    let (step1, _) = store.update_drag(&rooms, Point::new(6.0, 5.0));
    let (step2, _) = store.update_drag(&step1, Point::new(8.0, 6.0));
    assert_eq!(step2[0].origin(), Point::new(3.0, 1.0));

    match store.end_drag() {
        Some(RoomOperation::Move { dx, dy, .. }) => assert_eq!((dx, dy), (3.0, 1.0)),
        other => panic!("unexpected drag result {:?}", other),
    }
    assert_eq!(store.history().undo_depth(), 1);
    let undone = store.undo(&step2).unwrap();
    assert_eq!(undone[0].origin(), Point::new(0.0, 0.0));
}

#[test]
fn test_drag_cancel_restores_snapshot() {
    let mut store = store();
    let rooms = vec![room_at("Kitchen", 0.0, 0.0)];
    store.start_drag(&rooms, "Kitchen", Point::new(5.0, 5.0)).unwrap();
    let (moved, _) = store.update_drag(&rooms, Point::new(9.0, 9.0));
    assert_ne!(moved, rooms);

    let restored = store.cancel_drag().unwrap();
    assert_eq!(restored, rooms);
    assert!(!store.is_dragging());
    assert!(!store.can_undo());
}

#[test]
fn test_drag_without_motion_records_nothing() {
    let mut store = store();
    let rooms = vec![room_at("Kitchen", 0.0, 0.0)];
    store.start_drag(&rooms, "Kitchen", Point::new(5.0, 5.0)).unwrap();
    assert!(store.end_drag().is_none());
    assert!(!store.can_undo());
}

#[test]
fn test_select_at_point_picks_room() {
    let mut store = store();
    let rooms = vec![room_at("Kitchen", 0.0, 0.0), room_at("Den", 10.0, 0.0)];
    let picked = store
        .selection_mut()
        .select_at_point(&rooms, &Point::new(15.0, 6.0), false);
    assert_eq!(picked.as_deref(), Some(rooms[1].id.as_str()));

    let missed = store
        .selection_mut()
        .select_at_point(&rooms, &Point::new(50.0, 50.0), false);
    assert!(missed.is_none());
}
