use floorsketch_core::{RoomGeometry, RoomShape};
use floorsketch_designer::batch::{align_rooms, distribute_rooms, equalize_target};
use floorsketch_designer::manipulation::create_room;
use floorsketch_designer::{
    derive_walls, Alignment, DistributeAxis, EqualizeMode, RoomManipulationStore,
};
use floorsketch_settings::Config;

fn room_at(name: &str, width: f64, length: f64, x: f64, y: f64) -> RoomGeometry {
    let mut room = create_room(name, RoomShape::Rectangle, width, length, 8.0, None, None).unwrap();
    room.origin_x_ft = x;
    room.origin_y_ft = y;
    room
}

fn ids(rooms: &[RoomGeometry]) -> Vec<String> {
    rooms.iter().map(|r| r.id.clone()).collect()
}

#[test]
fn test_align_left_moves_to_leftmost_edge() {
    let mut store = RoomManipulationStore::from_config(&Config::default());
    let rooms = vec![
        room_at("A", 10.0, 10.0, 2.0, 0.0),
        room_at("B", 6.0, 6.0, 7.0, 20.0),
    ];
    let op = store.plan_align(&rooms, &ids(&rooms), Alignment::Left).unwrap();
    let aligned = store.commit(&rooms, op);
    assert_eq!(aligned[0].origin_x_ft, 2.0);
    assert_eq!(aligned[1].origin_x_ft, 2.0);
    assert_eq!(aligned[1].origin_y_ft, 20.0);

    let undone = store.undo(&aligned).unwrap();
    assert_eq!(undone, rooms);
}

#[test]
fn test_align_centers() {
    let rooms = vec![
        room_at("A", 10.0, 10.0, 0.0, 0.0),
        room_at("B", 4.0, 4.0, 20.0, 30.0),
    ];
    let deltas = align_rooms(&rooms, &ids(&rooms), Alignment::CenterH).unwrap();
    // Average of centers 5 and 22.
    assert_eq!(deltas[0].dx, 8.5);
    assert_eq!(deltas[1].dx, -8.5);
    assert!(deltas.iter().all(|d| d.dy == 0.0));
}

#[test]
fn test_align_needs_two_rooms() {
    let rooms = vec![room_at("A", 10.0, 10.0, 0.0, 0.0)];
    assert!(align_rooms(&rooms, &ids(&rooms), Alignment::Top).is_err());
}

#[test]
fn test_distribute_horizontally_equalizes_gaps() {
    let rooms = vec![
        room_at("A", 4.0, 4.0, 0.0, 0.0),
        room_at("B", 4.0, 4.0, 5.0, 0.0),
        room_at("C", 4.0, 4.0, 20.0, 0.0),
    ];
    let deltas = distribute_rooms(&rooms, &ids(&rooms), DistributeAxis::Horizontal).unwrap();
    // Span 24, sizes 12, two gaps of 6: B starts at 10.
    let b = deltas.iter().find(|d| d.room_id == rooms[1].id).unwrap();
    assert_eq!(b.dx, 5.0);
    assert!(deltas
        .iter()
        .filter(|d| d.room_id != rooms[1].id)
        .all(|d| d.dx == 0.0));

    assert!(distribute_rooms(&rooms[..2], &ids(&rooms[..2]), DistributeAxis::Vertical).is_err());
}

#[test]
fn test_equalize_targets() {
    let lengths = [8.0, 10.0, 12.0];
    assert_eq!(equalize_target(&lengths, EqualizeMode::Average), Some(10.0));
    assert_eq!(equalize_target(&lengths, EqualizeMode::Max), Some(12.0));
    assert_eq!(equalize_target(&lengths, EqualizeMode::Min), Some(8.0));
    assert_eq!(equalize_target(&lengths, EqualizeMode::Explicit(9.0)), Some(9.0));
    assert_eq!(equalize_target(&[], EqualizeMode::Average), None);
}

#[test]
fn test_equalize_walls_reshapes_owners() {
    let mut store = RoomManipulationStore::from_config(&Config::default());
    let rooms = vec![
        room_at("A", 8.0, 10.0, 0.0, 0.0),
        room_at("B", 12.0, 10.0, 30.0, 0.0),
    ];
    let walls = derive_walls(&rooms, 0.1);
    let north_walls: Vec<_> = walls.iter().filter(|w| w.wall_index == 0).cloned().collect();
    assert_eq!(north_walls.len(), 2);

    let op = store
        .plan_equalize(&rooms, &north_walls, EqualizeMode::Average)
        .unwrap();
    let equalized = store.commit(&rooms, op);
    assert_eq!(equalized[0].width_ft, 10.0);
    assert_eq!(equalized[1].width_ft, 10.0);
    assert_eq!(equalized[0].length_ft, 10.0);

    let undone = store.undo(&equalized).unwrap();
    assert_eq!(undone, rooms);
}

#[test]
fn test_equalize_shared_wall_reshapes_both_sides() {
    let mut store = RoomManipulationStore::from_config(&Config::default());
    let rooms = vec![
        room_at("A", 10.0, 8.0, 0.0, 0.0),
        room_at("B", 10.0, 6.0, 0.0, 8.0),
        room_at("C", 6.0, 6.0, 30.0, 0.0),
    ];
    let walls = derive_walls(&rooms, 0.1);
    let seam = walls.iter().find(|w| w.is_shared()).cloned().unwrap();
    let c_north = walls
        .iter()
        .find(|w| w.parent_room_id == rooms[2].id && w.wall_index == 0)
        .cloned()
        .unwrap();

    let op = store
        .plan_equalize(&rooms, &[seam, c_north], EqualizeMode::Average)
        .unwrap();
    let equalized = store.commit(&rooms, op);
    assert!(equalized.iter().all(|r| r.width_ft == 8.0));
    assert_eq!(equalized[0].length_ft, 8.0);
    assert_eq!(equalized[1].length_ft, 6.0);

    let rederived = derive_walls(&equalized, 0.1);
    assert_eq!(rederived.iter().filter(|w| w.is_shared()).count(), 1);

    let undone = store.undo(&equalized).unwrap();
    assert_eq!(undone, rooms);
}
